//! System message construction.

use crate::error::SystemError;
use ember_state::{AbiCodec, AbiValue, SystemMessage};
use ember_types::ValidatorAddress;
use primitive_types::U256;
use tracing::error;

/// Packages contract method calls as [`SystemMessage`]s.
///
/// Pure data construction: the message originates from the block's
/// coinbase, targets a system contract, and always carries zero value.
/// Encoding failure means the arguments do not fit the method's signature —
/// a configuration defect, reported as [`SystemError::State`] wrapping the
/// codec's encode error.
pub struct MessageBuilder<'a, A> {
    codec: &'a A,
}

impl<'a, A: AbiCodec> MessageBuilder<'a, A> {
    pub fn new(codec: &'a A) -> Self {
        Self { codec }
    }

    pub fn build(
        &self,
        from: ValidatorAddress,
        to: ValidatorAddress,
        method: &str,
        args: &[AbiValue],
    ) -> Result<SystemMessage, SystemError> {
        let data = self.codec.encode(method, args).map_err(|e| {
            error!(method, contract = %to, "failed to encode system call");
            e
        })?;
        Ok(SystemMessage {
            from,
            to,
            value: U256::zero(),
            data,
        })
    }
}
