//! Opaque ABI codec seam.
//!
//! The consensus core treats contract-call encoding as a black box: it hands
//! a method name and dynamically-typed arguments to the codec and gets bytes
//! back, and vice versa for results. The node wires in its real ABI
//! implementation; tests substitute scripted codecs.

use crate::error::StateError;
use ember_types::ValidatorAddress;
use primitive_types::U256;
use serde::{Deserialize, Serialize};

/// A dynamically-typed ABI value, the unit of [`AbiCodec`] exchange.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbiValue {
    Address(ValidatorAddress),
    Uint(U256),
    Uint64(u64),
    Bytes(Vec<u8>),
    List(Vec<AbiValue>),
}

impl AbiValue {
    /// Interpret as a 256-bit unsigned integer ([`AbiValue::Uint`] or
    /// [`AbiValue::Uint64`]).
    pub fn as_uint(&self, method: &str) -> Result<U256, StateError> {
        match self {
            Self::Uint(v) => Ok(*v),
            Self::Uint64(v) => Ok(U256::from(*v)),
            other => Err(StateError::decode(
                method,
                format!("expected uint, got {other:?}"),
            )),
        }
    }

    pub fn as_address(&self, method: &str) -> Result<ValidatorAddress, StateError> {
        match self {
            Self::Address(a) => Ok(*a),
            other => Err(StateError::decode(
                method,
                format!("expected address, got {other:?}"),
            )),
        }
    }

    pub fn as_bytes(&self, method: &str) -> Result<&[u8], StateError> {
        match self {
            Self::Bytes(b) => Ok(b),
            other => Err(StateError::decode(
                method,
                format!("expected bytes, got {other:?}"),
            )),
        }
    }

    pub fn as_list(&self, method: &str) -> Result<&[AbiValue], StateError> {
        match self {
            Self::List(items) => Ok(items),
            other => Err(StateError::decode(
                method,
                format!("expected list, got {other:?}"),
            )),
        }
    }
}

/// Encode/decode contract method calls against a fixed contract interface.
///
/// Implementations hold the resolved method signatures for the system
/// contracts they serve; an unknown method or a shape mismatch between
/// `args` and the method signature is an [`StateError::Encode`] /
/// [`StateError::Decode`].
pub trait AbiCodec {
    /// Encode a call to `method` with the given arguments, producing the
    /// full call payload (selector plus encoded arguments).
    fn encode(&self, method: &str, args: &[AbiValue]) -> Result<Vec<u8>, StateError>;

    /// Decode the raw return data of `method` into its result values.
    fn decode(&self, method: &str, data: &[u8]) -> Result<Vec<AbiValue>, StateError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uint64_widens_to_uint() {
        let v = AbiValue::Uint64(42);
        assert_eq!(v.as_uint("m").unwrap(), U256::from(42u64));
    }

    #[test]
    fn shape_mismatch_is_decode_error() {
        let v = AbiValue::Bytes(vec![1]);
        let err = v.as_address("getValidators").unwrap_err();
        assert!(matches!(err, StateError::Decode { .. }));
        assert!(err.to_string().contains("getValidators"));
    }

    #[test]
    fn list_accessor() {
        let v = AbiValue::List(vec![AbiValue::Uint64(1), AbiValue::Uint64(2)]);
        assert_eq!(v.as_list("m").unwrap().len(), 2);
        assert!(AbiValue::Uint64(0).as_list("m").is_err());
    }
}
