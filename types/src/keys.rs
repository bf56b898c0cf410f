//! Consensus vote key material.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque vote key bytes registered by a validator (e.g. a BLS public key
/// used for fast-finality vote aggregation). The election core carries the
/// key through unmodified; interpreting it belongs to the vote layer.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VoteKey(Vec<u8>);

impl VoteKey {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Debug for VoteKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Vote keys are typically 48 bytes; keep Debug output short.
        let n = self.0.len().min(4);
        write!(f, "VoteKey({} bytes, {}…)", self.0.len(), hex::encode(&self.0[..n]))
    }
}

impl From<Vec<u8>> for VoteKey {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl From<&[u8]> for VoteKey {
    fn from(bytes: &[u8]) -> Self {
        Self(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_bytes() {
        let key = VoteKey::new(vec![1, 2, 3]);
        assert_eq!(key.as_bytes(), &[1, 2, 3]);
        assert_eq!(key.len(), 3);
        assert!(!key.is_empty());
    }

    #[test]
    fn debug_of_empty_key() {
        let key = VoteKey::new(Vec::new());
        assert!(format!("{key:?}").contains("0 bytes"));
    }
}
