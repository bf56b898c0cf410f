use thiserror::Error;

/// Failures at the state-query / codec boundary.
#[derive(Debug, Error)]
pub enum StateError {
    /// A read-only state query could not be completed (transport, missing
    /// block, engine fault). Fatal to the current block attempt.
    #[error("state query against {contract} failed: {reason}")]
    Query { contract: String, reason: String },

    /// Encoding a method call failed — mismatched arity or argument types.
    /// Indicates a configuration or programming defect.
    #[error("failed to encode call to {method}: {reason}")]
    Encode { method: String, reason: String },

    /// Decoding a call result failed, or the decoded value had an
    /// unexpected shape.
    #[error("failed to decode result of {method}: {reason}")]
    Decode { method: String, reason: String },
}

impl StateError {
    pub fn query(contract: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Query {
            contract: contract.into(),
            reason: reason.into(),
        }
    }

    pub fn encode(method: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Encode {
            method: method.into(),
            reason: reason.into(),
        }
    }

    pub fn decode(method: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Decode {
            method: method.into(),
            reason: reason.into(),
        }
    }
}
