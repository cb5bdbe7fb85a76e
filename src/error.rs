//! Error types for commitment and proof operations

use thiserror::Error;

/// Result type for commitment and proof operations
pub type Result<T> = std::result::Result<T, SigmaError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SigmaError {
    /// A precondition on the shape of the inputs was violated.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The secret index does not fit in the anonymity set.
    #[error("index {index} out of range for a set of size {size}")]
    IndexOutOfRange { index: u64, size: u64 },

    /// Protocol parameters are outside the supported range.
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Bytes do not decode to a group element, scalar or proof.
    #[error("invalid encoding")]
    InvalidEncoding,

    /// A verification equation did not hold.
    #[error("proof rejected: {0}")]
    ProofRejected(&'static str),
}
