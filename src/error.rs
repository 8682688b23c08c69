use thiserror::Error;
use crate::crypto::ZkProofError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VotingError {
    #[error("Secure randomness unavailable: {0}")]
    RandomnessUnavailable(String),
    #[error("Vote must be 0 or 1, got {0}")]
    InvalidVote(u64),
    #[error("Tally exceeds the search bound of {bound}")]
    TallyBoundExceeded { bound: u64 },
    #[error("No votes were cast")]
    NoVotesCast,
    #[error("Point is not on the curve")]
    InvalidPoint,
    #[error("Scalar is not reduced modulo the group order")]
    InvalidScalar,
    #[error("Configured curve {found} does not match {expected}")]
    CurveMismatch { expected: String, found: String },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Deserialization error:{0}")]
    DeserializationError(String),
    #[error("Proof error: {0}")]
    InvalidProof(#[from] ZkProofError),
}
