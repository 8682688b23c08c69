use std::fmt;

pub mod curve;
pub mod params;
pub mod keys;
pub mod elgamal;
pub mod nizk_vote_or;
pub mod tally;
pub mod vote;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ZkProofError {
    InvalidProof,
    InvalidInstance,
    DeserializationError
}

impl fmt::Display for ZkProofError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZkProofError::InvalidProof => write!(f, "Invalid proof provided"),
            ZkProofError::InvalidInstance => write!(f, "Invalid instance data"),
            ZkProofError::DeserializationError => write!(f, "Deserialization Error"),
        }
    }
}

impl std::error::Error for ZkProofError {}
