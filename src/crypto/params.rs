use group::Group;
use serde::{Deserialize, Serialize};
use crate::crypto::curve::ElectionCurve;
use crate::error::VotingError;

/// Number of consecutive candidates each worker checks during a parallel tally search.
pub const DEFAULT_TALLY_CHUNK_SIZE: u64 = 1 << 12;

/// Immutable cryptographic configuration of one election. It is passed into every operation
/// so that prover, verifier and decryptor provably agree on the group, the generator and the
/// tally search bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElectionParams<C: ElectionCurve> {
    pub generator: C::Point,
    /// Upper bound on the decrypted sum, normally the number of eligible voters.
    pub max_tally: u64,
    pub tally_chunk_size: u64,
}

impl<C: ElectionCurve> ElectionParams<C> {
    /// Parameters over the standard generator of `C`.
    pub fn new(max_tally: u64) -> Self {
        ElectionParams {
            generator: C::Point::generator(),
            max_tally,
            tally_chunk_size: DEFAULT_TALLY_CHUNK_SIZE,
        }
    }

    pub fn from_config(config: &ElectionConfig) -> Result<Self, VotingError> {
        if !config.curve.eq_ignore_ascii_case(C::NAME) {
            return Err(VotingError::CurveMismatch {
                expected: C::NAME.to_string(),
                found: config.curve.clone(),
            });
        }
        if config.max_voters == 0 {
            return Err(VotingError::InvalidConfig(String::from("max_voters must be positive")));
        }

        let tally_chunk_size = config.tally_chunk_size.unwrap_or(DEFAULT_TALLY_CHUNK_SIZE);
        if tally_chunk_size == 0 {
            return Err(VotingError::InvalidConfig(String::from("tally_chunk_size must be positive")));
        }

        Ok(ElectionParams {
            generator: C::Point::generator(),
            max_tally: config.max_voters,
            tally_chunk_size,
        })
    }

    pub fn curve_name(&self) -> &'static str {
        C::NAME
    }
}

/// Serialized form of the election configuration, e.g.
/// `{"curve": "secp256r1", "max_voters": 1000}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionConfig {
    pub curve: String,
    pub max_voters: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tally_chunk_size: Option<u64>,
}
