use group::Group;
use rayon::prelude::*;
use tracing::{debug, warn};
use crate::crypto::curve::ElectionCurve;
use crate::crypto::elgamal::Ciphertext;
use crate::crypto::params::ElectionParams;
use crate::error::VotingError;

/// Strips the mask from an aggregate ciphertext, leaving `M = c2 - x*c1 = (sum v_i)*G`.
fn decryption_target<C: ElectionCurve>(ciphertext: &Ciphertext<C>, secret: &C::Scalar) -> C::Point {
    ciphertext.c2 - ciphertext.c1 * secret
}

/// Decrypts an aggregate ciphertext into the integer tally, searching up to `params.max_tally`.
pub fn decrypt_sum<C: ElectionCurve>(
    params: &ElectionParams<C>,
    ciphertext: &Ciphertext<C>,
    secret: &C::Scalar,
) -> Result<u64, VotingError> {
    decrypt_sum_bounded(params, ciphertext, secret, params.max_tally)
}

/// Recovers `i` with `i*G = M` for `i` in `0..=bound` by walking `0, G, 2G, ...`.
///
/// This is a bounded linear scan, not a discrete-log solver: the running time is linear in the
/// tally, and a plaintext above `bound` is reported as [`VotingError::TallyBoundExceeded`]
/// instead of being searched for. A tally of 0 is an ordinary result.
pub fn decrypt_sum_bounded<C: ElectionCurve>(
    params: &ElectionParams<C>,
    ciphertext: &Ciphertext<C>,
    secret: &C::Scalar,
    bound: u64,
) -> Result<u64, VotingError> {
    let target = decryption_target(ciphertext, secret);

    let mut candidate = C::Point::identity();
    for i in 0..=bound {
        if candidate == target {
            debug!(tally = i, "decrypted tally");
            return Ok(i);
        }
        candidate += params.generator;
    }

    warn!(bound, "tally exceeds search bound");
    Err(VotingError::TallyBoundExceeded { bound })
}

/// Same search as [`decrypt_sum`] split into `params.tally_chunk_size` ranges scanned in
/// parallel. The first worker to hit the target stops the others.
pub fn decrypt_sum_parallelized<C: ElectionCurve>(
    params: &ElectionParams<C>,
    ciphertext: &Ciphertext<C>,
    secret: &C::Scalar,
) -> Result<u64, VotingError> {
    let bound = params.max_tally;
    let chunk_size = params.tally_chunk_size.max(1);
    let target = decryption_target(ciphertext, secret);
    let generator = params.generator;

    let found = (0..=bound / chunk_size)
        .into_par_iter()
        .find_map_any(|chunk| {
            let start = chunk * chunk_size;
            let end = start.saturating_add(chunk_size - 1).min(bound);

            let mut candidate = generator * C::Scalar::from(start);
            for i in start..=end {
                if candidate == target {
                    return Some(i);
                }
                candidate += generator;
            }
            None
        });

    match found {
        Some(tally) => {
            debug!(tally, "decrypted tally");
            Ok(tally)
        }
        None => {
            warn!(bound, "tally exceeds search bound");
            Err(VotingError::TallyBoundExceeded { bound })
        }
    }
}
