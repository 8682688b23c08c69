use std::fmt;
use group::ff::{Field, PrimeField};
use rand_core::CryptoRngCore;
use tracing::debug;
use crate::crypto::curve::ElectionCurve;
use crate::crypto::params::ElectionParams;
use crate::error::VotingError;

/// The election authority's key pair, `public = secret * G`. Not `Copy` and not comparable, so
/// the secret is never duplicated or compared implicitly.
#[derive(Clone)]
pub struct KeyPair<C: ElectionCurve> {
    pub secret: C::Scalar,
    pub public: C::Point,
}

impl<C: ElectionCurve> KeyPair<C> {
    pub fn from_secret(params: &ElectionParams<C>, secret: C::Scalar) -> Result<Self, VotingError> {
        if bool::from(secret.is_zero()) {
            return Err(VotingError::InvalidScalar);
        }
        Ok(KeyPair {
            secret,
            public: params.generator * secret,
        })
    }
}

impl<C: ElectionCurve> fmt::Debug for KeyPair<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("secret", &"<redacted>")
            .field("public", &self.public)
            .finish()
    }
}

/// Generates the authority key pair with a secret drawn uniformly from `[1, n-1]`.
pub fn generate_keys<C: ElectionCurve>(
    params: &ElectionParams<C>,
    rng: &mut impl CryptoRngCore,
) -> Result<KeyPair<C>, VotingError> {
    let secret = random_nonzero_scalar::<C>(rng)?;
    debug!(curve = C::NAME, "generated election key pair");
    KeyPair::from_secret(params, secret)
}

/// Samples a scalar uniformly from `[1, n-1]` by rejection.
///
/// A failing random source is reported as [`VotingError::RandomnessUnavailable`] and never
/// retried; the only loop is over out-of-range candidates.
pub fn random_nonzero_scalar<C: ElectionCurve>(
    rng: &mut impl CryptoRngCore,
) -> Result<C::Scalar, VotingError> {
    loop {
        let mut repr = <C::Scalar as PrimeField>::Repr::default();
        rng.try_fill_bytes(repr.as_mut())
            .map_err(|e| VotingError::RandomnessUnavailable(e.to_string()))?;

        if let Some(scalar) = Option::<C::Scalar>::from(C::Scalar::from_repr(repr)) {
            if !bool::from(scalar.is_zero()) {
                return Ok(scalar);
            }
        }
    }
}
