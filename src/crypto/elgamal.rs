use std::iter::Sum;
use std::ops::{Add, AddAssign};
use group::Group;
use rand_core::CryptoRngCore;
use rayon::prelude::*;
use crate::crypto::curve::ElectionCurve;
use crate::crypto::keys::random_nonzero_scalar;
use crate::crypto::params::ElectionParams;
use crate::crypto::vote::VoteChoice;
use crate::error::VotingError;

/// Exponential ElGamal ciphertext of an integer `v` under public key `Y` with randomness `k`:
/// `c1 = k*G`, `c2 = k*Y + v*G`.
///
/// Ciphertexts add coordinate-wise. The sum of encryptions of `v_i` under `k_i` is an
/// encryption of `sum(v_i)` under `sum(k_i)`, which is the only law the ledger relies on when
/// it accumulates accepted votes. No normalisation happens on addition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ciphertext<C: ElectionCurve> {
    pub c1: C::Point,
    pub c2: C::Point,
}

impl<C: ElectionCurve> Ciphertext<C> {
    pub fn new(c1: C::Point, c2: C::Point) -> Self {
        Ciphertext { c1, c2 }
    }

    /// The empty aggregate, an encryption of 0 under randomness 0.
    pub fn identity() -> Self {
        Ciphertext {
            c1: C::Point::identity(),
            c2: C::Point::identity(),
        }
    }

    pub fn aggregate_parallelized(ciphertexts: &[Ciphertext<C>]) -> Self {
        ciphertexts
            .par_iter()
            .copied()
            .reduce(Self::identity, |acc, ct| acc + ct)
    }
}

impl<C: ElectionCurve> Add for Ciphertext<C> {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl<C: ElectionCurve> AddAssign for Ciphertext<C> {
    fn add_assign(&mut self, rhs: Self) {
        self.c1 += rhs.c1;
        self.c2 += rhs.c2;
    }
}

impl<C: ElectionCurve> Sum for Ciphertext<C> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::identity(), |acc, ct| acc + ct)
    }
}

impl<'a, C: ElectionCurve> Sum<&'a Ciphertext<C>> for Ciphertext<C> {
    fn sum<I: Iterator<Item = &'a Ciphertext<C>>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// Encrypts a vote under `public`, returning the ciphertext and its randomness `k`.
///
/// `k` is the witness for the validity proof and must stay with the voter.
pub fn encrypt<C: ElectionCurve>(
    params: &ElectionParams<C>,
    vote: VoteChoice,
    public: &C::Point,
    rng: &mut impl CryptoRngCore,
) -> Result<(Ciphertext<C>, C::Scalar), VotingError> {
    let k = random_nonzero_scalar::<C>(rng)?;
    Ok((encrypt_with_randomness(params, vote, public, &k), k))
}

pub fn encrypt_with_randomness<C: ElectionCurve>(
    params: &ElectionParams<C>,
    vote: VoteChoice,
    public: &C::Point,
    k: &C::Scalar,
) -> Ciphertext<C> {
    let c1 = params.generator * k;
    let masked = *public * k;
    let c2 = match vote {
        VoteChoice::Zero => masked,
        VoteChoice::One => masked + params.generator,
    };
    Ciphertext { c1, c2 }
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::thread_rng;
    use crate::crypto::curve::Secp256r1;
    use crate::crypto::keys::generate_keys;

    type Point = p256::ProjectivePoint;
    type Scalar = p256::Scalar;

    #[test]
    fn encryption_should_follow_elgamal_equations() {
        let params = ElectionParams::<Secp256r1>::new(10);
        let g = Point::generator();
        let public = g * Scalar::from(7u64);
        let k = Scalar::from(3u64);

        let one = encrypt_with_randomness(&params, VoteChoice::One, &public, &k);
        assert_eq!(one.c1, g * Scalar::from(3u64));
        assert_eq!(one.c2, public * Scalar::from(3u64) + g);

        let zero = encrypt_with_randomness(&params, VoteChoice::Zero, &public, &k);
        assert_eq!(zero.c1, one.c1);
        assert_eq!(zero.c2, public * Scalar::from(3u64));
    }

    #[test]
    fn ciphertexts_should_add_homomorphically() {
        let params = ElectionParams::<Secp256r1>::new(10);
        let keys = generate_keys(&params, &mut thread_rng()).unwrap();

        let (ct_a, k_a) = encrypt(&params, VoteChoice::One, &keys.public, &mut thread_rng()).unwrap();
        let (ct_b, k_b) = encrypt(&params, VoteChoice::One, &keys.public, &mut thread_rng()).unwrap();

        let expected = Ciphertext::<Secp256r1>::new(
            params.generator * (k_a + k_b),
            keys.public * (k_a + k_b) + params.generator + params.generator,
        );
        assert_eq!(ct_a + ct_b, expected);
        assert_eq!([ct_a, ct_b].iter().sum::<Ciphertext<Secp256r1>>(), expected);
        assert_eq!(Ciphertext::aggregate_parallelized(&[ct_a, ct_b]), expected);
    }

    #[test]
    fn empty_aggregate_is_identity() {
        let empty: Vec<Ciphertext<Secp256r1>> = Vec::new();
        assert_eq!(empty.iter().sum::<Ciphertext<Secp256r1>>(), Ciphertext::identity());
        assert_eq!(Ciphertext::aggregate_parallelized(&empty), Ciphertext::identity());
    }
}
