use group::Group;
use rand_core::CryptoRngCore;
use sha3::{Digest, Keccak256};
use crate::crypto::curve::{ElectionCurve, Word};
use crate::crypto::elgamal::Ciphertext;
use crate::crypto::keys::random_nonzero_scalar;
use crate::crypto::params::ElectionParams;
use crate::crypto::vote::VoteChoice;
use crate::crypto::ZkProofError;
use crate::error::VotingError;

/// The nizk proof is used to prove that the elgamal ciphertext (c1, c2) under public key y
/// encrypts either zero or one, without revealing which.
///
/// Branch 0 proves knowledge of k with c1 = k*g and c2 = k*y.
/// Branch 1 proves knowledge of k with c1 = k*g and c2 - g = k*y.
/// The false branch is always simulated, so both transcripts look alike.

#[derive(Clone, Copy, Debug)]
pub struct ZkInstanceVoteOr<C: ElectionCurve> {
    pub g: C::Point,
    pub y: C::Point,
    pub c1: C::Point,
    pub c2: C::Point,
}

pub struct ZkWitnessVoteOr<C: ElectionCurve> {
    pub k: C::Scalar,
    pub vote: VoteChoice,
}

/// Zero-knowledge proof of the or relation. `c0 + c1` equals the Fiat-Shamir challenge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZkProofVoteOr<C: ElectionCurve> {
    pub a0: C::Point,
    pub a1: C::Point,
    pub b0: C::Point,
    pub b1: C::Point,
    pub c0: C::Scalar,
    pub c1: C::Scalar,
    pub f0: C::Scalar,
    pub f1: C::Scalar,
}

impl<C: ElectionCurve> ZkInstanceVoteOr<C> {
    pub fn new(params: &ElectionParams<C>, public: &C::Point, ciphertext: &Ciphertext<C>) -> Self {
        ZkInstanceVoteOr {
            g: params.generator,
            y: *public,
            c1: ciphertext.c1,
            c2: ciphertext.c2,
        }
    }

    pub fn check_instance(&self) -> Result<(), ZkProofError> {
        let identity = C::Point::identity();
        if self.g.eq(&identity) || self.y.eq(&identity) || self.c1.eq(&identity) {
            return Err(ZkProofError::InvalidInstance);
        }
        Ok(())
    }
}

impl<C: ElectionCurve> ZkProofVoteOr<C> {
    pub fn verify(&self, instance: &ZkInstanceVoteOr<C>) -> bool {
        verify_nizk_vote_or_relation(instance, self).is_ok()
    }
}

// challenge = keccak256(c1, c2, a0, a1, b0, b1) mod n, every point as its two uint256
// coordinates. The ledger recomputes this byte for byte, so no domain separator is added.
pub fn zk_vote_or_proof_challenge<C: ElectionCurve>(
    instance: &ZkInstanceVoteOr<C>,
    a0: &C::Point,
    a1: &C::Point,
    b0: &C::Point,
    b1: &C::Point,
) -> C::Scalar {
    let mut hasher = Keccak256::new();
    for point in [&instance.c1, &instance.c2, a0, a1, b0, b1] {
        let [x, y] = C::point_to_words(point);
        hasher.update(x);
        hasher.update(y);
    }

    let mut digest: Word = [0u8; 32];
    digest.copy_from_slice(&hasher.finalize());
    C::reduce_word(&digest)
}

/// Prover for the case vote = 0 (real: c2 = k*y; simulated: c2 - g = k*y)
pub fn prove_nizk_vote_or_relation_zero<C: ElectionCurve>(
    instance: &ZkInstanceVoteOr<C>,
    witness: &ZkWitnessVoteOr<C>,
    rng: &mut impl CryptoRngCore,
) -> Result<ZkProofVoteOr<C>, VotingError> {
    instance.check_instance()?;

    // Simulated branch 1: a1 = f1*g - c1*C1, b1 = f1*y - c1*(C2 - g)
    let j = random_nonzero_scalar::<C>(rng)?;
    let c1 = random_nonzero_scalar::<C>(rng)?;
    let f1 = random_nonzero_scalar::<C>(rng)?;
    let a1 = instance.g * f1 - instance.c1 * c1;
    let b1 = instance.y * f1 - (instance.c2 - instance.g) * c1;

    // Real branch 0: a0 = j*g, b0 = j*y
    let a0 = instance.g * j;
    let b0 = instance.y * j;

    let challenge = zk_vote_or_proof_challenge(instance, &a0, &a1, &b0, &b1);
    let c0 = challenge - c1;
    let f0 = j + c0 * witness.k;

    Ok(ZkProofVoteOr { a0, a1, b0, b1, c0, c1, f0, f1 })
}

/// Prover for the case vote = 1 (real: c2 - g = k*y; simulated: c2 = k*y)
pub fn prove_nizk_vote_or_relation_one<C: ElectionCurve>(
    instance: &ZkInstanceVoteOr<C>,
    witness: &ZkWitnessVoteOr<C>,
    rng: &mut impl CryptoRngCore,
) -> Result<ZkProofVoteOr<C>, VotingError> {
    instance.check_instance()?;

    // Simulated branch 0: a0 = f0*g - c0*C1, b0 = f0*y - c0*C2
    let j = random_nonzero_scalar::<C>(rng)?;
    let c0 = random_nonzero_scalar::<C>(rng)?;
    let f0 = random_nonzero_scalar::<C>(rng)?;
    let a0 = instance.g * f0 - instance.c1 * c0;
    let b0 = instance.y * f0 - instance.c2 * c0;

    // Real branch 1: a1 = j*g, b1 = j*y
    let a1 = instance.g * j;
    let b1 = instance.y * j;

    let challenge = zk_vote_or_proof_challenge(instance, &a0, &a1, &b0, &b1);
    let c1 = challenge - c0;
    let f1 = j + c1 * witness.k;

    Ok(ZkProofVoteOr { a0, a1, b0, b1, c0, c1, f0, f1 })
}

pub fn prove_nizk_vote_or_relation<C: ElectionCurve>(
    instance: &ZkInstanceVoteOr<C>,
    witness: &ZkWitnessVoteOr<C>,
    rng: &mut impl CryptoRngCore,
) -> Result<ZkProofVoteOr<C>, VotingError> {
    match witness.vote {
        VoteChoice::Zero => prove_nizk_vote_or_relation_zero(instance, witness, rng),
        VoteChoice::One => prove_nizk_vote_or_relation_one(instance, witness, rng),
    }
}

pub fn verify_nizk_vote_or_relation<C: ElectionCurve>(
    instance: &ZkInstanceVoteOr<C>,
    nizk: &ZkProofVoteOr<C>,
) -> Result<(), ZkProofError> {
    instance.check_instance()?;

    let challenge = zk_vote_or_proof_challenge(instance, &nizk.a0, &nizk.a1, &nizk.b0, &nizk.b1);
    if nizk.c0 + nizk.c1 != challenge {
        return Err(ZkProofError::InvalidProof);
    }

    // f0*g = a0 + c0*C1, f0*y = b0 + c0*C2
    let branch_zero = instance.g * nizk.f0 == nizk.a0 + instance.c1 * nizk.c0
        && instance.y * nizk.f0 == nizk.b0 + instance.c2 * nizk.c0;

    // f1*g = a1 + c1*C1, f1*y = b1 + c1*(C2 - g)
    let branch_one = instance.g * nizk.f1 == nizk.a1 + instance.c1 * nizk.c1
        && instance.y * nizk.f1 == nizk.b1 + (instance.c2 - instance.g) * nizk.c1;

    if !(branch_zero && branch_one) {
        return Err(ZkProofError::InvalidProof);
    }
    Ok(())
}
