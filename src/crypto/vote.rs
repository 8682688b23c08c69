use rand::thread_rng;
use rand_core::CryptoRngCore;
use crate::crypto::curve::ElectionCurve;
use crate::crypto::elgamal::{encrypt, Ciphertext};
use crate::crypto::nizk_vote_or::{prove_nizk_vote_or_relation, verify_nizk_vote_or_relation, ZkInstanceVoteOr, ZkProofVoteOr, ZkWitnessVoteOr};
use crate::crypto::params::ElectionParams;
use crate::crypto::ZkProofError;
use crate::error::VotingError;

/// A binary vote. The two variants select the two fixed branches of the validity proof.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VoteChoice {
    Zero,
    One,
}

impl VoteChoice {
    pub fn as_u64(self) -> u64 {
        match self {
            VoteChoice::Zero => 0,
            VoteChoice::One => 1,
        }
    }
}

impl From<bool> for VoteChoice {
    fn from(value: bool) -> Self {
        if value { VoteChoice::One } else { VoteChoice::Zero }
    }
}

impl TryFrom<u64> for VoteChoice {
    type Error = VotingError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(VoteChoice::Zero),
            1 => Ok(VoteChoice::One),
            other => Err(VotingError::InvalidVote(other)),
        }
    }
}

/// What a voter submits to the ledger: a ciphertext and the proof bound to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EncryptedVote<C: ElectionCurve> {
    pub ciphertext: Ciphertext<C>,
    pub proof: ZkProofVoteOr<C>,
}

impl<C: ElectionCurve> EncryptedVote<C> {
    /// Encrypts `vote` and proves the ciphertext holds 0 or 1. The encryption randomness is
    /// dropped once the proof is built.
    pub fn cast(
        params: &ElectionParams<C>,
        vote: VoteChoice,
        public: &C::Point,
        rng: &mut impl CryptoRngCore,
    ) -> Result<Self, VotingError> {
        let (ciphertext, k) = encrypt(params, vote, public, rng)?;
        let instance = ZkInstanceVoteOr::new(params, public, &ciphertext);
        let witness = ZkWitnessVoteOr { k, vote };
        let proof = prove_nizk_vote_or_relation(&instance, &witness, rng)?;

        Ok(EncryptedVote { ciphertext, proof })
    }

    pub fn check(&self, params: &ElectionParams<C>, public: &C::Point) -> Result<(), ZkProofError> {
        let instance = ZkInstanceVoteOr::new(params, public, &self.ciphertext);
        verify_nizk_vote_or_relation(&instance, &self.proof)
    }

    pub fn verify(&self, params: &ElectionParams<C>, public: &C::Point) -> bool {
        self.check(params, public).is_ok()
    }
}

/// Casts a vote using the thread-local CSPRNG.
pub fn cast_vote<C: ElectionCurve>(
    params: &ElectionParams<C>,
    vote: VoteChoice,
    public: &C::Point,
) -> Result<EncryptedVote<C>, VotingError> {
    EncryptedVote::cast(params, vote, public, &mut thread_rng())
}
