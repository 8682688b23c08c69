//! Reference ledger for the election contract.
//!
//! The real ledger is an external contract. This in-memory version implements the same
//! boundary so the protocol can be exercised end to end: a vote is accepted only if its proof
//! verifies and the voter has not voted yet, and accepted ciphertexts are folded into a running
//! aggregate by plain point addition.

use std::collections::HashSet;
use std::fmt;
use tracing::{info, warn};
use crate::crypto::curve::ElectionCurve;
use crate::crypto::elgamal::Ciphertext;
use crate::crypto::params::ElectionParams;
use crate::crypto::tally::decrypt_sum_bounded;
use crate::crypto::vote::EncryptedVote;
use crate::crypto::ZkProofError;
use crate::error::VotingError;
use crate::serde_types::ContractVote;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VoterId(pub String);

impl fmt::Display for VoterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RejectReason {
    AlreadyVoted,
    InvalidProof(ZkProofError),
    MalformedVote(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted,
    Rejected(RejectReason),
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted)
    }
}

/// The homomorphically summed ciphertext and the number of votes folded into it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Aggregate<C: ElectionCurve> {
    pub ciphertext: Ciphertext<C>,
    pub vote_count: u64,
}

impl<C: ElectionCurve> Aggregate<C> {
    /// Decrypts the tally. The sum of `vote_count` binary votes cannot exceed `vote_count`, so
    /// the search stops there (or at `params.max_tally` if that is lower).
    pub fn decrypt(&self, params: &ElectionParams<C>, secret: &C::Scalar) -> Result<u64, VotingError> {
        let bound = self.vote_count.min(params.max_tally);
        decrypt_sum_bounded(params, &self.ciphertext, secret, bound)
    }

    pub fn result(&self, params: &ElectionParams<C>, secret: &C::Scalar) -> Result<ElectionResult, VotingError> {
        Ok(ElectionResult {
            tally: self.decrypt(params, secret)?,
            vote_count: self.vote_count,
        })
    }
}

/// Number of 1-votes (`tally`) out of all accepted votes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElectionResult {
    pub tally: u64,
    pub vote_count: u64,
}

impl ElectionResult {
    /// Share of 1-votes among the accepted votes.
    pub fn ratio(&self) -> Result<f64, VotingError> {
        if self.vote_count == 0 {
            return Err(VotingError::NoVotesCast);
        }
        Ok(self.tally as f64 / self.vote_count as f64)
    }
}

pub trait VoteLedger<C: ElectionCurve> {
    fn public_key(&self) -> &C::Point;

    /// Verifies the vote and, on success, adds it to the aggregate and marks the voter.
    /// A rejected vote leaves the ledger untouched.
    fn submit_vote(&mut self, vote: &EncryptedVote<C>, voter: &VoterId) -> SubmitOutcome;

    fn read_aggregate(&self) -> Aggregate<C>;

    fn submit_contract_vote(&mut self, vote: &ContractVote, voter: &VoterId) -> SubmitOutcome {
        match vote.to_vote::<C>() {
            Ok(vote) => self.submit_vote(&vote, voter),
            Err(e) => {
                warn!(voter = %voter, error = %e, "rejected malformed vote");
                SubmitOutcome::Rejected(RejectReason::MalformedVote(e.to_string()))
            }
        }
    }
}

pub struct InMemoryLedger<C: ElectionCurve> {
    params: ElectionParams<C>,
    public_key: C::Point,
    aggregate: Ciphertext<C>,
    voters: HashSet<VoterId>,
}

impl<C: ElectionCurve> InMemoryLedger<C> {
    /// Registers the election public key and starts from an empty aggregate.
    pub fn deploy(params: ElectionParams<C>, public_key: C::Point) -> Self {
        info!(curve = C::NAME, max_tally = params.max_tally, "deployed election ledger");
        InMemoryLedger {
            params,
            public_key,
            aggregate: Ciphertext::identity(),
            voters: HashSet::new(),
        }
    }

    pub fn has_voted(&self, voter: &VoterId) -> bool {
        self.voters.contains(voter)
    }
}

impl<C: ElectionCurve> VoteLedger<C> for InMemoryLedger<C> {
    fn public_key(&self) -> &C::Point {
        &self.public_key
    }

    fn submit_vote(&mut self, vote: &EncryptedVote<C>, voter: &VoterId) -> SubmitOutcome {
        if self.voters.contains(voter) {
            warn!(voter = %voter, "rejected vote: voter already voted");
            return SubmitOutcome::Rejected(RejectReason::AlreadyVoted);
        }

        if let Err(e) = vote.check(&self.params, &self.public_key) {
            warn!(voter = %voter, error = %e, "rejected vote: proof does not verify");
            return SubmitOutcome::Rejected(RejectReason::InvalidProof(e));
        }

        self.aggregate += vote.ciphertext;
        self.voters.insert(voter.clone());
        info!(voter = %voter, vote_count = self.voters.len(), "accepted vote");
        SubmitOutcome::Accepted
    }

    fn read_aggregate(&self) -> Aggregate<C> {
        Aggregate {
            ciphertext: self.aggregate,
            vote_count: self.voters.len() as u64,
        }
    }
}
