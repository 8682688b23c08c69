//! Library entry point for binary_vote crate.
//
// Exposes the protocol core (keys, encryption, proofs, tally) together with
// the ledger wire codec and a reference in-memory ledger.

pub mod serde_types;
pub mod error;
pub mod crypto;
pub mod ledger;
