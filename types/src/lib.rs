//! Fundamental types for the Agora governance engine.
//!
//! This crate defines the core types shared across every other crate in the
//! workspace: account addresses, timestamps, proposal identifiers, vote
//! choices and tallies, and the shared error enum.

pub mod address;
pub mod error;
pub mod id;
pub mod time;
pub mod vote;

pub use address::AccountAddress;
pub use error::GovernanceError;
pub use id::ProposalId;
pub use time::Timestamp;
pub use vote::{ProposalResult, VoteChoice, VoteTally};
