//! Proposal ledger for the Agora governance engine.
//!
//! Owns proposal records, their vote tallies, and finalization state. A
//! proposal moves `Open` → `Finalized` exactly once; finalization computes
//! the outcome under the strict-maximum rule and locks the record.

pub mod ledger;
pub mod proposal;

pub use ledger::ProposalLedger;
pub use proposal::{Proposal, ProposalStatus};
