//! Voter registry for the Agora governance engine.
//!
//! Owns the set of authorized voters and their per-proposal ballot status:
//! who has voted, who delegated to whom, and how much weight each voter
//! carries. Delegation is single-hop with immediate weight transfer, so
//! tallying never walks delegation chains.

pub mod registry;
pub mod voter;

pub use registry::VoterRegistry;
pub use voter::{Participation, Voter};
