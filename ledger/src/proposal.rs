//! Proposal records and their lifecycle.

use agora_types::{AccountAddress, ProposalId, ProposalResult, Timestamp, VoteTally};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Lifecycle status of a proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalStatus {
    /// Accepting signups, delegations, and (within the window) votes.
    Open,
    /// Tallied and locked. Terminal.
    Finalized,
}

/// A time-bounded decision item with accumulated per-choice vote weight.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    /// Immutable after creation.
    pub description: String,
    /// Votes are accepted in `[start_time, end_time)`.
    pub start_time: Timestamp,
    pub end_time: Timestamp,
    /// The registered voter who created the proposal.
    pub creator: AccountAddress,
    pub tally: VoteTally,
    pub status: ProposalStatus,
    /// Populated exactly once, when the proposal is finalized.
    pub result: Option<ProposalResult>,
    /// Accounts that signalled intent to participate before voting.
    pub signups: HashSet<AccountAddress>,
}

impl Proposal {
    pub fn new(
        id: ProposalId,
        description: String,
        start_time: Timestamp,
        end_time: Timestamp,
        creator: AccountAddress,
    ) -> Self {
        Self {
            id,
            description,
            start_time,
            end_time,
            creator,
            tally: VoteTally::default(),
            status: ProposalStatus::Open,
            result: None,
            signups: HashSet::new(),
        }
    }

    pub fn is_finalized(&self) -> bool {
        self.status == ProposalStatus::Finalized
    }

    /// Whether votes are accepted at `now`.
    pub fn is_voting_open(&self, now: Timestamp) -> bool {
        self.status == ProposalStatus::Open && self.start_time <= now && now < self.end_time
    }
}
