//! Events emitted by successful mutations.

use agora_types::{AccountAddress, ProposalId, ProposalResult, VoteChoice};
use serde::{Deserialize, Serialize};

/// A state transition the hosting transport must publish.
///
/// Events are appended during the same atomic operation that produced them
/// and drained by the transport via [`crate::GovernanceEngine::drain_events`];
/// the engine never publishes them itself.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GovernanceEvent {
    VoterAdded {
        address: AccountAddress,
        weight: u64,
    },
    ProposalCreated {
        id: ProposalId,
        creator: AccountAddress,
        description: String,
    },
    VoteCast {
        proposal: ProposalId,
        voter: AccountAddress,
        choice: VoteChoice,
        weight: u64,
    },
    ProposalFinalized {
        proposal: ProposalId,
        result: ProposalResult,
    },
}
