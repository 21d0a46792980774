//! The proposal ledger — authoritative record of proposals and tallies.

use crate::proposal::{Proposal, ProposalStatus};
use agora_types::{
    AccountAddress, GovernanceError, ProposalId, ProposalResult, Timestamp, VoteChoice,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Owns proposal records, vote tallies, and finalization state.
///
/// Caller authorization is the engine façade's concern; the ledger enforces
/// proposal-level invariants: time windows, the `Open` → `Finalized` state
/// machine, and one-shot result locking. Proposals are kept in id order.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProposalLedger {
    next_id: u64,
    proposals: BTreeMap<ProposalId, Proposal>,
}

impl ProposalLedger {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            proposals: BTreeMap::new(),
        }
    }

    /// Create a proposal and assign the next sequential id.
    pub fn create_proposal(
        &mut self,
        description: String,
        start_time: Timestamp,
        end_time: Timestamp,
        creator: AccountAddress,
    ) -> Result<ProposalId, GovernanceError> {
        if start_time >= end_time {
            return Err(GovernanceError::InvalidWindow {
                start: start_time,
                end: end_time,
            });
        }
        let id = ProposalId::new(self.next_id);
        self.next_id = self.next_id.saturating_add(1);
        self.proposals.insert(
            id,
            Proposal::new(id, description, start_time, end_time, creator),
        );
        Ok(id)
    }

    /// Record intent to participate. Idempotent.
    pub fn register_to_vote(
        &mut self,
        proposal: ProposalId,
        address: &AccountAddress,
    ) -> Result<(), GovernanceError> {
        let prop = self.get_mut(proposal)?;
        if prop.is_finalized() {
            return Err(GovernanceError::ProposalClosed(proposal));
        }
        prop.signups.insert(address.clone());
        Ok(())
    }

    /// Whether `address` has signalled intent to participate.
    pub fn has_signed_up(
        &self,
        proposal: ProposalId,
        address: &AccountAddress,
    ) -> Result<bool, GovernanceError> {
        Ok(self.get(proposal)?.signups.contains(address))
    }

    /// Check that `proposal` can accept a vote at `now`.
    pub fn ensure_votable(
        &self,
        proposal: ProposalId,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        let prop = self.get(proposal)?;
        if prop.is_finalized() {
            return Err(GovernanceError::ProposalClosed(proposal));
        }
        if !prop.is_voting_open(now) {
            return Err(GovernanceError::VotingNotOpen {
                start: prop.start_time,
                end: prop.end_time,
                now,
            });
        }
        Ok(())
    }

    /// Check that `proposal` can accept a delegation at `now`.
    ///
    /// Delegation is permitted from creation until the window closes,
    /// including before voting opens.
    pub fn ensure_delegable(
        &self,
        proposal: ProposalId,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        let prop = self.get(proposal)?;
        if prop.is_finalized() || now >= prop.end_time {
            return Err(GovernanceError::ProposalClosed(proposal));
        }
        Ok(())
    }

    /// Add `weight` to the tally for `choice`.
    ///
    /// The façade calls this only after `ensure_votable` and the registry's
    /// ballot consumption have both succeeded.
    pub fn record_vote(
        &mut self,
        proposal: ProposalId,
        choice: VoteChoice,
        weight: u64,
    ) -> Result<(), GovernanceError> {
        let prop = self.get_mut(proposal)?;
        prop.tally.record(choice, weight);
        Ok(())
    }

    /// Compute and lock the outcome. `Open` → `Finalized`, exactly once.
    pub fn finalize(
        &mut self,
        proposal: ProposalId,
        now: Timestamp,
    ) -> Result<ProposalResult, GovernanceError> {
        let prop = self.get_mut(proposal)?;
        if prop.is_finalized() {
            return Err(GovernanceError::AlreadyFinalized(proposal));
        }
        if now < prop.end_time {
            return Err(GovernanceError::VotingStillOpen {
                ends_at: prop.end_time,
                now,
            });
        }
        let result = prop.tally.outcome();
        prop.status = ProposalStatus::Finalized;
        prop.result = Some(result);
        tracing::debug!(proposal = %proposal, result = %result, "tally locked");
        Ok(result)
    }

    /// Look up a proposal.
    pub fn get(&self, proposal: ProposalId) -> Result<&Proposal, GovernanceError> {
        self.proposals
            .get(&proposal)
            .ok_or(GovernanceError::ProposalNotFound(proposal))
    }

    /// Number of proposals ever created.
    pub fn proposal_count(&self) -> usize {
        self.proposals.len()
    }

    /// All proposals, in id order.
    pub fn proposals(&self) -> impl Iterator<Item = &Proposal> {
        self.proposals.values()
    }

    fn get_mut(&mut self, proposal: ProposalId) -> Result<&mut Proposal, GovernanceError> {
        self.proposals
            .get_mut(&proposal)
            .ok_or(GovernanceError::ProposalNotFound(proposal))
    }
}

impl Default for ProposalLedger {
    fn default() -> Self {
        Self::new()
    }
}
