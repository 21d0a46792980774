//! The governance engine façade — access control, composition, event flow.

use crate::events::GovernanceEvent;
use agora_ledger::{Proposal, ProposalLedger};
use agora_registry::{Voter, VoterRegistry};
use agora_types::{
    AccountAddress, GovernanceError, ProposalId, ProposalResult, Timestamp, VoteChoice,
};

/// The governance engine — registers voters, runs proposals, locks results.
///
/// Composes the voter registry and the proposal ledger behind a single
/// entry surface. Every mutating call resolves the caller's role before any
/// state is touched, and every operation is all-or-nothing: precondition
/// checks run before the first mutation. The hosting runtime serializes
/// concurrent callers; queries take `&self` and observe a consistent
/// snapshot.
pub struct GovernanceEngine {
    owner: AccountAddress,
    pub(crate) registry: VoterRegistry,
    pub(crate) ledger: ProposalLedger,
    events: Vec<GovernanceEvent>,
}

impl GovernanceEngine {
    /// Create an engine owned by `owner`.
    ///
    /// The owner is fixed for the engine's lifetime; only the owner may
    /// register or deactivate voters.
    pub fn new(owner: AccountAddress) -> Self {
        Self {
            owner,
            registry: VoterRegistry::new(),
            ledger: ProposalLedger::new(),
            events: Vec::new(),
        }
    }

    pub(crate) fn from_parts(
        owner: AccountAddress,
        registry: VoterRegistry,
        ledger: ProposalLedger,
    ) -> Self {
        Self {
            owner,
            registry,
            ledger,
            events: Vec::new(),
        }
    }

    pub fn owner(&self) -> &AccountAddress {
        &self.owner
    }

    // ── Voter management ─────────────────────────────────────────────────

    /// Register `address` as a voter with `weight`. Owner only.
    pub fn add_voter(
        &mut self,
        caller: &AccountAddress,
        address: AccountAddress,
        weight: u64,
    ) -> Result<(), GovernanceError> {
        self.ensure_owner(caller)?;
        self.registry.add_voter(address.clone(), weight)?;
        tracing::info!(address = %address, weight, "voter added");
        self.events
            .push(GovernanceEvent::VoterAdded { address, weight });
        Ok(())
    }

    /// Mark a voter inactive. Owner only; the record is kept.
    pub fn deactivate_voter(
        &mut self,
        caller: &AccountAddress,
        address: &AccountAddress,
    ) -> Result<(), GovernanceError> {
        self.ensure_owner(caller)?;
        self.registry.deactivate_voter(address)?;
        tracing::info!(address = %address, "voter deactivated");
        Ok(())
    }

    /// Restore an inactive voter. Owner only.
    pub fn reactivate_voter(
        &mut self,
        caller: &AccountAddress,
        address: &AccountAddress,
    ) -> Result<(), GovernanceError> {
        self.ensure_owner(caller)?;
        self.registry.reactivate_voter(address)?;
        tracing::info!(address = %address, "voter reactivated");
        Ok(())
    }

    // ── Proposals ────────────────────────────────────────────────────────

    /// Create a time-bounded proposal. Caller must be a registered,
    /// active voter.
    pub fn create_proposal(
        &mut self,
        creator: &AccountAddress,
        description: impl Into<String>,
        start_time: Timestamp,
        end_time: Timestamp,
    ) -> Result<ProposalId, GovernanceError> {
        self.ensure_registered(creator)?;
        let description = description.into();
        let id = self.ledger.create_proposal(
            description.clone(),
            start_time,
            end_time,
            creator.clone(),
        )?;
        tracing::info!(id = %id, creator = %creator, "proposal created");
        self.events.push(GovernanceEvent::ProposalCreated {
            id,
            creator: creator.clone(),
            description,
        });
        Ok(id)
    }

    /// Record intent to participate in a proposal. Idempotent.
    pub fn register_to_vote(
        &mut self,
        proposal: ProposalId,
        voter: &AccountAddress,
    ) -> Result<(), GovernanceError> {
        self.ledger.register_to_vote(proposal, voter)
    }

    /// Cast `voter`'s ballot with their effective weight.
    pub fn vote(
        &mut self,
        proposal: ProposalId,
        voter: &AccountAddress,
        choice: VoteChoice,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        self.ledger.ensure_votable(proposal, now)?;
        let weight = self.registry.mark_voted(proposal, voter)?;
        self.ledger.record_vote(proposal, choice, weight)?;
        tracing::info!(proposal = %proposal, voter = %voter, choice = %choice, weight, "vote cast");
        self.events.push(GovernanceEvent::VoteCast {
            proposal,
            voter: voter.clone(),
            choice,
            weight,
        });
        Ok(())
    }

    /// Delegate `from`'s ballot to `to` for one proposal.
    ///
    /// Single hop with immediate weight transfer; see the registry for the
    /// delegation invariants.
    pub fn delegate(
        &mut self,
        proposal: ProposalId,
        from: &AccountAddress,
        to: &AccountAddress,
        now: Timestamp,
    ) -> Result<(), GovernanceError> {
        self.ledger.ensure_delegable(proposal, now)?;
        let moved = self.registry.delegate(proposal, from, to)?;
        tracing::info!(proposal = %proposal, from = %from, to = %to, weight = moved, "ballot delegated");
        Ok(())
    }

    /// Compute and lock the proposal's result. Owner or the proposal's
    /// creator only.
    pub fn finalize(
        &mut self,
        proposal: ProposalId,
        caller: &AccountAddress,
        now: Timestamp,
    ) -> Result<ProposalResult, GovernanceError> {
        let creator = self.ledger.get(proposal)?.creator.clone();
        if caller != &self.owner && caller != &creator {
            return Err(GovernanceError::Unauthorized(caller.to_string()));
        }
        let result = self.ledger.finalize(proposal, now)?;
        tracing::info!(proposal = %proposal, result = %result, "proposal finalized");
        self.events
            .push(GovernanceEvent::ProposalFinalized { proposal, result });
        Ok(result)
    }

    // ── Queries ──────────────────────────────────────────────────────────

    pub fn is_registered(&self, address: &AccountAddress) -> bool {
        self.registry.is_registered(address)
    }

    pub fn get_voter(&self, address: &AccountAddress) -> Result<&Voter, GovernanceError> {
        self.registry.get_voter(address)
    }

    pub fn get_proposal(&self, proposal: ProposalId) -> Result<&Proposal, GovernanceError> {
        self.ledger.get(proposal)
    }

    pub fn proposal_count(&self) -> usize {
        self.ledger.proposal_count()
    }

    /// All proposals, in id order.
    pub fn proposals(&self) -> impl Iterator<Item = &Proposal> {
        self.ledger.proposals()
    }

    pub fn has_signed_up(
        &self,
        proposal: ProposalId,
        address: &AccountAddress,
    ) -> Result<bool, GovernanceError> {
        self.ledger.has_signed_up(proposal, address)
    }

    /// A voter's own weight plus any weight delegated to them for `proposal`.
    pub fn effective_weight(
        &self,
        proposal: ProposalId,
        address: &AccountAddress,
    ) -> Result<u64, GovernanceError> {
        self.registry.effective_weight(proposal, address)
    }

    // ── Events ───────────────────────────────────────────────────────────

    /// Drain pending events for publication by the hosting transport.
    pub fn drain_events(&mut self) -> Vec<GovernanceEvent> {
        std::mem::take(&mut self.events)
    }

    /// Events emitted since the last drain.
    pub fn pending_events(&self) -> &[GovernanceEvent] {
        &self.events
    }

    fn ensure_owner(&self, caller: &AccountAddress) -> Result<(), GovernanceError> {
        if caller != &self.owner {
            return Err(GovernanceError::Unauthorized(caller.to_string()));
        }
        Ok(())
    }

    fn ensure_registered(&self, caller: &AccountAddress) -> Result<(), GovernanceError> {
        match self.registry.get_voter(caller) {
            Ok(voter) if voter.active => Ok(()),
            _ => Err(GovernanceError::Unauthorized(caller.to_string())),
        }
    }
}
