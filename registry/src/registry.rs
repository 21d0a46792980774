//! The voter registry — authoritative set of authorized voters.

use crate::voter::Voter;
use agora_types::{AccountAddress, GovernanceError, ProposalId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Owns every voter record and their per-proposal ballot status.
///
/// Who may register voters is the engine façade's concern; the registry
/// enforces voter-level invariants only. All checks run before the first
/// mutation, so a failed call leaves the registry untouched.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct VoterRegistry {
    voters: HashMap<AccountAddress, Voter>,
}

impl VoterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `address` as a voter with `weight`.
    pub fn add_voter(
        &mut self,
        address: AccountAddress,
        weight: u64,
    ) -> Result<(), GovernanceError> {
        if weight == 0 {
            return Err(GovernanceError::ZeroWeight);
        }
        if self.voters.contains_key(&address) {
            return Err(GovernanceError::AlreadyRegistered(address.to_string()));
        }
        self.voters
            .insert(address.clone(), Voter::new(address, weight));
        Ok(())
    }

    /// Whether `address` is a registered voter.
    pub fn is_registered(&self, address: &AccountAddress) -> bool {
        self.voters.contains_key(address)
    }

    /// Look up a voter record.
    pub fn get_voter(&self, address: &AccountAddress) -> Result<&Voter, GovernanceError> {
        self.voters
            .get(address)
            .ok_or_else(|| GovernanceError::VoterNotFound(address.to_string()))
    }

    /// Mark a voter inactive. Their record and past ballots are kept.
    pub fn deactivate_voter(&mut self, address: &AccountAddress) -> Result<(), GovernanceError> {
        self.get_voter_mut(address)?.active = false;
        Ok(())
    }

    /// Restore an inactive voter.
    pub fn reactivate_voter(&mut self, address: &AccountAddress) -> Result<(), GovernanceError> {
        self.get_voter_mut(address)?.active = true;
        Ok(())
    }

    /// A voter's own weight plus any weight delegated to them for `proposal`.
    pub fn effective_weight(
        &self,
        proposal: ProposalId,
        address: &AccountAddress,
    ) -> Result<u64, GovernanceError> {
        Ok(self.get_voter(address)?.effective_weight(proposal))
    }

    /// Move `from`'s effective weight to `to` for one proposal.
    ///
    /// Single hop, immediate: `to`'s received weight grows by `from`'s own
    /// weight plus whatever `from` had already received, and `from`'s ballot
    /// is consumed. A delegate who has not yet cast may receive from several
    /// delegators (weight compounds) or delegate onward themselves; a
    /// delegate who already cast is rejected, since their ballot was counted
    /// without the incoming weight.
    ///
    /// Returns the weight moved.
    pub fn delegate(
        &mut self,
        proposal: ProposalId,
        from: &AccountAddress,
        to: &AccountAddress,
    ) -> Result<u64, GovernanceError> {
        if from == to {
            return Err(GovernanceError::SelfDelegation);
        }
        let from_voter = self
            .voters
            .get(from)
            .ok_or_else(|| GovernanceError::Unauthorized(from.to_string()))?;
        if !from_voter.active {
            return Err(GovernanceError::Unauthorized(from.to_string()));
        }
        let to_voter = self
            .voters
            .get(to)
            .ok_or_else(|| GovernanceError::InvalidDelegate(to.to_string()))?;
        if !to_voter.active {
            return Err(GovernanceError::InvalidDelegate(to.to_string()));
        }
        if from_voter.has_voted(proposal) {
            return Err(GovernanceError::AlreadyVoted(from.to_string()));
        }
        if to_voter.has_voted(proposal) {
            return Err(GovernanceError::DelegateAlreadyVoted(to.to_string()));
        }

        let moved = from_voter.effective_weight(proposal);
        {
            let part = self
                .voters
                .get_mut(from)
                .ok_or_else(|| GovernanceError::Unauthorized(from.to_string()))?
                .participation_mut(proposal);
            part.voted = true;
            part.delegated_to = Some(to.clone());
        }
        let part = self
            .voters
            .get_mut(to)
            .ok_or_else(|| GovernanceError::InvalidDelegate(to.to_string()))?
            .participation_mut(proposal);
        part.received_weight = part.received_weight.saturating_add(moved);
        tracing::debug!(proposal = %proposal, from = %from, to = %to, weight = moved, "delegation recorded");
        Ok(moved)
    }

    /// Consume a voter's ballot for `proposal`, returning the effective
    /// weight to record in the tally.
    pub fn mark_voted(
        &mut self,
        proposal: ProposalId,
        address: &AccountAddress,
    ) -> Result<u64, GovernanceError> {
        let voter = self
            .voters
            .get(address)
            .ok_or_else(|| GovernanceError::Unauthorized(address.to_string()))?;
        if !voter.active {
            return Err(GovernanceError::Unauthorized(address.to_string()));
        }
        if voter.has_voted(proposal) {
            return Err(GovernanceError::AlreadyVoted(address.to_string()));
        }
        let weight = voter.effective_weight(proposal);
        self.voters
            .get_mut(address)
            .ok_or_else(|| GovernanceError::Unauthorized(address.to_string()))?
            .participation_mut(proposal)
            .voted = true;
        Ok(weight)
    }

    /// Number of registered voters.
    pub fn voter_count(&self) -> usize {
        self.voters.len()
    }

    fn get_voter_mut(&mut self, address: &AccountAddress) -> Result<&mut Voter, GovernanceError> {
        self.voters
            .get_mut(address)
            .ok_or_else(|| GovernanceError::VoterNotFound(address.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(name: &str) -> AccountAddress {
        AccountAddress::new(name)
    }

    fn pid(n: u64) -> ProposalId {
        ProposalId::new(n)
    }

    fn registry_with(voters: &[(&str, u64)]) -> VoterRegistry {
        let mut registry = VoterRegistry::new();
        for (name, weight) in voters {
            registry.add_voter(addr(name), *weight).unwrap();
        }
        registry
    }

    #[test]
    fn test_add_and_lookup_voter() {
        let registry = registry_with(&[("alice", 3)]);
        assert!(registry.is_registered(&addr("alice")));
        assert!(!registry.is_registered(&addr("bob")));

        let voter = registry.get_voter(&addr("alice")).unwrap();
        assert_eq!(voter.weight, 3);
        assert!(voter.active);
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = registry_with(&[("alice", 1)]);
        let result = registry.add_voter(addr("alice"), 2);
        match result.unwrap_err() {
            GovernanceError::AlreadyRegistered(who) => assert_eq!(who, "alice"),
            other => panic!("expected AlreadyRegistered, got {other:?}"),
        }
        // Original weight untouched
        assert_eq!(registry.get_voter(&addr("alice")).unwrap().weight, 1);
    }

    #[test]
    fn test_zero_weight_rejected() {
        let mut registry = VoterRegistry::new();
        assert!(matches!(
            registry.add_voter(addr("alice"), 0),
            Err(GovernanceError::ZeroWeight)
        ));
        assert!(!registry.is_registered(&addr("alice")));
    }

    #[test]
    fn test_get_unknown_voter() {
        let registry = VoterRegistry::new();
        assert!(matches!(
            registry.get_voter(&addr("ghost")),
            Err(GovernanceError::VoterNotFound(_))
        ));
    }

    #[test]
    fn test_mark_voted_consumes_ballot() {
        let mut registry = registry_with(&[("alice", 2)]);
        let weight = registry.mark_voted(pid(1), &addr("alice")).unwrap();
        assert_eq!(weight, 2);

        match registry.mark_voted(pid(1), &addr("alice")).unwrap_err() {
            GovernanceError::AlreadyVoted(who) => assert_eq!(who, "alice"),
            other => panic!("expected AlreadyVoted, got {other:?}"),
        }
    }

    #[test]
    fn test_ballots_are_per_proposal() {
        let mut registry = registry_with(&[("alice", 1)]);
        registry.mark_voted(pid(1), &addr("alice")).unwrap();
        // Same voter, different proposal — fresh ballot
        assert_eq!(registry.mark_voted(pid(2), &addr("alice")).unwrap(), 1);
    }

    #[test]
    fn test_unregistered_voter_cannot_vote() {
        let mut registry = VoterRegistry::new();
        assert!(matches!(
            registry.mark_voted(pid(1), &addr("ghost")),
            Err(GovernanceError::Unauthorized(_))
        ));
    }

    #[test]
    fn test_delegation_moves_weight() {
        let mut registry = registry_with(&[("alice", 2), ("bob", 3)]);
        let moved = registry.delegate(pid(1), &addr("alice"), &addr("bob")).unwrap();
        assert_eq!(moved, 2);

        let bob = registry.get_voter(&addr("bob")).unwrap();
        assert_eq!(bob.effective_weight(pid(1)), 5);
        let alice = registry.get_voter(&addr("alice")).unwrap();
        assert!(alice.has_voted(pid(1)));
        assert_eq!(alice.delegate_of(pid(1)), Some(&addr("bob")));
    }

    #[test]
    fn test_delegator_cannot_vote_afterwards() {
        let mut registry = registry_with(&[("alice", 1), ("bob", 1)]);
        registry.delegate(pid(1), &addr("alice"), &addr("bob")).unwrap();
        assert!(matches!(
            registry.mark_voted(pid(1), &addr("alice")),
            Err(GovernanceError::AlreadyVoted(_))
        ));
    }

    #[test]
    fn test_self_delegation_rejected() {
        let mut registry = registry_with(&[("alice", 1)]);
        assert!(matches!(
            registry.delegate(pid(1), &addr("alice"), &addr("alice")),
            Err(GovernanceError::SelfDelegation)
        ));
    }

    #[test]
    fn test_delegation_to_unregistered_target_rejected() {
        let mut registry = registry_with(&[("alice", 1)]);
        match registry
            .delegate(pid(1), &addr("alice"), &addr("ghost"))
            .unwrap_err()
        {
            GovernanceError::InvalidDelegate(who) => assert_eq!(who, "ghost"),
            other => panic!("expected InvalidDelegate, got {other:?}"),
        }
        // No partial effect
        assert!(!registry.get_voter(&addr("alice")).unwrap().has_voted(pid(1)));
    }

    #[test]
    fn test_delegation_to_voter_who_already_cast_rejected() {
        let mut registry = registry_with(&[("alice", 1), ("bob", 1)]);
        registry.mark_voted(pid(1), &addr("bob")).unwrap();
        match registry
            .delegate(pid(1), &addr("alice"), &addr("bob"))
            .unwrap_err()
        {
            GovernanceError::DelegateAlreadyVoted(who) => assert_eq!(who, "bob"),
            other => panic!("expected DelegateAlreadyVoted, got {other:?}"),
        }
        // Alice's ballot is still hers
        assert_eq!(registry.mark_voted(pid(1), &addr("alice")).unwrap(), 1);
    }

    #[test]
    fn test_received_weight_compounds() {
        let mut registry = registry_with(&[("a", 1), ("b", 2), ("c", 4)]);
        registry.delegate(pid(1), &addr("a"), &addr("c")).unwrap();
        registry.delegate(pid(1), &addr("b"), &addr("c")).unwrap();
        assert_eq!(registry.mark_voted(pid(1), &addr("c")).unwrap(), 7);
    }

    #[test]
    fn test_onward_delegation_carries_received_weight() {
        let mut registry = registry_with(&[("a", 1), ("b", 2), ("c", 4)]);
        registry.delegate(pid(1), &addr("a"), &addr("b")).unwrap();
        // B now carries 3 and may still delegate onward in one hop
        let moved = registry.delegate(pid(1), &addr("b"), &addr("c")).unwrap();
        assert_eq!(moved, 3);
        assert_eq!(registry.mark_voted(pid(1), &addr("c")).unwrap(), 7);
    }

    #[test]
    fn test_deactivated_voter_cannot_act() {
        let mut registry = registry_with(&[("alice", 1), ("bob", 1)]);
        registry.deactivate_voter(&addr("alice")).unwrap();

        assert!(matches!(
            registry.mark_voted(pid(1), &addr("alice")),
            Err(GovernanceError::Unauthorized(_))
        ));
        assert!(matches!(
            registry.delegate(pid(1), &addr("alice"), &addr("bob")),
            Err(GovernanceError::Unauthorized(_))
        ));
        assert!(matches!(
            registry.delegate(pid(1), &addr("bob"), &addr("alice")),
            Err(GovernanceError::InvalidDelegate(_))
        ));

        registry.reactivate_voter(&addr("alice")).unwrap();
        assert_eq!(registry.mark_voted(pid(1), &addr("alice")).unwrap(), 1);
    }

    #[test]
    fn test_voter_count() {
        let registry = registry_with(&[("a", 1), ("b", 1), ("c", 1)]);
        assert_eq!(registry.voter_count(), 3);
    }
}
