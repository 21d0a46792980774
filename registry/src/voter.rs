//! Voter records and per-proposal participation state.

use agora_types::{AccountAddress, ProposalId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-proposal ballot status for one voter.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Participation {
    /// Whether the ballot has been consumed, by voting or by delegating away.
    pub voted: bool,
    /// Where the ballot went, if it was delegated rather than cast.
    pub delegated_to: Option<AccountAddress>,
    /// Weight received from delegators, counted on top of the voter's own
    /// weight when they cast.
    pub received_weight: u64,
}

/// An authorized participant with assigned voting weight.
///
/// Voter records are never deleted; a deactivated voter keeps their record
/// but fails every mutating action until reactivated.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Voter {
    pub address: AccountAddress,
    pub weight: u64,
    pub active: bool,
    participation: HashMap<ProposalId, Participation>,
}

impl Voter {
    pub fn new(address: AccountAddress, weight: u64) -> Self {
        Self {
            address,
            weight,
            active: true,
            participation: HashMap::new(),
        }
    }

    /// Whether this voter's ballot for `proposal` has been consumed.
    pub fn has_voted(&self, proposal: ProposalId) -> bool {
        self.participation
            .get(&proposal)
            .map(|p| p.voted)
            .unwrap_or(false)
    }

    /// Who this voter delegated their ballot to for `proposal`, if anyone.
    pub fn delegate_of(&self, proposal: ProposalId) -> Option<&AccountAddress> {
        self.participation
            .get(&proposal)
            .and_then(|p| p.delegated_to.as_ref())
    }

    /// Weight received from delegators for `proposal`.
    pub fn received_weight(&self, proposal: ProposalId) -> u64 {
        self.participation
            .get(&proposal)
            .map(|p| p.received_weight)
            .unwrap_or(0)
    }

    /// Own weight plus any weight delegated to this voter for `proposal`.
    pub fn effective_weight(&self, proposal: ProposalId) -> u64 {
        self.weight.saturating_add(self.received_weight(proposal))
    }

    pub(crate) fn participation_mut(&mut self, proposal: ProposalId) -> &mut Participation {
        self.participation.entry(proposal).or_default()
    }
}
