//! Vote choices, per-proposal tallies, and finalized outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The ballot options available on every proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteChoice {
    For,
    Against,
    Abstain,
}

impl VoteChoice {
    /// All choices, in tally order.
    pub const ALL: [VoteChoice; 3] = [VoteChoice::For, VoteChoice::Against, VoteChoice::Abstain];

    /// Stable string name of this choice.
    pub fn name(&self) -> &'static str {
        match self {
            Self::For => "for",
            Self::Against => "against",
            Self::Abstain => "abstain",
        }
    }
}

impl fmt::Display for VoteChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Accumulated voting weight per choice for a single proposal.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    pub for_weight: u64,
    pub against_weight: u64,
    pub abstain_weight: u64,
}

impl VoteTally {
    /// Add `weight` to the count for `choice`.
    pub fn record(&mut self, choice: VoteChoice, weight: u64) {
        let slot = match choice {
            VoteChoice::For => &mut self.for_weight,
            VoteChoice::Against => &mut self.against_weight,
            VoteChoice::Abstain => &mut self.abstain_weight,
        };
        *slot = slot.saturating_add(weight);
    }

    /// Accumulated weight for `choice`.
    pub fn count(&self, choice: VoteChoice) -> u64 {
        match choice {
            VoteChoice::For => self.for_weight,
            VoteChoice::Against => self.against_weight,
            VoteChoice::Abstain => self.abstain_weight,
        }
    }

    /// Total weight recorded across all choices.
    pub fn total(&self) -> u64 {
        self.for_weight + self.against_weight + self.abstain_weight
    }

    /// Outcome under the strict-maximum rule.
    ///
    /// The winner is the choice with strictly greatest accumulated weight.
    /// Two or more choices sharing the maximum is a `Tie` — ties are never
    /// broken arbitrarily. Three zero counts tie at zero.
    pub fn outcome(&self) -> ProposalResult {
        let max = VoteChoice::ALL
            .iter()
            .map(|c| self.count(*c))
            .max()
            .unwrap_or(0);
        let mut leaders = VoteChoice::ALL.iter().filter(|c| self.count(**c) == max);
        let first = leaders.next();
        match (first, leaders.next()) {
            (Some(choice), None) => ProposalResult::Winner(*choice),
            _ => ProposalResult::Tie,
        }
    }
}

/// Terminal outcome of a finalized proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalResult {
    /// One choice held strictly the greatest accumulated weight.
    Winner(VoteChoice),
    /// Two or more choices shared the maximum.
    Tie,
}

impl fmt::Display for ProposalResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Winner(choice) => write!(f, "{}", choice),
            Self::Tie => write!(f, "tie"),
        }
    }
}
