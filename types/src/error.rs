//! Shared error type for all engine operations.

use crate::id::ProposalId;
use crate::time::Timestamp;
use thiserror::Error;

/// Errors surfaced by governance operations.
///
/// Mutating operations are fail-fast: an error means no state was changed.
#[derive(Debug, Error)]
pub enum GovernanceError {
    #[error("caller {0} is not authorized for this action")]
    Unauthorized(String),

    #[error("account {0} is already registered")]
    AlreadyRegistered(String),

    #[error("no voter registered under {0}")]
    VoterNotFound(String),

    #[error("proposal {0} not found")]
    ProposalNotFound(ProposalId),

    #[error("invalid voting window: start {start} is not before end {end}")]
    InvalidWindow { start: Timestamp, end: Timestamp },

    #[error("voting is not open at {now}: window is [{start}, {end})")]
    VotingNotOpen {
        start: Timestamp,
        end: Timestamp,
        now: Timestamp,
    },

    #[error("voting is still open until {ends_at} (now {now})")]
    VotingStillOpen { ends_at: Timestamp, now: Timestamp },

    #[error("{0} has already voted on this proposal")]
    AlreadyVoted(String),

    #[error("cannot delegate to self")]
    SelfDelegation,

    #[error("{0} is not a valid delegate")]
    InvalidDelegate(String),

    #[error("delegate {0} has already cast their ballot")]
    DelegateAlreadyVoted(String),

    #[error("proposal {0} is closed")]
    ProposalClosed(ProposalId),

    #[error("proposal {0} is already finalized")]
    AlreadyFinalized(ProposalId),

    #[error("voting weight must be at least 1")]
    ZeroWeight,

    #[error("snapshot decode failed: {0}")]
    Snapshot(String),
}
