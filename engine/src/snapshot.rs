//! Engine state snapshots.
//!
//! The hosting layer decides where engine state lives; these helpers give
//! it one opaque byte blob per engine, keyed by [`GovernanceEngine::meta_key`].
//! Pending events are not part of a snapshot — they belong to the transport
//! that drains them, so a restored engine starts with an empty queue.

use crate::engine::GovernanceEngine;
use agora_ledger::ProposalLedger;
use agora_registry::VoterRegistry;
use agora_types::{AccountAddress, GovernanceError};
use serde::{Deserialize, Serialize};

/// Meta-store key used for persisting the engine state.
const ENGINE_META_KEY: &str = "governance_engine_state";

/// Serializable snapshot of the engine's logical state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EngineSnapshot {
    pub owner: AccountAddress,
    pub registry: VoterRegistry,
    pub ledger: ProposalLedger,
}

impl GovernanceEngine {
    /// Serialize the engine's logical state to bytes.
    pub fn save_state(&self) -> Vec<u8> {
        let snapshot = EngineSnapshot {
            owner: self.owner().clone(),
            registry: self.registry.clone(),
            ledger: self.ledger.clone(),
        };
        bincode::serialize(&snapshot).unwrap_or_default()
    }

    /// Restore an engine from serialized bytes.
    pub fn load_state(data: &[u8]) -> Result<Self, GovernanceError> {
        let snapshot: EngineSnapshot = bincode::deserialize(data)
            .map_err(|e| GovernanceError::Snapshot(e.to_string()))?;
        Ok(Self::from_parts(
            snapshot.owner,
            snapshot.registry,
            snapshot.ledger,
        ))
    }

    /// The meta-store key used for engine state persistence.
    pub fn meta_key() -> &'static str {
        ENGINE_META_KEY
    }
}
