//! Governance engine for Agora.
//!
//! Maintains a registry of authorized voters, lets registered voters open
//! time-bounded proposals, collects votes directly or by single-hop
//! delegation, and finalizes each proposal into an immutable tally.
//!
//! The engine is a single serialized state machine. The hosting transport
//! authenticates callers, supplies the current time with each call, and
//! drains the emitted events after each successful mutation; the engine
//! itself never authenticates, never reads the clock, and never publishes.

pub mod engine;
pub mod events;
pub mod snapshot;

pub use engine::GovernanceEngine;
pub use events::GovernanceEvent;
pub use snapshot::EngineSnapshot;
