//! Saved-scenario storage
//!
//! Append-only within a session: snapshots are never edited or removed
//! individually, only cleared together when a new session starts.

pub mod memory;

pub use memory::{InMemoryScenarioStore, ScenarioStore};
