//! Session orchestration: team-gated mutations with optimistic sync

mod engine;

pub use engine::{SessionError, SessionOrchestrator};
