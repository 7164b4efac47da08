//! Domain models for the negotiation state engine

pub mod approval;
pub mod event;
pub mod offering;
pub mod session;
pub mod terms;
