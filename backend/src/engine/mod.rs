//! Pure computation engines
//!
//! Every function in here is a synchronous reduction over a snapshot of the
//! session state. No caching, no partial results, no side effects beyond
//! the explicit `&mut` arguments of the mutation rule.

pub mod bids;
pub mod mutation;
pub mod valuation;
