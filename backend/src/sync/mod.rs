//! Sync boundary: wire vocabulary and the remote backend adapter

pub mod client;
pub mod wire;
