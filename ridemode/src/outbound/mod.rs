//! Adapters for the domain's outbound ports.

pub mod persistence;
pub mod remote;
