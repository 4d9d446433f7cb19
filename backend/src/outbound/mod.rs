//! Outbound adapters implementing the domain ports.

pub mod persistence;
pub mod security;
