//! Wire and configuration models shared across the service.

pub mod client;
pub mod config;
