//! Domain aggregates exposed by the lookup service layer.

pub mod client;
pub mod search;
pub mod types;
