//! Form definitions backing the lookup routes.

pub mod main;
