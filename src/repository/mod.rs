use std::future::Future;

use crate::{domain::client::Client, repository::errors::RepositoryResult};

pub mod errors;
pub mod supabase;

pub use supabase::SupabaseRepository;

/// Read access to the hosted table holding the surveyed clients.
pub trait ClientReader {
    /// Fetches every row of the clients table, in source order.
    fn list_clients(&self) -> impl Future<Output = RepositoryResult<Vec<Client>>> + Send;
}
