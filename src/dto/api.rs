//! DTOs exposed by the JSON API endpoints.

use serde::Serialize;

use crate::domain::client::Client;

/// Result payload returned by [`crate::services::api::list_clients`].
#[derive(Debug, Serialize)]
pub struct ClientsResponse {
    /// Number of clients matching the filter.
    pub total: usize,
    /// Matching clients in A-Z order.
    pub clients: Vec<Client>,
}

/// Autocomplete entries for both search inputs.
#[derive(Debug, Serialize)]
pub struct SuggestionsResponse {
    pub names: Vec<String>,
    pub phones: Vec<String>,
}
