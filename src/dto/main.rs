use serde::{Deserialize, Serialize};

use crate::domain::client::Client;
use crate::domain::search::SearchTerms;

/// Query parameters accepted by the index page service.
#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    /// Name search term typed by the user.
    pub name: Option<String>,
    /// Phone search term typed by the user.
    pub phone: Option<String>,
}

impl From<IndexQuery> for SearchTerms {
    fn from(query: IndexQuery) -> Self {
        SearchTerms::new(
            query.name.unwrap_or_default(),
            query.phone.unwrap_or_default(),
        )
    }
}

/// Client row as rendered in the search results.
#[derive(Debug, Clone, Serialize)]
pub struct ClientListItem {
    pub id: i64,
    pub name: String,
    pub phone: String,
    /// Disables the send button while a request for this client is pending.
    pub sending: bool,
}

impl ClientListItem {
    pub fn new(client: &Client, sending: bool) -> Self {
        Self {
            id: client.id.get(),
            name: client.name.as_str().to_string(),
            phone: client.phone.as_str().to_string(),
            sending,
        }
    }
}

/// Coarse directory status shown by the template.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DirectoryStatus {
    Loading,
    Loaded,
    Failed,
}

/// Data required to render the main index template.
#[derive(Debug)]
pub struct IndexPageData {
    pub status: DirectoryStatus,
    /// Reason the last load failed, if it did.
    pub load_error: Option<String>,
    /// Search terms echoed back to the inputs.
    pub search: SearchTerms,
    pub results: Vec<ClientListItem>,
    /// Full canonical A-Z listing.
    pub all_clients: Vec<ClientListItem>,
    pub name_suggestions: Vec<String>,
    pub phone_suggestions: Vec<String>,
    pub webhook_configured: bool,
}
