use crate::domain::search::SearchTerms;
use crate::dto::api::{ClientsResponse, SuggestionsResponse};
use crate::services::directory::DirectoryStore;

/// Returns the clients matching both search terms.
pub fn list_clients(store: &DirectoryStore, terms: &SearchTerms) -> ClientsResponse {
    let directory = store.directory();
    let clients: Vec<_> = directory.filtered(terms).into_iter().cloned().collect();

    ClientsResponse {
        total: clients.len(),
        clients,
    }
}

/// Returns the autocomplete entries for both search inputs.
pub fn suggest(store: &DirectoryStore, terms: &SearchTerms) -> SuggestionsResponse {
    let directory = store.directory();

    SuggestionsResponse {
        names: directory
            .name_suggestions(&terms.name)
            .into_iter()
            .map(str::to_string)
            .collect(),
        phones: directory
            .phone_suggestions(&terms.phone)
            .into_iter()
            .map(str::to_string)
            .collect(),
    }
}
