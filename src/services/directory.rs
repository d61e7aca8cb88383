//! In-memory client directory and its single-shot load lifecycle.

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::domain::client::Client;
use crate::domain::search::{SearchTerms, collate, name_starts_with};
use crate::domain::types::ClientId;
use crate::repository::ClientReader;
use crate::repository::errors::RepositoryResult;
use crate::services::ServiceResult;

/// Maximum number of autocomplete entries returned per term.
pub const MAX_SUGGESTIONS: usize = 5;

/// Full record set kept in canonical (A-Z by name) order.
#[derive(Clone, Debug, Default)]
pub struct ClientDirectory {
    clients: Vec<Client>,
}

impl ClientDirectory {
    /// Builds the directory, sorting the records by name.
    ///
    /// The sort is stable so records sharing a name keep their source order.
    pub fn new(mut clients: Vec<Client>) -> Self {
        clients.sort_by(|a, b| collate(a.name.as_str(), b.name.as_str()));
        Self { clients }
    }

    /// Fetches every record from the source. No retry on failure.
    pub async fn load<R>(repo: &R) -> RepositoryResult<Self>
    where
        R: ClientReader,
    {
        let clients = repo.list_clients().await?;
        Ok(Self::new(clients))
    }

    /// Canonical A-Z listing.
    pub fn all(&self) -> &[Client] {
        &self.clients
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    pub fn get(&self, id: ClientId) -> Option<&Client> {
        self.clients.iter().find(|client| client.id == id)
    }

    /// Records matching both terms, in canonical order.
    pub fn filtered(&self, terms: &SearchTerms) -> Vec<&Client> {
        self.clients
            .iter()
            .filter(|client| terms.matches(client))
            .collect()
    }

    /// Up to [`MAX_SUGGESTIONS`] distinct names starting with `term`, ignoring case.
    pub fn name_suggestions(&self, term: &str) -> Vec<&str> {
        if term.is_empty() {
            return Vec::new();
        }
        distinct_capped(
            self.clients
                .iter()
                .map(|client| client.name.as_str())
                .filter(|name| name_starts_with(name, term)),
        )
    }

    /// Up to [`MAX_SUGGESTIONS`] distinct phones starting with `term`.
    pub fn phone_suggestions(&self, term: &str) -> Vec<&str> {
        if term.is_empty() {
            return Vec::new();
        }
        distinct_capped(
            self.clients
                .iter()
                .map(|client| client.phone.as_str())
                .filter(|phone| phone.starts_with(term)),
        )
    }
}

fn distinct_capped<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut result: Vec<&str> = Vec::with_capacity(MAX_SUGGESTIONS);
    for value in values {
        if result.len() == MAX_SUGGESTIONS {
            break;
        }
        if !result.contains(&value) {
            result.push(value);
        }
    }
    result
}

/// Lifecycle of the shared directory.
#[derive(Clone, Debug, Default)]
pub enum DirectoryState {
    #[default]
    Uninitialized,
    Loading,
    Loaded(Arc<ClientDirectory>),
    /// Load failed; the message is kept for display.
    Failed(String),
}

/// Explicitly owned holder of the directory shared with request handlers.
#[derive(Debug, Default)]
pub struct DirectoryStore {
    state: RwLock<DirectoryState>,
}

impl DirectoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, DirectoryState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, DirectoryState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Populates the store once and returns the number of loaded records.
    ///
    /// Later calls leave the store untouched. On failure the directory stays
    /// empty and the error is returned for user notification.
    pub async fn load<R>(&self, repo: &R) -> ServiceResult<usize>
    where
        R: ClientReader,
    {
        {
            let mut state = self.write();
            if !matches!(*state, DirectoryState::Uninitialized) {
                log::warn!("Client directory load requested more than once; ignoring");
                return Ok(self.directory_from(&state).len());
            }
            *state = DirectoryState::Loading;
        }

        match ClientDirectory::load(repo).await {
            Ok(directory) => {
                let count = directory.len();
                log::info!("Loaded {count} clients into the directory");
                *self.write() = DirectoryState::Loaded(Arc::new(directory));
                Ok(count)
            }
            Err(err) => {
                log::error!("Error fetching clients: {err}");
                *self.write() = DirectoryState::Failed(err.to_string());
                Err(err.into())
            }
        }
    }

    fn directory_from(&self, state: &DirectoryState) -> Arc<ClientDirectory> {
        match state {
            DirectoryState::Loaded(directory) => Arc::clone(directory),
            _ => Arc::new(ClientDirectory::default()),
        }
    }

    /// Current directory; empty until loaded or after a failed load.
    pub fn directory(&self) -> Arc<ClientDirectory> {
        self.directory_from(&self.read())
    }

    pub fn state(&self) -> DirectoryState {
        self.read().clone()
    }
}
