//! REST access to the hosted survey table.

use crate::domain::client::Client;
use crate::models::client::ClientRow;
use crate::repository::ClientReader;
use crate::repository::errors::{RepositoryError, RepositoryResult};

/// [`ClientReader`] backed by a Supabase (PostgREST) table.
#[derive(Clone, Debug)]
pub struct SupabaseRepository {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    table: String,
}

impl SupabaseRepository {
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        table: impl Into<String>,
    ) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            api_key: api_key.into(),
            table: table.into(),
        }
    }

    /// Endpoint exposing the rows of the configured table.
    pub fn table_url(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            self.base_url.trim_end_matches('/'),
            self.table
        )
    }
}

impl ClientReader for SupabaseRepository {
    async fn list_clients(&self) -> RepositoryResult<Vec<Client>> {
        let response = self
            .http
            .get(self.table_url())
            .query(&[("select", "*")])
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RepositoryError::Remote {
                status: status.as_u16(),
                body,
            });
        }

        let rows: Vec<ClientRow> = response.json().await?;
        let received = rows.len();

        let clients: Vec<Client> = rows
            .into_iter()
            .filter_map(|row| {
                let id = row.id;
                match Client::try_from(row) {
                    Ok(client) => Some(client),
                    Err(err) => {
                        log::warn!("Skipping client row {id}: {err}");
                        None
                    }
                }
            })
            .collect();

        log::info!(
            "Fetched {} of {received} rows from table {}",
            clients.len(),
            self.table
        );

        Ok(clients)
    }
}
