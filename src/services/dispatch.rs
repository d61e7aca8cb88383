//! Forwarding of a single client record to the configured webhook.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;

use crate::domain::client::Client;
use crate::domain::types::{ClientId, WebhookUrl};
use crate::models::client::WebhookPayload;

/// Terminal failure of one dispatch attempt. None of them is retried.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("webhook url is not configured")]
    Configuration,

    #[error("dispatch for {0} is already in flight")]
    AlreadyInFlight(Client),

    #[error("webhook rejected {client} with status {status}: {body}")]
    RemoteRejected {
        client: Client,
        status: u16,
        body: String,
    },

    #[error("network error while sending {client}: {cause}")]
    Network { client: Client, cause: String },
}

/// Successful delivery of a record.
#[derive(Debug, Clone)]
pub struct DispatchReceipt {
    pub client: Client,
    pub status: u16,
}

/// Removes its id from the in-flight set when dropped.
struct InFlightGuard<'a> {
    in_flight: &'a Mutex<HashSet<ClientId>>,
    id: ClientId,
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.id);
    }
}

/// Sends client records to the webhook receiver, one request per dispatch.
#[derive(Debug)]
pub struct NotificationDispatcher {
    http: reqwest::Client,
    webhook_url: Option<WebhookUrl>,
    in_flight: Mutex<HashSet<ClientId>>,
}

impl NotificationDispatcher {
    pub fn new(http: reqwest::Client, webhook_url: Option<WebhookUrl>) -> Self {
        Self {
            http,
            webhook_url,
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.webhook_url.is_some()
    }

    fn lock(&self) -> MutexGuard<'_, HashSet<ClientId>> {
        self.in_flight.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_in_flight(&self, id: ClientId) -> bool {
        self.lock().contains(&id)
    }

    /// Snapshot of the ids currently being sent.
    pub fn in_flight(&self) -> HashSet<ClientId> {
        self.lock().clone()
    }

    fn begin(&self, id: ClientId) -> Option<InFlightGuard<'_>> {
        if self.lock().insert(id) {
            Some(InFlightGuard {
                in_flight: &self.in_flight,
                id,
            })
        } else {
            None
        }
    }

    /// Posts `{cliente_nome, cliente_telefone}` for `client` to the webhook.
    ///
    /// The in-flight marker for `client.id` is held for the duration of the
    /// request and released on every outcome.
    pub async fn dispatch(&self, client: &Client) -> Result<DispatchReceipt, DispatchError> {
        let Some(url) = &self.webhook_url else {
            log::error!("Webhook URL is not configured");
            return Err(DispatchError::Configuration);
        };

        let Some(_guard) = self.begin(client.id) else {
            log::warn!("Dispatch for {client} is already in flight");
            return Err(DispatchError::AlreadyInFlight(client.clone()));
        };

        let payload = WebhookPayload::from(client);

        let response = match self.http.post(url.as_str()).json(&payload).send().await {
            Ok(response) => response,
            Err(err) => {
                log::error!("Error sending webhook for {client}: {err}");
                return Err(DispatchError::Network {
                    client: client.clone(),
                    cause: err.to_string(),
                });
            }
        };

        let status = response.status();
        if status.is_success() {
            log::info!("Sent {client} to webhook, status {status}");
            return Ok(DispatchReceipt {
                client: client.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.unwrap_or_default();
        log::error!("Webhook error response for {client}: {status} {body}");
        Err(DispatchError::RemoteRejected {
            client: client.clone(),
            status: status.as_u16(),
            body,
        })
    }
}
