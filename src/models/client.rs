use std::fmt;

use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

use crate::domain::client::Client as DomainClient;
use crate::domain::types::{ClientId, ClientName, PhoneNumber, TypeConstraintError};

/// Primary key of a survey row.
///
/// Clients are identified by integer keys. Rows keyed any other way (uuid,
/// text) still decode so the rest of the table loads; they fail conversion
/// and are skipped like rows with a blank name.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum RowKey {
    Integer(i64),
    Other(IgnoredAny),
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKey::Integer(id) => write!(f, "{id}"),
            RowKey::Other(_) => f.write_str("<non-integer key>"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
/// Row of the survey table as returned by the record source.
pub struct ClientRow {
    pub id: RowKey,
    pub cliente_nome: String,
    #[serde(default)]
    pub cliente_telefone: Option<String>,
}

impl TryFrom<ClientRow> for DomainClient {
    type Error = TypeConstraintError;

    fn try_from(row: ClientRow) -> Result<Self, Self::Error> {
        let id = match row.id {
            RowKey::Integer(id) => ClientId::new(id)?,
            RowKey::Other(_) => return Err(TypeConstraintError::NonIntegerId),
        };
        Ok(DomainClient::new(
            id,
            ClientName::new(row.cliente_nome)?,
            PhoneNumber::new(row.cliente_telefone.unwrap_or_default()),
        ))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
/// JSON body posted to the webhook receiver.
pub struct WebhookPayload {
    pub cliente_nome: String,
    pub cliente_telefone: String,
}

impl From<&DomainClient> for WebhookPayload {
    fn from(client: &DomainClient) -> Self {
        Self {
            cliente_nome: client.name.as_str().to_string(),
            cliente_telefone: client.phone.as_str().to_string(),
        }
    }
}
