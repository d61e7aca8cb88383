use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::domain::types::{ClientId, ClientName, PhoneNumber};

/// Surveyed client as loaded from the record source.
///
/// Records are never edited by this application once loaded.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Client {
    pub id: ClientId,
    pub name: ClientName,
    pub phone: PhoneNumber,
}

impl Client {
    #[must_use]
    pub fn new(id: ClientId, name: ClientName, phone: PhoneNumber) -> Self {
        Self { id, name, phone }
    }
}

impl Display for Client {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (#{})", self.name, self.id)
    }
}
