use serde::Deserialize;
use validator::Validate;

use crate::domain::search::SearchTerms;
use crate::domain::types::{ClientId, TypeConstraintError};

#[derive(Deserialize, Validate)]
/// Form posted by the "send" button of a search result.
pub struct DispatchForm {
    /// Identifier of the client to forward.
    #[validate(range(min = 1))]
    pub client_id: i64,
    /// Name term active when the button was pressed.
    #[serde(default)]
    pub name: String,
    /// Phone term active when the button was pressed.
    #[serde(default)]
    pub phone: String,
}

impl DispatchForm {
    pub fn client_id(&self) -> Result<ClientId, TypeConstraintError> {
        ClientId::new(self.client_id)
    }

    /// Search terms to restore after the redirect.
    pub fn search_terms(&self) -> SearchTerms {
        SearchTerms::new(self.name.clone(), self.phone.clone())
    }
}
