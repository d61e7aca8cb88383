use validator::Validate;

use crate::domain::client::Client;
use crate::domain::search::SearchTerms;
use crate::dto::main::{ClientListItem, DirectoryStatus, IndexPageData};
pub use crate::dto::main::IndexQuery;
use crate::forms::main::DispatchForm;
use crate::services::directory::{DirectoryState, DirectoryStore};
use crate::services::dispatch::{DispatchReceipt, NotificationDispatcher};
use crate::services::{ServiceError, ServiceResult};

/// Builds the search page: filtered results, suggestions and the A-Z list.
pub fn load_index_page(
    store: &DirectoryStore,
    dispatcher: &NotificationDispatcher,
    query: IndexQuery,
) -> IndexPageData {
    let (status, load_error) = match store.state() {
        DirectoryState::Uninitialized | DirectoryState::Loading => {
            (DirectoryStatus::Loading, None)
        }
        DirectoryState::Loaded(_) => (DirectoryStatus::Loaded, None),
        DirectoryState::Failed(message) => (DirectoryStatus::Failed, Some(message)),
    };

    let directory = store.directory();
    let search = SearchTerms::from(query);
    let sending = dispatcher.in_flight();
    let item = |client: &Client| ClientListItem::new(client, sending.contains(&client.id));

    let results = directory
        .filtered(&search)
        .into_iter()
        .map(item)
        .collect();
    let all_clients = directory.all().iter().map(item).collect();
    let name_suggestions = directory
        .name_suggestions(&search.name)
        .into_iter()
        .map(str::to_string)
        .collect();
    let phone_suggestions = directory
        .phone_suggestions(&search.phone)
        .into_iter()
        .map(str::to_string)
        .collect();

    IndexPageData {
        status,
        load_error,
        search,
        results,
        all_clients,
        name_suggestions,
        phone_suggestions,
        webhook_configured: dispatcher.is_configured(),
    }
}

/// Validates the form and forwards the selected client to the webhook.
pub async fn dispatch_client(
    store: &DirectoryStore,
    dispatcher: &NotificationDispatcher,
    form: &DispatchForm,
) -> ServiceResult<DispatchReceipt> {
    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form(
            "Erro de validação do formulário".to_string(),
        ));
    }

    let client_id = form.client_id()?;
    let directory = store.directory();
    let client = directory.get(client_id).ok_or(ServiceError::NotFound)?;

    dispatcher.dispatch(client).await.map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{ClientId, ClientName, PhoneNumber};
    use crate::repository::ClientReader;
    use crate::repository::errors::{RepositoryError, RepositoryResult};
    use crate::services::dispatch::DispatchError;

    struct StaticSource(Vec<Client>);

    impl ClientReader for StaticSource {
        async fn list_clients(&self) -> RepositoryResult<Vec<Client>> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    impl ClientReader for FailingSource {
        async fn list_clients(&self) -> RepositoryResult<Vec<Client>> {
            Err(RepositoryError::Remote {
                status: 401,
                body: "invalid key".to_string(),
            })
        }
    }

    fn client(id: i64, name: &str, phone: &str) -> Client {
        Client::new(
            ClientId::new(id).expect("valid id"),
            ClientName::new(name).expect("valid name"),
            PhoneNumber::new(phone),
        )
    }

    async fn loaded_store() -> DirectoryStore {
        let store = DirectoryStore::new();
        store
            .load(&StaticSource(vec![
                client(2, "Bruno Costa", "11988887777"),
                client(1, "Ana Silva", "11999990000"),
            ]))
            .await
            .expect("load succeeds");
        store
    }

    fn unconfigured() -> NotificationDispatcher {
        NotificationDispatcher::new(reqwest::Client::new(), None)
    }

    #[actix_web::test]
    async fn index_page_lists_filtered_and_full_views() {
        let store = loaded_store().await;
        let query = IndexQuery {
            name: Some("an".to_string()),
            phone: None,
        };

        let page = load_index_page(&store, &unconfigured(), query);

        assert_eq!(page.status, DirectoryStatus::Loaded);
        assert_eq!(page.load_error, None);
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].name, "Ana Silva");
        assert!(!page.results[0].sending);
        assert_eq!(page.all_clients.len(), 2);
        assert_eq!(page.all_clients[0].name, "Ana Silva");
        assert_eq!(page.name_suggestions, vec!["Ana Silva"]);
        assert!(page.phone_suggestions.is_empty());
        assert!(!page.webhook_configured);
    }

    #[actix_web::test]
    async fn index_page_reports_failed_load() {
        let store = DirectoryStore::new();
        let _ = store.load(&FailingSource).await;

        let page = load_index_page(&store, &unconfigured(), IndexQuery::default());

        assert_eq!(page.status, DirectoryStatus::Failed);
        assert_eq!(
            page.load_error.as_deref(),
            Some("Record source responded with status 401: invalid key")
        );
        assert!(page.results.is_empty());
        assert!(page.all_clients.is_empty());
    }

    #[test]
    fn index_page_before_load_is_loading() {
        let store = DirectoryStore::new();
        let page = load_index_page(&store, &unconfigured(), IndexQuery::default());
        assert_eq!(page.status, DirectoryStatus::Loading);
    }

    #[actix_web::test]
    async fn dispatch_unknown_client_is_not_found() {
        let store = loaded_store().await;
        let form = DispatchForm {
            client_id: 42,
            name: String::new(),
            phone: String::new(),
        };

        let result = dispatch_client(&store, &unconfigured(), &form).await;

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[actix_web::test]
    async fn dispatch_rejects_invalid_form() {
        let store = loaded_store().await;
        let form = DispatchForm {
            client_id: -1,
            name: String::new(),
            phone: String::new(),
        };

        let result = dispatch_client(&store, &unconfigured(), &form).await;

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[actix_web::test]
    async fn dispatch_without_webhook_is_configuration_error() {
        let store = loaded_store().await;
        let form = DispatchForm {
            client_id: 1,
            name: String::new(),
            phone: String::new(),
        };

        let result = dispatch_client(&store, &unconfigured(), &form).await;

        assert!(matches!(
            result,
            Err(ServiceError::Dispatch(DispatchError::Configuration))
        ));
    }
}
