use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use tera::Tera;

use crate::domain::search::SearchTerms;
use crate::forms::main::DispatchForm;
use crate::routes::{base_context, redirect, render_template};
use crate::services::ServiceError;
use crate::services::directory::DirectoryStore;
use crate::services::dispatch::{DispatchError, NotificationDispatcher};
use crate::services::main::{self as main_service, IndexQuery};

#[get("/")]
/// Search page with the filtered results and the full A-Z list.
pub async fn show_index(
    params: web::Query<IndexQuery>,
    store: web::Data<DirectoryStore>,
    dispatcher: web::Data<NotificationDispatcher>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let data = main_service::load_index_page(
        store.get_ref(),
        dispatcher.get_ref(),
        params.into_inner(),
    );

    let mut context = base_context(&flash_messages, "index");
    if let Some(detail) = &data.load_error {
        context.insert("load_error", "Erro ao buscar clientes.");
        context.insert("load_error_detail", detail);
    }
    context.insert("status", &data.status);
    context.insert("search", &data.search);
    context.insert("results", &data.results);
    context.insert("all_clients", &data.all_clients);
    context.insert("name_suggestions", &data.name_suggestions);
    context.insert("phone_suggestions", &data.phone_suggestions);
    context.insert("webhook_configured", &data.webhook_configured);

    render_template(&tera, "main/index.html", &context)
}

#[post("/client/dispatch")]
/// Forward the selected client to the webhook and report the outcome.
pub async fn dispatch_client(
    store: web::Data<DirectoryStore>,
    dispatcher: web::Data<NotificationDispatcher>,
    web::Form(form): web::Form<DispatchForm>,
) -> impl Responder {
    let back = index_url(&form.search_terms());

    match main_service::dispatch_client(store.get_ref(), dispatcher.get_ref(), &form).await {
        Ok(receipt) => {
            FlashMessage::success(format!(
                "Dados de {} enviados com sucesso!",
                receipt.client.name
            ))
            .send();
        }
        Err(ServiceError::Dispatch(err)) => {
            FlashMessage::error(dispatch_error_message(&err)).send();
        }
        Err(ServiceError::NotFound) => {
            FlashMessage::error("Cliente não encontrado.").send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            log::error!("Failed to dispatch client: {err}");
            FlashMessage::error("Não foi possível enviar os dados.").send();
        }
    }

    redirect(&back)
}

/// User-facing text for a failed dispatch.
fn dispatch_error_message(err: &DispatchError) -> String {
    match err {
        DispatchError::Configuration => "URL do Webhook não configurada.".to_string(),
        DispatchError::AlreadyInFlight(client) => {
            format!("Envio para {} já está em andamento.", client.name)
        }
        DispatchError::RemoteRejected { client, status, .. } => {
            format!(
                "Erro ao enviar dados para {}. Status: {status}",
                client.name
            )
        }
        DispatchError::Network { client, .. } => {
            format!("Erro de rede ao enviar dados para {}.", client.name)
        }
    }
}

/// Index location restoring the given search terms.
fn index_url(terms: &SearchTerms) -> String {
    if terms.is_empty() {
        return "/".to_string();
    }
    match serde_html_form::to_string(terms) {
        Ok(query) => format!("/?{query}"),
        Err(err) => {
            log::warn!("Failed to encode search terms: {err}");
            "/".to_string()
        }
    }
}
