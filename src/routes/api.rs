use actix_web::{HttpResponse, Responder, get, web};

use crate::domain::search::SearchTerms;
use crate::services::api as api_service;
use crate::services::directory::DirectoryStore;

#[get("/v1/clients")]
/// Clients matching the `name` and `phone` query terms, A-Z.
pub async fn api_v1_clients(
    params: web::Query<SearchTerms>,
    store: web::Data<DirectoryStore>,
) -> impl Responder {
    HttpResponse::Ok().json(api_service::list_clients(store.get_ref(), &params))
}

#[get("/v1/suggestions")]
/// Autocomplete entries for the `name` and `phone` query terms.
pub async fn api_v1_suggestions(
    params: web::Query<SearchTerms>,
    store: web::Data<DirectoryStore>,
) -> impl Responder {
    HttpResponse::Ok().json(api_service::suggest(store.get_ref(), &params))
}
