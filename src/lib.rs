use actix_cors::Cors;
use actix_files::Files;
use actix_web::cookie::Key;
use actix_web::{App, HttpServer, middleware, web};
use actix_web_flash_messages::{FlashMessagesFramework, storage::CookieMessageStore};
use tera::Tera;

use crate::models::config::ServerConfig;
use crate::repository::SupabaseRepository;
use crate::routes::api::{api_v1_clients, api_v1_suggestions};
use crate::routes::main::{dispatch_client, show_index};
use crate::services::directory::DirectoryStore;
use crate::services::dispatch::NotificationDispatcher;

pub mod domain;
pub mod dto;
pub mod error_conversions;
pub mod forms;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;

/// Registers the page and API routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(api_v1_clients)
            .service(api_v1_suggestions),
    )
    .service(show_index)
    .service(dispatch_client);
}

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let webhook_url = server_config
        .webhook_url()
        .map_err(|e| std::io::Error::other(format!("Invalid webhook url: {e}")))?;
    if webhook_url.is_none() {
        log::warn!("Webhook URL is not configured; sending client data is disabled");
    }

    // One HTTP client serves both the record source and the webhook.
    let http = reqwest::Client::builder()
        .timeout(server_config.request_timeout())
        .build()
        .map_err(|e| std::io::Error::other(format!("Failed to build HTTP client: {e}")))?;

    let repo = SupabaseRepository::new(
        http.clone(),
        server_config.supabase_url.as_str(),
        server_config.supabase_key.as_str(),
        server_config.clients_table.as_str(),
    );

    let store = web::Data::new(DirectoryStore::new());
    let dispatcher = web::Data::new(NotificationDispatcher::new(http, webhook_url));

    // The page renders a loading state until this finishes.
    let loader = store.clone();
    actix_web::rt::spawn(async move {
        match loader.load(&repo).await {
            Ok(count) => log::debug!("Initial client load finished with {count} clients"),
            // Already logged by the store and kept for the page.
            Err(err) => log::debug!("Initial client load failed: {err}"),
        }
    });

    let secret_key = Key::from(server_config.secret.as_bytes());

    let message_store = CookieMessageStore::builder(secret_key).build();
    let message_framework = FlashMessagesFramework::builder(message_store).build();

    let tera = Tera::new(&server_config.templates_dir)
        .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

    let bind_address = (server_config.address.clone(), server_config.port);
    let assets_dir = server_config.assets_dir.clone();

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(message_framework.clone())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/assets", &assets_dir))
            .configure(configure_routes)
            .app_data(web::Data::new(tera.clone()))
            .app_data(store.clone())
            .app_data(dispatcher.clone())
    })
    .bind(bind_address)?
    .run()
    .await
}
