#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use actix_web::http::StatusCode;
use actix_web::{App, HttpResponse, HttpServer, web};
use serde_json::Value;

use survey_lookup::domain::client::Client;
use survey_lookup::domain::types::{ClientId, ClientName, PhoneNumber};
use survey_lookup::repository::ClientReader;
use survey_lookup::repository::errors::RepositoryResult;

/// In-memory record source.
pub struct StaticSource(pub Vec<Client>);

impl ClientReader for StaticSource {
    async fn list_clients(&self) -> RepositoryResult<Vec<Client>> {
        Ok(self.0.clone())
    }
}

pub fn client(id: i64, name: &str, phone: &str) -> Client {
    Client::new(
        ClientId::new(id).expect("valid id"),
        ClientName::new(name).expect("valid name"),
        PhoneNumber::new(phone),
    )
}

pub fn sample_clients() -> Vec<Client> {
    vec![
        client(2, "Bruno Costa", "11988887777"),
        client(1, "Ana Silva", "11999990000"),
    ]
}

/// Bodies received by a stub webhook.
pub type Received = Arc<Mutex<Vec<Value>>>;

/// Starts a webhook stand-in answering `POST /hook` with `status`.
///
/// Requests without a JSON content type are rejected by the extractor.
pub fn start_webhook(status: StatusCode, delay_ms: u64, received: Received) -> String {
    let server = HttpServer::new(move || {
        let received = received.clone();
        App::new().route(
            "/hook",
            web::post().to(move |body: web::Json<Value>| {
                let received = received.clone();
                async move {
                    if delay_ms > 0 {
                        actix_web::rt::time::sleep(std::time::Duration::from_millis(delay_ms))
                            .await;
                    }
                    received
                        .lock()
                        .expect("lock received")
                        .push(body.into_inner());
                    HttpResponse::build(status).body("stub response")
                }
            }),
        )
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("bind webhook stub");

    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    format!("http://{addr}/hook")
}

/// Starts a record source stand-in serving `rows` for `GET /rest/v1/{table}`.
///
/// Answers 401 unless the `apikey` header equals `key`.
pub fn start_record_source(key: &'static str, rows: Value) -> String {
    let server = HttpServer::new(move || {
        let rows = rows.clone();
        App::new().route(
            "/rest/v1/{table}",
            web::get().to(move |req: actix_web::HttpRequest| {
                let rows = rows.clone();
                async move {
                    let authorized = req
                        .headers()
                        .get("apikey")
                        .and_then(|value| value.to_str().ok())
                        == Some(key);
                    if authorized {
                        HttpResponse::Ok().json(rows)
                    } else {
                        HttpResponse::Unauthorized().body("invalid api key")
                    }
                }
            }),
        )
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("bind record source stub");

    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    format!("http://{addr}")
}

/// URL of a local port with nothing listening on it.
pub fn refused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind probe");
    let addr = listener.local_addr().expect("probe address");
    drop(listener);
    format!("http://{addr}/hook")
}

/// HTTP client bypassing any proxy configured in the environment.
pub fn http() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("build http client")
}
