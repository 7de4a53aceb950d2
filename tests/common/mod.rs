//! Shared utilities for integration testing.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::net::TcpListener;

use catalog_proxy::config::AppConfig;
use catalog_proxy::http::HttpServer;
use catalog_proxy::lifecycle::Shutdown;

/// How the mock catalog API answers.
#[derive(Debug, Clone, Copy)]
pub enum Behaviour {
    /// Serve the configured products.
    Normal,
    /// Answer every request with this status and an empty body.
    Status(u16),
    /// Answer 200 with a body that is not JSON.
    Garbage,
    /// Answer 200 with a JSON `null` body.
    Null,
    /// Serve normally after sleeping.
    Slow(Duration),
}

/// A programmable stand-in for the upstream catalog API.
#[derive(Clone)]
pub struct MockUpstream {
    products: Arc<Value>,
    behaviour: Behaviour,
    hits: Arc<AtomicUsize>,
}

impl MockUpstream {
    pub fn new(products: Value, behaviour: Behaviour) -> Self {
        Self {
            products: Arc::new(products),
            behaviour,
            hits: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of requests the mock has received.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Serve the mock on an ephemeral port.
    pub async fn start(&self) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = Router::new()
            .route("/products", get(list_products))
            .route("/products/categories", get(list_categories))
            .route("/products/{id}", get(get_product))
            .with_state(self.clone());

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        addr
    }

    async fn respond(&self, body: Value) -> Response {
        self.hits.fetch_add(1, Ordering::SeqCst);
        match self.behaviour {
            Behaviour::Normal => Json(body).into_response(),
            Behaviour::Status(code) => StatusCode::from_u16(code).unwrap().into_response(),
            Behaviour::Garbage => (StatusCode::OK, "<html>maintenance</html>").into_response(),
            Behaviour::Null => Json(Value::Null).into_response(),
            Behaviour::Slow(delay) => {
                tokio::time::sleep(delay).await;
                Json(body).into_response()
            }
        }
    }
}

async fn list_products(State(mock): State<MockUpstream>) -> Response {
    let body = (*mock.products).clone();
    mock.respond(body).await
}

async fn get_product(State(mock): State<MockUpstream>, Path(id): Path<i64>) -> Response {
    let found = mock
        .products
        .as_array()
        .and_then(|items| items.iter().find(|p| p["id"] == id))
        .cloned();

    match found {
        Some(product) => mock.respond(product).await,
        None => {
            mock.hits.fetch_add(1, Ordering::SeqCst);
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

async fn list_categories(State(mock): State<MockUpstream>) -> Response {
    let mut categories: Vec<Value> = Vec::new();
    for product in mock.products.as_array().into_iter().flatten() {
        if !categories.contains(&product["category"]) {
            categories.push(product["category"].clone());
        }
    }
    mock.respond(Value::Array(categories)).await
}

fn external(id: i64, title: &str, price: f64, category: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "price": price,
        "description": format!("{title} description"),
        "category": category,
        "image": format!("https://img.example/{id}.jpg"),
        "rating": { "rate": 4.1, "count": 120 }
    })
}

/// Three Electronics products and two others, in upstream order.
pub fn sample_products() -> Value {
    json!([
        external(1, "Backpack", 109.95, "men's clothing"),
        external(9, "WD 2TB Elements Portable Drive", 64.0, "Electronics"),
        external(10, "SanDisk SSD PLUS 1TB", 109.0, "Electronics"),
        external(5, "Gold Ring", 695.0, "jewelery"),
        external(14, "Samsung 49-Inch Monitor", 999.99, "Electronics"),
    ])
}

/// An address nothing listens on.
pub fn closed_port() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

/// Config pointing at `upstream`, with fast upstream deadlines.
pub fn config_for(upstream: SocketAddr) -> AppConfig {
    let mut config = AppConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.upstream.base_url = format!("http://{}/", upstream);
    config.upstream.request_timeout_secs = 1;
    config.upstream.connect_timeout_secs = 1;
    config.upstream.use_system_proxy = false;
    config
}

/// A running proxy instance.
pub struct TestServer {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    shutdown: Shutdown,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client.get(self.url(path)).send().await.expect("proxy unreachable")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start the proxy on an ephemeral port.
pub async fn start_proxy(config: AppConfig) -> TestServer {
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config).unwrap();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    TestServer {
        addr,
        client,
        shutdown,
    }
}

/// Start a mock upstream with `behaviour` and a proxy in front of it.
pub async fn start_stack(behaviour: Behaviour) -> (MockUpstream, TestServer) {
    let mock = MockUpstream::new(sample_products(), behaviour);
    let upstream = mock.start().await;
    let server = start_proxy(config_for(upstream)).await;
    (mock, server)
}
