//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request ID, tracing, CORS, deadline, body limit, metrics)
//! - Serve the OpenAPI document and Swagger UI when enabled
//! - Bind server to listener and serve until shutdown

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{Request, State};
use axum::http::HeaderValue;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::catalog::LocalProductStore;
use crate::config::{AppConfig, CorsConfig};
use crate::http::error::ApiError;
use crate::http::request::{make_request_span, UuidRequestId, X_REQUEST_ID};
use crate::http::{docs, handlers};
use crate::observability::metrics;
use crate::upstream::{CatalogClient, UpstreamResult};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogClient,
    pub store: Arc<LocalProductStore>,
}

impl AppState {
    /// Build the state described by the configuration.
    pub fn from_config(config: &AppConfig) -> UpstreamResult<Self> {
        let store = if config.store.seed_demo_products {
            LocalProductStore::seeded()
        } else {
            LocalProductStore::new()
        };

        Ok(Self {
            catalog: CatalogClient::new(&config.upstream)?,
            store: Arc::new(store),
        })
    }
}

/// HTTP server for the catalog API.
pub struct HttpServer {
    router: Router,
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: AppConfig) -> UpstreamResult<Self> {
        let state = AppState::from_config(&config)?;
        Ok(Self::with_state(&config, state))
    }

    /// Create a server around an existing state (shared store, custom client).
    pub fn with_state(config: &AppConfig, state: AppState) -> Self {
        let router = Self::build_router(config, state.clone());
        Self { router, state }
    }

    /// Build the Axum router with all middleware layers.
    ///
    /// Layers run outermost-last: the request ID is set first so the trace
    /// span and every log line below it carry it.
    fn build_router(config: &AppConfig, state: AppState) -> Router {
        let mut router = Router::new()
            .route(
                "/api/products",
                get(handlers::list_products).post(handlers::create_product),
            )
            .route(
                "/api/products/{id}",
                get(handlers::get_product).delete(handlers::delete_product),
            )
            .route("/api/categories", get(handlers::list_categories))
            .route("/api/local-products", get(handlers::list_local_products))
            .route("/api/local-products/{id}", get(handlers::get_local_product))
            .route("/health", get(handlers::health));

        if config.docs.enabled {
            router = router
                .route(docs::OPENAPI_PATH, get(docs::openapi_json))
                .route(docs::OPENAPI_ALIAS_PATH, get(docs::openapi_json))
                .route(docs::SWAGGER_UI_PATH, get(docs::swagger_ui));
        }

        let deadline = Duration::from_secs(config.timeouts.request_secs);
        router
            .fallback(handlers::fallback)
            .with_state(state)
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(middleware::from_fn(track_requests))
            .layer(middleware::from_fn_with_state(deadline, enforce_deadline))
            .layer(cors_layer(&config.cors))
            .layer(PropagateRequestIdLayer::new(X_REQUEST_ID.clone()))
            .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
            .layer(SetRequestIdLayer::new(X_REQUEST_ID.clone(), UuidRequestId))
    }

    /// The fully layered router, for in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Shared application state.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the server on `listener` until `shutdown` fires, then drain.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.state.catalog.base_url(),
            local_products = self.state.store.len(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Answer 408 with the usual JSON error body once `deadline` has passed.
async fn enforce_deadline(
    State(deadline): State<Duration>,
    request: Request,
    next: Next,
) -> Response {
    match tokio::time::timeout(deadline, next.run(request)).await {
        Ok(response) => response,
        Err(_) => ApiError::RequestTimeout(format!(
            "The request did not complete within {} seconds.",
            deadline.as_secs()
        ))
        .into_response(),
    }
}

/// Count and time every request.
async fn track_requests(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let response = next.run(request).await;
    metrics::record_request(&method, response.status().as_u16(), start);
    response
}
