//! # HTTP Server
//!
//! Combines the post, thread and observability routers into one Axum app.

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use super::config::HttpServerConfig;
use super::observability_routes::{health_routes, observability_routes, service_routes};
use super::post_routes::post_routes;
use super::thread_routes::thread_routes;
use crate::forum::{MemoryStore, PostService};
use crate::observability::{log_event_with_fields, Event};

/// HTTP server for the forum API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server over an empty in-memory store
    pub fn new() -> Self {
        Self::with_service(
            HttpServerConfig::default(),
            Arc::new(PostService::new(Arc::new(MemoryStore::new()))),
        )
    }

    /// Create a server over an existing post service
    pub fn with_service(config: HttpServerConfig, service: Arc<PostService>) -> Self {
        let router = Self::build_router(&config, service);
        Self { config, router }
    }

    fn build_router(config: &HttpServerConfig, service: Arc<PostService>) -> Router {
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        let api = Router::new()
            .merge(post_routes(service.clone()))
            .merge(thread_routes(service.clone()))
            .merge(service_routes(service.clone()));

        Router::new()
            .merge(health_routes())
            .nest("/api", api)
            .nest("/observability", observability_routes(service))
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the listener fails
    pub async fn start(self) -> Result<(), io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid socket address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        let bound = listener.local_addr()?.to_string();
        log_event_with_fields(Event::ServerStart, &[("addr", bound.as_str())]);

        axum::serve(listener, self.router).await?;
        Ok(())
    }
}

impl Default for HttpServer {
    fn default() -> Self {
        Self::new()
    }
}
