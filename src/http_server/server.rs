//! # HTTP Server
//!
//! Combines the manga and health routers into one axum app.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::{extract::Request, middleware::Next, response::Response, Router};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use super::config::HttpServerConfig;
use super::manga_routes::{manga_routes, MangaState};
use super::observability_routes::health_routes;
use crate::observability::Logger;
use crate::service::MangaService;

/// Route prefixes the manga router is mounted under
pub const MANGA_ROUTE_PREFIXES: [&str; 2] = ["/records", "/api/v1/manga"];

/// HTTP server for the manga API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    pub fn new(config: HttpServerConfig, service: MangaService) -> Self {
        let router = Self::build_router(&config, service);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    pub fn build_router(config: &HttpServerConfig, service: MangaService) -> Router {
        let state = Arc::new(MangaState::new(service));

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

        let mut router = Router::new().merge(health_routes(state.clone()));
        for prefix in MANGA_ROUTE_PREFIXES {
            router = router.nest(prefix, manga_routes(state.clone()));
        }

        router
            .layer(axum::middleware::from_fn(log_request))
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

    /// Bind and serve until the process is stopped
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid socket address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        Logger::info(
            "SERVER_STARTING",
            &[
                ("addr", &addr.to_string()),
                ("routes", &MANGA_ROUTE_PREFIXES.join(",")),
            ],
        );

        axum::serve(listener, self.router).await?;

        Ok(())
    }
}

/// Log one `HTTP_REQUEST` event per request
async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis().to_string();
    let fields = [
        ("method", method.as_str()),
        ("path", path.as_str()),
        ("status", status.as_str()),
        ("elapsed_ms", elapsed_ms.as_str()),
    ];
    if status.is_server_error() {
        Logger::error("HTTP_REQUEST", &fields);
    } else {
        Logger::info("HTTP_REQUEST", &fields);
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MangaRepository;

    fn service() -> MangaService {
        MangaService::new(Arc::new(MangaRepository::unbacked()))
    }

    #[test]
    fn test_server_with_custom_port() {
        let config = HttpServerConfig {
            port: 8080,
            ..Default::default()
        };
        let server = HttpServer::new(config, service());
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[test]
    fn test_router_builds_with_origins() {
        let config = HttpServerConfig {
            cors_origins: vec!["http://localhost:5173".to_string()],
            ..Default::default()
        };
        let _router = HttpServer::new(config, service()).router();
    }
}
