//! HTTP surface for the asteroid list
//!
//! Serves `GET /asteroids` as a JSON array. Failures become a 500 whose body
//! is either the generic status text or, in debug mode, the error message.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use log::{error, info};
use tokio::net::TcpListener;

use crate::data::{AsteroidsError, AsteroidsSource};

/// Route serving the asteroid list
pub const ASTEROIDS_ROUTE: &str = "/asteroids";

/// Handler for the asteroids route
#[derive(Debug)]
pub struct AsteroidsHttpHandler<S> {
    source: S,
    /// Expose error messages to clients instead of the generic status text
    debug: bool,
}

impl<S: AsteroidsSource> AsteroidsHttpHandler<S> {
    pub fn new(source: S, debug: bool) -> Self {
        Self { source, debug }
    }

    /// Builds the response for one request
    async fn respond(&self) -> Response {
        match self.source.get_all().await {
            Ok(asteroids) => (
                [(header::ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"))],
                Json(asteroids),
            )
                .into_response(),
            Err(err) => self.error_response(&err),
        }
    }

    fn error_response(&self, err: &AsteroidsError) -> Response {
        error!("failed to get asteroids: {}", err);

        let status = StatusCode::INTERNAL_SERVER_ERROR;
        let body = if self.debug {
            err.to_string()
        } else {
            status.canonical_reason().unwrap_or_default().to_string()
        };

        (status, body).into_response()
    }
}

/// Builds the application router
pub fn router<S>(handler: AsteroidsHttpHandler<S>) -> Router
where
    S: AsteroidsSource + Send + Sync + 'static,
{
    Router::new()
        .route(ASTEROIDS_ROUTE, get(get_asteroids::<S>))
        .with_state(Arc::new(handler))
}

async fn get_asteroids<S>(State(handler): State<Arc<AsteroidsHttpHandler<S>>>) -> Response
where
    S: AsteroidsSource + Send + Sync + 'static,
{
    handler.respond().await
}

/// Serves `router` on `listener` until the server fails
pub async fn serve(listener: TcpListener, router: Router) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        info!("starting http server on {}", addr);
    }
    axum::serve(listener, router).await
}
