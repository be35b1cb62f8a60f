//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use banquito_types::CatalogRepository;

use super::handlers::{self, AppState};
use crate::openapi::ApiDoc;

/// HTTP Server for the catalog API.
pub struct HttpServer<R: CatalogRepository> {
    state: Arc<AppState<R>>,
}

impl<R: CatalogRepository> HttpServer<R> {
    /// Creates a new HTTP server whose services all share `repo`.
    pub fn new(repo: R) -> Self {
        Self {
            state: Arc::new(AppState::new(repo)),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        // Build HTTP metrics layer (uses globally set MeterProvider)
        let metrics = axum_otel_metrics::HttpMetricsLayerBuilder::new().build();

        Router::new()
            .route("/health", get(handlers::health))
            .route(
                "/api/branches",
                get(handlers::list_branches::<R>).post(handlers::create_branch::<R>),
            )
            .route(
                "/api/branches/{code}",
                get(handlers::get_branch::<R>).put(handlers::update_branch::<R>),
            )
            .route(
                "/api/interest-rates",
                get(handlers::list_interest_rates::<R>).post(handlers::create_interest_rate::<R>),
            )
            .route(
                "/api/interest-rates/{id}",
                get(handlers::get_interest_rate::<R>)
                    .put(handlers::update_interest_rate::<R>)
                    .delete(handlers::delete_interest_rate::<R>),
            )
            .route(
                "/api/product-accounts",
                get(handlers::list_product_accounts::<R>)
                    .post(handlers::create_product_account::<R>),
            )
            .route(
                "/api/product-accounts/{id}",
                get(handlers::get_product_account::<R>)
                    .put(handlers::update_product_account::<R>)
                    .delete(handlers::delete_product_account::<R>),
            )
            .layer(metrics)
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
