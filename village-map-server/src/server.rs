//! Serveur HTTP : page carte, page détail et fichiers statiques

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::extract::{OriginalUri, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use tower_http::services::ServeDir;
use tracing::{debug, info, warn};

use village_map::route;

use crate::config::Config;
use crate::pages;

pub struct AppState {
    /// Page principale, rendue une fois au démarrage
    pub index: String,
}

/// Construit le routeur
pub fn router(config: &Config) -> Result<Router> {
    let index = pages::index_page(config)?;
    let static_dir = ServeDir::new(&config.server.static_dir);
    let state = Arc::new(AppState { index });

    Ok(Router::new()
        .route("/", get(index_handler))
        .route("/village/*id", get(detail_handler))
        .fallback_service(static_dir)
        .with_state(state))
}

/// Lance le serveur jusqu'à Ctrl-C
pub async fn serve(config: Config) -> Result<()> {
    let addr = SocketAddr::new(config.server.host, config.server.port);

    if !config.server.static_dir.join("pkg").exists() {
        warn!(
            static_dir = %config.server.static_dir.display(),
            "No pkg/ directory in static dir, the map bundle will not load"
        );
    }

    let app = router(&config)?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context(format!("Failed to bind {}", addr))?;
    info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C");
    }
}

async fn index_handler(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.index.clone())
}

/// `/village/{id}` : l'identifiant est décodé depuis le chemin brut, une
/// seule fois
async fn detail_handler(OriginalUri(uri): OriginalUri) -> Response {
    match route::parse_detail_path(uri.path()) {
        Ok(id) => {
            debug!(id = %id, "Detail page");
            Html(pages::detail_page(&id)).into_response()
        }
        Err(e) => {
            debug!(error = %e, "Invalid detail route");
            (StatusCode::BAD_REQUEST, Html(pages::error_page(&e.to_string()))).into_response()
        }
    }
}
