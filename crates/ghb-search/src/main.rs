//! Media search service: forwards `GET /search?title=...` to a yt-dlp
//! resolver and reshapes the first result into JSON.
//!
//! Deliberately unrelated to the moderation bot; it shares only the
//! workspace.

use std::{env, path::PathBuf, sync::Arc, time::Duration};

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{fmt, EnvFilter};

mod api;
mod resolver;

use api::AppState;
use resolver::YtDlpResolver;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,ghb_search=info,tower_http=info"));
    fmt().with_env_filter(filter).with_target(false).init();

    let bind = env::var("SEARCH_BIND").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let ytdlp_path =
        PathBuf::from(env::var("YTDLP_PATH").unwrap_or_else(|_| "yt-dlp".to_string()));
    let extract_timeout = Duration::from_millis(
        env::var("EXTRACT_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(60_000),
    );

    let state = AppState {
        resolver: Arc::new(YtDlpResolver::new(ytdlp_path, extract_timeout)),
    };

    let app = Router::new()
        .route("/search", get(api::search))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    tracing::info!(%bind, "search service listening");
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
