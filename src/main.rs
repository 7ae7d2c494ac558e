use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use audio_resolver::{
    build_router,
    collaborators::{YoutubeSearch, YtDlpExtractor},
    config::CONFIG,
    controllers::AudioController,
};

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let extractor = Arc::new(YtDlpExtractor::new(CONFIG.ytdlp_path()));
    let search = Arc::new(
        YoutubeSearch::new(CONFIG.search_url()).context("Failed to build search HTTP client")?,
    );
    let controller = Arc::new(AudioController::new(
        extractor,
        search,
        CONFIG.collaborator_timeout(),
    ));

    let port = CONFIG.port();
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("Failed to bind port {}", port))?;

    info!("🎧 Server is running on port {}", port);

    axum::serve(listener, build_router(controller))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}
