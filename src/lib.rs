use std::sync::Arc;

use axum::{routing::post, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod collaborators;
pub mod config;
pub mod controllers;
pub mod error;
pub mod models;
pub mod routers;

use controllers::AudioController;
use routers::audio_route;

/// The whole HTTP surface: `POST /audio`, open to any origin.
pub fn build_router(controller: Arc<AudioController>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/audio", post(audio_route))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(controller)
}
