use std::sync::Arc;

use axum::{body::Bytes, extract::State, response::Response};

use crate::controllers::AudioController;

pub async fn audio_route(
    State(controller): State<Arc<AudioController>>,
    body: Bytes,
) -> Response {
    controller.get_audio_info(&body).await
}
