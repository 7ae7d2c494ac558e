use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::Value;
use tracing::{error, info};

use crate::{
    collaborators::{MetadataExtractor, VideoSearch},
    controllers::is_video_url,
    error::ResolveError,
    models::{AudioFormat, AudioRequest, ErrorResponse},
};

pub const MISSING_INPUT: &str = "Input parameter is required";
pub const RESOLVE_FAILED: &str = "Failed to retrieve audio information";

pub struct AudioController {
    extractor: Arc<dyn MetadataExtractor>,
    search: Arc<dyn VideoSearch>,
    timeout: Duration,
}

impl AudioController {
    pub fn new(
        extractor: Arc<dyn MetadataExtractor>,
        search: Arc<dyn VideoSearch>,
        timeout: Duration,
    ) -> Self {
        AudioController {
            extractor,
            search,
            timeout,
        }
    }

    /// Best audio format of the video at `url`.
    pub async fn resolve_from_url(&self, url: &str) -> Result<AudioFormat, ResolveError> {
        let result = match self
            .bounded("metadata extraction", self.extractor.extract(url))
            .await
        {
            Ok(metadata) => select_best_audio(metadata),
            Err(e) => Err(e),
        };
        if let Err(e) = &result {
            error!("Error getting audio info from URL {}: {}", url, e);
        }
        result
    }

    /// Best audio format of the top search hit for `query`.
    pub async fn resolve_from_query(&self, query: &str) -> Result<AudioFormat, ResolveError> {
        let result = self.search_then_resolve(query).await;
        if let Err(e) = &result {
            error!("Error getting audio info from search {:?}: {}", query, e);
        }
        result
    }

    async fn search_then_resolve(&self, query: &str) -> Result<AudioFormat, ResolveError> {
        let videos = self.bounded("search", self.search.search(query)).await?;
        let first = videos.into_iter().next().ok_or(ResolveError::NoVideosFound)?;
        info!("search {:?} picked {}", query, first.url);
        self.resolve_from_url(&first.url).await
    }

    pub async fn resolve(&self, input: &str) -> Result<AudioFormat, ResolveError> {
        if is_video_url(input) {
            self.resolve_from_url(input).await
        } else {
            self.resolve_from_query(input).await
        }
    }

    pub async fn get_audio_info(&self, body: &[u8]) -> Response {
        let Some(request) = AudioRequest::from_body(body) else {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::new(MISSING_INPUT)),
            )
                .into_response();
        };

        match self.resolve(&request.input).await {
            Ok(format) => {
                info!(
                    "resolved format_id={:?} acodec={:?} abr={:?}",
                    format.format_id(),
                    format.acodec(),
                    format.abr()
                );
                (StatusCode::OK, Json(format)).into_response()
            }
            Err(e) => {
                error!("{}: {}", RESOLVE_FAILED, e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorResponse::with_details(RESOLVE_FAILED, e.to_string())),
                )
                    .into_response()
            }
        }
    }

    async fn bounded<T>(
        &self,
        what: &'static str,
        call: impl Future<Output = Result<T, ResolveError>>,
    ) -> Result<T, ResolveError> {
        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| ResolveError::Timeout {
                what,
                after: self.timeout,
            })?
    }
}

/// Picks the highest-`abr` format among those carrying audio. Formats without
/// a bitrate rank as zero; equal bitrates keep the extractor's order.
pub fn select_best_audio(metadata: Value) -> Result<AudioFormat, ResolveError> {
    let formats = match metadata {
        Value::Object(mut doc) => match doc.remove("formats") {
            Some(Value::Array(items)) => items,
            _ => Vec::new(),
        },
        _ => Vec::new(),
    };

    let mut audio: Vec<AudioFormat> = formats
        .into_iter()
        .filter_map(AudioFormat::from_value)
        .filter(AudioFormat::has_audio)
        .collect();
    audio.sort_by(|a, b| b.ranking_bitrate().total_cmp(&a.ranking_bitrate()));

    audio.into_iter().next().ok_or(ResolveError::NoAudioFormats)
}
