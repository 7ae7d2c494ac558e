use std::time::Duration;

use thiserror::Error;

/// Failures of the URL and search resolvers.
///
/// Display text is what callers see in the `details` field of a 500 response.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("No audio formats available")]
    NoAudioFormats,

    #[error("No videos found")]
    NoVideosFound,

    /// The extractor or search backend failed; the message is passed through as-is.
    #[error("{0}")]
    Collaborator(String),

    #[error("{what} timed out after {}s", .after.as_secs_f64())]
    Timeout { what: &'static str, after: Duration },
}

impl ResolveError {
    pub fn collaborator(err: impl std::fmt::Display) -> Self {
        Self::Collaborator(err.to_string())
    }
}
