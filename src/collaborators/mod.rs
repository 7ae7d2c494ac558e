// External services the resolvers delegate to
use async_trait::async_trait;
use serde_json::Value;

use crate::error::ResolveError;
use crate::models::VideoResult;

pub mod youtube_search;
pub mod ytdlp;

pub use youtube_search::YoutubeSearch;
pub use ytdlp::YtDlpExtractor;

/// Produces the full metadata document for a video URL. The document is
/// expected to carry a `formats` array.
#[async_trait]
pub trait MetadataExtractor: Send + Sync {
    async fn extract(&self, url: &str) -> Result<Value, ResolveError>;
}

/// Free-text video search. Results are returned in the backend's ranking order.
#[async_trait]
pub trait VideoSearch: Send + Sync {
    async fn search(&self, query: &str) -> Result<Vec<VideoResult>, ResolveError>;
}
