use std::process::Stdio;

use async_trait::async_trait;
use serde_json::Value;
use tokio::process::Command;
use tracing::debug;

use super::MetadataExtractor;
use crate::error::ResolveError;

const REFERER_HEADER: &str = "referer:youtube.com";
const USER_AGENT_HEADER: &str = "user-agent:googlebot";

/// Metadata extraction through the `yt-dlp` executable.
pub struct YtDlpExtractor {
    binary: String,
}

impl YtDlpExtractor {
    pub fn new(binary: impl Into<String>) -> Self {
        YtDlpExtractor {
            binary: binary.into(),
        }
    }

    pub fn build_args(url: &str) -> Vec<String> {
        let mut args: Vec<String> = [
            "--dump-single-json",
            "--no-check-certificates",
            "--no-warnings",
            "--prefer-free-formats",
            "--add-header",
            REFERER_HEADER,
            "--add-header",
            USER_AGENT_HEADER,
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        // `--` keeps the URL from ever being read as an option
        args.push("--".to_string());
        args.push(url.to_string());
        args
    }
}

#[async_trait]
impl MetadataExtractor for YtDlpExtractor {
    async fn extract(&self, url: &str) -> Result<Value, ResolveError> {
        debug!("running {} for {}", self.binary, url);
        let output = Command::new(&self.binary)
            .args(Self::build_args(url))
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                ResolveError::Collaborator(format!("Failed to run {}: {}", self.binary, e))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(ResolveError::Collaborator(if stderr.is_empty() {
                format!("{} exited with {}", self.binary, output.status)
            } else {
                stderr
            }));
        }

        let data: Value = serde_json::from_slice(&output.stdout).map_err(|e| {
            ResolveError::Collaborator(format!("Invalid metadata JSON from {}: {}", self.binary, e))
        })?;
        debug!(
            "metadata for {} lists {} formats",
            url,
            data["formats"].as_array().map_or(0, Vec::len)
        );
        Ok(data)
    }
}
