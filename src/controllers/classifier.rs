/// Hosts whose URLs are resolved directly instead of searched for
const VIDEO_HOSTS: &[&str] = &["youtube.com", "www.youtube.com", "youtu.be"];

/// True when `input` parses as a URL whose host is exactly one of the video hosts.
pub fn is_video_url(input: &str) -> bool {
    match url::Url::parse(input) {
        Ok(parsed) => parsed
            .host_str()
            .is_some_and(|host| VIDEO_HOSTS.contains(&host)),
        Err(_) => false,
    }
}
