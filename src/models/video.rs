#[derive(Clone, Debug, PartialEq)]
pub struct VideoResult {
    pub video_id: String,
    pub url: String,
    pub title: Option<String>,
}

impl VideoResult {
    pub fn from_id(video_id: &str, title: Option<String>) -> Self {
        VideoResult {
            video_id: video_id.to_string(),
            url: format!("https://youtube.com/watch?v={}", video_id),
            title,
        }
    }
}
