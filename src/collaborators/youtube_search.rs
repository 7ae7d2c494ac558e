use async_trait::async_trait;
use scraper::{Html, Selector};
use serde_json::Value;
use tracing::debug;

use super::VideoSearch;
use crate::error::ResolveError;
use crate::models::VideoResult;

/// Name of the script variable the results page embeds its data in.
const INITIAL_DATA_MARKER: &str = "ytInitialData";

/// Search by scraping the YouTube results page.
pub struct YoutubeSearch {
    client: reqwest::Client,
    url: String,
}

impl YoutubeSearch {
    pub fn new(search_url: impl Into<String>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36")
            .redirect(reqwest::redirect::Policy::limited(3))
            .build()?;
        Ok(YoutubeSearch {
            client,
            url: search_url.into(),
        })
    }

    fn request(&self, query: &str) -> reqwest::RequestBuilder {
        self.client
            .get(&self.url)
            .query(&[("search_query", query), ("hl", "en")])
    }
}

#[async_trait]
impl VideoSearch for YoutubeSearch {
    async fn search(&self, query: &str) -> Result<Vec<VideoResult>, ResolveError> {
        debug!("searching {} for {:?}", self.url, query);

        let html = self
            .request(query)
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(ResolveError::collaborator)?
            .text()
            .await
            .map_err(ResolveError::collaborator)?;

        let videos = parse_results(&html)?;
        debug!("search_results={}", videos.len());
        Ok(videos)
    }
}

/// Pulls every video out of a results page, in page order.
pub fn parse_results(html: &str) -> Result<Vec<VideoResult>, ResolveError> {
    let data = initial_data(html)?;
    let mut videos = Vec::new();
    collect_videos(&data, &mut videos);
    Ok(videos)
}

fn initial_data(html: &str) -> Result<Value, ResolveError> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("script").map_err(ResolveError::collaborator)?;
    let mut parse_error = None;

    for element in document.select(&selector) {
        let text = element.text().collect::<String>();
        for (start, _) in text.match_indices(INITIAL_DATA_MARKER) {
            let Some(json) = assigned_value(&text[start + INITIAL_DATA_MARKER.len()..]) else {
                continue;
            };
            // Only the first value matters; the trailing `;` and whatever follows is ignored
            match serde_json::Deserializer::from_str(json)
                .into_iter::<Value>()
                .next()
            {
                Some(Ok(value)) => return Ok(value),
                Some(Err(e)) => parse_error = Some(e),
                None => {}
            }
        }
    }

    Err(ResolveError::Collaborator(match parse_error {
        Some(e) => format!("Invalid search page data: {}", e),
        None => "Search page did not contain result data".to_string(),
    }))
}

/// Right-hand side when the marker is the target of an assignment, as in
/// `var ytInitialData = {..}` or `window["ytInitialData"] = {..}`.
fn assigned_value(after_marker: &str) -> Option<&str> {
    let rest = after_marker.trim_start();
    let rest = rest.strip_prefix("\"]").unwrap_or(rest).trim_start();
    let rest = rest.strip_prefix('=')?;
    if rest.starts_with('=') {
        return None;
    }
    Some(rest.trim_start())
}

fn collect_videos(node: &Value, out: &mut Vec<VideoResult>) {
    match node {
        Value::Object(map) => {
            for (key, child) in map {
                if key == "videoRenderer" {
                    if let Some(video) = video_from_renderer(child) {
                        out.push(video);
                    }
                } else {
                    collect_videos(child, out);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_videos(item, out);
            }
        }
        _ => {}
    }
}

fn video_from_renderer(renderer: &Value) -> Option<VideoResult> {
    let video_id = renderer["videoId"].as_str()?;
    let title = renderer["title"]["runs"][0]["text"]
        .as_str()
        .or_else(|| renderer["title"]["simpleText"].as_str())
        .map(str::to_string);
    Some(VideoResult::from_id(video_id, title))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULTS_PAGE: &str = r#"<!DOCTYPE html>
<html><head><title>results</title>
<script>var ytcfg = {"x": 1};</script>
</head><body>
<script nonce="abc">var ytInitialData = {"contents":{"twoColumnSearchResultsRenderer":{"primaryContents":{"sectionListRenderer":{"contents":[{"itemSectionRenderer":{"contents":[
  {"adSlotRenderer":{"id":"ad"}},
  {"videoRenderer":{"videoId":"first1","title":{"runs":[{"text":"First Song"}]}}},
  {"shelfRenderer":{"content":{"verticalListRenderer":{"items":[{"videoRenderer":{"videoId":"nested2","title":{"simpleText":"Nested"}}}]}}}},
  {"videoRenderer":{"videoId":"third3"}},
  {"videoRenderer":{"title":{"runs":[{"text":"no id"}]}}}
]}}]}}}}};var other = 2;</script>
</body></html>"#;

    #[test]
    fn extracts_videos_in_page_order() {
        let videos = parse_results(RESULTS_PAGE).unwrap();
        let ids: Vec<&str> = videos.iter().map(|v| v.video_id.as_str()).collect();
        assert_eq!(ids, vec!["first1", "nested2", "third3"]);
        assert_eq!(videos[0].url, "https://youtube.com/watch?v=first1");
        assert_eq!(videos[0].title.as_deref(), Some("First Song"));
        assert_eq!(videos[1].title.as_deref(), Some("Nested"));
        assert_eq!(videos[2].title, None);
    }

    #[test]
    fn window_assignment_form_is_recognised() {
        let page = r#"<html><body><script>window["ytInitialData"] = {"a":[{"videoRenderer":{"videoId":"w1"}}]};</script></body></html>"#;
        let videos = parse_results(page).unwrap();
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].url, "https://youtube.com/watch?v=w1");
    }

    #[test]
    fn page_without_results_is_empty_not_an_error() {
        let page = r#"<html><body><script>var ytInitialData = {"contents":{}};</script></body></html>"#;
        assert!(parse_results(page).unwrap().is_empty());
    }

    #[test]
    fn page_without_data_blob_is_an_error() {
        let err = parse_results("<html><body><p>captcha</p></body></html>").unwrap_err();
        assert_eq!(err.to_string(), "Search page did not contain result data");
    }

    #[test]
    fn broken_data_blob_is_an_error() {
        let page = r#"<html><body><script>var ytInitialData = {"contents": [;</script></body></html>"#;
        let err = parse_results(page).unwrap_err();
        assert!(err.to_string().starts_with("Invalid search page data"), "{}", err);
    }

    #[test]
    fn reads_of_the_variable_are_skipped() {
        let page = r#"<html><head><script>if (window.ytInitialData) { ready = 1; }</script>
<script>var seen = window["ytInitialData"] == null;</script></head>
<body><script>var ytInitialData = {"a":[{"videoRenderer":{"videoId":"real1"}}]};</script></body></html>"#;
        let videos = parse_results(page).unwrap();
        assert_eq!(videos.len(), 1);
        assert_eq!(videos[0].video_id, "real1");
    }

    #[test]
    fn broken_blob_before_a_valid_one_is_ignored() {
        let page = r#"<html><body><script>var ytInitialData = {"oops": ;</script>
<script>var ytInitialData = {"a":[{"videoRenderer":{"videoId":"good1"}}]};</script></body></html>"#;
        let videos = parse_results(page).unwrap();
        assert_eq!(videos[0].video_id, "good1");
    }

    #[test]
    fn query_is_encoded_and_base_query_kept() {
        let search = YoutubeSearch::new("https://www.youtube.com/results?gl=US").unwrap();
        let request = search.request("AC/DC & friends").build().unwrap();
        assert_eq!(
            request.url().as_str(),
            "https://www.youtube.com/results?gl=US&search_query=AC%2FDC+%26+friends&hl=en"
        );
    }
}
