//! SerpApi Google Images provider.
//!
//! Sends one JSON API request per query to SerpApi's Google engine with
//! image results selected (`tbm=isch`), first page only. The reply's
//! `images_results[*].original` URLs become candidates in reply order.

use serde::Deserialize;

use crate::config::SearchConfig;
use crate::error::SearchError;
use crate::http::build_client;
use crate::provider::ImageSearchProvider;
use crate::types::{CandidateImage, Query, SearchResponse};

/// Engine identifier sent to SerpApi.
const ENGINE: &str = "google";

/// Result-type selector for Google Images.
const IMAGE_SEARCH: &str = "isch";

/// Reply body. Only the fields the pipeline reads are modelled.
#[derive(Debug, Deserialize)]
struct SerpApiReply {
    error: Option<String>,
    #[serde(default)]
    images_results: Vec<SerpApiImage>,
}

#[derive(Debug, Deserialize)]
struct SerpApiImage {
    original: Option<String>,
}

/// Google Images search via SerpApi.
pub struct SerpApiProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl SerpApiProvider {
    /// Build a provider with its own HTTP client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        Ok(Self::with_client(build_client(config)?, config))
    }

    /// Build a provider that shares an existing HTTP client.
    pub fn with_client(client: reqwest::Client, config: &SearchConfig) -> Self {
        Self {
            client,
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn request_url(&self, query: &Query, page_size: usize) -> Result<url::Url, SearchError> {
        let mut url = url::Url::parse(&format!("{}/search.json", self.base_url))
            .map_err(|e| SearchError::Config(format!("invalid provider base_url: {e}")))?;
        url.query_pairs_mut()
            .append_pair("engine", ENGINE)
            .append_pair("q", query.as_str())
            .append_pair("tbm", IMAGE_SEARCH)
            .append_pair("num", &page_size.to_string())
            .append_pair("ijn", "0")
            .append_pair("api_key", &self.api_key);
        Ok(url)
    }
}

impl ImageSearchProvider for SerpApiProvider {
    async fn search(
        &self,
        query: &Query,
        page_size: usize,
    ) -> Result<SearchResponse, SearchError> {
        let url = self.request_url(query, page_size)?;
        tracing::trace!(query = %query, page_size, "requesting image results");

        // `without_url` keeps the api_key query parameter out of the message.
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SearchError::Http(e.without_url().to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SearchError::Http(e.without_url().to_string()))?;

        // SerpApi reports its own failures as JSON with a non-2xx status, so
        // the body is parsed first. Any other non-2xx reply is a transport
        // failure, never an empty result page.
        match parse_reply(&body) {
            Ok(reply @ SearchResponse::Error(_)) => Ok(reply),
            _ if !status.is_success() => Err(status_error(status)),
            other => other,
        }
    }

    fn name(&self) -> &'static str {
        "serpapi"
    }
}

fn status_error(status: reqwest::StatusCode) -> SearchError {
    SearchError::Http(format!("provider returned status {}", status.as_u16()))
}

/// Interpret a SerpApi reply body.
fn parse_reply(body: &str) -> Result<SearchResponse, SearchError> {
    let reply: SerpApiReply = serde_json::from_str(body)
        .map_err(|e| SearchError::Parse(format!("invalid provider reply: {e}")))?;

    if let Some(message) = reply.error {
        return Ok(SearchResponse::Error(message));
    }

    let candidates = reply
        .images_results
        .into_iter()
        .enumerate()
        .filter_map(|(rank, image)| {
            image
                .original
                .map(|location| CandidateImage::new(location, rank))
        })
        .collect();
    Ok(SearchResponse::Candidates(candidates))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(base_url: &str) -> SerpApiProvider {
        let config = SearchConfig {
            base_url: base_url.into(),
            ..SearchConfig::new("test-key")
        };
        SerpApiProvider::with_client(reqwest::Client::new(), &config)
    }

    #[test]
    fn is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SerpApiProvider>();
    }

    #[test]
    fn request_url_carries_all_parameters() {
        let query = Query::new("Abraham Lincoln").expect("non-empty");
        let url = provider("https://serpapi.com/")
            .request_url(&query, 3)
            .expect("valid url");
        assert_eq!(url.path(), "/search.json");

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        let get = |key: &str| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.as_str())
        };
        assert_eq!(get("engine"), Some("google"));
        assert_eq!(get("q"), Some("Abraham Lincoln"));
        assert_eq!(get("tbm"), Some("isch"));
        assert_eq!(get("num"), Some("3"));
        assert_eq!(get("ijn"), Some("0"));
        assert_eq!(get("api_key"), Some("test-key"));
    }

    #[test]
    fn invalid_base_url_is_config_error() {
        let query = Query::new("x").expect("non-empty");
        let err = provider("not a url").request_url(&query, 3).unwrap_err();
        assert!(matches!(err, SearchError::Config(_)));
    }

    #[test]
    fn parse_images_in_order() {
        let body = r#"{
            "search_metadata": {"status": "Success"},
            "images_results": [
                {"position": 1, "original": "https://a.example/1.jpg"},
                {"position": 2, "original": "https://b.example/2.png"},
                {"position": 3, "original": "https://a.example/1.jpg"}
            ]
        }"#;
        let response = parse_reply(body).expect("parses");
        assert_eq!(
            response,
            SearchResponse::Candidates(vec![
                CandidateImage::new("https://a.example/1.jpg", 0),
                CandidateImage::new("https://b.example/2.png", 1),
                CandidateImage::new("https://a.example/1.jpg", 2),
            ])
        );
    }

    #[test]
    fn parse_error_field_wins() {
        let body = r#"{"error": "Invalid API key. Your API key should be here: https://serpapi.com/manage-api-key"}"#;
        match parse_reply(body).expect("parses") {
            SearchResponse::Error(message) => assert!(message.starts_with("Invalid API key")),
            other => panic!("expected provider error, got {other:?}"),
        }
    }

    #[test]
    fn parse_missing_images_is_empty() {
        let body = r#"{"search_metadata": {"status": "Success"}}"#;
        assert_eq!(
            parse_reply(body).expect("parses"),
            SearchResponse::Candidates(vec![])
        );
    }

    #[test]
    fn parse_skips_entries_without_original_keeping_provider_rank() {
        let body = r#"{"images_results": [{"thumbnail": "t"}, {"original": "https://c.example/x"}]}"#;
        assert_eq!(
            parse_reply(body).expect("parses"),
            SearchResponse::Candidates(vec![CandidateImage::new("https://c.example/x", 1)])
        );
    }

    #[test]
    fn failure_status_error_names_code() {
        let err = status_error(reqwest::StatusCode::SERVICE_UNAVAILABLE);
        assert!(matches!(err, SearchError::Http(_)));
        assert_eq!(err.to_string(), "HTTP error: provider returned status 503");
    }

    #[test]
    fn parse_rejects_non_json() {
        let err = parse_reply("<html>502 Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, SearchError::Parse(_)));
    }
}
