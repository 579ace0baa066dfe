//! Result assembly: search, dedupe, download until `k` assets are held.
//!
//! ```text
//! Searching ──provider error──► Failed
//!     │
//!     ▼
//! Fetching ──skip / success (count < k)──► Fetching
//!     │
//!     ├── count == k ─────────────────────► Done
//!     ├── exhausted, count > 0 ───────────► Done (partial)
//!     └── exhausted, count == 0 ──────────► Failed (NoResults)
//! ```
//!
//! Candidates are downloaded one at a time in discovery order and never
//! beyond the point where the result set is full.

use crate::error::SearchError;
use crate::fetcher::{AssetFetcher, FetchOutcome};
use crate::provider::ImageSearchProvider;
use crate::types::{FetchedAsset, Query, ResultSet, SearchResponse};

use super::dedup::dedupe;

/// Retrieve up to `k` assets for `query`.
///
/// The provider is asked for `k * overfetch_factor` candidates so that a
/// few broken links do not leave the query empty.
///
/// # Errors
///
/// - [`SearchError::Provider`] if the provider reports a failure. No
///   download is attempted.
/// - [`SearchError::NoResults`] if no candidate could be downloaded.
/// - Any transport or parse error from the provider call.
pub async fn assemble<P, F>(
    provider: &P,
    fetcher: &F,
    query: &Query,
    k: usize,
    overfetch_factor: usize,
) -> Result<ResultSet, SearchError>
where
    P: ImageSearchProvider,
    F: AssetFetcher,
{
    let page_size = k.saturating_mul(overfetch_factor);
    let candidates = match provider.search(query, page_size).await? {
        SearchResponse::Candidates(candidates) => candidates,
        SearchResponse::Error(message) => {
            tracing::warn!(provider = provider.name(), error = %message, "provider reported an error");
            return Err(SearchError::Provider(message));
        }
    };

    let discovered = candidates.len();
    let candidates = dedupe(candidates);
    tracing::debug!(
        provider = provider.name(),
        discovered,
        unique = candidates.len(),
        "candidates deduplicated"
    );

    let mut assets: Vec<FetchedAsset> = Vec::with_capacity(k);
    for candidate in &candidates {
        if assets.len() >= k {
            break;
        }
        match fetcher.fetch(candidate).await {
            FetchOutcome::Fetched(asset) => {
                tracing::debug!(
                    location = %candidate.location,
                    rank = candidate.rank,
                    bytes = asset.content.len(),
                    "candidate fetched"
                );
                assets.push(asset);
            }
            FetchOutcome::Skipped(failure) => {
                tracing::debug!(
                    location = %failure.location,
                    rank = candidate.rank,
                    reason = %failure.reason,
                    "candidate skipped"
                );
            }
        }
    }

    if assets.is_empty() {
        return Err(SearchError::NoResults {
            query: query.as_str().to_owned(),
        });
    }

    Ok(ResultSet {
        query: query.clone(),
        assets,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::{FetchFailure, FetchFailureReason};
    use crate::types::CandidateImage;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct MockProvider {
        response: Result<SearchResponse, String>,
        calls: AtomicUsize,
        last_page_size: AtomicUsize,
    }

    impl MockProvider {
        fn with_locations(locations: &[&str]) -> Self {
            let candidates = locations
                .iter()
                .enumerate()
                .map(|(rank, location)| CandidateImage::new(*location, rank))
                .collect();
            Self::with_response(Ok(SearchResponse::Candidates(candidates)))
        }

        fn with_response(response: Result<SearchResponse, String>) -> Self {
            Self {
                response,
                calls: AtomicUsize::new(0),
                last_page_size: AtomicUsize::new(0),
            }
        }
    }

    impl ImageSearchProvider for MockProvider {
        async fn search(
            &self,
            _query: &Query,
            page_size: usize,
        ) -> Result<SearchResponse, SearchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.last_page_size.store(page_size, Ordering::SeqCst);
            self.response.clone().map_err(SearchError::Http)
        }

        fn name(&self) -> &'static str {
            "mock"
        }
    }

    /// Records every attempted location; fails those in `broken`.
    struct MockFetcher {
        broken: HashSet<String>,
        attempts: Mutex<Vec<String>>,
    }

    impl MockFetcher {
        fn failing(broken: &[&str]) -> Self {
            Self {
                broken: broken.iter().map(|s| s.to_string()).collect(),
                attempts: Mutex::new(Vec::new()),
            }
        }

        fn attempts(&self) -> Vec<String> {
            self.attempts.lock().expect("lock").clone()
        }
    }

    impl AssetFetcher for MockFetcher {
        async fn fetch(&self, candidate: &CandidateImage) -> FetchOutcome {
            self.attempts
                .lock()
                .expect("lock")
                .push(candidate.location.clone());
            if self.broken.contains(&candidate.location) {
                FetchOutcome::Skipped(FetchFailure {
                    location: candidate.location.clone(),
                    reason: FetchFailureReason::Status(404),
                })
            } else {
                FetchOutcome::Fetched(FetchedAsset::new(
                    candidate.location.clone(),
                    candidate.location.as_bytes().to_vec(),
                ))
            }
        }
    }

    fn query(text: &str) -> Query {
        Query::new(text).expect("non-empty")
    }

    #[tokio::test]
    async fn lincoln_example_skips_a_takes_b_never_touches_c() {
        let provider = MockProvider::with_locations(&["A", "B", "C"]);
        let fetcher = MockFetcher::failing(&["A"]);

        let set = assemble(&provider, &fetcher, &query("Abraham Lincoln"), 1, 3)
            .await
            .expect("B is fetchable");

        assert_eq!(set.len(), 1);
        assert_eq!(set.assets[0].location, "B");
        assert_eq!(set.assets[0].tags[0].kind, "search-result");
        assert_eq!(set.assets[0].tags[0].name, "google-image-search");
        assert_eq!(fetcher.attempts(), vec!["A", "B"]);
        assert_eq!(provider.last_page_size.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn early_stop_at_k() {
        let provider = MockProvider::with_locations(&["1", "2", "3", "4", "5", "6"]);
        let fetcher = MockFetcher::failing(&["2"]);

        let set = assemble(&provider, &fetcher, &query("q"), 2, 3)
            .await
            .expect("enough fetchable");

        let got: Vec<&str> = set.assets.iter().map(|a| a.location.as_str()).collect();
        assert_eq!(got, vec!["1", "3"]);
        assert_eq!(fetcher.attempts(), vec!["1", "2", "3"]);
        assert_eq!(provider.last_page_size.load(Ordering::SeqCst), 6);
    }

    #[tokio::test]
    async fn duplicates_are_fetched_once() {
        let provider = MockProvider::with_locations(&["A", "A", "B", "A", "C"]);
        let fetcher = MockFetcher::failing(&["A", "B", "C"]);

        let err = assemble(&provider, &fetcher, &query("dupes"), 1, 3)
            .await
            .unwrap_err();

        assert!(matches!(err, SearchError::NoResults { .. }));
        assert_eq!(fetcher.attempts(), vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn partial_success_returned_when_fewer_than_k() {
        let provider = MockProvider::with_locations(&["1", "2", "3"]);
        let fetcher = MockFetcher::failing(&["1", "3"]);

        let set = assemble(&provider, &fetcher, &query("q"), 3, 1)
            .await
            .expect("one fetchable");

        assert_eq!(set.len(), 1);
        assert_eq!(set.assets[0].location, "2");
        assert_eq!(fetcher.attempts(), vec!["1", "2", "3"]);
    }

    #[tokio::test]
    async fn all_fetches_failing_is_no_results_with_query_text() {
        let provider = MockProvider::with_locations(&["A", "B", "C"]);
        let fetcher = MockFetcher::failing(&["A", "B", "C"]);

        let err = assemble(&provider, &fetcher, &query("moon landing"), 1, 3)
            .await
            .unwrap_err();

        match err {
            SearchError::NoResults { query } => assert_eq!(query, "moon landing"),
            other => panic!("expected NoResults, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn zero_candidates_is_no_results() {
        let provider = MockProvider::with_locations(&[]);
        let fetcher = MockFetcher::failing(&[]);

        let err = assemble(&provider, &fetcher, &query("nothing"), 1, 3)
            .await
            .unwrap_err();

        assert!(matches!(err, SearchError::NoResults { .. }));
        assert!(fetcher.attempts().is_empty());
    }

    #[tokio::test]
    async fn provider_error_escalates_without_fetching() {
        let provider =
            MockProvider::with_response(Ok(SearchResponse::Error("quota exceeded".into())));
        let fetcher = MockFetcher::failing(&[]);

        let err = assemble(&provider, &fetcher, &query("q"), 1, 3)
            .await
            .unwrap_err();

        match err {
            SearchError::Provider(message) => assert_eq!(message, "quota exceeded"),
            other => panic!("expected Provider, got {other:?}"),
        }
        assert!(fetcher.attempts().is_empty());
        assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn transport_error_from_provider_propagates() {
        let provider = MockProvider::with_response(Err("connection reset".into()));
        let fetcher = MockFetcher::failing(&[]);

        let err = assemble(&provider, &fetcher, &query("q"), 1, 3)
            .await
            .unwrap_err();

        assert!(matches!(err, SearchError::Http(_)));
        assert!(fetcher.attempts().is_empty());
    }

    #[tokio::test]
    async fn result_set_is_bound_to_query() {
        let provider = MockProvider::with_locations(&["A"]);
        let fetcher = MockFetcher::failing(&[]);

        let set = assemble(&provider, &fetcher, &query("moon landing"), 1, 3)
            .await
            .expect("fetchable");

        assert_eq!(set.query.as_str(), "moon landing");
    }
}
