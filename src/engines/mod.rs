use async_trait::async_trait;

use crate::models::{RawImageResult, SearchCandidate};
use crate::transformers::CandidateFilter;

#[async_trait]
pub trait ImageSearchEngine {
    fn name(&self) -> &'static str;
    fn enabled(&self) -> bool;

    /// Raw results for `query` on result page `page`.
    async fn search(&self, query: &str, page: u32) -> anyhow::Result<Vec<RawImageResult>>;

    async fn filter_search(
        &self,
        query: &str,
        page: u32,
        filter: &CandidateFilter,
    ) -> anyhow::Result<Vec<SearchCandidate>> {
        let results = self.search(query, page).await?;

        log::info!(
            "Filtering {} results from {} (page {})",
            results.len(),
            self.name(),
            page
        );

        let candidates = filter.filter(&results);

        log::info!(
            "{} candidates left from {} results",
            candidates.len(),
            results.len()
        );

        Ok(candidates)
    }
}

pub mod serpapi;

pub use serpapi::SerpApi;

pub(crate) type BoxedImageSearchEngine = Box<dyn ImageSearchEngine + Send + Sync>;
