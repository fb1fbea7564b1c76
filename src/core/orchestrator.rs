use rand::Rng;
use rand::seq::SliceRandom;
use reqwest::Client;

use crate::{
    config::Config,
    core::FallbackSelector,
    engines::{BoxedImageSearchEngine, SerpApi},
    error::ResolveError,
    files::ImageFetcher,
    models::{ImageSource, Resolution, SearchCandidate},
    transformers::{CandidateFilter, QueryBuilder},
};

/// Turns one request into one image: search first, fallback second.
pub struct Resolver {
    engine: BoxedImageSearchEngine,
    fetcher: ImageFetcher,
    queries: QueryBuilder,
    filter: CandidateFilter,
    fallback: FallbackSelector,
    max_pages: u32,
    max_attempts: usize,
}

impl Resolver {
    pub fn new(config: &Config, client: Client) -> Self {
        let engine: BoxedImageSearchEngine =
            Box::new(SerpApi::new(client.clone(), &config.serpapi, &config.fetch.user_agent));
        Self::with_engine(config, engine, ImageFetcher::new(client, &config.fetch))
    }

    pub fn with_engine(
        config: &Config,
        engine: BoxedImageSearchEngine,
        fetcher: ImageFetcher,
    ) -> Self {
        Self {
            engine,
            fetcher,
            queries: QueryBuilder::new(&config.search),
            filter: CandidateFilter::new(&config.filters),
            fallback: FallbackSelector::new(&config.fallback),
            max_pages: config.search.max_pages,
            max_attempts: config.search.max_attempts,
        }
    }

    pub async fn resolve<R: Rng + Send>(
        &self,
        user_query: Option<&str>,
        rng: &mut R,
    ) -> Result<Resolution, ResolveError> {
        if !self.engine.enabled() {
            log::info!("Search disabled, using fallback image");
            return self
                .from_fallback(rng)
                .await
                .ok_or(ResolveError::NoKeyAndFallbackFailed);
        }

        let mut candidates = self.search_candidates(user_query, rng).await;
        candidates.shuffle(rng);

        if let Some(resolution) = self.from_candidates(&candidates).await {
            return Ok(resolution);
        }

        if candidates.is_empty() {
            log::info!("No search candidates, using fallback image");
        } else {
            log::info!(
                "None of {} search candidates could be fetched, using fallback image",
                candidates.len()
            );
        }

        self.from_fallback(rng)
            .await
            .ok_or(ResolveError::NoUsableImage)
    }

    /// Filtered candidates, empty when the search fails.
    async fn search_candidates<R: Rng + Send>(
        &self,
        user_query: Option<&str>,
        rng: &mut R,
    ) -> Vec<SearchCandidate> {
        let query = self.queries.build(user_query, rng);
        let page = rng.gen_range(0..self.max_pages.max(1));
        log::debug!("Search query: {:?}", query);

        match self.engine.filter_search(&query, page, &self.filter).await {
            Ok(candidates) => candidates,
            Err(e) => {
                log::warn!("Search error in engine {}: {}", self.engine.name(), e);
                Vec::new()
            }
        }
    }

    async fn from_candidates(&self, candidates: &[SearchCandidate]) -> Option<Resolution> {
        for (attempt, candidate) in candidates.iter().take(self.max_attempts).enumerate() {
            log::debug!("Attempt {}: {}", attempt + 1, candidate.url);

            if let Some(image) = self.fetcher.fetch(&candidate.url).await {
                log::info!("Serving search result {}", candidate.url);
                return Some(Resolution {
                    source: ImageSource::SerpApi,
                    image_url: candidate.url.clone(),
                    image,
                    candidates: Some(candidates.len()),
                });
            }
        }

        None
    }

    async fn from_fallback<R: Rng + Send>(&self, rng: &mut R) -> Option<Resolution> {
        let Some(url) = self.fallback.pick(rng) else {
            log::error!("No fallback images configured");
            return None;
        };

        match self.fetcher.fetch(url).await {
            Some(image) => {
                log::info!("Serving fallback image {}", url);
                Some(Resolution {
                    source: ImageSource::StaticFallback,
                    image_url: url.to_string(),
                    image,
                    candidates: None,
                })
            }
            None => {
                log::error!("Fallback image {} could not be fetched", url);
                None
            }
        }
    }
}
