use reqwest::Url;

use crate::config::Filters;
use crate::models::{RawImageResult, SearchCandidate};

fn lowercased(items: &[String]) -> Vec<String> {
    items.iter().map(|item| item.to_lowercase()).collect()
}

fn contains_any(haystack: &str, needles: &[String]) -> bool {
    let haystack = haystack.to_lowercase();
    needles.iter().any(|needle| haystack.contains(needle.as_str()))
}

/// Substring heuristics keeping search results on topic and photographic.
#[derive(Debug, Clone)]
pub struct CandidateFilter {
    blocked_sites: Vec<String>,
    blocked_words: Vec<String>,
    required_words: Vec<String>,
}

impl CandidateFilter {
    pub fn new(filters: &Filters) -> Self {
        Self {
            blocked_sites: lowercased(&filters.blocked_sites),
            blocked_words: lowercased(&filters.blocked_words),
            required_words: lowercased(&filters.required_words),
        }
    }

    /// Unparsable urls are let through.
    pub fn is_blocked_site(&self, url: &str) -> bool {
        match Url::parse(url).ok().and_then(|u| u.host_str().map(str::to_string)) {
            Some(host) => contains_any(&host, &self.blocked_sites),
            None => false,
        }
    }

    pub fn has_blocked_word(&self, text: &str) -> bool {
        contains_any(text, &self.blocked_words)
    }

    pub fn mentions_subject(&self, text: &str) -> bool {
        contains_any(text, &self.required_words)
    }

    pub fn accept(&self, raw: &RawImageResult) -> Option<SearchCandidate> {
        let candidate = SearchCandidate::from_raw(raw)?;

        if candidate.url.to_lowercase().ends_with(".svg") {
            log::debug!("Rejecting vector image {}", candidate.url);
            return None;
        }
        if self.is_blocked_site(&candidate.url) {
            log::debug!("Rejecting blocked site {}", candidate.url);
            return None;
        }
        if self.has_blocked_word(&candidate.title) {
            log::debug!("Rejecting blocked title {:?}", candidate.title);
            return None;
        }
        if !(self.mentions_subject(&candidate.title) || self.mentions_subject(&candidate.link)) {
            log::debug!("Rejecting off-topic {:?} ({})", candidate.title, candidate.link);
            return None;
        }

        Some(candidate)
    }

    pub fn filter(&self, results: &[RawImageResult]) -> Vec<SearchCandidate> {
        results.iter().filter_map(|raw| self.accept(raw)).collect()
    }
}
