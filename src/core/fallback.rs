use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::Fallback;

/// Known-good images served when search is unavailable or comes up empty.
#[derive(Debug, Clone)]
pub struct FallbackSelector {
    images: Vec<String>,
}

impl FallbackSelector {
    pub fn new(fallback: &Fallback) -> Self {
        Self {
            images: fallback.images.clone(),
        }
    }

    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
        self.images.choose(rng).map(String::as_str)
    }
}
