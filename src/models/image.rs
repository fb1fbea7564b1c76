use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedImage {
    pub bytes: Vec<u8>,
    /// Lowercased content type as sent by the remote
    pub content_type: String,
    /// File extension derived from the content type
    pub extension: &'static str,
}

#[derive(strum_macros::Display, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ImageSource {
    #[serde(rename = "serpapi")]
    #[strum(serialize = "serpapi")]
    SerpApi,
    StaticFallback,
}

/// Outcome of resolving one request to an image.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub source: ImageSource,
    pub image_url: String,
    pub image: FetchedImage,
    /// Number of filtered search candidates, only set for search results
    pub candidates: Option<usize>,
}
