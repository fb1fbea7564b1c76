use serde::{Deserialize, Serialize};

/// One entry of the search response's `images_results` array.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RawImageResult {
    /// Full size image url
    #[serde(default)]
    pub original: Option<String>,
    /// Search engine thumbnail url
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// Title of the page the image was found on
    #[serde(default)]
    pub title: Option<String>,
    /// Url of the page the image was found on
    #[serde(default)]
    pub link: Option<String>,
}

impl RawImageResult {
    /// The original image url, or the thumbnail when the original is missing.
    pub fn image_url(&self) -> Option<&str> {
        [&self.original, &self.thumbnail]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|url| !url.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchCandidate {
    pub url: String,
    pub title: String,
    pub link: String,
}

impl SearchCandidate {
    /// `None` when the entry has no usable image url.
    pub fn from_raw(raw: &RawImageResult) -> Option<Self> {
        Some(Self {
            url: raw.image_url()?.to_string(),
            title: raw.title.clone().unwrap_or_default(),
            link: raw.link.clone().unwrap_or_default(),
        })
    }
}
