use serde::{Deserialize, Serialize};

use crate::models::{ImageSource, Resolution};

/// Body of a successful `format=json` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageMetadata {
    pub ok: bool,
    pub source: ImageSource,
    pub image: String,
    pub content_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub candidates: Option<usize>,
}

impl From<&Resolution> for ImageMetadata {
    fn from(resolution: &Resolution) -> Self {
        Self {
            ok: true,
            source: resolution.source,
            image: resolution.image_url.clone(),
            content_type: resolution.image.content_type.clone(),
            candidates: resolution.candidates,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub ok: bool,
    pub error: String,
}

impl ErrorBody {
    pub fn new(code: &str) -> Self {
        Self {
            ok: false,
            error: code.to_string(),
        }
    }
}
