use axum::{
    Json,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use crate::{
    models::{ErrorBody, ImageMetadata, Resolution},
    server::AppState,
};

#[derive(Debug, Default, PartialEq)]
pub(crate) struct JumpParams {
    /// Free text search override
    q: Option<String>,
    /// `json` for metadata instead of image bytes
    format: Option<String>,
}

impl JumpParams {
    /// Reads the known keys from raw query pairs. The first occurrence of a
    /// repeated key wins and unknown keys are ignored.
    fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (key, value) in pairs {
            match key.as_str() {
                "q" if params.q.is_none() => params.q = Some(value),
                "format" if params.format.is_none() => params.format = Some(value),
                _ => {}
            }
        }
        params
    }

    fn wants_json(&self) -> bool {
        self.format
            .as_deref()
            .is_some_and(|format| format.eq_ignore_ascii_case("json"))
    }
}

fn image_response(state: &AppState, resolution: Resolution) -> Response {
    let disposition = format!(
        "inline; filename=\"{}.{}\"",
        state.filename, resolution.image.extension
    );

    (
        StatusCode::OK,
        [
            (header::CACHE_CONTROL, state.cache_control.to_string()),
            (header::CONTENT_TYPE, resolution.image.content_type),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        resolution.image.bytes,
    )
        .into_response()
}

pub(crate) async fn get_image(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Response {
    let params = JumpParams::from_pairs(pairs);
    let mut rng = state.rng();
    let cache = [(header::CACHE_CONTROL, state.cache_control.to_string())];

    match state.resolver.resolve(params.q.as_deref(), &mut rng).await {
        Ok(resolution) => {
            log::info!(
                "Resolved {} from {} ({})",
                resolution.image_url,
                resolution.source,
                resolution.image.content_type
            );
            if params.wants_json() {
                (StatusCode::OK, cache, Json(ImageMetadata::from(&resolution))).into_response()
            } else {
                image_response(&state, resolution)
            }
        }
        Err(e) => {
            log::warn!("Request failed: {}", e);
            (e.status(), cache, Json(ErrorBody::new(e.code()))).into_response()
        }
    }
}

pub(crate) async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}
