use std::path::Path as FsPath;

use axum::{
    extract::Path,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use rust_embed::RustEmbed;

use crate::error::ApiError;

const HASHED_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";
const DEFAULT_CACHE_CONTROL: &str = "public, max-age=300";

#[derive(RustEmbed)]
#[folder = "assets"]
pub struct Assets;

pub async fn serve_asset(Path(path): Path<String>) -> Result<Response, ApiError> {
    let path = path.trim_start_matches('/');
    let Some(content) = Assets::get(path) else {
        return Err(ApiError::NotFound(format!("Asset {path} not found")));
    };

    let mime = mime_guess::from_path(path).first_or_octet_stream();
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, mime.as_ref().to_string()),
            (header::CACHE_CONTROL, cache_control_for_path(path).to_string()),
        ],
        content.data.into_owned(),
    )
        .into_response())
}

fn cache_control_for_path(path: &str) -> &'static str {
    if is_hashed_asset(path) {
        HASHED_CACHE_CONTROL
    } else {
        DEFAULT_CACHE_CONTROL
    }
}

/// `name-<hash>.ext` with an alphanumeric hash of at least eight characters.
fn is_hashed_asset(path: &str) -> bool {
    let Some(file_name) = FsPath::new(path).file_name().and_then(|name| name.to_str()) else {
        return false;
    };
    let Some((stem, _ext)) = file_name.rsplit_once('.') else {
        return false;
    };
    let Some((_prefix, hash)) = stem.rsplit_once('-') else {
        return false;
    };

    hash.len() >= 8 && hash.chars().all(|ch| ch.is_ascii_alphanumeric())
}
