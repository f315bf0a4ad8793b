//! The contract with the inference backend, independent of the HTTP client.
//!
//! Native and browser clients both post a multipart body to one of these endpoints
//! and hand the raw response to [`parse_response`].
use std::path::Path;

use serde::Deserialize;
use url::Url;

use crate::{AnalysisResult, Error, Result};

/// The backend used when none is configured.
pub const DEFAULT_BACKEND: &str = "http://localhost:5000";

/// Analyze a whole video.
pub const UPLOAD_PATH: &str = "upload-video";
pub const UPLOAD_FIELD: &str = "video";

/// Analyze a single frame from a live feed.
pub const STREAM_PATH: &str = "stream-detect";
pub const STREAM_FIELD: &str = "frame";

pub const HEALTH_PATH: &str = "health";

/// Shown when the backend fails without saying why.
pub const FALLBACK_ERROR: &str = "Failed to process video.";

/// Shown when an upload fails without saying why, before the backend could answer.
pub const UNEXPECTED_ERROR: &str = "Unexpected error while uploading.";

/// Append an endpoint to the backend's base URL.
///
/// Unlike [`Url::join`], this keeps any path prefix on the base, so a backend
/// mounted at `https://example.com/api` is reached at `https://example.com/api/upload-video`.
pub fn endpoint(base: &Url, path: &str) -> Result<Url> {
	if base.cannot_be_a_base() {
		return Err(Error::InvalidUrl(url::ParseError::RelativeUrlWithCannotBeABaseBase));
	}

	let mut url = base.clone();
	url.set_query(None);
	url.set_fragment(None);

	let prefix = url.path().trim_end_matches('/').to_string();
	url.set_path(&format!("{prefix}/{path}"));

	Ok(url)
}

/// Guess the media type of a file from its extension.
pub fn media_type(path: &Path) -> Option<&'static str> {
	let extension = path.extension()?.to_str()?.to_ascii_lowercase();

	let media_type = match extension.as_str() {
		"mp4" => "video/mp4",
		"m4v" => "video/x-m4v",
		"mov" | "qt" => "video/quicktime",
		"avi" => "video/x-msvideo",
		"mkv" => "video/x-matroska",
		"webm" => "video/webm",
		"mpg" | "mpeg" => "video/mpeg",
		"wmv" => "video/x-ms-wmv",
		"flv" => "video/x-flv",
		"3gp" => "video/3gpp",
		"ts" => "video/mp2t",
		"jpg" | "jpeg" => "image/jpeg",
		"png" => "image/png",
		"bmp" => "image/bmp",
		"webp" => "image/webp",
		_ => return None,
	};

	Some(media_type)
}

/// Only videos may be uploaded for analysis.
pub fn ensure_video(media_type: &str) -> Result<()> {
	match media_type.starts_with("video/") {
		true => Ok(()),
		false => Err(Error::NotVideo),
	}
}

#[derive(Deserialize)]
struct ErrorBody {
	error: Option<String>,
}

/// Interpret a backend response.
///
/// A failure status becomes [`Error::Backend`] with the body's `error` message,
/// or [`FALLBACK_ERROR`] when there isn't one.
pub fn parse_response(success: bool, body: &[u8]) -> Result<AnalysisResult> {
	if !success {
		let message = serde_json::from_slice::<ErrorBody>(body)
			.ok()
			.and_then(|body| body.error)
			.filter(|message| !message.is_empty())
			.unwrap_or_else(|| FALLBACK_ERROR.to_string());

		return Err(Error::Backend(message));
	}

	AnalysisResult::from_slice(body)
}

/// The body of `GET /health`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct Health {
	pub status: String,
}

impl Health {
	pub fn is_ok(&self) -> bool {
		self.status == "ok"
	}
}
