use std::sync::Arc;

/// Error types for the crashview library.
///
/// The overlay renderer itself never fails; these errors come from parsing
/// backend payloads, validating user input, and configuring the renderer.
#[derive(Debug, thiserror::Error, Clone)]
pub enum Error {
	/// JSON serialization/deserialization error.
	#[error("json error: {0}")]
	Json(Arc<serde_json::Error>),

	/// The backend URL could not be parsed or joined.
	#[error("invalid url: {0}")]
	InvalidUrl(#[from] url::ParseError),

	/// No file was chosen before starting an upload.
	#[error("Please choose a video file first.")]
	MissingFile,

	/// The chosen file is not a video.
	#[error("Please select a valid video file (MP4, MOV, AVI, etc.).")]
	NotVideo,

	/// The backend rejected the request, with its message if it sent one.
	#[error("{0}")]
	Backend(String),

	/// The visibility window must be a finite, non-negative number of seconds.
	#[error("invalid visibility window: {0}")]
	InvalidWindow(f64),
}

/// A Result type alias for crashview operations.
pub type Result<T> = std::result::Result<T, Error>;

// Wrap in an Arc so it is Clone
impl From<serde_json::Error> for Error {
	fn from(err: serde_json::Error) -> Self {
		Error::Json(Arc::new(err))
	}
}
