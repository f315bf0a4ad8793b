use serde::{Deserialize, Serialize};

/// A notable moment in the video, in seconds.
///
/// Markers have no identity beyond their value; duplicates are kept and drawn independently.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[derive(derive_more::From, derive_more::Display)]
#[display("{_0}s")]
#[serde(transparent)]
pub struct TimelineMarker(pub f64);

impl TimelineMarker {
	pub fn seconds(&self) -> f64 {
		self.0
	}
}
