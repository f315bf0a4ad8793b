//! Marker positions along the video's duration bar.
use crate::{to_fixed, TimelineMarker};

/// The position of a marker as a percentage from the left, clamped to the bar.
///
/// The caller guarantees `duration > 0`; see [`TimelineStrip::new`].
pub fn position(marker: TimelineMarker, duration: f64) -> f64 {
	marker.seconds().clamp(0.0, duration) / duration * 100.0
}

/// A thin duration bar with one dot per marker.
///
/// Stateless and recomputed on demand; marker lists are bounded by the video length.
#[derive(Debug, Clone, PartialEq)]
pub struct TimelineStrip {
	duration: f64,
	markers: Vec<TimelineMarker>,
}

impl TimelineStrip {
	/// Returns `None` when there is nothing to show: no duration or no markers.
	pub fn new(duration: f64, markers: &[TimelineMarker]) -> Option<Self> {
		if !(duration.is_finite() && duration > 0.0) || markers.is_empty() {
			return None;
		}

		Some(Self {
			duration,
			markers: markers.to_vec(),
		})
	}

	pub fn duration(&self) -> f64 {
		self.duration
	}

	/// Each marker's position in percent, in input order. Duplicates are kept.
	pub fn positions(&self) -> impl Iterator<Item = f64> + '_ {
		self.markers.iter().map(|marker| position(*marker, self.duration))
	}

	/// The label under the left end of the bar.
	pub fn start_label(&self) -> &'static str {
		"0s"
	}

	/// The label under the right end of the bar.
	pub fn end_label(&self) -> String {
		format!("{}s", to_fixed(self.duration, 1))
	}
}
