use crate::{DetectionBox, Error, Result};

/// How close playback time must be to a box's timestamp for the box to show.
///
/// Detections are sampled at discrete frames while playback time is continuous,
/// so a box is shown while `|timestamp - current_time| < tolerance`.
/// Boxes without a timestamp are always shown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Window {
	tolerance: f64,
}

impl Window {
	/// The default tolerance, in seconds.
	pub const DEFAULT_TOLERANCE: f64 = 0.25;

	pub fn new(tolerance: f64) -> Result<Self> {
		if !tolerance.is_finite() || tolerance < 0.0 {
			return Err(Error::InvalidWindow(tolerance));
		}

		Ok(Self { tolerance })
	}

	pub fn tolerance(&self) -> f64 {
		self.tolerance
	}

	/// Returns true if the box should be drawn at the given playback time.
	pub fn contains(&self, detection: &DetectionBox, current_time: f64) -> bool {
		match detection.timestamp {
			None => true,
			Some(timestamp) => (timestamp - current_time).abs() < self.tolerance,
		}
	}

	/// The boxes visible at the given playback time, in input order.
	pub fn visible<'a>(
		&'a self,
		detections: &'a [DetectionBox],
		current_time: f64,
	) -> impl Iterator<Item = &'a DetectionBox> + 'a {
		detections.iter().filter(move |d| self.contains(d, current_time))
	}
}

impl Default for Window {
	fn default() -> Self {
		Self {
			tolerance: Self::DEFAULT_TOLERANCE,
		}
	}
}
