use std::ops::Deref;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// One detected region in one video frame.
///
/// Coordinates are pixels in the video's rendered frame, top-left to bottom-right.
/// Nothing checks that `x2 >= x1` or `y2 >= y1`; a malformed box simply draws a
/// degenerate rectangle.
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct DetectionBox {
	pub x1: f64,
	pub y1: f64,
	pub x2: f64,
	pub y2: f64,

	/// Conventionally 0.0 to 1.0, shown as a percentage.
	pub confidence: f64,

	/// Seconds into the video.
	/// A box without a timestamp is visible for the whole video.
	pub timestamp: Option<f64>,

	/// The frame index the backend sampled, if it reports one.
	pub frame: Option<u64>,

	/// The backend's class ID, if it reports one.
	pub class_id: Option<i64>,
}

impl DetectionBox {
	pub fn new(x1: f64, y1: f64, x2: f64, y2: f64, confidence: f64) -> Self {
		Self {
			x1,
			y1,
			x2,
			y2,
			confidence,
			..Default::default()
		}
	}

	pub fn at(self, timestamp: f64) -> Self {
		Self {
			timestamp: Some(timestamp),
			..self
		}
	}

	pub fn width(&self) -> f64 {
		self.x2 - self.x1
	}

	pub fn height(&self) -> f64 {
		self.y2 - self.y1
	}
}

/// An immutable, shared list of detection boxes.
///
/// Cloning is cheap and yields the *same* list. A different list is a different
/// input, even when the contents are equal; see [`Detections::is_clone`].
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(from = "Vec<DetectionBox>", into = "Vec<DetectionBox>")]
pub struct Detections(Arc<[DetectionBox]>);

impl Detections {
	pub fn new(boxes: Vec<DetectionBox>) -> Self {
		Self(boxes.into())
	}

	/// Check if this is the exact same list, not just an equal one.
	pub fn is_clone(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}
}

impl Deref for Detections {
	type Target = [DetectionBox];

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}

impl PartialEq for Detections {
	fn eq(&self, other: &Self) -> bool {
		self.0[..] == other.0[..]
	}
}

impl From<Vec<DetectionBox>> for Detections {
	fn from(boxes: Vec<DetectionBox>) -> Self {
		Self::new(boxes)
	}
}

impl From<Detections> for Vec<DetectionBox> {
	fn from(detections: Detections) -> Self {
		detections.0.to_vec()
	}
}

impl FromIterator<DetectionBox> for Detections {
	fn from_iter<I: IntoIterator<Item = DetectionBox>>(iter: I) -> Self {
		Self(iter.into_iter().collect())
	}
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn decode_backend_box() {
		let encoded = r#"{"frame":75,"x1":10.5,"y1":20.0,"x2":110.0,"y2":220.25,"confidence":0.91,"class_id":2,"timestamp":3.0}"#;
		let decoded: DetectionBox = serde_json::from_str(encoded).unwrap();

		assert_eq!(
			decoded,
			DetectionBox {
				frame: Some(75),
				class_id: Some(2),
				..DetectionBox::new(10.5, 20.0, 110.0, 220.25, 0.91).at(3.0)
			}
		);
		assert_eq!(decoded.width(), 99.5);
		assert_eq!(decoded.height(), 200.25);
	}

	#[test]
	fn missing_timestamp_is_none() {
		let decoded: DetectionBox = serde_json::from_str(r#"{"x1":1,"y1":2,"x2":3,"y2":4,"confidence":0.5}"#).unwrap();
		assert_eq!(decoded.timestamp, None);

		// A null timestamp means the same thing.
		let decoded: DetectionBox =
			serde_json::from_str(r#"{"x1":1,"y1":2,"x2":3,"y2":4,"confidence":0.5,"timestamp":null}"#).unwrap();
		assert_eq!(decoded.timestamp, None);

		let encoded = serde_json::to_string(&decoded).unwrap();
		assert!(!encoded.contains("timestamp"), "none should be skipped: {encoded}");
	}

	#[test]
	fn identity() {
		let a = Detections::new(vec![DetectionBox::new(0.0, 0.0, 1.0, 1.0, 0.5)]);
		let b = a.clone();
		let c = Detections::new(a.to_vec());

		assert!(a.is_clone(&b));
		assert!(!a.is_clone(&c));
		assert_eq!(a, c, "equal contents should compare equal");
	}
}
