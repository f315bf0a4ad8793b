use serde::{Deserialize, Serialize};
use serde_with::DefaultOnNull;

use crate::{Detections, Result, TimelineMarker};

/// The analysis returned by the inference backend for one video.
///
/// Every field is optional on the wire. The live single-frame endpoint only sends
/// `accident`, `confidence`, and `boxes`; the rest fall back to their defaults.
#[serde_with::serde_as]
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AnalysisResult {
	/// The backend's verdict for the whole video.
	#[serde_as(as = "DefaultOnNull")]
	pub accident: bool,

	/// The highest accident-related confidence, 0.0 to 1.0.
	#[serde_as(as = "DefaultOnNull")]
	pub confidence: f64,

	/// Every detection, across all sampled frames.
	pub boxes: Detections,

	/// Seconds into the video of the first accident-related detection.
	pub accident_time: Option<f64>,

	/// A human readable classification, or "None".
	#[serde_as(as = "DefaultOnNull")]
	pub accident_type: String,

	/// The labels of every object class seen.
	#[serde_as(as = "DefaultOnNull")]
	pub objects_involved: Vec<String>,

	/// "High", "Medium", "Low", or "None".
	#[serde_as(as = "DefaultOnNull")]
	pub severity: String,

	/// The length of the video in seconds, or zero if unknown.
	#[serde_as(as = "DefaultOnNull")]
	pub video_duration: f64,

	/// Moments worth highlighting on the duration bar.
	#[serde_as(as = "DefaultOnNull")]
	pub timeline_markers: Vec<TimelineMarker>,
}

impl AnalysisResult {
	/// Parse a result from a string.
	#[allow(clippy::should_implement_trait)]
	pub fn from_str(s: &str) -> Result<Self> {
		Ok(serde_json::from_str(s)?)
	}

	/// Parse a result from a slice of bytes.
	pub fn from_slice(v: &[u8]) -> Result<Self> {
		Ok(serde_json::from_slice(v)?)
	}

	/// Parse a result from a reader.
	pub fn from_reader(reader: impl std::io::Read) -> Result<Self> {
		Ok(serde_json::from_reader(reader)?)
	}

	/// Serialize the result to a pretty string.
	pub fn to_string_pretty(&self) -> Result<String> {
		Ok(serde_json::to_string_pretty(self)?)
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::DetectionBox;

	#[test]
	fn full() {
		let encoded = r#"{
			"accident": true,
			"confidence": 0.8731,
			"boxes": [
				{"frame": 3, "x1": 10, "y1": 10, "x2": 50, "y2": 50, "confidence": 0.8731, "class_id": 2, "timestamp": 0.12}
			],
			"video_duration": 4.8,
			"accident_time": 0.12,
			"accident_type": "Vehicle Collision",
			"objects_involved": ["Car", "Person"],
			"severity": "High",
			"timeline_markers": [0.12, 0.16]
		}"#;

		let decoded = AnalysisResult::from_str(encoded).expect("failed to decode");

		assert!(decoded.accident);
		assert_eq!(decoded.confidence, 0.8731);
		assert_eq!(
			&decoded.boxes[..],
			&[DetectionBox {
				frame: Some(3),
				class_id: Some(2),
				..DetectionBox::new(10.0, 10.0, 50.0, 50.0, 0.8731).at(0.12)
			}]
		);
		assert_eq!(decoded.accident_time, Some(0.12));
		assert_eq!(decoded.accident_type, "Vehicle Collision");
		assert_eq!(decoded.objects_involved, vec!["Car", "Person"]);
		assert_eq!(decoded.severity, "High");
		assert_eq!(decoded.video_duration, 4.8);
		assert_eq!(
			decoded.timeline_markers,
			vec![TimelineMarker(0.12), TimelineMarker(0.16)]
		);
	}

	#[test]
	fn live_frame_subset() {
		let decoded = AnalysisResult::from_str(r#"{"accident":false,"confidence":0.0,"boxes":[]}"#).unwrap();
		assert_eq!(decoded, AnalysisResult::default());
	}

	#[test]
	fn nulls_become_defaults() {
		let decoded = AnalysisResult::from_str(
			r#"{"accident":null,"confidence":null,"accident_time":null,"severity":null,"timeline_markers":null}"#,
		)
		.unwrap();
		assert_eq!(decoded, AnalysisResult::default());
	}

	#[test]
	fn invalid() {
		let err = AnalysisResult::from_str("not json").unwrap_err();
		assert!(matches!(err, crate::Error::Json(_)));
	}
}
