use serde::{Deserialize, Serialize};

use crate::{Result, TimelineMarker};

/// A downloadable summary of what the dashboard shows for one video.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Report {
	/// The backend's verdict; dismissing the alert doesn't change it.
	pub accident: bool,
	pub confidence: f64,
	pub accident_time: Option<f64>,
	pub accident_type: String,
	pub objects_involved: Vec<String>,
	pub severity: String,
	pub video_duration: f64,
	pub timeline_markers: Vec<TimelineMarker>,
}

impl Report {
	/// The default name for the exported file.
	pub const FILE_NAME: &'static str = "accident_report.json";

	/// Serialize the report to a pretty string, indented by two spaces.
	pub fn to_string_pretty(&self) -> Result<String> {
		Ok(serde_json::to_string_pretty(self)?)
	}

	/// Serialize the report to a pretty writer.
	pub fn to_writer_pretty(&self, writer: impl std::io::Write) -> Result<()> {
		Ok(serde_json::to_writer_pretty(writer, self)?)
	}
}
