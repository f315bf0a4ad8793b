//! The page state for one uploaded video.
//!
//! [`Dashboard`] tracks an upload from start to finish and derives everything the
//! page shows from the backend's result: the status banner, the alert modal, the
//! timeline strip, and the downloadable report.
mod alert;
mod report;

pub use alert::*;
pub use report::*;

use std::fmt;

use crate::upload::UNEXPECTED_ERROR;
use crate::{to_fixed, AnalysisResult, Detections, TimelineStrip};

use alert::is_known;

#[derive(Debug, Clone, Default)]
pub struct Dashboard {
	loading: bool,
	error: Option<String>,

	// The location of the uploaded video, for the player.
	video: Option<String>,
	result: AnalysisResult,

	// Cleared by dismissing the alert; the verdict in `result` is kept.
	alert: bool,
}

impl Dashboard {
	pub fn new() -> Self {
		Self::default()
	}

	/// Forget the previous video and wait for a new result.
	pub fn start_upload(&mut self) {
		*self = Self {
			loading: true,
			..Self::default()
		};
	}

	/// Finish an upload started with [`Self::start_upload`].
	///
	/// On failure the message is kept for the user, or a generic one if there is none,
	/// and the result is reset to an empty, non-accident state.
	pub fn complete_upload<E: fmt::Display>(&mut self, video: Option<String>, result: Result<AnalysisResult, E>) {
		self.loading = false;
		self.video = video;

		match result {
			Ok(result) => {
				tracing::info!(
					accident = result.accident,
					confidence = result.confidence,
					boxes = result.boxes.len(),
					"analysis complete"
				);

				self.error = None;
				self.alert = result.accident;
				self.result = result;
			}
			Err(err) => {
				let message = match err.to_string() {
					message if message.is_empty() => UNEXPECTED_ERROR.to_string(),
					message => message,
				};
				tracing::warn!(%message, "analysis failed");

				self.error = Some(message);
				self.alert = false;
				self.result = AnalysisResult::default();
			}
		}
	}

	pub fn loading(&self) -> bool {
		self.loading
	}

	pub fn error(&self) -> Option<&str> {
		self.error.as_deref()
	}

	pub fn video(&self) -> Option<&str> {
		self.video.as_deref()
	}

	pub fn result(&self) -> &AnalysisResult {
		&self.result
	}

	/// The boxes to hand to the overlay.
	pub fn detections(&self) -> Detections {
		self.result.boxes.clone()
	}

	/// The status banner.
	pub fn status(&self) -> &'static str {
		match self.alert {
			true => "Accident Detected",
			false => "Monitoring",
		}
	}

	pub fn confidence_text(&self) -> String {
		format!("{}%", to_fixed(self.result.confidence * 100.0, 1))
	}

	pub fn accident_time_text(&self) -> Option<String> {
		self.result.accident_time.map(|time| format!("{}s", to_fixed(time, 2)))
	}

	/// The alert modal, while it hasn't been dismissed.
	pub fn alert(&self) -> Option<Alert> {
		if !self.alert {
			return None;
		}

		Some(Alert {
			confidence: self.result.confidence,
			accident_time: self.result.accident_time,
			accident_type: self.result.accident_type.clone(),
			severity: self.result.severity.clone(),
		})
	}

	pub fn dismiss_alert(&mut self) {
		self.alert = false;
	}

	pub fn timeline(&self) -> Option<TimelineStrip> {
		TimelineStrip::new(self.result.video_duration, &self.result.timeline_markers)
	}

	/// The report for the current video, once there is something to report.
	pub fn report(&self) -> Option<Report> {
		if self.result.boxes.is_empty() {
			return None;
		}

		let result = &self.result;
		Some(Report {
			accident: result.accident,
			confidence: result.confidence,
			accident_time: result.accident_time,
			accident_type: result.accident_type.clone(),
			objects_involved: result.objects_involved.clone(),
			severity: result.severity.clone(),
			video_duration: result.video_duration,
			timeline_markers: result.timeline_markers.clone(),
		})
	}
}

/// A plain text rendition of the analysis panel.
impl fmt::Display for Dashboard {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.loading {
			return writeln!(f, "Analyzing...");
		}

		if let Some(error) = &self.error {
			writeln!(f, "Error: {error}")?;
		}

		let result = &self.result;

		writeln!(f, "Status: {}", self.status())?;
		writeln!(
			f,
			"Accident: {}",
			match result.accident {
				true => "YES",
				false => "NO",
			}
		)?;
		writeln!(f, "Confidence: {}", self.confidence_text())?;

		if let Some(time) = self.accident_time_text() {
			writeln!(f, "Accident time: {time}")?;
		}

		if is_known(&result.accident_type) {
			writeln!(f, "Type: {}", result.accident_type)?;
		}

		if !result.objects_involved.is_empty() {
			writeln!(f, "Objects: {}", result.objects_involved.join(", "))?;
		}

		if !result.severity.is_empty() {
			writeln!(f, "Severity: {}", result.severity)?;
		}

		writeln!(
			f,
			"Safety: {}",
			match result.accident {
				true => "Not Safe",
				false => "Safe",
			}
		)?;
		writeln!(f, "Detections: {}", result.boxes.len())?;

		if let Some(timeline) = self.timeline() {
			let positions: Vec<_> = timeline.positions().map(|p| format!("{}%", to_fixed(p, 1))).collect();
			writeln!(
				f,
				"Timeline: {} [{}] {}",
				timeline.start_label(),
				positions.join(", "),
				timeline.end_label()
			)?;
		}

		Ok(())
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use crate::{DetectionBox, Error, TimelineMarker};

	fn result() -> AnalysisResult {
		AnalysisResult {
			accident: true,
			confidence: 0.873,
			boxes: vec![DetectionBox::new(10.0, 10.0, 50.0, 50.0, 0.87).at(1.2)].into(),
			accident_time: Some(1.2),
			accident_type: "Vehicle Collision".to_string(),
			objects_involved: vec!["Car".to_string(), "Truck".to_string()],
			severity: "High".to_string(),
			video_duration: 4.8,
			timeline_markers: vec![TimelineMarker(1.2)],
		}
	}

	#[test]
	fn accident() {
		let mut dashboard = Dashboard::new();
		assert_eq!(dashboard.status(), "Monitoring");

		dashboard.start_upload();
		assert!(dashboard.loading());

		dashboard.complete_upload(Some("crash.mp4".to_string()), Ok::<_, Error>(result()));
		assert!(!dashboard.loading());
		assert_eq!(dashboard.video(), Some("crash.mp4"));
		assert_eq!(dashboard.status(), "Accident Detected");
		assert_eq!(dashboard.confidence_text(), "87.3%");
		assert_eq!(dashboard.accident_time_text().as_deref(), Some("1.20s"));
		assert_eq!(dashboard.detections().len(), 1);

		let alert = dashboard.alert().unwrap();
		assert_eq!(alert.severity, "High");

		let timeline = dashboard.timeline().unwrap();
		assert_eq!(timeline.positions().collect::<Vec<_>>(), vec![25.0]);
	}

	#[test]
	fn dismiss_keeps_verdict() {
		let mut dashboard = Dashboard::new();
		dashboard.complete_upload(None, Ok::<_, Error>(result()));

		dashboard.dismiss_alert();
		assert!(dashboard.alert().is_none());
		assert_eq!(dashboard.status(), "Monitoring");

		let report = dashboard.report().unwrap();
		assert!(report.accident);
		assert_eq!(report.objects_involved, vec!["Car", "Truck"]);
	}

	#[test]
	fn failure_normalizes() {
		let mut dashboard = Dashboard::new();
		dashboard.complete_upload(None, Ok::<_, Error>(result()));

		dashboard.start_upload();
		assert!(dashboard.result().boxes.is_empty(), "previous result forgotten");

		dashboard.complete_upload(Some("crash.mp4".to_string()), Err(Error::Backend("model not loaded".to_string())));
		assert_eq!(dashboard.error(), Some("model not loaded"));
		assert_eq!(dashboard.result(), &AnalysisResult::default());
		assert_eq!(dashboard.status(), "Monitoring");
		assert!(dashboard.alert().is_none());
		assert!(dashboard.report().is_none());
		assert!(dashboard.timeline().is_none());
	}

	#[test]
	fn safe_video() {
		let mut dashboard = Dashboard::new();
		dashboard.complete_upload(
			None,
			Ok::<_, Error>(AnalysisResult {
				boxes: vec![DetectionBox::new(0.0, 0.0, 5.0, 5.0, 0.4)].into(),
				accident_type: "None".to_string(),
				..Default::default()
			}),
		);

		assert!(dashboard.alert().is_none());
		assert!(!dashboard.report().unwrap().accident);

		let panel = dashboard.to_string();
		assert!(panel.contains("Accident: NO"));
		assert!(panel.contains("Safety: Safe"));
		assert!(panel.contains("Detections: 1"));
		assert!(!panel.contains("Type:"), "unknown type is hidden");
	}

	#[test]
	fn failure_without_message() {
		let mut dashboard = Dashboard::new();
		dashboard.start_upload();
		dashboard.complete_upload(None, Err(Error::Backend(String::new())));

		assert_eq!(dashboard.error(), Some(UNEXPECTED_ERROR));
		assert!(dashboard.to_string().starts_with("Error: Unexpected error while uploading.\n"));
	}

	#[test]
	fn halves_round_up() {
		let mut dashboard = Dashboard::new();
		dashboard.complete_upload(
			None,
			Ok::<_, Error>(AnalysisResult {
				confidence: 0.1225,
				accident_time: Some(1.125),
				..Default::default()
			}),
		);

		assert_eq!(dashboard.confidence_text(), "12.3%");
		assert_eq!(dashboard.accident_time_text().as_deref(), Some("1.13s"));
	}

	#[test]
	fn panel() {
		let mut dashboard = Dashboard::new();
		dashboard.start_upload();
		assert_eq!(dashboard.to_string(), "Analyzing...\n");

		dashboard.complete_upload(None, Ok::<_, Error>(result()));
		let panel = dashboard.to_string();
		assert!(panel.contains("Status: Accident Detected"));
		assert!(panel.contains("Objects: Car, Truck"));
		assert!(panel.contains("Safety: Not Safe"));
		assert!(panel.contains("Timeline: 0s [25.0%] 4.8s"));
	}
}
