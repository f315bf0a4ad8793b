use crate::{to_fixed, DetectionBox, Detections};

use super::{Playback, Point, Rect, Size, Style, Surface, Window};

/// The surface size used when neither the rendered nor the intrinsic size is known yet.
pub const DEFAULT_SIZE: Size = Size::new(640, 360);

/// The text drawn above a box, e.g. `Accident 87.0%`.
pub fn label(confidence: f64) -> String {
	format!("Accident {}%", to_fixed(confidence * 100.0, 1))
}

/// Pick the surface size: the rendered size, else the intrinsic size, else the default.
///
/// Each axis falls back on its own, matching how a zero dimension means "unknown".
pub fn fit(client: Size, intrinsic: Size) -> Size {
	let pick = |client: u32, intrinsic: u32, default: u32| match (client, intrinsic) {
		(0, 0) => default,
		(0, intrinsic) => intrinsic,
		(client, _) => client,
	};

	Size {
		width: pick(client.width, intrinsic.width, DEFAULT_SIZE.width),
		height: pick(client.height, intrinsic.height, DEFAULT_SIZE.height),
	}
}

/// Draws the detections visible at a playback time onto a surface it owns.
///
/// Repainting never fails; malformed geometry just draws a degenerate shape.
pub struct Renderer<S> {
	surface: S,
	detections: Detections,
	window: Window,
	style: Style,
}

impl<S: Surface> Renderer<S> {
	pub fn new(surface: S) -> Self {
		Self {
			surface,
			detections: Detections::default(),
			window: Window::default(),
			style: Style::default(),
		}
	}

	pub fn with_window(mut self, window: Window) -> Self {
		self.window = window;
		self
	}

	pub fn with_style(mut self, style: Style) -> Self {
		self.style = style;
		self
	}

	/// Replace the detections. Takes effect on the next repaint.
	pub fn set_detections(&mut self, detections: Detections) {
		self.detections = detections;
	}

	pub fn detections(&self) -> &Detections {
		&self.detections
	}

	pub fn window(&self) -> Window {
		self.window
	}

	pub fn surface(&self) -> &S {
		&self.surface
	}

	pub fn into_surface(self) -> S {
		self.surface
	}

	/// Match the surface to the video's size and repaint at its current time.
	pub fn resize<P: Playback + ?Sized>(&mut self, playback: &P) {
		let size = fit(playback.client_size(), playback.intrinsic_size());
		if size != self.surface.size() {
			tracing::debug!(%size, "resizing overlay");
		}

		self.surface.resize(size);
		self.draw(playback.current_time());
	}

	/// Clear the surface and draw every box visible at the given time.
	///
	/// Returns the number of boxes drawn.
	pub fn draw(&mut self, current_time: f64) -> usize {
		// A video that isn't ready reports NaN; treat it as the start.
		let current_time = match current_time.is_finite() {
			true => current_time,
			false => 0.0,
		};

		self.surface.clear();

		// Cheap to clone, and lets us borrow the surface mutably while iterating.
		let detections = self.detections.clone();
		let window = self.window;
		let mut drawn = 0;

		for detection in window.visible(&detections, current_time) {
			self.draw_box(detection);
			drawn += 1;
		}

		tracing::trace!(current_time, drawn, total = detections.len(), "repainted overlay");

		drawn
	}

	fn draw_box(&mut self, detection: &DetectionBox) {
		let style = &self.style;

		let outline = Rect::new(detection.x1, detection.y1, detection.width(), detection.height());
		self.surface.stroke_rect(outline, &style.stroke);

		let text = label(detection.confidence);
		let chip = Rect::new(
			detection.x1,
			(detection.y1 - style.chip_height).max(0.0),
			self.surface.measure_text(&text, &style.font) + style.chip_padding,
			style.chip_height,
		);
		self.surface.fill_rect(chip, style.chip);

		let baseline = Point::new(
			detection.x1 + style.text_inset,
			(detection.y1 - style.baseline_offset).max(style.min_baseline),
		);
		self.surface.fill_text(&text, baseline, &style.font, style.text);
	}
}
