use crashview::overlay::{Color, Font, Point, Rect, Size, Stroke, Surface};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::{Error, Result};

/// A `<canvas>` layered over the video.
pub struct CanvasSurface {
	canvas: HtmlCanvasElement,
	context: CanvasRenderingContext2d,
}

impl CanvasSurface {
	pub fn new(canvas: HtmlCanvasElement) -> Result<Self> {
		let context = canvas
			.get_context("2d")?
			.ok_or(Error::NoContext)?
			.dyn_into::<CanvasRenderingContext2d>()
			.map_err(|_| Error::NoContext)?;

		Ok(Self { canvas, context })
	}

	pub fn canvas(&self) -> &HtmlCanvasElement {
		&self.canvas
	}
}

impl Surface for CanvasSurface {
	fn size(&self) -> Size {
		Size::new(self.canvas.width(), self.canvas.height())
	}

	fn resize(&mut self, size: Size) {
		self.canvas.set_width(size.width);
		self.canvas.set_height(size.height);
	}

	fn clear(&mut self) {
		let Size { width, height } = self.size();
		self.context.clear_rect(0.0, 0.0, width as f64, height as f64);
	}

	fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke) {
		self.context.save();

		self.context.set_stroke_style_str(&stroke.color.to_string());
		self.context.set_line_width(stroke.width);

		if let Some(glow) = stroke.glow {
			self.context.set_shadow_blur(glow.blur);
			self.context.set_shadow_color(&glow.color.to_string());
		}

		self.context.stroke_rect(rect.x, rect.y, rect.width, rect.height);

		// Only strokes glow.
		self.context.restore();
	}

	fn fill_rect(&mut self, rect: Rect, color: Color) {
		self.context.set_fill_style_str(&color.to_string());
		self.context.fill_rect(rect.x, rect.y, rect.width, rect.height);
	}

	fn fill_text(&mut self, text: &str, at: Point, font: &Font, color: Color) {
		self.context.set_font(&font.to_string());
		self.context.set_fill_style_str(&color.to_string());

		if let Err(err) = self.context.fill_text(text, at.x, at.y) {
			tracing::warn!(?err, "failed to draw text");
		}
	}

	fn measure_text(&self, text: &str, font: &Font) -> f64 {
		self.context.set_font(&font.to_string());
		self.context.measure_text(text).map(|metrics| metrics.width()).unwrap_or_default()
	}
}
