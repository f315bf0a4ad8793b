use std::fmt::Write;

use super::{Color, Font, Point, Rect, Size, Stroke, Surface};

/// A single drawing operation recorded by a [`Canvas`].
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
	StrokeRect { rect: Rect, stroke: Stroke },
	FillRect { rect: Rect, color: Color },
	FillText {
		text: String,
		at: Point,
		font: Font,
		color: Color,
	},
}

/// An in-memory surface that records what was drawn since the last clear.
///
/// Used by headless hosts and tests, and exportable as SVG.
#[derive(Debug, Clone, Default)]
pub struct Canvas {
	size: Size,
	commands: Vec<Command>,
}

impl Canvas {
	// Average glyph advance relative to the font size, for a proportional sans-serif.
	const GLYPH_ADVANCE: f64 = 0.6;

	pub fn new(size: Size) -> Self {
		Self {
			size,
			commands: Vec::new(),
		}
	}

	/// Everything drawn since the last clear, in order.
	pub fn commands(&self) -> &[Command] {
		&self.commands
	}

	pub fn is_blank(&self) -> bool {
		self.commands.is_empty()
	}

	/// The outlines drawn since the last clear.
	pub fn outlines(&self) -> impl Iterator<Item = &Rect> {
		self.commands.iter().filter_map(|command| match command {
			Command::StrokeRect { rect, .. } => Some(rect),
			_ => None,
		})
	}

	/// The text drawn since the last clear.
	pub fn labels(&self) -> impl Iterator<Item = &str> {
		self.commands.iter().filter_map(|command| match command {
			Command::FillText { text, .. } => Some(text.as_str()),
			_ => None,
		})
	}

	/// Render the surface as a standalone SVG document with a transparent background.
	pub fn to_svg(&self) -> String {
		let mut svg = String::new();
		let Size { width, height } = self.size;

		// Writing to a String can't fail.
		let _ = writeln!(
			svg,
			r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
		);

		let mut glows = Vec::new();
		for command in &self.commands {
			if let Command::StrokeRect {
				stroke: Stroke { glow: Some(glow), .. },
				..
			} = command
			{
				if !glows.contains(glow) {
					glows.push(*glow);
				}
			}
		}

		if !glows.is_empty() {
			let _ = writeln!(svg, "<defs>");
			for (index, glow) in glows.iter().enumerate() {
				// SVG's stdDeviation is half of the canvas shadowBlur.
				let _ = writeln!(
					svg,
					r#"<filter id="glow{index}" x="-50%" y="-50%" width="200%" height="200%"><feDropShadow dx="0" dy="0" stdDeviation="{}" flood-color="{}"/></filter>"#,
					glow.blur / 2.0,
					glow.color
				);
			}
			let _ = writeln!(svg, "</defs>");
		}

		for command in &self.commands {
			match command {
				Command::StrokeRect { rect, stroke } => {
					let rect = normalize(*rect);
					let filter = match stroke.glow.and_then(|glow| glows.iter().position(|g| *g == glow)) {
						Some(index) => format!(r#" filter="url(#glow{index})""#),
						None => String::new(),
					};
					let _ = writeln!(
						svg,
						r#"<rect x="{}" y="{}" width="{}" height="{}" fill="none" stroke="{}" stroke-width="{}"{filter}/>"#,
						rect.x, rect.y, rect.width, rect.height, stroke.color, stroke.width
					);
				}
				Command::FillRect { rect, color } => {
					let rect = normalize(*rect);
					let _ = writeln!(
						svg,
						r#"<rect x="{}" y="{}" width="{}" height="{}" fill="{color}"/>"#,
						rect.x, rect.y, rect.width, rect.height
					);
				}
				Command::FillText { text, at, font, color } => {
					let _ = writeln!(
						svg,
						r#"<text x="{}" y="{}" font-family="{}" font-size="{}" fill="{color}">{}</text>"#,
						at.x,
						at.y,
						font.family,
						font.size,
						escape(text)
					);
				}
			}
		}

		svg.push_str("</svg>\n");
		svg
	}
}

impl Surface for Canvas {
	fn size(&self) -> Size {
		self.size
	}

	fn resize(&mut self, size: Size) {
		self.size = size;
		self.commands.clear();
	}

	fn clear(&mut self) {
		self.commands.clear();
	}

	fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke) {
		self.commands.push(Command::StrokeRect { rect, stroke: *stroke });
	}

	fn fill_rect(&mut self, rect: Rect, color: Color) {
		self.commands.push(Command::FillRect { rect, color });
	}

	fn fill_text(&mut self, text: &str, at: Point, font: &Font, color: Color) {
		self.commands.push(Command::FillText {
			text: text.to_string(),
			at,
			font: font.clone(),
			color,
		});
	}

	fn measure_text(&self, text: &str, font: &Font) -> f64 {
		text.chars().count() as f64 * font.size * Self::GLYPH_ADVANCE
	}
}

// SVG rejects negative sizes, while a canvas draws them mirrored.
fn normalize(rect: Rect) -> Rect {
	Rect {
		x: rect.x.min(rect.x + rect.width),
		y: rect.y.min(rect.y + rect.height),
		width: rect.width.abs(),
		height: rect.height.abs(),
	}
}

fn escape(text: &str) -> String {
	let mut escaped = String::with_capacity(text.len());
	for c in text.chars() {
		match c {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'"' => escaped.push_str("&quot;"),
			c => escaped.push(c),
		}
	}
	escaped
}
