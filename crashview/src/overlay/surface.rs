use derive_more::Display;

/// The pixel dimensions of a drawing surface or video.
///
/// A zero dimension means "unknown", e.g. before layout or before metadata loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
#[display("{width}x{height}")]
pub struct Size {
	pub width: u32,
	pub height: u32,
}

impl Size {
	pub const fn new(width: u32, height: u32) -> Self {
		Self { width, height }
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
	pub x: f64,
	pub y: f64,
}

impl Point {
	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

/// An axis-aligned rectangle. Width and height may be negative.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
	pub x: f64,
	pub y: f64,
	pub width: f64,
	pub height: f64,
}

impl Rect {
	pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
		Self { x, y, width, height }
	}
}

/// An sRGB color with straight alpha, formatted as a CSS `rgba()` value.
#[derive(Debug, Clone, Copy, PartialEq, Display)]
#[display("rgba({r},{g},{b},{a})")]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: f32,
}

impl Color {
	pub const WHITE: Self = Self::rgba(255, 255, 255, 1.0);

	pub const fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
		Self { r, g, b, a }
	}
}

/// A font, formatted as a CSS shorthand like `10px system-ui`.
#[derive(Debug, Clone, PartialEq, Display)]
#[display("{size}px {family}")]
pub struct Font {
	pub size: f64,
	pub family: String,
}

/// A soft shadow drawn around strokes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
	pub blur: f64,
	pub color: Color,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
	pub color: Color,
	pub width: f64,
	pub glow: Option<Glow>,
}

/// A 2D drawing surface, modeled on the HTML canvas.
///
/// The renderer owns its surface exclusively; nothing else draws on it.
pub trait Surface {
	/// The current size in pixels.
	fn size(&self) -> Size;

	/// Change the size. Like a canvas, this discards whatever was drawn.
	fn resize(&mut self, size: Size);

	/// Erase the entire surface.
	fn clear(&mut self);

	fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke);

	fn fill_rect(&mut self, rect: Rect, color: Color);

	/// Draw text with its alphabetic baseline at `at`.
	fn fill_text(&mut self, text: &str, at: Point, font: &Font, color: Color);

	/// The advance width of the text in pixels.
	fn measure_text(&self, text: &str, font: &Font) -> f64;
}

impl<S: Surface + ?Sized> Surface for Box<S> {
	fn size(&self) -> Size {
		(**self).size()
	}

	fn resize(&mut self, size: Size) {
		(**self).resize(size)
	}

	fn clear(&mut self) {
		(**self).clear()
	}

	fn stroke_rect(&mut self, rect: Rect, stroke: &Stroke) {
		(**self).stroke_rect(rect, stroke)
	}

	fn fill_rect(&mut self, rect: Rect, color: Color) {
		(**self).fill_rect(rect, color)
	}

	fn fill_text(&mut self, text: &str, at: Point, font: &Font, color: Color) {
		(**self).fill_text(text, at, font, color)
	}

	fn measure_text(&self, text: &str, font: &Font) -> f64 {
		(**self).measure_text(text, font)
	}
}
