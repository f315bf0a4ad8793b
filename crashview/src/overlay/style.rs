use super::{Color, Font, Glow, Stroke};

/// The look of a detection box and its label chip.
#[derive(Debug, Clone, PartialEq)]
pub struct Style {
	/// The rectangle outline.
	pub stroke: Stroke,

	/// The label chip background.
	pub chip: Color,

	/// The chip height, and how far above the box it sits.
	pub chip_height: f64,

	/// Added to the measured label width.
	pub chip_padding: f64,

	pub text: Color,
	pub font: Font,

	/// Horizontal offset of the text within the chip.
	pub text_inset: f64,

	/// Distance of the text baseline above the box's top edge.
	pub baseline_offset: f64,

	/// The baseline never goes above this, so the text stays on the surface.
	pub min_baseline: f64,
}

impl Default for Style {
	fn default() -> Self {
		Self {
			stroke: Stroke {
				color: Color::rgba(239, 68, 68, 0.95),
				width: 3.0,
				glow: Some(Glow {
					blur: 8.0,
					color: Color::rgba(248, 113, 113, 0.9),
				}),
			},
			chip: Color::rgba(248, 113, 113, 0.95),
			chip_height: 18.0,
			chip_padding: 10.0,
			text: Color::WHITE,
			font: Font {
				size: 10.0,
				family: "system-ui".to_string(),
			},
			text_inset: 5.0,
			baseline_offset: 6.0,
			min_baseline: 10.0,
		}
	}
}
