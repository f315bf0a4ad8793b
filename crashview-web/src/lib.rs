mod error;
mod listener;
mod player;
mod surface;
mod upload;
mod video;

pub use error::*;
pub use listener::*;
pub use player::*;
pub use surface::*;
pub use upload::*;
pub use video::*;

use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn start() {
	// print pretty errors in wasm https://github.com/rustwasm/console_error_panic_hook
	// This is not needed for tracing to work, but it is a common tool for getting proper error line numbers for panics.
	console_error_panic_hook::set_once();

	let config = wasm_tracing::WASMLayerConfigBuilder::new()
		.set_max_level(tracing::Level::DEBUG)
		.build();
	wasm_tracing::set_as_global_default_with_config(config);
}

/// Marker positions along the duration bar, in percent.
///
/// Empty when the bar is hidden: no duration yet, or no markers.
#[wasm_bindgen(js_name = timelinePositions)]
pub fn timeline_positions(duration: f64, markers: Vec<f64>) -> Vec<f64> {
	let markers: Vec<crashview::TimelineMarker> = markers.into_iter().map(Into::into).collect();

	match crashview::TimelineStrip::new(duration, &markers) {
		Some(strip) => strip.positions().collect(),
		None => Vec::new(),
	}
}
