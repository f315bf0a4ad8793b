use crashview::{DetectionBox, Detections, Overlay, Renderer};
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, HtmlVideoElement};

use crate::{BrowserWindow, CanvasSurface, Error, Result, VideoPlayback};

/// Draws detection boxes on a canvas over a `<video>`, in sync with playback.
///
/// Call `free()` to detach; the canvas is left as it was last drawn.
#[wasm_bindgen]
pub struct DetectionPlayer {
	overlay: Overlay<CanvasSurface, VideoPlayback, BrowserWindow>,
}

#[wasm_bindgen]
impl DetectionPlayer {
	#[wasm_bindgen(constructor)]
	pub fn new(video: HtmlVideoElement, canvas: HtmlCanvasElement) -> std::result::Result<DetectionPlayer, JsValue> {
		Ok(Self::mount(video, canvas)?)
	}

	/// Replace the detections with a JSON array of boxes, and repaint.
	#[wasm_bindgen(js_name = setDetections)]
	pub fn set_detections(&mut self, json: &str) -> std::result::Result<(), JsValue> {
		let boxes: Vec<DetectionBox> = serde_json::from_str(json).map_err(crashview::Error::from).map_err(Error::from)?;
		self.replace(boxes.into());
		Ok(())
	}
}

impl DetectionPlayer {
	pub fn mount(video: HtmlVideoElement, canvas: HtmlCanvasElement) -> Result<Self> {
		let window = web_sys::window().ok_or(Error::NoWindow)?;
		let surface = CanvasSurface::new(canvas)?;

		let overlay = Overlay::mount(Renderer::new(surface), VideoPlayback::new(video), BrowserWindow::new(window));
		Ok(Self { overlay })
	}

	/// Replace the detections, removing every listener before attaching new ones.
	pub fn replace(&mut self, detections: Detections) {
		self.overlay.set_detections(detections);
	}
}
