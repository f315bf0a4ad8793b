use crashview::event::{EventKind, Listen};
use crashview::overlay::{Playback, Size};
use web_sys::HtmlVideoElement;

use crate::Listener;

/// A `<video>` element, observed but never controlled.
#[derive(Clone)]
pub struct VideoPlayback {
	element: HtmlVideoElement,
}

impl VideoPlayback {
	pub fn new(element: HtmlVideoElement) -> Self {
		Self { element }
	}

	pub fn element(&self) -> &HtmlVideoElement {
		&self.element
	}
}

impl Playback for VideoPlayback {
	fn current_time(&self) -> f64 {
		self.element.current_time()
	}

	fn client_size(&self) -> Size {
		let width = self.element.client_width().max(0) as u32;
		let height = self.element.client_height().max(0) as u32;
		Size::new(width, height)
	}

	fn intrinsic_size(&self) -> Size {
		Size::new(self.element.video_width(), self.element.video_height())
	}
}

impl Listen for VideoPlayback {
	type Listener = Listener;

	fn listen(&self, kind: EventKind, callback: impl Fn() + 'static) -> Listener {
		Listener::new(&self.element, kind, callback)
	}
}
