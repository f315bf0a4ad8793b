use std::cell::Cell;

use crate::event::{EventKind, EventTarget, Listen, Listener};

use super::Size;

/// A read-only view of a playing video.
///
/// The renderer reads the playback clock from here on every event instead of
/// keeping its own copy, so the drawn boxes can't drift from the displayed frame.
pub trait Playback {
	/// The playback position in seconds.
	fn current_time(&self) -> f64;

	/// The size the video is rendered at, or zero before layout.
	fn client_size(&self) -> Size;

	/// The video's native resolution, or zero before metadata loads.
	fn intrinsic_size(&self) -> Size;
}

impl<P: Playback + ?Sized> Playback for std::rc::Rc<P> {
	fn current_time(&self) -> f64 {
		(**self).current_time()
	}

	fn client_size(&self) -> Size {
		(**self).client_size()
	}

	fn intrinsic_size(&self) -> Size {
		(**self).intrinsic_size()
	}
}

/// A video element without a decoder: a clock, two sizes, and the events a browser would fire.
///
/// Native hosts and tests drive the overlay through this exactly as a browser drives it
/// through a `<video>` element.
#[derive(Default)]
pub struct HeadlessVideo {
	current_time: Cell<f64>,
	client_size: Cell<Size>,
	intrinsic_size: Cell<Size>,

	/// Fires [`EventKind::LoadedMetadata`] and [`EventKind::TimeUpdate`].
	pub events: EventTarget,
}

impl HeadlessVideo {
	pub fn new() -> Self {
		Self::default()
	}

	/// Lay the video out at the given size. Browsers don't fire an event on the element for this.
	pub fn layout(&self, size: Size) {
		self.client_size.set(size);
	}

	/// Learn the intrinsic size and fire `loadedmetadata`.
	pub fn load_metadata(&self, size: Size) {
		self.intrinsic_size.set(size);
		self.events.dispatch(EventKind::LoadedMetadata);
	}

	/// Move the playback position and fire `timeupdate`.
	pub fn seek(&self, time: f64) {
		self.current_time.set(time);
		self.events.dispatch(EventKind::TimeUpdate);
	}
}

impl Playback for HeadlessVideo {
	fn current_time(&self) -> f64 {
		self.current_time.get()
	}

	fn client_size(&self) -> Size {
		self.client_size.get()
	}

	fn intrinsic_size(&self) -> Size {
		self.intrinsic_size.get()
	}
}

impl Listen for HeadlessVideo {
	type Listener = Listener;

	fn listen(&self, kind: EventKind, callback: impl Fn() + 'static) -> Listener {
		self.events.listen(kind, callback)
	}
}

/// The window the video is displayed in.
#[derive(Clone, Default)]
pub struct Viewport {
	/// Fires [`EventKind::Resize`].
	pub events: EventTarget,
}

impl Viewport {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn resize(&self) {
		self.events.dispatch(EventKind::Resize);
	}
}

impl Listen for Viewport {
	type Listener = Listener;

	fn listen(&self, kind: EventKind, callback: impl Fn() + 'static) -> Listener {
		self.events.listen(kind, callback)
	}
}
