use std::cell::{Ref, RefCell};
use std::rc::Rc;

use crate::event::{EventKind, Listen};
use crate::Detections;

use super::{HeadlessVideo, Playback, Renderer, Surface, Viewport};

/// A renderer mounted on a video and viewport.
///
/// While mounted, the surface is resized on `resize` and `loadedmetadata` and
/// repainted on `timeupdate`. Every listener is owned by the overlay, so dropping
/// it detaches everything; no callback can outlive it and paint a stale surface.
///
/// The video and viewport are anything that can [`Listen`]: the headless types by
/// default, or DOM elements in the browser.
pub struct Overlay<S, V = Rc<HeadlessVideo>, W = Viewport>
where
	S: Surface + 'static,
	V: Playback + Listen + Clone + 'static,
	W: Listen,
{
	renderer: Rc<RefCell<Renderer<S>>>,
	video: V,
	viewport: W,

	// Dropping these removes the callbacks.
	video_listeners: Vec<V::Listener>,
	viewport_listeners: Vec<W::Listener>,
}

impl<S, V, W> Overlay<S, V, W>
where
	S: Surface + 'static,
	V: Playback + Listen + Clone + 'static,
	W: Listen,
{
	/// Size the surface to the video, paint it, and start listening.
	pub fn mount(renderer: Renderer<S>, video: V, viewport: W) -> Self {
		let mut overlay = Self {
			renderer: Rc::new(RefCell::new(renderer)),
			video,
			viewport,
			video_listeners: Vec::new(),
			viewport_listeners: Vec::new(),
		};

		overlay.attach();
		overlay
	}

	/// Replace the detections, treating the new list as a fresh input.
	///
	/// Listeners are removed before new ones are attached, then the surface is resized
	/// and repainted. Passing the same list again is a no-op.
	pub fn set_detections(&mut self, detections: Detections) {
		if self.renderer.borrow().detections().is_clone(&detections) {
			return;
		}

		self.detach();
		self.renderer.borrow_mut().set_detections(detections);
		self.attach();
	}

	/// The mounted renderer.
	///
	/// Events that arrive while this is held skip their repaint; the next one catches up.
	pub fn renderer(&self) -> Ref<'_, Renderer<S>> {
		self.renderer.borrow()
	}

	/// The number of callbacks this overlay has registered.
	pub fn listeners(&self) -> usize {
		self.video_listeners.len() + self.viewport_listeners.len()
	}

	fn attach(&mut self) {
		self.renderer.borrow_mut().resize(&self.video);

		// The video is held strongly: the listeners are removed before the overlay goes away.
		let resize = || {
			let renderer = Rc::downgrade(&self.renderer);
			let video = self.video.clone();
			move || {
				let Some(renderer) = renderer.upgrade() else { return };
				match renderer.try_borrow_mut() {
					Ok(mut renderer) => renderer.resize(&video),
					Err(_) => tracing::trace!("renderer in use, skipping resize"),
				};
			}
		};

		let update = {
			let renderer = Rc::downgrade(&self.renderer);
			let video = self.video.clone();
			move || {
				let Some(renderer) = renderer.upgrade() else { return };
				match renderer.try_borrow_mut() {
					Ok(mut renderer) => {
						renderer.draw(video.current_time());
					}
					Err(_) => tracing::trace!("renderer in use, skipping repaint"),
				};
			}
		};

		let viewport_listeners = vec![self.viewport.listen(EventKind::Resize, resize())];
		let video_listeners = vec![
			self.video.listen(EventKind::LoadedMetadata, resize()),
			self.video.listen(EventKind::TimeUpdate, update),
		];

		self.viewport_listeners = viewport_listeners;
		self.video_listeners = video_listeners;

		tracing::debug!(detections = self.renderer.borrow().detections().len(), "overlay attached");
	}

	fn detach(&mut self) {
		self.video_listeners.clear();
		self.viewport_listeners.clear();
		tracing::debug!("overlay detached");
	}
}

impl<S, V, W> Drop for Overlay<S, V, W>
where
	S: Surface + 'static,
	V: Playback + Listen + Clone + 'static,
	W: Listen,
{
	fn drop(&mut self) {
		self.detach();
	}
}

#[cfg(test)]
mod test {
	use std::cell::Cell;

	use super::*;
	use crate::event::Listener;
	use crate::overlay::{Canvas, Size};
	use crate::DetectionBox;

	fn setup() -> (Rc<HeadlessVideo>, Viewport) {
		let video = Rc::new(HeadlessVideo::new());
		video.layout(Size::new(800, 450));
		(video, Viewport::new())
	}

	fn detections() -> Detections {
		vec![DetectionBox::new(10.0, 10.0, 50.0, 50.0, 0.87).at(3.0)].into()
	}

	#[test]
	fn follows_playback() {
		let (video, viewport) = setup();
		let mut renderer = Renderer::new(Canvas::default());
		renderer.set_detections(detections());

		let overlay = Overlay::mount(renderer, video.clone(), viewport.clone());
		assert_eq!(overlay.renderer().surface().size(), Size::new(800, 450));
		assert!(overlay.renderer().surface().is_blank(), "nothing visible at 0s");

		video.seek(3.1);
		assert_eq!(
			overlay.renderer().surface().labels().collect::<Vec<_>>(),
			vec!["Accident 87.0%"]
		);

		video.seek(4.0);
		assert!(overlay.renderer().surface().is_blank());
	}

	#[test]
	fn resize_events() {
		let video = Rc::new(HeadlessVideo::new());
		let viewport = Viewport::new();

		let overlay = Overlay::mount(Renderer::new(Canvas::default()), video.clone(), viewport.clone());
		assert_eq!(overlay.renderer().surface().size(), Size::new(640, 360));

		video.load_metadata(Size::new(1280, 720));
		assert_eq!(overlay.renderer().surface().size(), Size::new(1280, 720));

		video.layout(Size::new(960, 540));
		assert_eq!(overlay.renderer().surface().size(), Size::new(1280, 720), "layout alone doesn't resize");

		viewport.resize();
		assert_eq!(overlay.renderer().surface().size(), Size::new(960, 540));
	}

	#[test]
	fn resize_repaints_current_time() {
		let (video, viewport) = setup();
		let mut renderer = Renderer::new(Canvas::default());
		renderer.set_detections(detections());

		let overlay = Overlay::mount(renderer, video.clone(), viewport.clone());
		video.seek(3.0);

		video.layout(Size::new(400, 225));
		viewport.resize();

		// Resizing a canvas wipes it, so the visible boxes must be drawn again.
		assert_eq!(overlay.renderer().surface().labels().count(), 1);
	}

	#[test]
	fn replace_detections() {
		let (video, viewport) = setup();
		let mut overlay = Overlay::mount(Renderer::new(Canvas::default()), video.clone(), viewport.clone());
		assert_eq!(overlay.listeners(), 3);

		video.seek(3.0);
		assert!(overlay.renderer().surface().is_blank());

		overlay.set_detections(detections());
		assert_eq!(overlay.renderer().surface().labels().count(), 1, "repainted on new input");

		// Never more than one mount's worth of listeners.
		assert_eq!(video.events.len(), 2);
		assert_eq!(viewport.events.len(), 1);

		overlay.set_detections(Detections::default());
		assert!(overlay.renderer().surface().is_blank());
		assert_eq!(video.events.len(), 2);
		assert_eq!(viewport.events.len(), 1);
	}

	#[test]
	fn same_list_is_noop() {
		let (video, viewport) = setup();
		let list = detections();

		let mut renderer = Renderer::new(Canvas::default());
		renderer.set_detections(list.clone());
		let mut overlay = Overlay::mount(renderer, video.clone(), viewport.clone());

		overlay.set_detections(list.clone());
		assert!(overlay.renderer().detections().is_clone(&list));
		assert_eq!(video.events.len(), 2);
	}

	#[test]
	fn unmount_detaches() {
		let (video, viewport) = setup();
		let overlay = Overlay::mount(Renderer::new(Canvas::default()), video.clone(), viewport.clone());
		assert_eq!(video.events.len(), 2);
		assert_eq!(viewport.events.len(), 1);

		drop(overlay);
		assert!(video.events.is_empty());
		assert!(viewport.events.is_empty());

		// Events after unmount have nobody to call.
		video.seek(3.0);
		viewport.resize();
	}

	#[test]
	fn held_renderer_skips_repaint() {
		let (video, viewport) = setup();
		let mut renderer = Renderer::new(Canvas::default());
		renderer.set_detections(detections());

		let overlay = Overlay::mount(renderer, video.clone(), viewport.clone());

		{
			let held = overlay.renderer();
			video.seek(3.0);
			video.load_metadata(Size::new(1280, 720));
			viewport.resize();
			assert!(held.surface().is_blank());
		}

		video.seek(3.1);
		assert_eq!(overlay.renderer().surface().labels().count(), 1);
	}

	// An element whose guards report their removal, like a DOM node would.
	#[derive(Clone, Default)]
	struct Element {
		video: Rc<HeadlessVideo>,
		removed: Rc<Cell<usize>>,
	}

	struct Guard {
		_listener: Listener,
		removed: Rc<Cell<usize>>,
	}

	impl Drop for Guard {
		fn drop(&mut self) {
			self.removed.set(self.removed.get() + 1);
		}
	}

	impl Playback for Element {
		fn current_time(&self) -> f64 {
			self.video.current_time()
		}

		fn client_size(&self) -> Size {
			self.video.client_size()
		}

		fn intrinsic_size(&self) -> Size {
			self.video.intrinsic_size()
		}
	}

	impl Listen for Element {
		type Listener = Guard;

		fn listen(&self, kind: EventKind, callback: impl Fn() + 'static) -> Guard {
			Guard {
				_listener: self.video.listen(kind, callback),
				removed: self.removed.clone(),
			}
		}
	}

	#[test]
	fn any_element() {
		let element = Element::default();
		let viewport = Viewport::new();

		let mut overlay = Overlay::mount(Renderer::new(Canvas::default()), element.clone(), viewport.clone());
		assert_eq!(overlay.listeners(), 3);

		overlay.set_detections(detections());
		assert_eq!(element.removed.get(), 2, "old guards dropped before attaching");
		assert_eq!(element.video.events.len(), 2);

		element.video.seek(3.0);
		assert_eq!(overlay.renderer().surface().labels().count(), 1);

		drop(overlay);
		assert_eq!(element.removed.get(), 4);
		assert!(element.video.events.is_empty());
		assert!(viewport.events.is_empty());
	}
}
