//! Listener registration with guaranteed removal.
//!
//! An [`EventTarget`] is the host-agnostic counterpart of a DOM event target: callbacks
//! are registered per [`EventKind`] and run synchronously on [`EventTarget::dispatch`].
//! Registering returns a [`Listener`] guard and dropping the guard removes the callback,
//! so teardown happens the same way whether it is triggered by an unmount, a new input,
//! or the owner simply going out of scope.
use std::cell::RefCell;
use std::rc::{Rc, Weak};

use derive_more::Display;

/// The events the overlay reacts to, named as the DOM names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum EventKind {
	/// The viewport changed size.
	#[display("resize")]
	Resize,

	/// The video's intrinsic dimensions and duration are now known.
	#[display("loadedmetadata")]
	LoadedMetadata,

	/// The video's playback position changed.
	#[display("timeupdate")]
	TimeUpdate,
}

type Callback = Rc<dyn Fn()>;

struct Entry {
	id: u64,
	kind: EventKind,
	callback: Callback,
}

#[derive(Default)]
struct Registry {
	next: u64,
	entries: Vec<Entry>,
}

/// A set of listeners, shared by every clone of the target.
///
/// This is single-threaded by design: dispatch runs every callback to completion
/// before returning, so there is never more than one repaint in flight.
#[derive(Clone, Default)]
pub struct EventTarget {
	registry: Rc<RefCell<Registry>>,
}

impl EventTarget {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a callback, returning a guard that removes it when dropped.
	#[must_use = "the listener is removed as soon as the guard is dropped"]
	pub fn listen(&self, kind: EventKind, callback: impl Fn() + 'static) -> Listener {
		let mut registry = self.registry.borrow_mut();
		let id = registry.next;
		registry.next += 1;

		registry.entries.push(Entry {
			id,
			kind,
			callback: Rc::new(callback),
		});

		tracing::trace!(%kind, id, "listener added");

		Listener {
			registry: Rc::downgrade(&self.registry),
			id,
			kind,
		}
	}

	/// Run every callback registered for this event, in registration order.
	///
	/// Callbacks may add or remove listeners. A listener removed during dispatch does not
	/// run if it hasn't already, and a listener added during dispatch waits for the next one.
	/// Returns the number of callbacks that ran.
	pub fn dispatch(&self, kind: EventKind) -> usize {
		// Snapshot first so callbacks can borrow the registry.
		let pending: Vec<(u64, Callback)> = self
			.registry
			.borrow()
			.entries
			.iter()
			.filter(|entry| entry.kind == kind)
			.map(|entry| (entry.id, entry.callback.clone()))
			.collect();

		let mut count = 0;
		for (id, callback) in pending {
			let registered = self.registry.borrow().entries.iter().any(|entry| entry.id == id);
			if !registered {
				continue;
			}

			callback();
			count += 1;
		}

		count
	}

	/// The number of callbacks registered for this event.
	pub fn listeners(&self, kind: EventKind) -> usize {
		self.registry
			.borrow()
			.entries
			.iter()
			.filter(|entry| entry.kind == kind)
			.count()
	}

	/// The number of callbacks registered for any event.
	pub fn len(&self) -> usize {
		self.registry.borrow().entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Check if this is the exact same target, not just one with the same listeners.
	pub fn is_clone(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.registry, &other.registry)
	}
}

/// Anything that fires [`EventKind`]s: an [`EventTarget`], a headless video, or a DOM element.
///
/// Each registration returns a guard, and dropping the guard must remove the callback.
pub trait Listen {
	type Listener: 'static;

	fn listen(&self, kind: EventKind, callback: impl Fn() + 'static) -> Self::Listener;
}

impl Listen for EventTarget {
	type Listener = Listener;

	fn listen(&self, kind: EventKind, callback: impl Fn() + 'static) -> Listener {
		EventTarget::listen(self, kind, callback)
	}
}

impl<L: Listen + ?Sized> Listen for Rc<L> {
	type Listener = L::Listener;

	fn listen(&self, kind: EventKind, callback: impl Fn() + 'static) -> Self::Listener {
		(**self).listen(kind, callback)
	}
}

/// A registered callback; dropping it removes the callback from its target.
///
/// The guard only holds a weak reference, so it never keeps a target alive.
pub struct Listener {
	registry: Weak<RefCell<Registry>>,
	id: u64,
	kind: EventKind,
}

impl Listener {
	pub fn kind(&self) -> EventKind {
		self.kind
	}
}

impl Drop for Listener {
	fn drop(&mut self) {
		let Some(registry) = self.registry.upgrade() else {
			return;
		};

		registry.borrow_mut().entries.retain(|entry| entry.id != self.id);
		tracing::trace!(kind = %self.kind, id = self.id, "listener removed");
	}
}

#[cfg(test)]
mod test {
	use super::*;
	use std::cell::Cell;

	#[test]
	fn dispatch_by_kind() {
		let target = EventTarget::new();
		let resized = Rc::new(Cell::new(0));
		let updated = Rc::new(Cell::new(0));

		let _a = target.listen(EventKind::Resize, {
			let resized = resized.clone();
			move || resized.set(resized.get() + 1)
		});
		let _b = target.listen(EventKind::TimeUpdate, {
			let updated = updated.clone();
			move || updated.set(updated.get() + 1)
		});

		assert_eq!(target.dispatch(EventKind::Resize), 1);
		assert_eq!(target.dispatch(EventKind::Resize), 1);
		assert_eq!(target.dispatch(EventKind::LoadedMetadata), 0);

		assert_eq!(resized.get(), 2);
		assert_eq!(updated.get(), 0);
	}

	#[test]
	fn drop_removes() {
		let target = EventTarget::new();
		let count = Rc::new(Cell::new(0));

		let a = target.listen(EventKind::TimeUpdate, {
			let count = count.clone();
			move || count.set(count.get() + 1)
		});
		let b = target.listen(EventKind::TimeUpdate, {
			let count = count.clone();
			move || count.set(count.get() + 10)
		});
		assert_eq!(target.len(), 2);

		drop(a);
		assert_eq!(target.listeners(EventKind::TimeUpdate), 1);

		target.dispatch(EventKind::TimeUpdate);
		assert_eq!(count.get(), 10, "only the remaining listener should run");

		drop(b);
		assert!(target.is_empty());
	}

	#[test]
	fn order() {
		let target = EventTarget::new();
		let seen = Rc::new(RefCell::new(Vec::new()));

		let _listeners: Vec<Listener> = (0..3)
			.map(|i| {
				let seen = seen.clone();
				target.listen(EventKind::Resize, move || seen.borrow_mut().push(i))
			})
			.collect();

		target.dispatch(EventKind::Resize);
		assert_eq!(*seen.borrow(), vec![0, 1, 2]);
	}

	#[test]
	fn remove_during_dispatch() {
		let target = EventTarget::new();
		let count = Rc::new(Cell::new(0));

		// The first listener drops the second before it gets a chance to run.
		let second: Rc<RefCell<Option<Listener>>> = Default::default();
		let _first = target.listen(EventKind::TimeUpdate, {
			let second = second.clone();
			move || {
				second.borrow_mut().take();
			}
		});
		*second.borrow_mut() = Some(target.listen(EventKind::TimeUpdate, {
			let count = count.clone();
			move || count.set(count.get() + 1)
		}));

		assert_eq!(target.dispatch(EventKind::TimeUpdate), 1);
		assert_eq!(count.get(), 0);
		assert_eq!(target.len(), 1);
	}

	#[test]
	fn add_during_dispatch() {
		let target = EventTarget::new();
		let added: Rc<RefCell<Vec<Listener>>> = Default::default();

		let _first = target.listen(EventKind::Resize, {
			let target = target.clone();
			let added = added.clone();
			move || added.borrow_mut().push(target.listen(EventKind::Resize, || {}))
		});

		assert_eq!(target.dispatch(EventKind::Resize), 1, "new listeners wait for the next dispatch");
		assert_eq!(target.dispatch(EventKind::Resize), 2);
		assert_eq!(target.len(), 3);
	}

	#[test]
	fn outlives_target() {
		let target = EventTarget::new();
		let listener = target.listen(EventKind::Resize, || {});
		assert!(target.is_clone(&target.clone()));

		drop(target);
		assert_eq!(listener.kind(), EventKind::Resize);

		// Dropping the guard after the target is gone is a no-op.
		drop(listener);
	}
}
