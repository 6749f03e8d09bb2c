use std::fmt;
use std::rc::Rc;

use crate::host::Handler;

/// Token identifying one registered listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

struct Entry {
	id: ListenerId,
	event: String,
	handler: Handler,
}

/// Listener table plus the queue of events awaiting delivery.
#[derive(Default)]
pub(super) struct Registry {
	next_id: u64,
	listeners: Vec<Entry>,
	pending: Vec<String>,
}

impl fmt::Debug for Registry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Registry")
			.field("listeners", &self.listeners.len())
			.field("pending", &self.pending)
			.finish()
	}
}

impl Registry {
	/// Registers `handler`. Registering the same handler twice for one event
	/// returns the existing token, as `addEventListener` does.
	pub fn add(&mut self, event: &str, handler: Handler) -> ListenerId {
		if let Some(entry) = self
			.listeners
			.iter()
			.find(|entry| entry.event == event && std::ptr::addr_eq(Rc::as_ptr(&entry.handler), Rc::as_ptr(&handler)))
		{
			return entry.id;
		}
		self.next_id += 1;
		let id = ListenerId(self.next_id);
		self.listeners.push(Entry {
			id,
			event: event.to_owned(),
			handler,
		});
		id
	}

	/// Returns true if a listener was removed.
	pub fn remove(&mut self, event: &str, id: ListenerId) -> bool {
		let before = self.listeners.len();
		self.listeners.retain(|entry| !(entry.id == id && entry.event == event));
		self.listeners.len() != before
	}

	pub fn count(&self, event: &str) -> usize {
		self.listeners.iter().filter(|entry| entry.event == event).count()
	}

	/// Snapshot of the handlers for `event`, so they can run without the table borrowed.
	pub fn handlers(&self, event: &str) -> Vec<Handler> {
		self.listeners
			.iter()
			.filter(|entry| entry.event == event)
			.map(|entry| Rc::clone(&entry.handler))
			.collect()
	}

	/// Queues `event` unless it is already pending.
	pub fn queue(&mut self, event: &str) {
		if !self.pending.iter().any(|pending| pending == event) {
			self.pending.push(event.to_owned());
		}
	}

	pub fn is_pending(&self, event: &str) -> bool {
		self.pending.iter().any(|pending| pending == event)
	}

	pub fn take_pending(&mut self) -> Vec<String> {
		std::mem::take(&mut self.pending)
	}
}
