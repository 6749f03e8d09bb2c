use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicU32, Ordering as AtomicOrdering};

use selwatch_primitives::{Direction, Point};

use crate::host::{Handler, SELECTION_CHANGE, SelectionHost};

mod error;
mod events;
mod range;
mod selection;
mod tree;

#[cfg(test)]
mod tests;

pub use error::DomError;
pub use events::ListenerId;
pub use range::MemoryRange;
pub use selection::MemorySelection;
use events::Registry;
use range::Bounds;
use tree::{Boundary, DOCUMENT_INDEX, NodeKind, Tree};

static NEXT_DOCUMENT: AtomicU32 = AtomicU32::new(1);

/// Handle to a node of a [`MemoryDocument`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
	document: u32,
	index: u32,
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}", self.document, self.index)
	}
}

struct SelectionData {
	range: Option<Rc<RefCell<Bounds>>>,
	direction: Direction,
}

struct Inner {
	id: u32,
	tree: RefCell<Tree>,
	selection: RefCell<SelectionData>,
	events: RefCell<Registry>,
}

/// An in-memory document: a node tree, one selection, and an event queue.
///
/// Cloning yields another handle to the same document. Selection mutations queue
/// a `selectionchange` event the way a browser schedules one; [`MemoryDocument::flush_events`]
/// plays the part of the event loop and delivers everything queued.
#[derive(Clone)]
pub struct MemoryDocument {
	inner: Rc<Inner>,
}

impl fmt::Debug for MemoryDocument {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MemoryDocument")
			.field("id", &self.inner.id)
			.field("nodes", &self.inner.tree.borrow().len())
			.field("events", &*self.inner.events.borrow())
			.finish()
	}
}

impl Default for MemoryDocument {
	fn default() -> Self {
		Self::new()
	}
}

impl MemoryDocument {
	/// Creates an empty document.
	pub fn new() -> Self {
		Self {
			inner: Rc::new(Inner {
				id: NEXT_DOCUMENT.fetch_add(1, AtomicOrdering::Relaxed),
				tree: RefCell::new(Tree::new()),
				selection: RefCell::new(SelectionData {
					range: None,
					direction: Direction::Forward,
				}),
				events: RefCell::new(Registry::default()),
			}),
		}
	}

	/// Returns true if both handles refer to the same document.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}

	/// The document node.
	pub fn root(&self) -> NodeId {
		self.node_id(DOCUMENT_INDEX)
	}

	/// Creates a detached element.
	pub fn create_element(&self, tag: &str) -> NodeId {
		let index = self.inner.tree.borrow_mut().push(NodeKind::Element(tag.to_owned()));
		self.node_id(index)
	}

	/// Creates a detached text node.
	pub fn create_text(&self, data: &str) -> NodeId {
		let index = self.inner.tree.borrow_mut().push(NodeKind::Text(data.to_owned()));
		self.node_id(index)
	}

	/// Appends `child` to `parent`, moving it out of any previous parent.
	///
	/// Live ranges are not adjusted for the move.
	pub fn append_child(&self, parent: NodeId, child: NodeId) -> Result<NodeId, DomError> {
		let parent_index = self.resolve(parent)?;
		let child_index = self.resolve(child)?;
		let mut tree = self.inner.tree.borrow_mut();
		if !tree.can_contain(parent_index) || tree.is_inclusive_ancestor(child_index, parent_index) {
			return Err(DomError::HierarchyRequest { parent, child });
		}
		tree.append(parent_index, child_index);
		Ok(child)
	}

	/// DOM length of `node`: child count, or UTF-16 length for text.
	pub fn node_length(&self, node: NodeId) -> Result<u32, DomError> {
		let index = self.resolve(node)?;
		Ok(self.inner.tree.borrow().length(index))
	}

	/// Text data of `node`, or `None` for non-text nodes.
	pub fn text(&self, node: NodeId) -> Result<Option<String>, DomError> {
		let index = self.resolve(node)?;
		Ok(match &self.inner.tree.borrow().get(index).kind {
			NodeKind::Text(data) => Some(data.clone()),
			NodeKind::Document | NodeKind::Element(_) => None,
		})
	}

	/// Tag name of an element node.
	pub fn tag(&self, node: NodeId) -> Result<Option<String>, DomError> {
		let index = self.resolve(node)?;
		Ok(match &self.inner.tree.borrow().get(index).kind {
			NodeKind::Element(tag) => Some(tag.clone()),
			NodeKind::Document | NodeKind::Text(_) => None,
		})
	}

	/// Parent of `node`.
	pub fn parent(&self, node: NodeId) -> Result<Option<NodeId>, DomError> {
		let index = self.resolve(node)?;
		Ok(self.inner.tree.borrow().get(index).parent.map(|parent| self.node_id(parent)))
	}

	/// The document's selection.
	pub fn get_selection(&self) -> MemorySelection {
		MemorySelection::new(self.clone())
	}

	/// A new range collapsed at the start of the document.
	pub fn create_range(&self) -> MemoryRange {
		let origin = Boundary {
			node: DOCUMENT_INDEX,
			offset: 0,
		};
		MemoryRange::new(self.clone(), Bounds::collapsed(origin))
	}

	/// Number of listeners registered for `event`.
	pub fn listener_count(&self, event: &str) -> usize {
		self.inner.events.borrow().count(event)
	}

	/// True if `event` is queued and not yet delivered.
	pub fn is_pending(&self, event: &str) -> bool {
		self.inner.events.borrow().is_pending(event)
	}

	/// Delivers every queued event. Returns the number of handler invocations.
	pub fn flush_events(&self) -> usize {
		let pending = self.inner.events.borrow_mut().take_pending();
		pending.iter().map(|event| self.dispatch(event)).sum()
	}

	/// Fires `event` immediately. Returns the number of handler invocations.
	pub fn dispatch(&self, event: &str) -> usize {
		let handlers = self.inner.events.borrow().handlers(event);
		tracing::trace!(document = self.inner.id, event, listeners = handlers.len(), "dispatching event");
		for handler in &handlers {
			handler();
		}
		handlers.len()
	}

	fn node_id(&self, index: u32) -> NodeId {
		NodeId {
			document: self.inner.id,
			index,
		}
	}

	fn resolve(&self, node: NodeId) -> Result<u32, DomError> {
		if node.document != self.inner.id {
			return Err(DomError::WrongDocument(node));
		}
		if !self.inner.tree.borrow().contains(node.index) {
			return Err(DomError::NotFound(node));
		}
		Ok(node.index)
	}

	/// Resolves `node` and checks `offset` against its length.
	fn boundary(&self, node: NodeId, offset: u32) -> Result<Boundary, DomError> {
		let index = self.resolve(node)?;
		let length = self.inner.tree.borrow().length(index);
		if offset > length {
			return Err(DomError::IndexSize { offset, length });
		}
		Ok(Boundary { node: index, offset })
	}

	fn point(&self, boundary: Boundary) -> Point<NodeId> {
		Point::new(self.node_id(boundary.node), boundary.offset)
	}

	fn compare(&self, a: Boundary, b: Boundary) -> Option<Ordering> {
		self.inner.tree.borrow().compare(a, b)
	}

	fn queue_selection_change(&self) {
		self.inner.events.borrow_mut().queue(SELECTION_CHANGE);
	}

	/// Called after a live range moved; queues a change if it is the selection's range.
	fn range_mutated(&self, bounds: &Rc<RefCell<Bounds>>) {
		let selected = self
			.inner
			.selection
			.borrow()
			.range
			.as_ref()
			.is_some_and(|range| Rc::ptr_eq(range, bounds));
		if selected {
			self.queue_selection_change();
		}
	}
}

impl SelectionHost for MemoryDocument {
	type Node = NodeId;
	type Range = MemoryRange;
	type Selection = MemorySelection;
	type Listener = ListenerId;
	type Error = DomError;

	fn selection(&self) -> Result<Option<MemorySelection>, DomError> {
		Ok(Some(self.get_selection()))
	}

	fn create_range(&self) -> Result<MemoryRange, DomError> {
		Ok(MemoryDocument::create_range(self))
	}

	fn add_listener(&self, event: &str, handler: Handler) -> Result<ListenerId, DomError> {
		let id = self.inner.events.borrow_mut().add(event, handler);
		tracing::trace!(document = self.inner.id, event, ?id, "listener added");
		Ok(id)
	}

	fn remove_listener(&self, event: &str, listener: &ListenerId) -> Result<(), DomError> {
		let removed = self.inner.events.borrow_mut().remove(event, *listener);
		tracing::trace!(document = self.inner.id, event, id = ?listener, removed, "listener removed");
		Ok(())
	}

	fn compare_points(&self, a: &Point<NodeId>, b: &Point<NodeId>) -> Option<Ordering> {
		let a = self.boundary(a.node, a.offset).ok()?;
		let b = self.boundary(b.node, b.offset).ok()?;
		self.compare(a, b)
	}
}
