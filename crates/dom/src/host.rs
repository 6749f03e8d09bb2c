use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use selwatch_primitives::{Offset, Point};

/// Event a document fires after its selection changes.
pub const SELECTION_CHANGE: &str = "selectionchange";

/// Callback registered for a document event.
pub type Handler = Rc<dyn Fn()>;

/// A document-like object that owns a selection and delivers change events.
///
/// Implementors are cheap handles: cloning or holding one never owns the document's
/// content.
pub trait SelectionHost {
	/// Node handle.
	type Node: Clone + PartialEq + fmt::Debug;
	/// Range handle.
	type Range: NativeRange<Node = Self::Node, Error = Self::Error> + Clone + fmt::Debug;
	/// Selection handle.
	type Selection: NativeSelection<Node = Self::Node, Range = Self::Range, Error = Self::Error>;
	/// Registration token returned by [`SelectionHost::add_listener`].
	type Listener;
	/// Exception raised by the host API.
	type Error: std::error::Error + 'static;

	/// Returns the document's selection, if it has one.
	fn selection(&self) -> Result<Option<Self::Selection>, Self::Error>;

	/// Creates a new range collapsed at the start of the document.
	fn create_range(&self) -> Result<Self::Range, Self::Error>;

	/// Registers `handler` for `event`.
	fn add_listener(&self, event: &str, handler: Handler) -> Result<Self::Listener, Self::Error>;

	/// Unregisters a listener. Removing a listener that is no longer attached is not an error.
	fn remove_listener(&self, event: &str, listener: &Self::Listener) -> Result<(), Self::Error>;

	/// Compares two boundary points in document order.
	///
	/// Returns `None` when the host cannot order them (different trees, or no support).
	fn compare_points(&self, _a: &Point<Self::Node>, _b: &Point<Self::Node>) -> Option<Ordering> {
		None
	}
}

/// A selection-like object.
pub trait NativeSelection {
	/// Node handle.
	type Node;
	/// Range handle.
	type Range;
	/// Exception raised by the host API.
	type Error;

	/// True when anchor and focus coincide, or there is no range.
	fn is_collapsed(&self) -> bool;
	/// Number of ranges in the selection.
	fn range_count(&self) -> u32;
	/// Node the selection started in.
	fn anchor_node(&self) -> Option<Self::Node>;
	/// Offset of the anchor within its node.
	fn anchor_offset(&self) -> Offset;
	/// Node the selection currently extends to.
	fn focus_node(&self) -> Option<Self::Node>;
	/// Offset of the focus within its node.
	fn focus_offset(&self) -> Offset;
	/// Returns the range at `index`.
	fn range_at(&self, index: u32) -> Result<Self::Range, Self::Error>;
	/// Removes every range.
	fn remove_all_ranges(&self) -> Result<(), Self::Error>;
	/// Adds `range` to the selection.
	fn add_range(&self, range: &Self::Range) -> Result<(), Self::Error>;

	/// Anchor node and offset together.
	fn anchor(&self) -> Option<Point<Self::Node>> {
		self.anchor_node().map(|node| Point::new(node, self.anchor_offset()))
	}

	/// Focus node and offset together.
	fn focus(&self) -> Option<Point<Self::Node>> {
		self.focus_node().map(|node| Point::new(node, self.focus_offset()))
	}
}

/// A range-like object.
pub trait NativeRange {
	/// Node handle.
	type Node;
	/// Exception raised by the host API.
	type Error;

	/// Moves the start boundary.
	fn set_start(&self, node: &Self::Node, offset: Offset) -> Result<(), Self::Error>;
	/// Moves the end boundary.
	fn set_end(&self, node: &Self::Node, offset: Offset) -> Result<(), Self::Error>;
	/// Start boundary.
	fn start(&self) -> Result<Point<Self::Node>, Self::Error>;
	/// End boundary.
	fn end(&self) -> Result<Point<Self::Node>, Self::Error>;
	/// True when start equals end.
	fn collapsed(&self) -> bool;
}
