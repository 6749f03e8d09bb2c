use std::cell::RefCell;
use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use selwatch_primitives::{Offset, Point};

use super::tree::Boundary;
use super::{DomError, MemoryDocument, NodeId};
use crate::host::NativeRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Bounds {
	pub start: Boundary,
	pub end: Boundary,
}

impl Bounds {
	pub fn collapsed(at: Boundary) -> Self {
		Self { start: at, end: at }
	}
}

/// A live range over a [`MemoryDocument`].
///
/// Clones share the same boundaries: moving one moves all of them, and moving the
/// range that is currently selected queues a `selectionchange`.
#[derive(Clone)]
pub struct MemoryRange {
	document: MemoryDocument,
	bounds: Rc<RefCell<Bounds>>,
}

impl fmt::Debug for MemoryRange {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let bounds = self.bounds.borrow();
		f.debug_struct("MemoryRange")
			.field("start", &self.document.point(bounds.start))
			.field("end", &self.document.point(bounds.end))
			.finish()
	}
}

/// Two ranges are equal when they are the same live range.
impl PartialEq for MemoryRange {
	fn eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.bounds, &other.bounds)
	}
}

impl MemoryRange {
	pub(super) fn new(document: MemoryDocument, bounds: Bounds) -> Self {
		Self::from_shared(document, Rc::new(RefCell::new(bounds)))
	}

	pub(super) fn from_shared(document: MemoryDocument, bounds: Rc<RefCell<Bounds>>) -> Self {
		Self { document, bounds }
	}

	pub(super) fn document(&self) -> &MemoryDocument {
		&self.document
	}

	pub(super) fn shared(&self) -> &Rc<RefCell<Bounds>> {
		&self.bounds
	}
}

impl NativeRange for MemoryRange {
	type Node = NodeId;
	type Error = DomError;

	fn set_start(&self, node: &NodeId, offset: Offset) -> Result<(), DomError> {
		let point = self.document.boundary(*node, offset)?;
		{
			let mut bounds = self.bounds.borrow_mut();
			match self.document.compare(point, bounds.end) {
				Some(Ordering::Less | Ordering::Equal) => bounds.start = point,
				Some(Ordering::Greater) | None => *bounds = Bounds::collapsed(point),
			}
		}
		self.document.range_mutated(&self.bounds);
		Ok(())
	}

	fn set_end(&self, node: &NodeId, offset: Offset) -> Result<(), DomError> {
		let point = self.document.boundary(*node, offset)?;
		{
			let mut bounds = self.bounds.borrow_mut();
			match self.document.compare(point, bounds.start) {
				Some(Ordering::Greater | Ordering::Equal) => bounds.end = point,
				Some(Ordering::Less) | None => *bounds = Bounds::collapsed(point),
			}
		}
		self.document.range_mutated(&self.bounds);
		Ok(())
	}

	fn start(&self) -> Result<Point<NodeId>, DomError> {
		Ok(self.document.point(self.bounds.borrow().start))
	}

	fn end(&self) -> Result<Point<NodeId>, DomError> {
		Ok(self.document.point(self.bounds.borrow().end))
	}

	fn collapsed(&self) -> bool {
		let bounds = self.bounds.borrow();
		bounds.start == bounds.end
	}
}
