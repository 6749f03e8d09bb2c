use std::cell::RefCell;
use std::cmp::Ordering;
use std::rc::Rc;

use selwatch_primitives::{Direction, Offset};

use super::range::Bounds;
use super::tree::{Boundary, DOCUMENT_INDEX};
use super::{DomError, MemoryDocument, MemoryRange, NodeId};
use crate::host::NativeSelection;

/// The selection of a [`MemoryDocument`]: at most one range plus a direction.
#[derive(Debug, Clone)]
pub struct MemorySelection {
	document: MemoryDocument,
}

impl MemorySelection {
	pub(super) fn new(document: MemoryDocument) -> Self {
		Self { document }
	}

	fn bounds(&self) -> Option<Bounds> {
		let selection = self.document.inner.selection.borrow();
		selection.range.as_ref().map(|range| *range.borrow())
	}

	fn anchor_boundary(&self) -> Option<Boundary> {
		let bounds = self.bounds()?;
		Some(match self.direction() {
			Direction::Forward => bounds.start,
			Direction::Backward => bounds.end,
		})
	}

	fn focus_boundary(&self) -> Option<Boundary> {
		let bounds = self.bounds()?;
		Some(match self.direction() {
			Direction::Forward => bounds.end,
			Direction::Backward => bounds.start,
		})
	}

	/// True when both boundaries sit in the document's own tree.
	fn in_document(&self, a: Boundary, b: Boundary) -> bool {
		let tree = self.document.inner.tree.borrow();
		tree.root(a.node) == DOCUMENT_INDEX && tree.root(b.node) == DOCUMENT_INDEX
	}

	/// Direction of the current selection. Forward when there is none.
	pub fn direction(&self) -> Direction {
		self.document.inner.selection.borrow().direction
	}

	/// Replaces the selection with one running from anchor to focus, as a user drag would.
	///
	/// Points outside the document tree leave the selection untouched.
	pub fn set_base_and_extent(
		&self,
		anchor: NodeId,
		anchor_offset: Offset,
		focus: NodeId,
		focus_offset: Offset,
	) -> Result<(), DomError> {
		let anchor = self.document.boundary(anchor, anchor_offset)?;
		let focus = self.document.boundary(focus, focus_offset)?;
		if !self.in_document(anchor, focus) {
			tracing::trace!("selection endpoints outside the document; ignored");
			return Ok(());
		}
		let (bounds, direction) = match self.document.compare(anchor, focus) {
			Some(Ordering::Greater) => (Bounds { start: focus, end: anchor }, Direction::Backward),
			_ => (Bounds { start: anchor, end: focus }, Direction::Forward),
		};
		{
			let mut selection = self.document.inner.selection.borrow_mut();
			selection.range = Some(Rc::new(RefCell::new(bounds)));
			selection.direction = direction;
		}
		self.document.queue_selection_change();
		Ok(())
	}

	/// Replaces the selection with a caret at `node`/`offset`.
	pub fn collapse(&self, node: NodeId, offset: Offset) -> Result<(), DomError> {
		self.set_base_and_extent(node, offset, node, offset)
	}
}

impl NativeSelection for MemorySelection {
	type Node = NodeId;
	type Range = MemoryRange;
	type Error = DomError;

	fn is_collapsed(&self) -> bool {
		self.bounds().is_none_or(|bounds| bounds.start == bounds.end)
	}

	fn range_count(&self) -> u32 {
		u32::from(self.document.inner.selection.borrow().range.is_some())
	}

	fn anchor_node(&self) -> Option<NodeId> {
		self.anchor_boundary().map(|b| self.document.node_id(b.node))
	}

	fn anchor_offset(&self) -> Offset {
		self.anchor_boundary().map_or(0, |b| b.offset)
	}

	fn focus_node(&self) -> Option<NodeId> {
		self.focus_boundary().map(|b| self.document.node_id(b.node))
	}

	fn focus_offset(&self) -> Offset {
		self.focus_boundary().map_or(0, |b| b.offset)
	}

	fn range_at(&self, index: u32) -> Result<MemoryRange, DomError> {
		let selection = self.document.inner.selection.borrow();
		match (&selection.range, index) {
			(Some(range), 0) => Ok(MemoryRange::from_shared(self.document.clone(), Rc::clone(range))),
			_ => Err(DomError::RangeIndex {
				index,
				count: u32::from(selection.range.is_some()),
			}),
		}
	}

	fn remove_all_ranges(&self) -> Result<(), DomError> {
		let removed = self.document.inner.selection.borrow_mut().range.take();
		if removed.is_some() {
			self.document.queue_selection_change();
		}
		Ok(())
	}

	/// Adds `range` unless the selection already holds one; extra ranges are
	/// ignored, as in browsers that support a single range. Ranges with a boundary
	/// in a detached subtree are ignored too.
	fn add_range(&self, range: &MemoryRange) -> Result<(), DomError> {
		if !range.document().ptr_eq(&self.document) {
			tracing::trace!("range from another document; ignored");
			return Ok(());
		}
		let bounds = *range.shared().borrow();
		if !self.in_document(bounds.start, bounds.end) {
			tracing::trace!("range outside the document tree; ignored");
			return Ok(());
		}
		{
			let mut selection = self.document.inner.selection.borrow_mut();
			if selection.range.is_some() {
				tracing::trace!("selection already has a range; ignored");
				return Ok(());
			}
			selection.range = Some(Rc::clone(range.shared()));
			selection.direction = Direction::Forward;
		}
		self.document.queue_selection_change();
		Ok(())
	}
}
