use selwatch_primitives::Offset;
use thiserror::Error;

use super::NodeId;

/// Exceptions raised by [`MemoryDocument`](super::MemoryDocument) operations.
///
/// Variants mirror the DOM exceptions a browser raises for the same misuse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
	/// A boundary offset is past the end of its node.
	#[error("offset {offset} is greater than node length {length}")]
	IndexSize {
		/// Requested offset.
		offset: Offset,
		/// Length of the node.
		length: u32,
	},

	/// A range index is out of bounds for the selection.
	#[error("range index {index} is out of bounds for {count} range(s)")]
	RangeIndex {
		/// Requested index.
		index: u32,
		/// Number of ranges in the selection.
		count: u32,
	},

	/// A node handle belongs to a different document.
	#[error("node {0} belongs to another document")]
	WrongDocument(NodeId),

	/// A node handle does not refer to any node.
	#[error("node {0} does not exist")]
	NotFound(NodeId),

	/// An insertion would produce an invalid tree.
	#[error("cannot insert node {child} into node {parent}")]
	HierarchyRequest {
		/// Intended parent.
		parent: NodeId,
		/// Node being inserted.
		child: NodeId,
	},
}
