use smallvec::{SmallVec, smallvec};


/// An offset into a node, in the host's units (child index or UTF-16 code unit).
pub type Offset = u32;

/// Relative document order of a selection's anchor and focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
	/// Focus is at or after the anchor.
	Forward,
	/// Focus is before the anchor (the user dragged backwards).
	Backward,
}

/// A boundary point: a node plus an offset into it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Point<N> {
	/// The container node.
	pub node: N,
	/// Offset within `node`.
	pub offset: Offset,
}

impl<N> Point<N> {
	/// Creates a point at `offset` within `node`.
	pub fn new(node: N, offset: Offset) -> Self {
		Self { node, offset }
	}

	/// Applies a function to the node, keeping the offset.
	pub fn map<M>(self, f: impl FnOnce(N) -> M) -> Point<M> {
		Point {
			node: f(self.node),
			offset: self.offset,
		}
	}
}

impl<N> From<(N, Offset)> for Point<N> {
	fn from((node, offset): (N, Offset)) -> Self {
		Self::new(node, offset)
	}
}

/// The ordered (node, offset) pairs of a selection.
///
/// Holds nothing when there is no selection, only the anchor when the selection is
/// collapsed, and the anchor followed by the focus otherwise. The anchor always
/// comes first, regardless of document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionPoints<N> {
	points: SmallVec<[Point<N>; 2]>,
}

impl<N> SelectionPoints<N> {
	/// No selection.
	pub fn empty() -> Self {
		Self { points: SmallVec::new() }
	}

	/// A caret at `anchor`.
	pub fn collapsed(anchor: Point<N>) -> Self {
		Self { points: smallvec![anchor] }
	}

	/// A selection extending from `anchor` to `focus`.
	pub fn extended(anchor: Point<N>, focus: Point<N>) -> Self {
		Self {
			points: smallvec![anchor, focus],
		}
	}

	/// Returns the anchor point, if any.
	pub fn anchor(&self) -> Option<&Point<N>> {
		self.points.first()
	}

	/// Returns the focus point.
	///
	/// For a collapsed selection this is the anchor.
	pub fn focus(&self) -> Option<&Point<N>> {
		self.points.last()
	}

	/// Returns true if there is exactly one point.
	pub fn is_collapsed(&self) -> bool {
		self.points.len() == 1
	}

	/// Returns true if there is no selection at all.
	pub fn is_empty(&self) -> bool {
		self.points.is_empty()
	}

	/// Number of points: 0, 1 or 2.
	pub fn len(&self) -> usize {
		self.points.len()
	}

	/// Iterates the points in anchor, focus order.
	pub fn iter(&self) -> impl Iterator<Item = &Point<N>> {
		self.points.iter()
	}
}

impl<N> Default for SelectionPoints<N> {
	fn default() -> Self {
		Self::empty()
	}
}

impl<N> IntoIterator for SelectionPoints<N> {
	type Item = Point<N>;
	type IntoIter = smallvec::IntoIter<[Point<N>; 2]>;

	fn into_iter(self) -> Self::IntoIter {
		self.points.into_iter()
	}
}

impl<'a, N> IntoIterator for &'a SelectionPoints<N> {
	type Item = &'a Point<N>;
	type IntoIter = std::slice::Iter<'a, Point<N>>;

	fn into_iter(self) -> Self::IntoIter {
		self.points.iter()
	}
}
