use std::cmp::Ordering;

use selwatch_primitives::Offset;

/// A boundary point expressed as a tree index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Boundary {
	pub node: u32,
	pub offset: Offset,
}

#[derive(Debug)]
pub(super) enum NodeKind {
	Document,
	Element(String),
	Text(String),
}

#[derive(Debug)]
pub(super) struct NodeData {
	pub kind: NodeKind,
	pub parent: Option<u32>,
	pub children: Vec<u32>,
}

/// Arena of nodes. Index 0 is the document node.
#[derive(Debug)]
pub(super) struct Tree {
	nodes: Vec<NodeData>,
}

pub(super) const DOCUMENT_INDEX: u32 = 0;

impl Tree {
	pub fn new() -> Self {
		let mut tree = Self { nodes: Vec::new() };
		tree.push(NodeKind::Document);
		tree
	}

	pub fn push(&mut self, kind: NodeKind) -> u32 {
		let index = self.nodes.len() as u32;
		self.nodes.push(NodeData {
			kind,
			parent: None,
			children: Vec::new(),
		});
		index
	}

	pub fn contains(&self, index: u32) -> bool {
		(index as usize) < self.nodes.len()
	}

	pub fn get(&self, index: u32) -> &NodeData {
		&self.nodes[index as usize]
	}

	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// DOM node length: child count for containers, UTF-16 code units for text.
	pub fn length(&self, index: u32) -> u32 {
		let node = self.get(index);
		match &node.kind {
			NodeKind::Document | NodeKind::Element(_) => node.children.len() as u32,
			NodeKind::Text(data) => data.encode_utf16().count() as u32,
		}
	}

	pub fn can_contain(&self, index: u32) -> bool {
		!matches!(self.get(index).kind, NodeKind::Text(_))
	}

	pub fn is_inclusive_ancestor(&self, ancestor: u32, mut node: u32) -> bool {
		loop {
			if node == ancestor {
				return true;
			}
			match self.get(node).parent {
				Some(parent) => node = parent,
				None => return false,
			}
		}
	}

	pub fn root(&self, mut node: u32) -> u32 {
		while let Some(parent) = self.get(node).parent {
			node = parent;
		}
		node
	}

	/// Moves `child` to the end of `parent`'s children. Callers validate the hierarchy.
	pub fn append(&mut self, parent: u32, child: u32) {
		if let Some(old) = self.nodes[child as usize].parent.take() {
			self.nodes[old as usize].children.retain(|&c| c != child);
		}
		self.nodes[child as usize].parent = Some(parent);
		self.nodes[parent as usize].children.push(child);
	}

	/// Child-index path from the root down to `node`, plus the root itself.
	fn path(&self, mut node: u32) -> (u32, Vec<u32>) {
		let mut path = Vec::new();
		while let Some(parent) = self.get(node).parent {
			let position = self
				.get(parent)
				.children
				.iter()
				.position(|&c| c == node)
				.unwrap_or_default();
			path.push(position as u32);
			node = parent;
		}
		path.reverse();
		(node, path)
	}

	/// Orders two boundary points. `None` when they live in different trees.
	///
	/// A point `(parent, k)` sorts before anything inside the parent's `k`th child,
	/// which falls out of comparing child-index paths with the offset appended.
	pub fn compare(&self, a: Boundary, b: Boundary) -> Option<Ordering> {
		let (root_a, mut path_a) = self.path(a.node);
		let (root_b, mut path_b) = self.path(b.node);
		if root_a != root_b {
			return None;
		}
		path_a.push(a.offset);
		path_b.push(b.offset);
		Some(path_a.cmp(&path_b))
	}
}
