use std::cell::Cell;
use std::rc::Rc;

/// A stamp identifying one state of the selection.
///
/// Generations are only compared for equality; the counter wraps on overflow.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Generation(u64);

impl Generation {
	/// The generation before any change has been observed.
	pub const INITIAL: Self = Self(0);

	/// Returns the raw counter value.
	pub const fn get(self) -> u64 {
		self.0
	}

	/// Returns the generation following this one.
	#[must_use]
	pub const fn next(self) -> Self {
		Self(self.0.wrapping_add(1))
	}
}

/// Shared invalidation marker for a selection.
///
/// Clones share one counter: the change handler registered on the document holds a
/// clone and bumps it, the observer reads it to decide whether memoized views are
/// still current.
#[derive(Debug, Default, Clone)]
pub struct SelectionState {
	current: Rc<Cell<Generation>>,
}

impl SelectionState {
	/// Creates a state at [`Generation::INITIAL`].
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the current generation.
	pub fn current(&self) -> Generation {
		self.current.get()
	}

	/// Moves to the next generation and returns it.
	pub fn bump(&self) -> Generation {
		let next = self.current.get().next();
		self.current.set(next);
		next
	}
}
