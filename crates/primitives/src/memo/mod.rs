use std::cell::RefCell;

use crate::state::Generation;

#[cfg(test)]
mod tests;

/// A cache slot holding one value stamped with the generation it was computed at.
///
/// Reads at the stamped generation return the cached value; reads at any other
/// generation recompute. The slot is never borrowed while the compute closure runs,
/// so a closure may re-enter other memo slots or the host freely.
#[derive(Debug)]
pub struct Memo<T> {
	slot: RefCell<Option<(Generation, T)>>,
}

impl<T> Default for Memo<T> {
	fn default() -> Self {
		Self {
			slot: RefCell::new(None),
		}
	}
}

impl<T: Clone> Memo<T> {
	/// Creates an empty slot.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the value for `generation`, computing and storing it if the slot is stale.
	pub fn get_or_compute(&self, generation: Generation, compute: impl FnOnce() -> T) -> T {
		if let Some(value) = self.peek(generation) {
			return value;
		}
		let value = compute();
		self.store(generation, value.clone());
		value
	}

	/// Fallible variant of [`Memo::get_or_compute`]. Errors are returned and not cached.
	pub fn try_get_or_compute<E>(
		&self,
		generation: Generation,
		compute: impl FnOnce() -> Result<T, E>,
	) -> Result<T, E> {
		if let Some(value) = self.peek(generation) {
			return Ok(value);
		}
		let value = compute()?;
		self.store(generation, value.clone());
		Ok(value)
	}

	/// Returns the cached value only if it was computed at `generation`.
	pub fn peek(&self, generation: Generation) -> Option<T> {
		match &*self.slot.borrow() {
			Some((stamp, value)) if *stamp == generation => Some(value.clone()),
			_ => None,
		}
	}

	/// Returns the last computed value regardless of freshness.
	pub fn last(&self) -> Option<T> {
		self.slot.borrow().as_ref().map(|(_, value)| value.clone())
	}
}

impl<T> Memo<T> {
	/// Generation of the cached value, if any.
	pub fn stamp(&self) -> Option<Generation> {
		self.slot.borrow().as_ref().map(|(stamp, _)| *stamp)
	}

	fn store(&self, generation: Generation, value: T) {
		*self.slot.borrow_mut() = Some((generation, value));
	}
}
