use std::cell::Cell;

use proptest::prelude::*;

use super::*;
use crate::state::SelectionState;

#[test]
fn caches_within_generation() {
	let memo = Memo::new();
	let calls = Cell::new(0);
	let compute = || {
		calls.set(calls.get() + 1);
		"value"
	};

	assert_eq!(memo.get_or_compute(Generation::INITIAL, compute), "value");
	assert_eq!(memo.get_or_compute(Generation::INITIAL, compute), "value");
	assert_eq!(calls.get(), 1);
	assert_eq!(memo.stamp(), Some(Generation::INITIAL));
}

#[test]
fn recomputes_after_bump() {
	let state = SelectionState::new();
	let memo = Memo::new();

	assert_eq!(memo.get_or_compute(state.current(), || 1), 1);
	state.bump();
	assert_eq!(memo.peek(state.current()), None);
	assert_eq!(memo.last(), Some(1));
	assert_eq!(memo.get_or_compute(state.current(), || 2), 2);
}

#[test]
fn errors_are_not_cached() {
	let memo: Memo<u8> = Memo::new();
	let failed: Result<u8, &str> = memo.try_get_or_compute(Generation::INITIAL, || Err("boom"));
	assert_eq!(failed, Err("boom"));
	assert_eq!(memo.stamp(), None);

	let ok: Result<u8, &str> = memo.try_get_or_compute(Generation::INITIAL, || Ok(7));
	assert_eq!(ok, Ok(7));
}

#[test]
fn compute_may_reenter_other_slots() {
	let inner = Memo::new();
	let outer = Memo::new();
	let value = outer.get_or_compute(Generation::INITIAL, || inner.get_or_compute(Generation::INITIAL, || 3) * 2);
	assert_eq!(value, 6);
	assert_eq!(inner.last(), Some(3));
}

proptest! {
	/// A read never returns a value computed at an older generation, and each
	/// generation is computed at most once.
	#[test]
	fn prop_never_stale(ops in prop::collection::vec(any::<bool>(), 1..64)) {
		let state = SelectionState::new();
		let memo = Memo::new();
		let computed = Cell::new(0usize);
		let mut reads_since_bump = 0usize;
		let mut expected_computes = 0usize;

		for bump in ops {
			if bump {
				state.bump();
				reads_since_bump = 0;
				continue;
			}
			if reads_since_bump == 0 {
				expected_computes += 1;
			}
			reads_since_bump += 1;

			let generation = state.current();
			let value = memo.get_or_compute(generation, || {
				computed.set(computed.get() + 1);
				generation.get()
			});
			prop_assert_eq!(value, generation.get());
		}

		prop_assert_eq!(computed.get(), expected_computes);
	}
}
