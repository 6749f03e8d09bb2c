use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use selwatch_dom::{Handler, NativeRange, NativeSelection, SelectionHost};
use selwatch_primitives::{Direction, Generation, Memo, Offset, SelectionPoints, SelectionState};

use crate::options::ObserverOptions;


/// Every derived view of a selection, read at one generation.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionSnapshot<N, R> {
	/// Generation the views were read at.
	pub generation: Generation,
	/// Anchor node.
	pub anchor: Option<N>,
	/// Focus node.
	pub focus: Option<N>,
	/// First range of the selection.
	pub range: Option<R>,
	/// Anchor point, then focus point when not collapsed.
	pub points: SelectionPoints<N>,
}

/// Live, memoized view of a document's selection.
///
/// The observer registers a change listener on its document that bumps a shared
/// [`SelectionState`]. Accessors cache their result stamped with the generation it
/// was computed at and recompute on the first read after the generation moves.
/// Once the listener is detached the cached values stay as they are until
/// [`SelectionObserver::invalidate`] or a re-bind.
///
/// Dropping the observer detaches its listener.
pub struct SelectionObserver<H: SelectionHost> {
	document: H,
	options: ObserverOptions,
	state: SelectionState,
	listener: Option<H::Listener>,
	anchor: Memo<Option<H::Node>>,
	focus: Memo<Option<H::Node>>,
	range: Memo<Option<H::Range>>,
	points: Memo<SelectionPoints<H::Node>>,
}

impl<H: SelectionHost> fmt::Debug for SelectionObserver<H> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SelectionObserver")
			.field("event", &self.options.event)
			.field("generation", &self.state.current())
			.field("bound", &self.listener.is_some())
			.finish_non_exhaustive()
	}
}

impl<H: SelectionHost> SelectionObserver<H> {
	/// Creates an observer bound to `document` with default options.
	pub fn new(document: H) -> Result<Self, H::Error> {
		Self::with_options(document, ObserverOptions::default())
	}

	/// Creates an observer, binding the change listener if `options.bind_on_create`.
	pub fn with_options(document: H, options: ObserverOptions) -> Result<Self, H::Error> {
		let mut observer = Self {
			document,
			options,
			state: SelectionState::new(),
			listener: None,
			anchor: Memo::new(),
			focus: Memo::new(),
			range: Memo::new(),
			points: Memo::new(),
		};
		if observer.options.bind_on_create {
			observer.bind_change()?;
		}
		Ok(observer)
	}

	/// The bound document.
	pub fn document(&self) -> &H {
		&self.document
	}

	/// Options the observer was created with.
	pub fn options(&self) -> &ObserverOptions {
		&self.options
	}

	/// Current invalidation generation.
	pub fn generation(&self) -> Generation {
		self.state.current()
	}

	/// True while a change listener is attached.
	pub fn is_bound(&self) -> bool {
		self.listener.is_some()
	}

	/// The document's current selection, fetched anew on every call.
	pub fn selection(&self) -> Result<Option<H::Selection>, H::Error> {
		self.document.selection()
	}

	/// Node the selection started in.
	pub fn anchor_node(&self) -> Result<Option<H::Node>, H::Error> {
		let generation = self.generation();
		self.anchor.try_get_or_compute(generation, || {
			tracing::trace!(generation = generation.get(), "recomputing anchor node");
			Ok(self.selection()?.and_then(|selection| selection.anchor_node()))
		})
	}

	/// Node the selection currently extends to.
	pub fn focus_node(&self) -> Result<Option<H::Node>, H::Error> {
		let generation = self.generation();
		self.focus.try_get_or_compute(generation, || {
			tracing::trace!(generation = generation.get(), "recomputing focus node");
			Ok(self.selection()?.and_then(|selection| selection.focus_node()))
		})
	}

	/// First range of the selection, or `None` when it has no ranges.
	pub fn range(&self) -> Result<Option<H::Range>, H::Error> {
		let generation = self.generation();
		self.range.try_get_or_compute(generation, || {
			tracing::trace!(generation = generation.get(), "recomputing range");
			match self.selection()? {
				Some(selection) if selection.range_count() >= 1 => selection.range_at(0).map(Some),
				_ => Ok(None),
			}
		})
	}

	/// The selection's (node, offset) pairs: the anchor alone when collapsed,
	/// the anchor then the focus otherwise, nothing without an anchor.
	pub fn selection_points(&self) -> Result<SelectionPoints<H::Node>, H::Error> {
		let generation = self.generation();
		self.points.try_get_or_compute(generation, || {
			tracing::trace!(generation = generation.get(), "recomputing selection points");
			let Some(selection) = self.selection()? else {
				return Ok(SelectionPoints::empty());
			};
			let Some(anchor) = selection.anchor() else {
				return Ok(SelectionPoints::empty());
			};
			if selection.is_collapsed() {
				return Ok(SelectionPoints::collapsed(anchor));
			}
			Ok(match selection.focus() {
				Some(focus) => SelectionPoints::extended(anchor, focus),
				None => SelectionPoints::collapsed(anchor),
			})
		})
	}

	/// Whether the focus lies before the anchor.
	///
	/// `None` without a selection, or when the host cannot order the points.
	pub fn direction(&self) -> Result<Option<Direction>, H::Error> {
		let points = self.selection_points()?;
		let (Some(anchor), Some(focus)) = (points.anchor(), points.focus()) else {
			return Ok(None);
		};
		if points.is_collapsed() {
			return Ok(Some(Direction::Forward));
		}
		Ok(self.document.compare_points(anchor, focus).map(|order| match order {
			Ordering::Greater => Direction::Backward,
			Ordering::Less | Ordering::Equal => Direction::Forward,
		}))
	}

	/// Reads every view at the current generation.
	pub fn snapshot(&self) -> Result<SelectionSnapshot<H::Node, H::Range>, H::Error> {
		Ok(SelectionSnapshot {
			generation: self.generation(),
			anchor: self.anchor_node()?,
			focus: self.focus_node()?,
			range: self.range()?,
			points: self.selection_points()?,
		})
	}

	/// Replaces the selection with a single range.
	///
	/// The range starts at `start`/`start_offset`. It ends at `end` when one is given
	/// with a non-zero offset, and collapses onto the start otherwise. Host
	/// exceptions (bad node, offset out of bounds) propagate unchanged. The host
	/// reports the change through its own event, so cached views are not touched here.
	///
	/// Returns `false` without touching anything when the document has no selection.
	pub fn select(
		&self,
		start: &H::Node,
		start_offset: Offset,
		end: Option<(&H::Node, Offset)>,
	) -> Result<bool, H::Error> {
		let Some(selection) = self.selection()? else {
			tracing::debug!("document has no selection; select ignored");
			return Ok(false);
		};

		let range = self.document.create_range()?;
		range.set_start(start, start_offset)?;
		match end {
			Some((end, end_offset)) if end_offset != 0 => range.set_end(end, end_offset)?,
			_ => range.set_end(start, start_offset)?,
		}

		selection.remove_all_ranges()?;
		selection.add_range(&range)?;
		Ok(true)
	}

	/// Attaches the change listener, detaching any current one first.
	pub fn bind_change(&mut self) -> Result<(), H::Error> {
		self.teardown()?;
		let listener = self.document.add_listener(&self.options.event, self.change_handler())?;
		self.listener = Some(listener);
		tracing::debug!(
			event = %self.options.event,
			generation = self.generation().get(),
			"selection listener attached"
		);
		Ok(())
	}

	/// Detaches the change listener. Does nothing when none is attached.
	///
	/// On failure the listener is kept so a later call can retry.
	pub fn teardown(&mut self) -> Result<(), H::Error> {
		let Some(listener) = self.listener.take() else {
			return Ok(());
		};
		if let Err(error) = self.document.remove_listener(&self.options.event, &listener) {
			self.listener = Some(listener);
			return Err(error);
		}
		tracing::debug!(event = %self.options.event, "selection listener detached");
		Ok(())
	}

	/// Moves the observer to another document and returns the previous one.
	///
	/// The old listener is detached before the new one is attached; cached views
	/// are invalidated.
	pub fn rebind(&mut self, document: H) -> Result<H, H::Error> {
		self.teardown()?;
		let previous = std::mem::replace(&mut self.document, document);
		let generation = self.invalidate();
		tracing::debug!(generation = generation.get(), "observer rebound to new document");
		self.bind_change()?;
		Ok(previous)
	}

	/// Forces the next read of every view to recompute.
	pub fn invalidate(&self) -> Generation {
		self.state.bump()
	}

	fn change_handler(&self) -> Handler {
		let state = self.state.clone();
		Rc::new(move || {
			let generation = state.bump();
			tracing::trace!(generation = generation.get(), "selection changed");
		})
	}
}

impl<H: SelectionHost> Drop for SelectionObserver<H> {
	fn drop(&mut self) {
		if let Err(error) = self.teardown() {
			tracing::warn!(%error, "failed to detach selection listener on drop");
		}
	}
}
