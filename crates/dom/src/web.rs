use std::cmp::Ordering;
use std::fmt;

use selwatch_primitives::{Offset, Point};
use thiserror::Error;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Node, Range, Selection};

use crate::host::{Handler, NativeRange, NativeSelection, SelectionHost};

/// A JavaScript exception raised by a DOM call.
#[derive(Debug, Clone, Error)]
#[error("DOM exception: {message}")]
pub struct WebError {
	message: String,
}

impl From<JsValue> for WebError {
	fn from(value: JsValue) -> Self {
		let message = value.as_string().unwrap_or_else(|| format!("{value:?}"));
		Self { message }
	}
}

/// A registered DOM listener. Owns the closure so the same function object can be
/// passed to `removeEventListener`.
pub struct WebListener {
	closure: Closure<dyn FnMut()>,
}

impl fmt::Debug for WebListener {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("WebListener").finish_non_exhaustive()
	}
}

impl SelectionHost for Document {
	type Node = Node;
	type Range = Range;
	type Selection = Selection;
	type Listener = WebListener;
	type Error = WebError;

	fn selection(&self) -> Result<Option<Selection>, WebError> {
		Ok(self.get_selection()?)
	}

	fn create_range(&self) -> Result<Range, WebError> {
		Ok(Document::create_range(self)?)
	}

	fn add_listener(&self, event: &str, handler: Handler) -> Result<WebListener, WebError> {
		let closure = Closure::<dyn FnMut()>::new(move || handler());
		self.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
		Ok(WebListener { closure })
	}

	fn remove_listener(&self, event: &str, listener: &WebListener) -> Result<(), WebError> {
		self.remove_event_listener_with_callback(event, listener.closure.as_ref().unchecked_ref())?;
		Ok(())
	}

	fn compare_points(&self, a: &Point<Node>, b: &Point<Node>) -> Option<Ordering> {
		let probe = Document::create_range(self).ok()?;
		Range::set_start(&probe, &a.node, a.offset).ok()?;
		Range::set_end(&probe, &a.node, a.offset).ok()?;
		let position = probe.compare_point(&b.node, b.offset).ok()?;
		Some(order_from_compare_point(position))
	}
}

/// Orders `a` against `b` from `Range.comparePoint(b)` on a range collapsed at `a`,
/// which yields -1 when `b` is before `a`, 0 when equal, 1 when after.
fn order_from_compare_point(position: i16) -> Ordering {
	0.cmp(&position)
}

impl NativeSelection for Selection {
	type Node = Node;
	type Range = Range;
	type Error = WebError;

	fn is_collapsed(&self) -> bool {
		Selection::is_collapsed(self)
	}

	fn range_count(&self) -> u32 {
		Selection::range_count(self)
	}

	fn anchor_node(&self) -> Option<Node> {
		Selection::anchor_node(self)
	}

	fn anchor_offset(&self) -> Offset {
		Selection::anchor_offset(self)
	}

	fn focus_node(&self) -> Option<Node> {
		Selection::focus_node(self)
	}

	fn focus_offset(&self) -> Offset {
		Selection::focus_offset(self)
	}

	fn range_at(&self, index: u32) -> Result<Range, WebError> {
		Ok(self.get_range_at(index)?)
	}

	fn remove_all_ranges(&self) -> Result<(), WebError> {
		Ok(Selection::remove_all_ranges(self)?)
	}

	fn add_range(&self, range: &Range) -> Result<(), WebError> {
		Ok(Selection::add_range(self, range)?)
	}
}

impl NativeRange for Range {
	type Node = Node;
	type Error = WebError;

	fn set_start(&self, node: &Node, offset: Offset) -> Result<(), WebError> {
		Ok(Range::set_start(self, node, offset)?)
	}

	fn set_end(&self, node: &Node, offset: Offset) -> Result<(), WebError> {
		Ok(Range::set_end(self, node, offset)?)
	}

	fn start(&self) -> Result<Point<Node>, WebError> {
		Ok(Point::new(self.start_container()?, self.start_offset()?))
	}

	fn end(&self) -> Result<Point<Node>, WebError> {
		Ok(Point::new(self.end_container()?, self.end_offset()?))
	}

	fn collapsed(&self) -> bool {
		Range::collapsed(self)
	}
}
