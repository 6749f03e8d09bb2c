use std::cell::Cell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use selwatch_primitives::Point;

use super::*;
use crate::host::{NativeRange, NativeSelection};

/// `<p>"hello"</p><p>"world"</p>` appended to the document node.
fn two_paragraphs() -> (MemoryDocument, NodeId, NodeId) {
	let doc = MemoryDocument::new();
	let mut texts = Vec::new();
	for word in ["hello", "world"] {
		let p = doc.create_element("p");
		let text = doc.create_text(word);
		doc.append_child(doc.root(), p).unwrap();
		doc.append_child(p, text).unwrap();
		texts.push(text);
	}
	(doc, texts[0], texts[1])
}

#[test]
fn node_length_counts_utf16() {
	let doc = MemoryDocument::new();
	let text = doc.create_text("a😀");
	assert_eq!(doc.node_length(text), Ok(3));
	assert_eq!(doc.node_length(doc.root()), Ok(0));
}

#[test]
fn append_child_rejects_cycles_and_text_parents() {
	let doc = MemoryDocument::new();
	let outer = doc.create_element("div");
	let inner = doc.create_element("span");
	let text = doc.create_text("x");
	doc.append_child(outer, inner).unwrap();

	assert_eq!(
		doc.append_child(inner, outer),
		Err(DomError::HierarchyRequest {
			parent: inner,
			child: outer
		})
	);
	assert!(matches!(doc.append_child(text, inner), Err(DomError::HierarchyRequest { .. })));
}

#[test]
fn nodes_from_other_documents_are_rejected() {
	let (doc, _, _) = two_paragraphs();
	let other = MemoryDocument::new();
	let foreign = other.create_text("x");
	let range = doc.create_range();
	assert_eq!(range.set_start(&foreign, 0), Err(DomError::WrongDocument(foreign)));
}

#[test]
fn set_start_past_length_is_index_size() {
	let (doc, hello, _) = two_paragraphs();
	let range = doc.create_range();
	assert_eq!(
		range.set_start(&hello, 6),
		Err(DomError::IndexSize { offset: 6, length: 5 })
	);
}

#[test]
fn start_after_end_collapses() {
	let (doc, hello, world) = two_paragraphs();
	let range = doc.create_range();
	range.set_start(&hello, 1).unwrap();
	range.set_end(&world, 2).unwrap();
	assert!(!range.collapsed());

	range.set_start(&world, 4).unwrap();
	assert!(range.collapsed());
	assert_eq!(range.end(), Ok(Point::new(world, 4)));
}

#[test]
fn end_before_start_collapses() {
	let (doc, hello, world) = two_paragraphs();
	let range = doc.create_range();
	range.set_start(&world, 3).unwrap();
	range.set_end(&hello, 1).unwrap();
	assert_eq!(range.start(), Ok(Point::new(hello, 1)));
	assert!(range.collapsed());
}

#[test]
fn compare_points_in_tree_order() {
	let (doc, hello, world) = two_paragraphs();
	let first_p = doc.parent(hello).unwrap().unwrap();
	let a = Point::new(hello, 5);
	let b = Point::new(world, 0);
	assert_eq!(doc.compare_points(&a, &b), Some(Ordering::Less));
	assert_eq!(doc.compare_points(&b, &a), Some(Ordering::Greater));
	// Before the text child of the first paragraph, hence before anything inside it.
	assert_eq!(doc.compare_points(&Point::new(first_p, 0), &a), Some(Ordering::Less));
	// After it.
	assert_eq!(doc.compare_points(&Point::new(first_p, 1), &a), Some(Ordering::Greater));

	let detached = doc.create_text("loose");
	assert_eq!(doc.compare_points(&Point::new(detached, 0), &a), None);
}

#[test]
fn empty_selection() {
	let doc = MemoryDocument::new();
	let selection = doc.get_selection();
	assert!(selection.is_collapsed());
	assert_eq!(selection.range_count(), 0);
	assert_eq!(selection.anchor_node(), None);
	assert_eq!(selection.anchor_offset(), 0);
	assert_eq!(
		selection.range_at(0).unwrap_err(),
		DomError::RangeIndex { index: 0, count: 0 }
	);
}

#[test]
fn backward_selection_reports_anchor_after_focus() {
	let (doc, hello, world) = two_paragraphs();
	let selection = doc.get_selection();
	selection.set_base_and_extent(world, 3, hello, 1).unwrap();

	assert_eq!(selection.direction(), Direction::Backward);
	assert_eq!(selection.anchor(), Some(Point::new(world, 3)));
	assert_eq!(selection.focus(), Some(Point::new(hello, 1)));

	let range = selection.range_at(0).unwrap();
	assert_eq!(range.start(), Ok(Point::new(hello, 1)));
	assert_eq!(range.end(), Ok(Point::new(world, 3)));
}

#[test]
fn add_range_keeps_first_range() {
	let (doc, hello, world) = two_paragraphs();
	let selection = doc.get_selection();
	let first = doc.create_range();
	first.set_start(&hello, 1).unwrap();
	let second = doc.create_range();
	second.set_start(&world, 1).unwrap();

	selection.add_range(&first).unwrap();
	selection.add_range(&second).unwrap();
	assert_eq!(selection.range_count(), 1);
	assert_eq!(selection.range_at(0).unwrap(), first);
}

#[test]
fn selection_mutations_queue_one_event() {
	let (doc, hello, world) = two_paragraphs();
	let fired = Rc::new(Cell::new(0));
	let counter = Rc::clone(&fired);
	doc.add_listener(SELECTION_CHANGE, Rc::new(move || counter.set(counter.get() + 1)))
		.unwrap();

	let selection = doc.get_selection();
	selection.collapse(hello, 0).unwrap();
	selection.set_base_and_extent(hello, 0, world, 2).unwrap();
	assert!(doc.is_pending(SELECTION_CHANGE));
	assert_eq!(fired.get(), 0);

	assert_eq!(doc.flush_events(), 1);
	assert_eq!(fired.get(), 1);
	assert_eq!(doc.flush_events(), 0);
}

#[test]
fn moving_the_selected_range_queues_event() {
	let (doc, hello, _) = two_paragraphs();
	let selection = doc.get_selection();
	let range = doc.create_range();
	range.set_start(&hello, 0).unwrap();
	assert!(!doc.is_pending(SELECTION_CHANGE));

	selection.add_range(&range).unwrap();
	doc.flush_events();
	range.set_end(&hello, 4).unwrap();
	assert!(doc.is_pending(SELECTION_CHANGE));
	assert_eq!(selection.focus(), Some(Point::new(hello, 4)));
}

#[test]
fn same_handler_registers_once() {
	let doc = MemoryDocument::new();
	let handler: Handler = Rc::new(|| {});
	let first = doc.add_listener(SELECTION_CHANGE, Rc::clone(&handler)).unwrap();
	let second = doc.add_listener(SELECTION_CHANGE, handler).unwrap();
	assert_eq!(first, second);
	assert_eq!(doc.listener_count(SELECTION_CHANGE), 1);

	doc.remove_listener(SELECTION_CHANGE, &first).unwrap();
	assert_eq!(doc.listener_count(SELECTION_CHANGE), 0);
	// Removing again is a no-op.
	doc.remove_listener(SELECTION_CHANGE, &first).unwrap();
}

#[test]
fn handlers_may_reenter_the_document() {
	let (doc, hello, _) = two_paragraphs();
	let seen = Rc::new(Cell::new(None));
	let (handle, slot) = (doc.clone(), Rc::clone(&seen));
	doc.add_listener(
		SELECTION_CHANGE,
		Rc::new(move || slot.set(handle.get_selection().anchor_node())),
	)
	.unwrap();

	doc.get_selection().collapse(hello, 2).unwrap();
	doc.flush_events();
	assert_eq!(seen.get(), Some(hello));
}

#[test]
fn add_range_ignores_detached_boundaries() {
	let (doc, hello, _) = two_paragraphs();
	let loose = doc.create_text("loose");
	let selection = doc.get_selection();

	let detached = doc.create_range();
	detached.set_start(&loose, 0).unwrap();
	detached.set_end(&loose, 3).unwrap();
	selection.add_range(&detached).unwrap();
	assert_eq!(selection.range_count(), 0);
	assert!(!doc.is_pending(SELECTION_CHANGE));

	// Matches set_base_and_extent on the same points.
	selection.set_base_and_extent(loose, 0, loose, 3).unwrap();
	assert_eq!(selection.range_count(), 0);

	let attached = doc.create_range();
	attached.set_start(&hello, 1).unwrap();
	selection.add_range(&attached).unwrap();
	assert_eq!(selection.range_count(), 1);
}

#[test]
fn text_and_tag_by_node_kind() {
	let (doc, hello, _) = two_paragraphs();
	let p = doc.parent(hello).unwrap().unwrap();
	assert_eq!(doc.text(hello), Ok(Some("hello".to_owned())));
	assert_eq!(doc.tag(hello), Ok(None));
	assert_eq!(doc.tag(p), Ok(Some("p".to_owned())));
	assert_eq!(doc.text(p), Ok(None));
	assert_eq!(doc.parent(p), Ok(Some(doc.root())));
	assert_eq!(doc.tag(doc.root()), Ok(None));
}
