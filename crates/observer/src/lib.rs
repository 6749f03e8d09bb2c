//! Invalidation-driven view of a document's text selection.
//!
//! [`SelectionObserver`] binds to a document through the [`SelectionHost`] seam,
//! listens for `selectionchange`, and serves anchor, focus, range and point-list
//! views that are recomputed lazily after each change.
//!
//! ```
//! use selwatch::{MemoryDocument, SelectionObserver};
//!
//! let doc = MemoryDocument::new();
//! let p = doc.create_element("p");
//! let text = doc.create_text("hello");
//! doc.append_child(doc.root(), p).unwrap();
//! doc.append_child(p, text).unwrap();
//!
//! let observer = SelectionObserver::new(doc.clone()).unwrap();
//! observer.select(&text, 1, Some((&text, 4))).unwrap();
//! doc.flush_events();
//!
//! assert_eq!(observer.selection_points().unwrap().len(), 2);
//! ```

/// Configuration errors.
pub mod error;
/// The selection observer.
pub mod observer;
/// Observer configuration.
pub mod options;

pub use error::ConfigError;
pub use observer::{SelectionObserver, SelectionSnapshot};
pub use options::ObserverOptions;
pub use selwatch_dom::{
	DomError, MemoryDocument, MemoryRange, MemorySelection, NativeRange, NativeSelection, NodeId,
	SELECTION_CHANGE, SelectionHost,
};
pub use selwatch_primitives::{Direction, Generation, Offset, Point, SelectionPoints};
