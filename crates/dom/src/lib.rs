//! Host seams for selection observation.
//!
//! [`SelectionHost`], [`NativeSelection`] and [`NativeRange`] describe the document,
//! selection and range objects a host environment provides. Two hosts ship here:
//! [`memory::MemoryDocument`], an in-memory document usable anywhere, and (with the
//! `web` feature) `web_sys::Document` for the browser.

/// Traits describing the host document, selection and range.
pub mod host;
/// In-memory document with a live selection and event delivery.
pub mod memory;
/// `web-sys` implementation of the host traits.
#[cfg(feature = "web")]
pub mod web;

pub use host::{Handler, NativeRange, NativeSelection, SELECTION_CHANGE, SelectionHost};
pub use memory::{DomError, ListenerId, MemoryDocument, MemoryRange, MemorySelection, NodeId};
