//! Core types for selection observation: boundary points, generations, and memo slots.

/// Generation-keyed cache slots for derived selection views.
pub mod memo;
/// Boundary points and the ordered anchor/focus list.
pub mod point;
/// Shared invalidation generation.
pub mod state;

pub use memo::Memo;
pub use point::{Direction, Offset, Point, SelectionPoints};
pub use state::{Generation, SelectionState};
