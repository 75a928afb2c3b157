//! File collection model.
//!
//! This module owns the widget's only mutable shared state: the ordered,
//! path-keyed collection of entries. Writes are wholesale replacements of
//! the backing vector, never in-place edits, and a path-segment index keeps
//! folder existence well-defined instead of leaving it to ad hoc string
//! scans.

pub mod index;
pub mod model;

pub use index::PathIndex;
pub use model::FileCollection;
