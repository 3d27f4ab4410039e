//! Component trees.
//!
//! - [`materialize`] expands a figure's immediate components into its full
//!   transitive decomposition, as an ordered list of
//!   [`materialize::ComponentUse`] edges.
//! - [`first_class`] walks that list to pick the minimal set of component
//!   occurrences worth showing for the figure.

pub mod first_class;
pub mod materialize;

pub use first_class::{FirstClassComponent, select_first_class};
pub use materialize::{ComponentUse, Materializer, SubtreeCache};
