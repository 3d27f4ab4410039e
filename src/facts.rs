//! Fact lookup interface.
//!
//! The core never talks to storage directly. Everything it needs about the
//! figure universe comes through [`FactSource`], a small set of synchronous
//! lookups over a preloaded fact set.

pub mod memory;

use std::collections::BTreeSet;

use crate::figure::{FigureKey, ListTag};
use crate::variant::source::VariantSource;

pub use memory::InMemoryFacts;

/// Read-only access to the input facts of a build.
pub trait FactSource: Send + Sync {
    /// Raw decomposition text of a figure, if known.
    fn decomposition(&self, key: &str) -> Option<&str>;

    /// Independently sourced variant pair lists, overrides included.
    fn variant_sources(&self) -> &[VariantSource];

    /// External lists the figure belongs to.
    fn list_membership(&self, key: &str) -> BTreeSet<ListTag>;

    /// Historical corpus frequency, `0` when unknown.
    fn corpus_frequency(&self, key: &str) -> u64;

    /// Characters that must be treated as priority characters.
    fn priority_seeds(&self) -> &BTreeSet<FigureKey>;

    /// Every figure of the universe, in a deterministic order.
    fn figure_keys(&self) -> Vec<FigureKey>;

    fn contains(&self, key: &str) -> bool {
        self.decomposition(key).is_some()
    }
}
