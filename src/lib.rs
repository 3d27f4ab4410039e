//! # Figura
//!
//! A decomposition graph builder for CJK characters and their components.
//!
//! ## Features
//!
//! - Ideographic Description Sequence parsing with locale-tagged alternatives
//! - Figure relation graph with direct-use edges and inherited list tags
//! - Variant group unification with conflict detection
//! - Component significance classification
//! - Flattened component trees and first-class component selection

pub mod cli;
pub mod config;
pub mod error;
pub mod facts;
pub mod figure;
pub mod graph;
pub mod ids;
pub mod pipeline;
pub mod significance;
pub mod tree;
pub mod variant;

pub mod prelude {
    pub use crate::config::PipelineConfig;
    pub use crate::error::{FiguraError, Result};
    pub use crate::facts::{FactSource, InMemoryFacts};
    pub use crate::figure::{FigureKey, ListTag};
    pub use crate::pipeline::{BuildOutput, Pipeline};
    pub use crate::variant::VariantSource;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
