//! Ideographic Description Sequence (IDS) parsing.
//!
//! A decomposition sequence describes a glyph as a prefix expression of
//! spatial operators over sub-figures. Parsing is a two-step process:
//!
//! 1. [`token::tokenize`] splits a sequence into operators and leaves.
//! 2. [`parser::IdsParser`] builds a [`node::CompositionNode`] tree by
//!    recursive descent; every operator consumes exactly its arity.
//!
//! [`sequence::IdsEntry`] handles a figure's full decomposition text, which
//! may carry several locale-tagged alternatives.
//!
//! # Examples
//!
//! ```
//! use figura::figure::FigureKey;
//! use figura::ids::node::FlattenOptions;
//! use figura::ids::sequence::IdsEntry;
//!
//! let entry = IdsEntry::parse(&FigureKey::from("好"), "⿰女子").unwrap();
//! let components = entry.immediate_components('J', FlattenOptions::default());
//! assert_eq!(components, vec![FigureKey::from("女"), FigureKey::from("子")]);
//! ```

pub mod node;
pub mod parser;
pub mod sequence;
pub mod token;

pub use node::{CompositionNode, FlattenOptions, Leaf, Operator};
pub use parser::IdsParser;
pub use sequence::{IdsEntry, IdsSequence};
