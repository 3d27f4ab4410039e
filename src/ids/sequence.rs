//! Per-figure decomposition entries with locale-tagged alternatives.
//!
//! Raw decomposition text holds one or more tab-separated sequences. A
//! sequence may end in a bracketed tag list naming the locales whose glyph
//! forms it describes, one letter per locale:
//!
//! ```text
//! ⿰亻尔[GTKV]	⿰亻尓[J]
//! ```

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{FiguraError, Result};
use crate::figure::FigureKey;
use crate::ids::node::{CompositionNode, FlattenOptions};
use crate::ids::parser::IdsParser;

/// One parsed alternative of a figure's decomposition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdsSequence {
    pub node: CompositionNode,
    /// Locale tags; empty when the sequence is untagged.
    pub locales: BTreeSet<char>,
}

impl IdsSequence {
    pub fn is_tagged_for(&self, locale: char) -> bool {
        self.locales.contains(&locale)
    }
}

/// All decomposition alternatives of one figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdsEntry {
    pub figure: FigureKey,
    pub sequences: Vec<IdsSequence>,
}

impl IdsEntry {
    /// Parse the raw decomposition text of `figure`.
    pub fn parse(figure: &FigureKey, text: &str) -> Result<Self> {
        let parser = IdsParser::new(figure);
        let mut sequences = Vec::new();

        for raw in text.split('\t') {
            let raw = raw.trim();
            if raw.is_empty() {
                continue;
            }
            let (body, locales) = split_locale_tags(raw)
                .ok_or_else(|| FiguraError::parse(figure, text, "unclosed locale tag list"))?;
            let node = parser.parse(body).map_err(|e| match e {
                // Report the full raw text rather than the single alternative.
                FiguraError::Parse { message, .. } => {
                    FiguraError::parse(figure, text, format!("in {raw:?}: {message}"))
                }
                other => other,
            })?;
            sequences.push(IdsSequence { node, locales });
        }

        if sequences.is_empty() {
            return Err(FiguraError::parse(figure, text, "no decomposition sequence"));
        }

        Ok(IdsEntry {
            figure: figure.clone(),
            sequences,
        })
    }

    /// Index of the sequence used for `locale`: the first one tagged for it,
    /// else the first sequence.
    pub fn selected_index(&self, locale: char) -> usize {
        self.sequences
            .iter()
            .position(|s| s.is_tagged_for(locale))
            .unwrap_or(0)
    }

    pub fn selected(&self, locale: char) -> &IdsSequence {
        &self.sequences[self.selected_index(locale)]
    }

    /// Immediate sub-figures of the selected sequence, self-references
    /// removed. Empty for atomic figures.
    pub fn immediate_components(
        &self,
        locale: char,
        options: FlattenOptions<'_>,
    ) -> Vec<FigureKey> {
        self.selected(locale)
            .node
            .leaves(options)
            .into_iter()
            .filter(|leaf| leaf.key() != self.figure.as_str())
            .map(|leaf| FigureKey::from(leaf.key()))
            .collect()
    }
}

/// Split `⿰亻尓[J]` into `("⿰亻尓", {'J'})`. Returns `None` for an
/// unclosed `[`.
fn split_locale_tags(raw: &str) -> Option<(&str, BTreeSet<char>)> {
    let Some(open) = raw.rfind('[') else {
        return Some((raw, BTreeSet::new()));
    };
    let tags = raw[open + 1..].strip_suffix(']')?;
    let locales = tags.chars().filter(|c| c.is_ascii_alphabetic()).collect();
    Some((raw[..open].trim_end(), locales))
}
