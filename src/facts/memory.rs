//! In-memory fact set.
//!
//! Facts are usually loaded from a JSON document:
//!
//! ```json
//! {
//!   "figures": {
//!     "好": { "ids": "⿰女子", "lists": ["joyo"], "frequency": 5120 },
//!     "女": { "ids": "女", "lists": ["joyo"] },
//!     "子": { "ids": "子", "lists": ["joyo"] }
//!   },
//!   "priority_seeds": ["好"],
//!   "variant_sources": [
//!     { "name": "kyujitai", "pairs": [["国", "國"]], "remove": [], "add": [] }
//!   ]
//! }
//! ```
//!
//! Decomposition text can additionally be merged from raw IDS database lines
//! with [`InMemoryFacts::merge_ids_lines`].

use std::collections::{BTreeMap, BTreeSet};
use std::io::BufRead;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FiguraError, Result};
use crate::facts::FactSource;
use crate::figure::{FigureKey, ListTag};
use crate::variant::source::VariantSource;

/// Facts about a single figure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FigureFacts {
    /// Raw decomposition text (tab-separated sequences).
    pub ids: String,
    #[serde(default)]
    pub lists: BTreeSet<ListTag>,
    #[serde(default)]
    pub frequency: u64,
}

/// A preloaded fact set implementing [`FactSource`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InMemoryFacts {
    #[serde(default)]
    figures: BTreeMap<FigureKey, FigureFacts>,
    #[serde(default)]
    priority_seeds: BTreeSet<FigureKey>,
    #[serde(default)]
    variant_sources: Vec<VariantSource>,
}

impl InMemoryFacts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a fact set from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            FiguraError::other(format!(
                "Failed to read facts file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json_str(&content)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Merge raw IDS database lines of the form
    /// `U+4F60<TAB>你<TAB>⿰亻尔[GTKV]<TAB>⿰亻尓[J]`.
    ///
    /// Each line sets (or replaces) the decomposition text of its figure;
    /// list membership and frequency of existing figures are kept. Blank
    /// lines and `#`/`;` comments are skipped. Returns the number of figures
    /// updated.
    pub fn merge_ids_lines<R: BufRead>(&mut self, reader: R) -> Result<usize> {
        let mut updated = 0;
        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim_end_matches(['\r', '\n']);
            if trimmed.trim().is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
                continue;
            }

            let mut fields = trimmed.splitn(3, '\t');
            let (Some(_codepoint), Some(figure), Some(sequences)) =
                (fields.next(), fields.next(), fields.next())
            else {
                tracing::warn!(line = line_no + 1, "skipping malformed IDS line: {trimmed:?}");
                continue;
            };

            self.figures.entry(FigureKey::from(figure)).or_default().ids = sequences.to_string();
            updated += 1;
        }
        Ok(updated)
    }

    /// Add or replace a figure with its decomposition text.
    pub fn with_figure<K: Into<FigureKey>>(mut self, key: K, ids: &str) -> Self {
        self.insert_figure(key, ids);
        self
    }

    pub fn insert_figure<K: Into<FigureKey>>(&mut self, key: K, ids: &str) {
        self.figures.entry(key.into()).or_default().ids = ids.to_string();
    }

    /// Mark figures as members of a list. Unknown figures are ignored.
    pub fn with_list(mut self, tag: ListTag, keys: &[&str]) -> Self {
        for key in keys {
            if let Some(facts) = self.figures.get_mut(*key) {
                facts.lists.insert(tag);
            }
        }
        self
    }

    pub fn with_frequency(mut self, key: &str, frequency: u64) -> Self {
        if let Some(facts) = self.figures.get_mut(key) {
            facts.frequency = frequency;
        }
        self
    }

    pub fn with_seeds(mut self, keys: &[&str]) -> Self {
        self.priority_seeds
            .extend(keys.iter().map(|k| FigureKey::from(*k)));
        self
    }

    pub fn with_variant_source(mut self, source: VariantSource) -> Self {
        self.variant_sources.push(source);
        self
    }

    pub fn figure(&self, key: &str) -> Option<&FigureFacts> {
        self.figures.get(key)
    }

    pub fn len(&self) -> usize {
        self.figures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.figures.is_empty()
    }
}

impl FactSource for InMemoryFacts {
    fn decomposition(&self, key: &str) -> Option<&str> {
        self.figures.get(key).map(|f| f.ids.as_str())
    }

    fn variant_sources(&self) -> &[VariantSource] {
        &self.variant_sources
    }

    fn list_membership(&self, key: &str) -> BTreeSet<ListTag> {
        self.figures
            .get(key)
            .map(|f| f.lists.clone())
            .unwrap_or_default()
    }

    fn corpus_frequency(&self, key: &str) -> u64 {
        self.figures.get(key).map(|f| f.frequency).unwrap_or(0)
    }

    fn priority_seeds(&self) -> &BTreeSet<FigureKey> {
        &self.priority_seeds
    }

    fn figure_keys(&self) -> Vec<FigureKey> {
        self.figures.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_builder_and_lookups() {
        let facts = InMemoryFacts::new()
            .with_figure("好", "⿰女子")
            .with_figure("女", "女")
            .with_list(ListTag::Joyo, &["好", "missing"])
            .with_frequency("好", 42)
            .with_seeds(&["好"]);

        assert_eq!(facts.decomposition("好"), Some("⿰女子"));
        assert!(facts.contains("女"));
        assert!(!facts.contains("子"));
        assert!(facts.list_membership("好").contains(&ListTag::Joyo));
        assert!(facts.list_membership("女").is_empty());
        assert_eq!(facts.corpus_frequency("好"), 42);
        assert_eq!(facts.corpus_frequency("子"), 0);
        assert!(facts.priority_seeds().contains("好"));
        assert_eq!(facts.len(), 2);
    }

    #[test]
    fn test_from_json_str() {
        let facts = InMemoryFacts::from_json_str(
            r#"{
                "figures": {
                    "好": {"ids": "⿰女子", "lists": ["joyo"], "frequency": 7},
                    "女": {"ids": "女"}
                },
                "priority_seeds": ["好"]
            }"#,
        )
        .unwrap();
        assert_eq!(facts.figure_keys().len(), 2);
        assert_eq!(facts.corpus_frequency("好"), 7);
        assert!(facts.variant_sources().is_empty());
    }

    #[test]
    fn test_merge_ids_lines() {
        let mut facts = InMemoryFacts::new()
            .with_figure("你", "你")
            .with_list(ListTag::Jinmeiyo, &["你"]);
        let input = "# header comment\n\
                     U+4F60\t你\t⿰亻尔[GTKV]\t⿰亻尓[J]\n\
                     \n\
                     U+4EBB\t亻\t亻\n\
                     broken line\n";

        let updated = facts.merge_ids_lines(Cursor::new(input)).unwrap();
        assert_eq!(updated, 2);
        assert_eq!(facts.decomposition("你"), Some("⿰亻尔[GTKV]\t⿰亻尓[J]"));
        assert_eq!(facts.decomposition("亻"), Some("亻"));
        assert!(facts.list_membership("你").contains(&ListTag::Jinmeiyo));
    }
}
