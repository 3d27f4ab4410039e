//! Externally supplied variant pair lists.

use serde::{Deserialize, Serialize};

use crate::figure::FigureKey;

/// One independently sourced list of same-character variant pairs, with the
/// manual overrides maintained for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantSource {
    pub name: String,
    #[serde(default)]
    pub pairs: Vec<(FigureKey, FigureKey)>,
    /// Pairs added by hand.
    #[serde(default)]
    pub add: Vec<(FigureKey, FigureKey)>,
    /// Pairs removed by hand; matched regardless of order.
    #[serde(default)]
    pub remove: Vec<(FigureKey, FigureKey)>,
}

impl VariantSource {
    pub fn new<S: Into<String>>(name: S) -> Self {
        VariantSource {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_pair(mut self, base: &str, variant: &str) -> Self {
        self.pairs.push((base.into(), variant.into()));
        self
    }

    pub fn with_addition(mut self, base: &str, variant: &str) -> Self {
        self.add.push((base.into(), variant.into()));
        self
    }

    pub fn with_removal(mut self, base: &str, variant: &str) -> Self {
        self.remove.push((base.into(), variant.into()));
        self
    }

    /// Pairs after applying overrides: `pairs - remove + add`.
    pub fn effective_pairs(&self) -> Vec<(FigureKey, FigureKey)> {
        let removed = |a: &FigureKey, b: &FigureKey| {
            self.remove
                .iter()
                .any(|(x, y)| (x == a && y == b) || (x == b && y == a))
        };

        self.pairs
            .iter()
            .filter(|(a, b)| !removed(a, b))
            .chain(self.add.iter())
            .filter(|(a, b)| a != b)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_pairs_apply_overrides() {
        let source = VariantSource::new("unihan")
            .with_pair("国", "國")
            .with_pair("学", "學")
            .with_pair("芸", "藝")
            .with_removal("藝", "芸")
            .with_addition("体", "體");

        let pairs = source.effective_pairs();
        assert_eq!(
            pairs,
            vec![
                (FigureKey::from("国"), FigureKey::from("國")),
                (FigureKey::from("学"), FigureKey::from("學")),
                (FigureKey::from("体"), FigureKey::from("體")),
            ]
        );
    }

    #[test]
    fn test_self_pairs_are_dropped() {
        let source = VariantSource::new("x").with_pair("木", "木");
        assert!(source.effective_pairs().is_empty());
    }
}
