//! Variant group unification.
//!
//! Several independent sources list pairs of figures that are orthographic
//! variants of one another. The [`VariantUnifier`] merges them into disjoint
//! [`group::VariantGroup`]s, each with one canonical head. Overlapping
//! groups are a fatal error: the input must be fixed with a source's
//! `add`/`remove` overrides.

pub mod group;
pub mod merge;
pub mod source;

use std::collections::BTreeSet;

use crate::error::{FiguraError, Result};
use crate::facts::FactSource;
use crate::figure::FigureKey;

pub use group::{VariantGroup, VariantGroups};
pub use merge::{check_partition, merge};
pub use source::VariantSource;

/// Merges every variant source of a fact set.
pub struct VariantUnifier<'a, F: FactSource + ?Sized> {
    facts: &'a F,
}

impl<'a, F: FactSource + ?Sized> VariantUnifier<'a, F> {
    pub fn new(facts: &'a F) -> Self {
        VariantUnifier { facts }
    }

    /// Merge all sources in order and pick group heads.
    pub fn unify(&self) -> Result<VariantGroups> {
        let mut groups: Vec<BTreeSet<FigureKey>> = Vec::new();

        for source in self.facts.variant_sources() {
            let pairs = source.effective_pairs();
            for (a, b) in &pairs {
                for endpoint in [a, b] {
                    if !self.facts.contains(endpoint.as_str()) {
                        tracing::error!(
                            figure = %endpoint,
                            source = %source.name,
                            "variant pair endpoint is not a known figure"
                        );
                        return Err(FiguraError::missing_figure(
                            endpoint,
                            Some(format!("variant source {}", source.name)),
                        ));
                    }
                }
            }

            let before = groups.len();
            groups = merge(groups, merge::pair_sets(pairs.iter().cloned()));
            check_partition(&groups, &source.name)?;
            tracing::debug!(
                source = %source.name,
                pairs = pairs.len(),
                new_groups = groups.len() - before,
                "merged variant source"
            );
        }

        let groups = VariantGroups::finalize(groups, self.facts);
        tracing::info!(groups = groups.len(), "variant groups unified");
        Ok(groups)
    }
}
