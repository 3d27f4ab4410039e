//! Component significance classification.
//!
//! Decides, per figure, whether it stands on its own as a character and
//! whether it deserves a meaning of its own when it occurs as a component.
//! All decisions are pure functions of a built [`FigureGraph`], its
//! [`VariantGroups`] and the priority seed set.

use std::collections::BTreeSet;
use std::fmt;

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::config::SignificanceConfig;
use crate::error::{FiguraError, Result};
use crate::figure::FigureKey;
use crate::graph::FigureGraph;
use crate::variant::VariantGroups;

/// Why a component was or was not assigned a meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "uses", rename_all = "snake_case")]
pub enum MeaningReason {
    Forced,
    BasePriority,
    NoDirectUses,
    OnlyUsedIn(Vec<FigureKey>),
    UsedIn(Vec<FigureKey>),
}

impl fmt::Display for MeaningReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeaningReason::Forced => f.write_str("forced"),
            MeaningReason::BasePriority => {
                f.write_str("base priority character or variant thereof")
            }
            MeaningReason::NoDirectUses => f.write_str("no direct uses in composition data"),
            MeaningReason::OnlyUsedIn(uses) => write!(f, "only used in {}", join_keys(uses)),
            MeaningReason::UsedIn(uses) => write!(f, "used in {}", join_keys(uses)),
        }
    }
}

fn join_keys(keys: &[FigureKey]) -> String {
    keys.iter()
        .map(|k| k.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Outcome of [`Classifier::should_be_assigned_meaning`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeaningDecision {
    pub result: bool,
    pub reason: MeaningReason,
}

impl MeaningDecision {
    fn yes(reason: MeaningReason) -> Self {
        MeaningDecision {
            result: true,
            reason,
        }
    }

    fn no(reason: MeaningReason) -> Self {
        MeaningDecision {
            result: false,
            reason,
        }
    }
}

/// All derived flags of one figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub is_standalone: bool,
    pub is_priority_candidate: bool,
    pub is_priority: bool,
    pub meaning: MeaningDecision,
}

impl Classification {
    pub fn is_meaningful_component(&self) -> bool {
        self.meaning.result
    }
}

/// Significance decisions over a built graph.
pub struct Classifier<'a> {
    graph: &'a FigureGraph,
    groups: &'a VariantGroups,
    seeds: &'a BTreeSet<FigureKey>,
    config: &'a SignificanceConfig,
}

impl<'a> Classifier<'a> {
    pub fn new(
        graph: &'a FigureGraph,
        groups: &'a VariantGroups,
        seeds: &'a BTreeSet<FigureKey>,
        config: &'a SignificanceConfig,
    ) -> Self {
        Classifier {
            graph,
            groups,
            seeds,
            config,
        }
    }

    /// Figure has own or inherited list membership.
    pub fn is_priority_candidate(&self, key: &FigureKey) -> bool {
        self.graph
            .get(key.as_str())
            .is_some_and(|node| !node.lists.is_empty() || !node.inherited_lists.is_empty())
    }

    /// The figure, or some member of its variant group, is a priority
    /// candidate.
    fn in_candidate_family(&self, key: &FigureKey) -> bool {
        self.groups
            .family(key)
            .iter()
            .any(|member| self.is_priority_candidate(member))
    }

    fn is_seed(&self, key: &FigureKey) -> bool {
        self.seeds.contains(key)
    }

    /// Can be looked up on its own: unused as a component, or a seed, or a
    /// variant of a seed.
    pub fn is_standalone(&self, key: &FigureKey) -> bool {
        let unused = self
            .graph
            .get(key.as_str())
            .is_none_or(|node| node.direct_uses.is_empty());
        unused
            || self.is_seed(key)
            || self
                .groups
                .family(key)
                .iter()
                .any(|member| self.is_seed(member))
    }

    pub fn is_priority(&self, key: &FigureKey) -> bool {
        let standalone = self.is_standalone(key);
        self.priority_from(key, standalone, &self.should_be_assigned_meaning(key))
    }

    fn priority_from(&self, key: &FigureKey, standalone: bool, meaning: &MeaningDecision) -> bool {
        if standalone {
            self.is_seed(key)
        } else {
            meaning.result
        }
    }

    pub fn should_be_assigned_meaning(&self, key: &FigureKey) -> MeaningDecision {
        if self.config.forced_exclusions.contains(key) {
            return MeaningDecision::no(MeaningReason::Forced);
        }

        let root = self.groups.head_of(key.as_str()).unwrap_or(key);
        if self.is_seed(root) {
            return MeaningDecision::yes(MeaningReason::BasePriority);
        }

        let uses = self.priority_uses(key);
        match uses.len() {
            0 => MeaningDecision::no(MeaningReason::NoDirectUses),
            1 => MeaningDecision::no(MeaningReason::OnlyUsedIn(uses)),
            n if n >= self.config.min_priority_uses => {
                MeaningDecision::yes(MeaningReason::UsedIn(uses))
            }
            _ => MeaningDecision::no(MeaningReason::OnlyUsedIn(uses)),
        }
    }

    /// Distinct parents of the figure and of its variants that are priority
    /// candidates (or variants of one).
    fn priority_uses(&self, key: &FigureKey) -> Vec<FigureKey> {
        let mut family = vec![key.clone()];
        family.extend(
            self.groups
                .family(key)
                .into_iter()
                .filter(|member| member != key),
        );

        let mut seen = AHashSet::new();
        let mut uses = Vec::new();
        for member in &family {
            let Some(node) = self.graph.get(member.as_str()) else {
                continue;
            };
            for parent in &node.direct_uses {
                if seen.insert(parent.clone()) && self.in_candidate_family(parent) {
                    uses.push(parent.clone());
                }
            }
        }
        uses
    }

    /// Classify every figure of the graph.
    pub fn classify_all(&self) -> AHashMap<FigureKey, Classification> {
        self.graph
            .keys()
            .iter()
            .map(|key| {
                let meaning = self.should_be_assigned_meaning(key);
                let is_standalone = self.is_standalone(key);
                let is_priority = self.priority_from(key, is_standalone, &meaning);
                let classification = Classification {
                    is_standalone,
                    is_priority_candidate: self.is_priority_candidate(key),
                    is_priority,
                    meaning,
                };
                (key.clone(), classification)
            })
            .collect()
    }
}

/// Number of figures per classification bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketCounts {
    pub standalone: usize,
    pub meaningful_component: usize,
    pub leftover: usize,
}

/// Check that every figure lands in exactly one of the standalone,
/// meaningful-component and leftover buckets.
///
/// Base priority meaning belongs to seeds and their variants, which are
/// standalone, so it does not count toward meaningful-component.
pub fn validate_buckets(
    keys: &[FigureKey],
    classifications: &AHashMap<FigureKey, Classification>,
) -> Result<BucketCounts> {
    let mut counts = BucketCounts::default();

    for key in keys {
        let Some(c) = classifications.get(key) else {
            return Err(FiguraError::BucketConflict {
                figure: key.clone(),
                buckets: Vec::new(),
            });
        };

        let mut buckets = Vec::new();
        if c.is_standalone {
            buckets.push("standalone");
        }
        if c.meaning.result && c.meaning.reason != MeaningReason::BasePriority {
            buckets.push("meaningful-component");
        }
        if !c.is_standalone && !c.meaning.result {
            buckets.push("leftover");
        }

        match buckets.as_slice() {
            ["standalone"] => counts.standalone += 1,
            ["meaningful-component"] => counts.meaningful_component += 1,
            ["leftover"] => counts.leftover += 1,
            _ => {
                tracing::error!(figure = %key, ?buckets, "figure classified inconsistently");
                return Err(FiguraError::BucketConflict {
                    figure: key.clone(),
                    buckets: buckets.into_iter().map(String::from).collect(),
                });
            }
        }
    }

    Ok(counts)
}
