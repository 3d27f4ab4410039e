//! Figure relation graph.
//!
//! The [`GraphBuilder`] resolves every figure reachable from a start list
//! into a "decomposes into" graph, recording for each component the parents
//! that use it directly and the list tags it inherits from them.
//!
//! Recursion into a component happens only the first time it is discovered.
//! The tags a component passes on to its own sub-components are therefore
//! the ones it had at that first visit, which is why the start list is
//! ordered by importance (see [`processing_order`]).

use std::collections::BTreeSet;

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};

use crate::config::IdsConfig;
use crate::error::{FiguraError, Result};
use crate::facts::FactSource;
use crate::figure::{FigureKey, ListTag};
use crate::ids::node::FlattenOptions;
use crate::ids::sequence::IdsEntry;
use crate::variant::VariantGroups;

/// One figure of the graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FigureNode {
    pub key: FigureKey,
    /// Raw decomposition text.
    pub ids: String,
    /// Immediate sub-figures of the selected sequence, in flattening order.
    pub components: Vec<FigureKey>,
    /// Parents whose decomposition contains this figure, one entry per
    /// occurrence, in discovery order.
    pub direct_uses: Vec<FigureKey>,
    /// Lists the figure itself belongs to.
    pub lists: BTreeSet<ListTag>,
    /// Lists inherited from the parents using it.
    pub inherited_lists: BTreeSet<ListTag>,
    /// Head of the figure's variant group.
    pub variant_group: Option<FigureKey>,
}

impl FigureNode {
    pub fn is_atomic(&self) -> bool {
        self.components.is_empty()
    }

    /// Distinct direct-use parents in discovery order.
    pub fn direct_use_parents(&self) -> Vec<&FigureKey> {
        let mut seen = AHashSet::new();
        self.direct_uses
            .iter()
            .filter(|parent| seen.insert(*parent))
            .collect()
    }

    /// Own and inherited list tags.
    pub fn all_lists(&self) -> BTreeSet<ListTag> {
        self.lists.union(&self.inherited_lists).copied().collect()
    }
}

/// The resolved figure graph.
#[derive(Debug, Clone, Default)]
pub struct FigureGraph {
    nodes: AHashMap<FigureKey, FigureNode>,
    /// Keys in the order they were created.
    order: Vec<FigureKey>,
}

impl FigureGraph {
    pub fn get(&self, key: &str) -> Option<&FigureNode> {
        self.nodes.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.nodes.contains_key(key)
    }

    /// Nodes in creation order.
    pub fn nodes(&self) -> impl Iterator<Item = &FigureNode> {
        self.order.iter().filter_map(|k| self.nodes.get(k))
    }

    pub fn keys(&self) -> &[FigureKey] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Ordering for [`GraphBuilder::build`]: priority seeds, then the other
/// members of the seeds' variant groups, then every remaining figure in
/// universe order.
pub fn processing_order<F: FactSource + ?Sized>(
    facts: &F,
    groups: &VariantGroups,
) -> Vec<FigureKey> {
    let mut seen = AHashSet::new();
    let mut order = Vec::new();
    let mut push = |key: &FigureKey, order: &mut Vec<FigureKey>| {
        if seen.insert(key.clone()) {
            order.push(key.clone());
        }
    };

    let seeds = facts.priority_seeds();
    for seed in seeds {
        push(seed, &mut order);
    }
    for seed in seeds {
        if let Some(group) = groups.group_of(seed.as_str()) {
            for member in &group.members {
                push(member, &mut order);
            }
        }
    }
    for key in facts.figure_keys() {
        push(&key, &mut order);
    }
    order
}

/// Builds a [`FigureGraph`] from a fact source.
pub struct GraphBuilder<'a, F: FactSource + ?Sized> {
    facts: &'a F,
    config: &'a IdsConfig,
    groups: Option<&'a VariantGroups>,
    locale: char,
    graph: FigureGraph,
    processed: AHashSet<FigureKey>,
    /// Figures whose recursion is in progress, outermost first.
    expanding: Vec<FigureKey>,
}

impl<'a, F: FactSource + ?Sized> GraphBuilder<'a, F> {
    pub fn new(facts: &'a F, config: &'a IdsConfig) -> Self {
        GraphBuilder {
            facts,
            config,
            groups: None,
            locale: config.locale.chars().next().unwrap_or('J'),
            graph: FigureGraph::default(),
            processed: AHashSet::new(),
            expanding: Vec::new(),
        }
    }

    /// Attach variant groups so nodes record their group head.
    pub fn with_variant_groups(mut self, groups: &'a VariantGroups) -> Self {
        self.groups = Some(groups);
        self
    }

    /// Resolve every start key and everything it decomposes into.
    pub fn build(mut self, start: &[FigureKey]) -> Result<FigureGraph> {
        for key in start {
            self.ensure_node(key, None)?;
            if self.processed.insert(key.clone()) {
                tracing::debug!(figure = %key, "processing root");
                self.process(key)?;
            }
        }

        if let Some(groups) = self.groups {
            for node in self.graph.nodes.values_mut() {
                node.variant_group = groups.head_of(node.key.as_str()).cloned();
            }
        }

        tracing::info!(
            figures = self.graph.len(),
            roots = start.len(),
            "figure graph built"
        );
        Ok(self.graph)
    }

    fn process(&mut self, key: &FigureKey) -> Result<()> {
        let (tags, components) = match self.graph.nodes.get(key) {
            Some(node) => (node.all_lists(), node.components.clone()),
            None => return Err(FiguraError::missing_figure(key, None)),
        };

        self.expanding.push(key.clone());
        for component in &components {
            if self.expanding.contains(component) {
                let mut path = self.expanding.clone();
                path.push(component.clone());
                tracing::error!(figure = %component, "decomposition cycle");
                return Err(FiguraError::Cycle {
                    figure: component.clone(),
                    path,
                });
            }

            self.ensure_node(component, Some(key))?;
            if let Some(node) = self.graph.nodes.get_mut(component) {
                node.direct_uses.push(key.clone());
                node.inherited_lists.extend(tags.iter().copied());
            }

            if self.processed.insert(component.clone()) {
                self.process(component)?;
            }
        }
        self.expanding.pop();
        Ok(())
    }

    fn ensure_node(&mut self, key: &FigureKey, parent: Option<&FigureKey>) -> Result<()> {
        if self.graph.nodes.contains_key(key) {
            return Ok(());
        }

        let Some(text) = self.facts.decomposition(key.as_str()) else {
            tracing::error!(figure = %key, parent = ?parent.map(|p| p.as_str()), "missing figure");
            return Err(FiguraError::missing_figure(
                key,
                parent.map(|p| p.to_string()),
            ));
        };

        let entry = IdsEntry::parse(key, text)?;
        let components = entry.immediate_components(
            self.locale,
            FlattenOptions {
                enclosed_first_outers: Some(&self.config.enclosed_first_outers),
            },
        );

        let node = FigureNode {
            key: key.clone(),
            ids: text.to_string(),
            components,
            direct_uses: Vec::new(),
            lists: self.facts.list_membership(key.as_str()),
            inherited_lists: BTreeSet::new(),
            variant_group: None,
        };
        self.graph.nodes.insert(key.clone(), node);
        self.graph.order.push(key.clone());
        Ok(())
    }
}
