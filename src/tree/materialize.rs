//! Flattened transitive decompositions.

use std::sync::Arc;

use ahash::AHashMap;
use parking_lot::RwLock;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{FiguraError, Result};
use crate::figure::FigureKey;
use crate::graph::FigureGraph;

/// One edge of a flattened decomposition.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentUse {
    pub parent: FigureKey,
    pub component: FigureKey,
}

impl ComponentUse {
    pub fn new<P: Into<FigureKey>, C: Into<FigureKey>>(parent: P, component: C) -> Self {
        ComponentUse {
            parent: parent.into(),
            component: component.into(),
        }
    }
}

/// Shared memo of fully expanded sub-trees.
///
/// Each entry is computed once and then published; when two workers race on
/// the same figure the first published list is kept. Lists are deterministic,
/// so either would do.
#[derive(Debug, Default)]
pub struct SubtreeCache {
    entries: RwLock<AHashMap<FigureKey, Arc<Vec<ComponentUse>>>>,
}

impl SubtreeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<Arc<Vec<ComponentUse>>> {
        self.entries.read().get(key).cloned()
    }

    fn publish(&self, key: &FigureKey, uses: Vec<ComponentUse>) -> Arc<Vec<ComponentUse>> {
        self.entries
            .write()
            .entry(key.clone())
            .or_insert_with(|| Arc::new(uses))
            .clone()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

/// Expands figures of a graph into their full [`ComponentUse`] lists.
pub struct Materializer<'a> {
    graph: &'a FigureGraph,
    cache: &'a SubtreeCache,
}

impl<'a> Materializer<'a> {
    pub fn new(graph: &'a FigureGraph, cache: &'a SubtreeCache) -> Self {
        Materializer { graph, cache }
    }

    /// Depth-first pre-order list of every (parent, component) edge below
    /// `key`.
    pub fn component_uses(&self, key: &FigureKey) -> Result<Arc<Vec<ComponentUse>>> {
        let mut expanding = Vec::new();
        self.expand(key, &mut expanding)
    }

    fn expand(
        &self,
        key: &FigureKey,
        expanding: &mut Vec<FigureKey>,
    ) -> Result<Arc<Vec<ComponentUse>>> {
        if let Some(cached) = self.cache.get(key.as_str()) {
            return Ok(cached);
        }
        if expanding.contains(key) {
            let mut path = expanding.clone();
            path.push(key.clone());
            return Err(FiguraError::Cycle {
                figure: key.clone(),
                path,
            });
        }

        let node = self
            .graph
            .get(key.as_str())
            .ok_or_else(|| FiguraError::missing_figure(key, expanding.last().map(|p| p.to_string())))?;

        expanding.push(key.clone());
        let mut uses = Vec::new();
        for component in &node.components {
            if component == key {
                continue;
            }
            uses.push(ComponentUse::new(key, component));
            let below = self.expand(component, expanding)?;
            uses.extend(below.iter().cloned());
        }
        expanding.pop();

        Ok(self.cache.publish(key, uses))
    }

    /// Expand every key, in input order.
    pub fn materialize_all(
        &self,
        keys: &[FigureKey],
        parallel: bool,
    ) -> Result<Vec<(FigureKey, Arc<Vec<ComponentUse>>)>> {
        if parallel {
            keys.par_iter()
                .map(|key| Ok((key.clone(), self.component_uses(key)?)))
                .collect()
        } else {
            keys.iter()
                .map(|key| Ok((key.clone(), self.component_uses(key)?)))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IdsConfig;
    use crate::facts::InMemoryFacts;
    use crate::graph::GraphBuilder;

    fn graph(facts: &InMemoryFacts, start: &[&str]) -> FigureGraph {
        let config = IdsConfig::default();
        let start: Vec<FigureKey> = start.iter().map(|k| FigureKey::from(*k)).collect();
        GraphBuilder::new(facts, &config).build(&start).unwrap()
    }

    fn pairs(uses: &[ComponentUse]) -> Vec<(&str, &str)> {
        uses.iter()
            .map(|u| (u.parent.as_str(), u.component.as_str()))
            .collect()
    }

    fn facts() -> InMemoryFacts {
        InMemoryFacts::new()
            .with_figure("謝", "⿰言射")
            .with_figure("射", "⿰身寸")
            .with_figure("言", "言")
            .with_figure("身", "身")
            .with_figure("寸", "寸")
    }

    #[test]
    fn test_pre_order_flattening() {
        let facts = facts();
        let graph = graph(&facts, &["謝"]);
        let cache = SubtreeCache::new();
        let uses = Materializer::new(&graph, &cache)
            .component_uses(&"謝".into())
            .unwrap();
        assert_eq!(
            pairs(&uses),
            vec![("謝", "言"), ("謝", "射"), ("射", "身"), ("射", "寸")]
        );
    }

    #[test]
    fn test_shared_subtrees_are_memoized() {
        let facts = facts();
        let graph = graph(&facts, &["謝"]);
        let cache = SubtreeCache::new();
        let materializer = Materializer::new(&graph, &cache);

        let whole = materializer.component_uses(&"謝".into()).unwrap();
        assert_eq!(cache.len(), 5);
        let part = materializer.component_uses(&"射".into()).unwrap();
        assert_eq!(pairs(&part), vec![("射", "身"), ("射", "寸")]);
        assert_eq!(whole.len(), 4);
        assert!(cache.get("言").unwrap().is_empty());
    }

    #[test]
    fn test_repeated_component_appears_twice() {
        let facts = InMemoryFacts::new()
            .with_figure("林", "⿰木木")
            .with_figure("木", "木");
        let graph = graph(&facts, &["林"]);
        let cache = SubtreeCache::new();
        let uses = Materializer::new(&graph, &cache)
            .component_uses(&"林".into())
            .unwrap();
        assert_eq!(pairs(&uses), vec![("林", "木"), ("林", "木")]);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let facts = facts();
        let graph = graph(&facts, &["謝"]);
        let keys = graph.keys().to_vec();

        let sequential_cache = SubtreeCache::new();
        let sequential = Materializer::new(&graph, &sequential_cache)
            .materialize_all(&keys, false)
            .unwrap();
        let parallel_cache = SubtreeCache::new();
        let parallel = Materializer::new(&graph, &parallel_cache)
            .materialize_all(&keys, true)
            .unwrap();

        assert_eq!(sequential, parallel);
    }
}
