//! End-to-end build pipeline.
//!
//! A build runs the passes strictly in order, each over the whole figure
//! universe:
//!
//! 1. unify variant groups,
//! 2. build the figure graph in priority order,
//! 3. classify every figure and validate the classification buckets,
//! 4. materialize component trees and select first-class components.
//!
//! Any error aborts the run; there is no partial output.
//!
//! # Examples
//!
//! ```
//! use figura::config::PipelineConfig;
//! use figura::facts::InMemoryFacts;
//! use figura::figure::ListTag;
//! use figura::pipeline::Pipeline;
//!
//! let facts = InMemoryFacts::new()
//!     .with_figure("好", "⿰女子")
//!     .with_figure("女", "女")
//!     .with_figure("子", "子")
//!     .with_list(ListTag::Joyo, &["好"])
//!     .with_seeds(&["好"]);
//!
//! let output = Pipeline::new(PipelineConfig::default()).run(&facts).unwrap();
//! let record = output.figure("好").unwrap();
//! assert!(record.is_standalone);
//! assert_eq!(record.component_uses.len(), 2);
//! ```

pub mod output;

use std::collections::BTreeMap;
use std::time::Instant;

use crate::config::PipelineConfig;
use crate::error::{FiguraError, Result};
use crate::facts::FactSource;
use crate::graph::{FigureGraph, GraphBuilder, processing_order};
use crate::significance::{Classifier, validate_buckets};
use crate::tree::{Materializer, SubtreeCache, select_first_class};
use crate::variant::{VariantGroups, VariantUnifier};

pub use output::{BuildOutput, BuildSummary, FigureRecord, VariantGroupRecord};

/// Runs a full build over a fact source.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Pipeline { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn run<F: FactSource + ?Sized>(&self, facts: &F) -> Result<BuildOutput> {
        let started = Instant::now();
        let result = self.run_passes(facts);
        match &result {
            Ok(output) => tracing::info!(
                figures = output.summary.figures,
                elapsed_ms = started.elapsed().as_millis() as u64,
                "build finished"
            ),
            Err(e) => tracing::error!("build aborted: {e}"),
        }
        result
    }

    /// Variant groups and graph only, for inspection.
    pub fn build_graph<F: FactSource + ?Sized>(
        &self,
        facts: &F,
    ) -> Result<(VariantGroups, FigureGraph)> {
        self.config.validate()?;
        let groups = VariantUnifier::new(facts).unify()?;
        let order = processing_order(facts, &groups);
        let graph = GraphBuilder::new(facts, &self.config.ids)
            .with_variant_groups(&groups)
            .build(&order)?;
        Ok((groups, graph))
    }

    fn run_passes<F: FactSource + ?Sized>(&self, facts: &F) -> Result<BuildOutput> {
        let (groups, graph) = self.build_graph(facts)?;

        let seeds = facts.priority_seeds();
        let classifier = Classifier::new(&graph, &groups, seeds, &self.config.significance);
        let classifications = classifier.classify_all();
        let buckets = validate_buckets(graph.keys(), &classifications)?;
        tracing::info!(
            standalone = buckets.standalone,
            meaningful_component = buckets.meaningful_component,
            leftover = buckets.leftover,
            "figures classified"
        );

        let cache = SubtreeCache::new();
        let trees = Materializer::new(&graph, &cache)
            .materialize_all(graph.keys(), self.config.parallel)?;
        tracing::info!(trees = trees.len(), cached = cache.len(), "component trees materialized");

        let mut figures = BTreeMap::new();
        let mut summary = BuildSummary {
            figures: graph.len(),
            variant_groups: groups.len(),
            buckets,
            ..Default::default()
        };

        for (key, uses) in trees {
            let node = graph
                .get(key.as_str())
                .ok_or_else(|| FiguraError::missing_figure(&key, None))?;
            let classification = classifications.get(&key).ok_or_else(|| {
                FiguraError::BucketConflict {
                    figure: key.clone(),
                    buckets: Vec::new(),
                }
            })?;
            let first_class = select_first_class(&uses, |component| {
                classifications
                    .get(component)
                    .is_some_and(|c| c.meaning.result)
            });

            summary.component_uses += uses.len();
            summary.first_class_components += first_class.len();
            if classification.is_priority {
                summary.priority += 1;
            }

            figures.insert(
                key.clone(),
                FigureRecord {
                    components: node.components.clone(),
                    direct_uses: node.direct_use_parents().into_iter().cloned().collect(),
                    variant_group: node.variant_group.clone(),
                    lists: node.lists.clone(),
                    inherited_lists: node.inherited_lists.clone(),
                    is_standalone: classification.is_standalone,
                    is_priority_candidate: classification.is_priority_candidate,
                    is_priority: classification.is_priority,
                    is_meaningful_component: classification.meaning.result,
                    meaning_reason: classification.meaning.reason.to_string(),
                    component_uses: uses.as_ref().clone(),
                    first_class,
                },
            );
        }

        let variant_groups = groups
            .iter()
            .map(|g| VariantGroupRecord {
                head: g.head.clone(),
                members: g.members.clone(),
            })
            .collect();

        Ok(BuildOutput {
            generated_at: chrono::Utc::now(),
            summary,
            figures,
            variant_groups,
        })
    }
}
