//! Serializable build output handed to the persistence layer.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FiguraError, Result};
use crate::figure::{FigureKey, ListTag};
use crate::significance::BucketCounts;
use crate::tree::{ComponentUse, FirstClassComponent};

/// Everything the build knows about one figure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FigureRecord {
    pub components: Vec<FigureKey>,
    /// Distinct direct-use parents, in discovery order.
    pub direct_uses: Vec<FigureKey>,
    pub variant_group: Option<FigureKey>,
    pub lists: BTreeSet<ListTag>,
    pub inherited_lists: BTreeSet<ListTag>,
    pub is_standalone: bool,
    pub is_priority_candidate: bool,
    pub is_priority: bool,
    pub is_meaningful_component: bool,
    pub meaning_reason: String,
    pub component_uses: Vec<ComponentUse>,
    pub first_class: Vec<FirstClassComponent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantGroupRecord {
    pub head: FigureKey,
    pub members: Vec<FigureKey>,
}

/// Counts describing a finished build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildSummary {
    pub figures: usize,
    pub variant_groups: usize,
    pub buckets: BucketCounts,
    pub priority: usize,
    pub component_uses: usize,
    pub first_class_components: usize,
}

/// The complete output of one build run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildOutput {
    pub generated_at: DateTime<Utc>,
    pub summary: BuildSummary,
    pub figures: BTreeMap<FigureKey, FigureRecord>,
    pub variant_groups: Vec<VariantGroupRecord>,
}

impl BuildOutput {
    pub fn figure(&self, key: &str) -> Option<&FigureRecord> {
        self.figures.get(key)
    }

    pub fn write_json<P: AsRef<Path>>(&self, path: P, pretty: bool) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        if pretty {
            serde_json::to_writer_pretty(&mut writer, self)?;
        } else {
            serde_json::to_writer(&mut writer, self)?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn read_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn write_bincode<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        bincode::serialize_into(&mut writer, self)
            .map_err(|e| FiguraError::serialization(format!("bincode: {e}")))?;
        writer.flush()?;
        Ok(())
    }

    pub fn read_bincode<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        bincode::deserialize_from(reader)
            .map_err(|e| FiguraError::serialization(format!("bincode: {e}")))
    }
}
