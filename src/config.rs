//! Configuration for a build run.
//!
//! Every field has a default, so an empty JSON object is a valid
//! configuration file.
//!
//! # Examples
//!
//! ```
//! use figura::config::PipelineConfig;
//!
//! let config = PipelineConfig::default();
//! assert_eq!(config.ids.locale, "J");
//! assert_eq!(config.significance.min_priority_uses, 2);
//!
//! let mut strict = PipelineConfig::default();
//! strict.significance.min_priority_uses = 3;
//! strict.significance.forced_exclusions.insert("乚".into());
//! assert!(strict.validate().is_ok());
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{FiguraError, Result};
use crate::figure::FigureKey;

/// Top-level configuration for [`crate::pipeline::Pipeline`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Decomposition parsing options.
    pub ids: IdsConfig,
    /// Significance classification options.
    pub significance: SignificanceConfig,
    /// Expand independent sub-trees on the rayon pool.
    pub parallel: bool,
}

/// Options controlling how decomposition sequences are read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IdsConfig {
    /// Locale tag used to select one sequence among several (`J` for
    /// Japanese forms).
    pub locale: String,
    /// Outer shapes of a lower-left enclosure whose enclosed content is
    /// listed before the enclosing stroke.
    pub enclosed_first_outers: BTreeSet<String>,
}

impl Default for IdsConfig {
    fn default() -> Self {
        Self {
            locale: "J".to_string(),
            enclosed_first_outers: ["辶", "⻌", "⻍", "⻎", "廴"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Options for the component significance classifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SignificanceConfig {
    /// Minimum number of distinct priority parents a component needs to be
    /// judged meaningful on its own.
    pub min_priority_uses: usize,
    /// Components that are never assigned a meaning. Defaults to
    /// [`FORCED_EXCLUSIONS`]; a configuration file replaces the whole set.
    pub forced_exclusions: BTreeSet<FigureKey>,
}

/// Components excluded from meaning assignment unless configured otherwise.
pub const FORCED_EXCLUSIONS: &[&str] = &["帀"];

impl Default for SignificanceConfig {
    fn default() -> Self {
        Self {
            min_priority_uses: 2,
            forced_exclusions: FORCED_EXCLUSIONS.iter().map(|&k| k.into()).collect(),
        }
    }
}

impl PipelineConfig {
    /// Load a configuration from a JSON file and validate it.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            FiguraError::invalid_config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: PipelineConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.significance.min_priority_uses == 0 {
            return Err(FiguraError::invalid_config(
                "significance.min_priority_uses must be at least 1",
            ));
        }
        if self.ids.locale.chars().count() != 1 {
            return Err(FiguraError::invalid_config(format!(
                "ids.locale must be a single tag letter, got {:?}",
                self.ids.locale
            )));
        }
        Ok(())
    }
}
