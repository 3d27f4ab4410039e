//! Error types for the Figura library.
//!
//! All errors are represented by the [`FiguraError`] enum. Every variant is
//! fatal for a build run: the pipeline is a deterministic batch transform, so
//! the remedy for any of them is a correction of the input facts (usually an
//! override list) followed by a full re-run.
//!
//! # Examples
//!
//! ```
//! use figura::error::{FiguraError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(FiguraError::invalid_config("min_priority_uses must be at least 1"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

use crate::figure::FigureKey;

/// The main error type for Figura operations.
#[derive(Error, Debug)]
pub enum FiguraError {
    /// I/O errors (reading fact files, writing build output)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary serialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A decomposition sequence could not be fully consumed.
    #[error("Parse error in decomposition of `{figure}` ({text:?}): {message}")]
    Parse {
        figure: FigureKey,
        text: String,
        message: String,
    },

    /// A figure was referenced but has no known decomposition.
    #[error("{}", missing_figure_message(.figure, .referenced_by))]
    MissingFigure {
        figure: FigureKey,
        referenced_by: Option<String>,
    },

    /// A figure ended up in more than one variant group.
    #[error(
        "Variant conflict: `{figure}` belongs to {} groups after merging source `{source_name}`: {}",
        .groups.len(),
        format_groups(.groups)
    )]
    VariantConflict {
        figure: FigureKey,
        source_name: String,
        groups: Vec<Vec<FigureKey>>,
    },

    /// A figure was accounted for in zero or several classification buckets.
    #[error("Classification conflict: `{figure}` falls in buckets [{}]", .buckets.join(", "))]
    BucketConflict {
        figure: FigureKey,
        buckets: Vec<String>,
    },

    /// A figure contains itself through its own decomposition.
    #[error("Decomposition cycle at `{figure}`: {}", format_path(.path))]
    Cycle {
        figure: FigureKey,
        path: Vec<FigureKey>,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with FiguraError.
pub type Result<T> = std::result::Result<T, FiguraError>;

impl FiguraError {
    /// Create a new parse error for the decomposition of `figure`.
    pub fn parse<K, T, M>(figure: K, text: T, message: M) -> Self
    where
        K: Into<FigureKey>,
        T: Into<String>,
        M: Into<String>,
    {
        FiguraError::Parse {
            figure: figure.into(),
            text: text.into(),
            message: message.into(),
        }
    }

    /// Create a new missing figure error.
    pub fn missing_figure<K: Into<FigureKey>>(figure: K, referenced_by: Option<String>) -> Self {
        FiguraError::MissingFigure {
            figure: figure.into(),
            referenced_by,
        }
    }

    /// Create a new serialization error.
    pub fn serialization<S: Into<String>>(msg: S) -> Self {
        FiguraError::Serialization(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        FiguraError::InvalidConfig(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        FiguraError::Other(msg.into())
    }
}

fn missing_figure_message(figure: &FigureKey, referenced_by: &Option<String>) -> String {
    match referenced_by {
        Some(parent) => format!(
            "Missing figure: `{figure}` (referenced by `{parent}`) has no known decomposition"
        ),
        None => format!("Missing figure: `{figure}` has no known decomposition"),
    }
}

fn format_groups(groups: &[Vec<FigureKey>]) -> String {
    groups
        .iter()
        .map(|group| {
            let members: Vec<&str> = group.iter().map(|k| k.as_str()).collect();
            format!("{{{}}}", members.join(" "))
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_path(path: &[FigureKey]) -> String {
    path.iter()
        .map(|k| k.as_str())
        .collect::<Vec<_>>()
        .join(" -> ")
}
