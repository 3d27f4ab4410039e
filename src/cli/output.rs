//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::cli::args::{FiguraArgs, OutputFormat};
use crate::error::Result;
use crate::pipeline::BuildSummary;
use crate::tree::FirstClassComponent;

/// Result structure for a build.
#[derive(Debug, Serialize, Deserialize)]
pub struct BuildResult {
    pub output_path: String,
    pub format: String,
    pub duration_ms: u64,
    pub summary: BuildSummary,
}

/// One parsed alternative of a decomposition.
#[derive(Debug, Serialize, Deserialize)]
pub struct ParsedSequence {
    pub sequence: String,
    pub locales: String,
    pub depth: usize,
    pub leaves: Vec<String>,
}

/// Result structure for parsing decomposition text.
#[derive(Debug, Serialize, Deserialize)]
pub struct ParseResult {
    pub figure: String,
    pub sequences: Vec<ParsedSequence>,
    pub selected_index: usize,
    pub components: Vec<String>,
}

/// Classification of a single figure.
#[derive(Debug, Serialize, Deserialize)]
pub struct FigureExplanation {
    pub figure: String,
    pub components: Vec<String>,
    pub direct_uses: Vec<String>,
    pub variant_group: Option<String>,
    pub is_standalone: bool,
    pub is_priority: bool,
    pub is_meaningful_component: bool,
    pub meaning_reason: String,
    pub first_class: Vec<FirstClassComponent>,
}

/// Result structure for explaining figures.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExplainResult {
    pub figures: Vec<FigureExplanation>,
}

/// One variant group.
#[derive(Debug, Serialize, Deserialize)]
pub struct GroupListing {
    pub head: String,
    pub members: Vec<String>,
}

/// Result structure for listing variant groups.
#[derive(Debug, Serialize, Deserialize)]
pub struct GroupsResult {
    pub total_groups: usize,
    pub groups: Vec<GroupListing>,
}

/// Output a result in the specified format.
pub fn output_result<T: Serialize>(message: &str, result: &T, args: &FiguraArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => output_human(message, result, args),
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in human-readable format.
fn output_human<T: Serialize>(message: &str, result: &T, args: &FiguraArgs) -> Result<()> {
    if args.verbosity() > 0 {
        println!("{message}");
        println!();
    }

    let value = serde_json::to_value(result)?;
    output_value_human(&value, 0);
    Ok(())
}

/// Print nested objects as indented `key: value` lines.
fn output_value_human(value: &serde_json::Value, indent: usize) {
    let pad = "  ".repeat(indent);
    match value {
        serde_json::Value::Object(obj) => {
            for (key, val) in obj {
                match val {
                    serde_json::Value::Object(_) => {
                        println!("{pad}{key}:");
                        output_value_human(val, indent + 1);
                    }
                    serde_json::Value::Array(items)
                        if items.iter().any(|item| item.is_object()) =>
                    {
                        println!("{pad}{key}:");
                        for item in items {
                            println!("{pad}  ─────────────");
                            output_value_human(item, indent + 1);
                        }
                    }
                    _ => println!("{pad}{key}: {}", format_value(val)),
                }
            }
        }
        _ => println!("{pad}{}", format_value(value)),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &FiguraArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a JSON value for human output.
fn format_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::Bool(b) => b.to_string(),
        serde_json::Value::Array(arr) => {
            let formatted_values = arr.iter().map(format_value).collect::<Vec<_>>().join(" ");
            format!("[{formatted_values}]")
        }
        serde_json::Value::Object(_) => "[object]".to_string(),
        serde_json::Value::Null => "-".to_string(),
    }
}
