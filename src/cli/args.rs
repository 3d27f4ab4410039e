//! Command line argument parsing for the Figura CLI using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Figura - build the figure decomposition graph
#[derive(Parser, Debug, Clone)]
#[command(name = "figura")]
#[command(about = "Build a decomposition graph of CJK characters and their components")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct FiguraArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl FiguraArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }

    /// Default `tracing` filter directive for the verbosity level.
    pub fn log_filter(&self) -> &'static str {
        match self.verbosity() {
            0 => "error",
            1 => "warn",
            2 => "info",
            3 => "debug",
            _ => "trace",
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run a full build and write its output
    Build(BuildArgs),

    /// Parse decomposition text and show its trees
    Parse(ParseArgs),

    /// Explain the classification of figures
    Explain(ExplainArgs),

    /// List variant groups
    Groups(GroupsArgs),
}

/// Input facts shared by every command that runs the pipeline.
#[derive(Args, Debug, Clone)]
pub struct FactsArgs {
    /// Facts file (JSON)
    #[arg(long, value_name = "FACTS_FILE", env = "FIGURA_FACTS")]
    pub facts: PathBuf,

    /// Raw IDS database file merged over the facts' decompositions
    #[arg(long, value_name = "IDS_FILE")]
    pub ids: Option<PathBuf>,

    /// Pipeline configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "FIGURA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Locale tag used to select decomposition sequences
    #[arg(long)]
    pub locale: Option<String>,

    /// Expand component trees in parallel
    #[arg(long)]
    pub parallel: bool,
}

/// Arguments for a build
#[derive(Args, Debug, Clone)]
pub struct BuildArgs {
    #[command(flatten)]
    pub facts: FactsArgs,

    /// Output file path
    #[arg(short, long, value_name = "OUTPUT_FILE")]
    pub output: PathBuf,

    /// Write bincode instead of JSON
    #[arg(long)]
    pub bincode: bool,
}

/// Arguments for parsing decomposition text
#[derive(Args, Debug, Clone)]
pub struct ParseArgs {
    /// Decomposition text (tab-separated sequences, `\t` accepted)
    #[arg(value_name = "SEQUENCES")]
    pub sequences: String,

    /// Figure the text belongs to
    #[arg(long, default_value = "?")]
    pub figure: String,

    /// Locale tag used to select a sequence
    #[arg(long, default_value = "J")]
    pub locale: String,
}

/// Arguments for explaining figures
#[derive(Args, Debug, Clone)]
pub struct ExplainArgs {
    #[command(flatten)]
    pub facts: FactsArgs,

    /// Figures to explain
    #[arg(value_name = "FIGURE", required = true)]
    pub figures: Vec<String>,
}

/// Arguments for listing variant groups
#[derive(Args, Debug, Clone)]
pub struct GroupsArgs {
    #[command(flatten)]
    pub facts: FactsArgs,

    /// Only show groups containing this figure
    #[arg(long)]
    pub figure: Option<String>,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_args() {
        let args = FiguraArgs::try_parse_from([
            "figura",
            "build",
            "--facts",
            "facts.json",
            "--config",
            "config.json",
            "--parallel",
            "--output",
            "out.bin",
            "--bincode",
        ])
        .unwrap();

        if let Command::Build(build_args) = args.command {
            assert_eq!(build_args.facts.facts, PathBuf::from("facts.json"));
            assert_eq!(build_args.facts.config, Some(PathBuf::from("config.json")));
            assert!(build_args.facts.parallel);
            assert_eq!(build_args.output, PathBuf::from("out.bin"));
            assert!(build_args.bincode);
        } else {
            panic!("Expected Build command");
        }
    }

    #[test]
    fn test_explain_requires_figures() {
        assert!(FiguraArgs::try_parse_from(["figura", "explain", "--facts", "f.json"]).is_err());

        let args =
            FiguraArgs::try_parse_from(["figura", "explain", "--facts", "f.json", "旡", "既"])
                .unwrap();
        if let Command::Explain(explain_args) = args.command {
            assert_eq!(explain_args.figures, vec!["旡", "既"]);
        } else {
            panic!("Expected Explain command");
        }
    }

    #[test]
    fn test_verbosity_levels() {
        // Default verbosity
        let args = FiguraArgs::try_parse_from(["figura", "parse", "木"]).unwrap();
        assert_eq!(args.verbosity(), 1);
        assert_eq!(args.log_filter(), "warn");

        // Multiple verbose flags
        let args = FiguraArgs::try_parse_from(["figura", "-vvv", "parse", "木"]).unwrap();
        assert_eq!(args.verbosity(), 3);
        assert_eq!(args.log_filter(), "debug");

        // Quiet flag
        let args = FiguraArgs::try_parse_from(["figura", "--quiet", "parse", "木"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_output_format() {
        let args =
            FiguraArgs::try_parse_from(["figura", "--format", "json", "parse", "木"]).unwrap();
        assert!(matches!(args.output_format, OutputFormat::Json));
    }
}
