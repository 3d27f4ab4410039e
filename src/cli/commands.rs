//! Command implementations for the Figura CLI.

use std::fs::File;
use std::io::BufReader;
use std::time::Instant;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::PipelineConfig;
use crate::error::{FiguraError, Result};
use crate::facts::InMemoryFacts;
use crate::figure::FigureKey;
use crate::ids::node::FlattenOptions;
use crate::ids::sequence::IdsEntry;
use crate::pipeline::Pipeline;

/// Execute a CLI command.
pub fn execute_command(args: FiguraArgs) -> Result<()> {
    match &args.command {
        Command::Build(build_args) => build(build_args.clone(), &args),
        Command::Parse(parse_args) => parse(parse_args.clone(), &args),
        Command::Explain(explain_args) => explain(explain_args.clone(), &args),
        Command::Groups(groups_args) => groups(groups_args.clone(), &args),
    }
}

/// Run a full build and write its output.
fn build(args: BuildArgs, cli_args: &FiguraArgs) -> Result<()> {
    let started = Instant::now();
    let (facts, config) = load_inputs(&args.facts)?;
    let output = Pipeline::new(config).run(&facts)?;

    if args.bincode {
        output.write_bincode(&args.output)?;
    } else {
        output.write_json(&args.output, cli_args.pretty)?;
    }

    output_result(
        "Build finished",
        &BuildResult {
            output_path: args.output.to_string_lossy().to_string(),
            format: if args.bincode { "bincode" } else { "json" }.to_string(),
            duration_ms: started.elapsed().as_millis() as u64,
            summary: output.summary.clone(),
        },
        cli_args,
    )
}

/// Parse decomposition text without touching any facts.
fn parse(args: ParseArgs, cli_args: &FiguraArgs) -> Result<()> {
    let figure = FigureKey::from(args.figure.as_str());
    let text = args.sequences.replace("\\t", "\t");
    let locale = single_locale(&args.locale)?;
    let config = PipelineConfig::default();
    let options = FlattenOptions {
        enclosed_first_outers: Some(&config.ids.enclosed_first_outers),
    };

    let entry = IdsEntry::parse(&figure, &text)?;
    let sequences = entry
        .sequences
        .iter()
        .map(|s| ParsedSequence {
            sequence: s.node.to_string(),
            locales: s.locales.iter().collect(),
            depth: s.node.depth(),
            leaves: s
                .node
                .leaves(options)
                .iter()
                .map(|leaf| leaf.key().to_string())
                .collect(),
        })
        .collect();

    output_result(
        "Parsed decomposition",
        &ParseResult {
            figure: figure.to_string(),
            sequences,
            selected_index: entry.selected_index(locale),
            components: entry
                .immediate_components(locale, options)
                .into_iter()
                .map(FigureKey::into_string)
                .collect(),
        },
        cli_args,
    )
}

/// Explain the classification of the requested figures.
fn explain(args: ExplainArgs, cli_args: &FiguraArgs) -> Result<()> {
    let (facts, config) = load_inputs(&args.facts)?;
    let output = Pipeline::new(config).run(&facts)?;

    let mut figures = Vec::new();
    for figure in &args.figures {
        let record = output
            .figure(figure)
            .ok_or_else(|| FiguraError::missing_figure(figure.as_str(), None))?;
        figures.push(FigureExplanation {
            figure: figure.clone(),
            components: keys_to_strings(&record.components),
            direct_uses: keys_to_strings(&record.direct_uses),
            variant_group: record.variant_group.as_ref().map(|k| k.to_string()),
            is_standalone: record.is_standalone,
            is_priority: record.is_priority,
            is_meaningful_component: record.is_meaningful_component,
            meaning_reason: record.meaning_reason.clone(),
            first_class: record.first_class.clone(),
        });
    }

    output_result("Figure classification", &ExplainResult { figures }, cli_args)
}

/// List variant groups.
fn groups(args: GroupsArgs, cli_args: &FiguraArgs) -> Result<()> {
    let (facts, config) = load_inputs(&args.facts)?;
    let (groups, _graph) = Pipeline::new(config).build_graph(&facts)?;

    let listings: Vec<GroupListing> = groups
        .iter()
        .filter(|g| args.figure.as_deref().is_none_or(|f| g.contains(f)))
        .map(|g| GroupListing {
            head: g.head.to_string(),
            members: keys_to_strings(&g.members),
        })
        .collect();

    output_result(
        "Variant groups",
        &GroupsResult {
            total_groups: groups.len(),
            groups: listings,
        },
        cli_args,
    )
}

/// Load facts (with an optional raw IDS overlay) and configuration.
fn load_inputs(args: &FactsArgs) -> Result<(InMemoryFacts, PipelineConfig)> {
    let mut facts = InMemoryFacts::load_from_file(&args.facts)?;
    if let Some(ids_path) = &args.ids {
        let reader = BufReader::new(File::open(ids_path)?);
        let updated = facts.merge_ids_lines(reader)?;
        tracing::info!(updated, path = %ids_path.display(), "merged raw IDS lines");
    }

    let mut config = match &args.config {
        Some(path) => PipelineConfig::load_from_file(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(locale) = &args.locale {
        config.ids.locale = locale.clone();
    }
    if args.parallel {
        config.parallel = true;
    }
    config.validate()?;

    tracing::debug!(figures = facts.len(), "inputs loaded");
    Ok((facts, config))
}

fn single_locale(locale: &str) -> Result<char> {
    let mut chars = locale.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(FiguraError::invalid_config(format!(
            "locale must be a single tag letter, got {locale:?}"
        ))),
    }
}

fn keys_to_strings(keys: &[FigureKey]) -> Vec<String> {
    keys.iter().map(|k| k.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_locale() {
        assert_eq!(single_locale("J").unwrap(), 'J');
        assert!(single_locale("").is_err());
        assert!(single_locale("JK").is_err());
    }

    #[test]
    fn test_load_inputs_applies_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let facts_path = dir.path().join("facts.json");
        std::fs::write(
            &facts_path,
            r#"{"figures": {"好": {"ids": "好"}, "女": {"ids": "女"}}}"#,
        )
        .unwrap();
        let ids_path = dir.path().join("ids.txt");
        std::fs::write(&ids_path, "U+597D\t好\t⿰女子\nU+5B50\t子\t子\n").unwrap();

        let args = FactsArgs {
            facts: facts_path,
            ids: Some(ids_path),
            config: None,
            locale: Some("G".to_string()),
            parallel: true,
        };
        let (facts, config) = load_inputs(&args).unwrap();
        assert_eq!(facts.len(), 3);
        assert_eq!(config.ids.locale, "G");
        assert!(config.parallel);
    }
}
