//! End-to-end scenarios for a full build.

use figura::prelude::*;
use tempfile::TempDir;

/// 旡 sits inside 既 (beside 皀) and twice inside 兓.
fn kanji_with_muki(list_second_user: bool) -> InMemoryFacts {
    let facts = InMemoryFacts::new()
        .with_figure("既", "⿰皀旡")
        .with_figure("兓", "⿰旡旡")
        .with_figure("皀", "⿱白匕")
        .with_figure("白", "白")
        .with_figure("匕", "匕")
        .with_figure("旡", "旡")
        .with_list(ListTag::Joyo, &["既"])
        .with_seeds(&["既"]);
    if list_second_user {
        facts.with_list(ListTag::Hyogai, &["兓"])
    } else {
        facts
    }
}

fn run(facts: &InMemoryFacts) -> BuildOutput {
    Pipeline::new(PipelineConfig::default()).run(facts).unwrap()
}

#[test]
fn test_component_used_in_two_priority_figures_is_meaningful() -> Result<()> {
    let output = Pipeline::new(PipelineConfig::default()).run(&kanji_with_muki(true))?;
    let record = output.figure("旡").unwrap();

    assert!(record.is_meaningful_component);
    assert_eq!(record.meaning_reason, "used in 既 兓");
    assert!(!record.is_standalone);
    assert!(record.is_priority);
    Ok(())
}

#[test]
fn test_component_with_one_priority_use_is_not_meaningful() {
    let output = run(&kanji_with_muki(false));
    let record = output.figure("旡").unwrap();

    assert!(!record.is_meaningful_component);
    assert_eq!(record.meaning_reason, "only used in 既");
    assert!(!record.is_priority);
}

/// 帀 sits under 師 (joyo) and 匝 (hyogai).
fn kanji_with_meguru() -> InMemoryFacts {
    InMemoryFacts::new()
        .with_figure("師", "⿰𠂤帀")
        .with_figure("匝", "⿷匚帀")
        .with_figure("𠂤", "𠂤")
        .with_figure("匚", "匚")
        .with_figure("帀", "帀")
        .with_list(ListTag::Joyo, &["師"])
        .with_list(ListTag::Hyogai, &["匝"])
}

#[test]
fn test_default_build_forces_exclusion() {
    let output = run(&kanji_with_meguru());
    let record = output.figure("帀").unwrap();
    assert!(!record.is_meaningful_component);
    assert_eq!(record.meaning_reason, "forced");
}

#[test]
fn test_forced_exclusion_ignores_usage() {
    let facts = kanji_with_meguru();

    let mut config = PipelineConfig::default();
    config.significance.forced_exclusions.clear();
    let unforced = Pipeline::new(config).run(&facts).unwrap();
    let record = unforced.figure("帀").unwrap();
    assert!(record.is_meaningful_component);
    assert_eq!(record.meaning_reason, "used in 匝 師");

    let mut config = PipelineConfig::default();
    config.significance.forced_exclusions.insert("𠂤".into());
    let forced = Pipeline::new(config).run(&facts).unwrap();
    assert_eq!(forced.figure("帀").unwrap().meaning_reason, "forced");
    assert_eq!(forced.figure("𠂤").unwrap().meaning_reason, "forced");
}

#[test]
fn test_seed_component_keeps_base_priority() {
    let facts = kanji_with_muki(false)
        .with_figure("慨", "⿰忄既")
        .with_figure("忄", "忄");
    let output = run(&facts);
    let record = output.figure("既").unwrap();

    assert!(record.is_standalone);
    assert!(record.is_priority);
    assert_eq!(
        record.meaning_reason,
        "base priority character or variant thereof"
    );
    assert_eq!(record.direct_uses, vec![FigureKey::from("慨")]);
}

#[test]
fn test_no_figure_contains_itself() {
    let output = run(&kanji_with_muki(true));
    for (key, record) in &output.figures {
        assert!(
            record.component_uses.iter().all(|u| &u.component != key),
            "{key} appears in its own decomposition"
        );
    }
}

#[test]
fn test_buckets_cover_every_figure() {
    let output = run(&kanji_with_muki(true));
    let buckets = output.summary.buckets;
    assert_eq!(
        buckets.standalone + buckets.meaningful_component + buckets.leftover,
        output.summary.figures
    );
    assert_eq!(output.summary.figures, 6);
}

#[test]
fn test_variant_group_is_recorded_on_members() {
    let facts = kanji_with_muki(true)
        .with_figure("旣", "⿰皀旡")
        .with_variant_source(VariantSource::new("kyujitai").with_pair("既", "旣"));
    let output = run(&facts);

    assert_eq!(output.variant_groups.len(), 1);
    assert_eq!(output.variant_groups[0].head.as_str(), "既");
    let old_form = output.figure("旣").unwrap();
    assert_eq!(old_form.variant_group, Some(FigureKey::from("既")));
    // A variant of a seed stands on its own.
    assert!(old_form.is_standalone);
    // 旣 is unlisted but shares a group with 既, so its use still counts.
    assert_eq!(output.figure("旡").unwrap().meaning_reason, "used in 既 旣 兓");
}

#[test]
fn test_parallel_build_matches_sequential() {
    let facts = kanji_with_muki(true);
    let sequential = run(&facts);

    let mut config = PipelineConfig::default();
    config.parallel = true;
    let parallel = Pipeline::new(config).run(&facts).unwrap();

    assert_eq!(sequential.figures, parallel.figures);
    assert_eq!(sequential.summary, parallel.summary);
}

#[test]
fn test_missing_component_aborts() {
    let facts = InMemoryFacts::new().with_figure("既", "⿰皀旡");
    let err = Pipeline::new(PipelineConfig::default())
        .run(&facts)
        .unwrap_err();
    assert!(matches!(err, FiguraError::MissingFigure { .. }));
}

#[test]
fn test_invalid_config_aborts() {
    let mut config = PipelineConfig::default();
    config.significance.min_priority_uses = 0;
    let err = Pipeline::new(config).run(&kanji_with_muki(true)).unwrap_err();
    assert!(matches!(err, FiguraError::InvalidConfig(_)));
}

#[test]
fn test_output_round_trips_through_files() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let output = run(&kanji_with_muki(true));

    let json_path = dir.path().join("graph.json");
    output.write_json(&json_path, true)?;
    assert_eq!(BuildOutput::read_json(&json_path)?, output);

    let bin_path = dir.path().join("graph.bin");
    output.write_bincode(&bin_path)?;
    assert_eq!(BuildOutput::read_bincode(&bin_path)?, output);
    Ok(())
}
