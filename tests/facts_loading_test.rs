use std::fs;
use std::io::BufReader;

use figura::prelude::*;
use tempfile::TempDir;

const FACTS: &str = r#"{
    "figures": {
        "你": { "ids": "你", "lists": ["jinmeiyo"], "frequency": 900 },
        "亻": { "ids": "亻" },
        "尔": { "ids": "尔" },
        "尓": { "ids": "尓" }
    },
    "priority_seeds": ["你"],
    "variant_sources": [
        { "name": "itaiji", "pairs": [["尔", "尓"]] }
    ]
}"#;

const IDS_LINES: &str = "# cjkvi-style decomposition data\n\
                         U+4F60\t你\t⿰亻尔[GTKV]\t⿰亻尓[J]\n";

fn write_inputs(dir: &TempDir) -> (std::path::PathBuf, std::path::PathBuf) {
    let facts_path = dir.path().join("facts.json");
    let ids_path = dir.path().join("ids.txt");
    fs::write(&facts_path, FACTS).unwrap();
    fs::write(&ids_path, IDS_LINES).unwrap();
    (facts_path, ids_path)
}

#[test]
fn test_json_facts_with_ids_overlay() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let (facts_path, ids_path) = write_inputs(&dir);

    let mut facts = InMemoryFacts::load_from_file(&facts_path)?;
    let updated = facts.merge_ids_lines(BufReader::new(fs::File::open(&ids_path)?))?;
    assert_eq!(updated, 1);
    assert_eq!(facts.decomposition("你"), Some("⿰亻尔[GTKV]\t⿰亻尓[J]"));
    assert_eq!(facts.corpus_frequency("你"), 900);

    let output = Pipeline::default().run(&facts)?;
    let record = output.figure("你").unwrap();
    assert_eq!(
        record.components,
        vec![FigureKey::from("亻"), FigureKey::from("尓")]
    );
    assert_eq!(output.variant_groups.len(), 1);
    Ok(())
}

#[test]
fn test_locale_selects_alternative() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let (facts_path, ids_path) = write_inputs(&dir);

    let mut facts = InMemoryFacts::load_from_file(&facts_path)?;
    facts.merge_ids_lines(BufReader::new(fs::File::open(&ids_path)?))?;

    let mut config = PipelineConfig::default();
    config.ids.locale = "G".to_string();
    let output = Pipeline::new(config).run(&facts)?;
    let record = output.figure("你").unwrap();
    assert_eq!(
        record.components,
        vec![FigureKey::from("亻"), FigureKey::from("尔")]
    );
    Ok(())
}

#[test]
fn test_config_file_is_applied() -> Result<()> {
    let dir = TempDir::new().unwrap();
    let config_path = dir.path().join("figura.json");
    fs::write(
        &config_path,
        r#"{ "significance": { "forced_exclusions": ["亻"] }, "parallel": true }"#,
    )
    .unwrap();

    let config = PipelineConfig::load_from_file(&config_path)?;
    assert!(config.parallel);
    assert_eq!(config.ids.locale, "J");
    assert!(config.significance.forced_exclusions.contains("亻"));
    Ok(())
}

#[test]
fn test_malformed_facts_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "{ \"figures\": [").unwrap();
    assert!(InMemoryFacts::load_from_file(&path).is_err());
    assert!(InMemoryFacts::load_from_file(dir.path().join("absent.json")).is_err());
}
