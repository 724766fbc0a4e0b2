use std::path::{Path, PathBuf};

use clap::Parser;
use rusqlite::Connection;
use vacana_config::dictionary::DictionaryConfig;
use vacana_core::gloss::{OutputFormat, SourceKind};
use vacana_lang_pali::{PaliProcessor, SourceSelection};

use crate::{Args, DictChoice};

/// Minimal DPD store with the words the offline battery exercises
fn write_store(dir: &Path) -> PathBuf {
    let path = dir.join("dpd.db");
    let conn = Connection::open(&path).unwrap();

    conn.execute_batch(
        r#"
        CREATE TABLE lookup (lookup_key TEXT PRIMARY KEY, headwords TEXT, grammar TEXT);
        CREATE TABLE dpd_headwords (
            id INTEGER PRIMARY KEY,
            lemma_1 TEXT, pos TEXT, grammar TEXT,
            meaning_1 TEXT, meaning_2 TEXT, meaning_lit TEXT,
            sanskrit TEXT, root_key TEXT, root_sign TEXT
        );
        CREATE TABLE dpd_roots (root TEXT, root_sign TEXT, root_group TEXT);

        INSERT INTO dpd_headwords VALUES
            (1, 'dhamma', 'masc', 'masc. nom. sg.', 'nature; teaching', '', '', 'dharma', 'dhar', '√'),
            (2, 'buddha', 'masc', 'masc. nom. sg.', 'awakened one', '', '', 'buddha', 'budh', '√'),
            (3, 'saṅgha', 'masc', 'masc. nom. sg.', 'community of monks', '', '', 'saṃgha', 'han', '√');
        INSERT INTO lookup VALUES
            ('dhammo', '[1]', '[["dhamma", "masc", "masc. nom. sg."]]');
        INSERT INTO dpd_roots VALUES
            ('dhar', '√', '1'),
            ('budh', '√', '4');
        "#,
    )
    .unwrap();

    path
}

fn store_config(db_path: &Path) -> DictionaryConfig {
    DictionaryConfig {
        store_path: Some(db_path.display().to_string()),
        ..Default::default()
    }
}

#[test]
fn base_coverage_from_primary_store() {
    let dir = tempfile::tempdir().unwrap();
    let config = store_config(&write_store(dir.path()));
    let processor = PaliProcessor::from_config(SourceSelection::Primary, &config).unwrap();

    let report = processor.analyze("buddha dhamma saṅgha").unwrap();

    assert_eq!(report.coverage(), 1.0);
    assert!(
        report
            .analyses
            .iter()
            .all(|a| a.source == Some(SourceKind::Primary))
    );
}

#[test]
fn compact_scenario_shape() {
    let dir = tempfile::tempdir().unwrap();
    let config = store_config(&write_store(dir.path()));
    let processor = PaliProcessor::from_config(SourceSelection::Primary, &config).unwrap();

    let report = processor.analyze("dhammo buddha sangha").unwrap();
    let output = report.render(OutputFormat::Compact);

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 3);
    for (line, word) in lines.iter().zip(["dhammo", "buddha", "sangha"]) {
        assert!(line.starts_with(&format!("{word} (noun) (masc. nom. sg.): ")), "bad line: {line}");
    }
}

#[test]
fn garbled_token_is_flagged_with_partial_coverage() {
    let dir = tempfile::tempdir().unwrap();
    let config = store_config(&write_store(dir.path()));
    let processor = PaliProcessor::from_config(SourceSelection::Primary, &config).unwrap();

    let report = processor.analyze("buddha zzgarbledzz").unwrap();
    let output = report.render(OutputFormat::Compact);

    assert_eq!(output.lines().count(), report.total());
    assert_eq!(output.lines().last(), Some("zzgarbledzz [not found]"));
    assert!(report.coverage() < 1.0);
}

#[test]
fn invalid_store_path_falls_back_transparently() {
    let config = store_config(Path::new("/nonexistent/dpd.db"));
    let processor = PaliProcessor::from_config(SourceSelection::Primary, &config).unwrap();

    let report = processor.analyze("mettā dukkha").unwrap();

    assert_eq!(report.coverage(), 1.0);
    assert!(
        report
            .analyses
            .iter()
            .all(|a| a.source == Some(SourceKind::Fallback))
    );
}

#[test]
fn primary_entry_is_never_served_by_fallback() {
    let dir = tempfile::tempdir().unwrap();
    let config = store_config(&write_store(dir.path()));
    let processor = PaliProcessor::from_config(SourceSelection::Primary, &config).unwrap();

    // "dhamma" exists in both the store and the embedded dictionary;
    // the store meaning must win
    let report = processor.analyze("dhamma").unwrap();
    let analysis = &report.analyses[0];

    assert_eq!(analysis.source, Some(SourceKind::Primary));
    assert_eq!(analysis.entry.as_ref().unwrap().meaning, "nature; teaching");
}

#[test]
fn fallback_selection_skips_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let config = store_config(&write_store(dir.path()));
    let processor = PaliProcessor::from_config(SourceSelection::Fallback, &config).unwrap();

    let report = processor.analyze("dhamma").unwrap();
    assert_eq!(report.analyses[0].source, Some(SourceKind::Fallback));
}

#[test]
fn rich_output_carries_field_labels() {
    let dir = tempfile::tempdir().unwrap();
    let config = store_config(&write_store(dir.path()));
    let processor = PaliProcessor::from_config(SourceSelection::Primary, &config).unwrap();

    let output = processor
        .analyze("dhammo")
        .unwrap()
        .render(OutputFormat::Rich);

    assert!(output.contains("  part of speech: noun"));
    assert!(output.contains("  morphology: masc. nom. sg."));
    assert!(output.contains("  meaning: nature; teaching"));
    assert!(output.contains("  root: √dhar · 1 (bhvādi)"));
    assert!(output.contains("  sanskrit: dharma"));
}

#[test]
fn text_and_file_flags_conflict() {
    let result = Args::try_parse_from(["vacana", "--text", "namo", "--file", "input.txt"]);
    assert!(result.is_err());
}

#[test]
fn argument_defaults() {
    let args = Args::try_parse_from(["vacana", "--text", "namo"]).unwrap();

    assert_eq!(args.dict, DictChoice::Primary);
    assert!(args.format.is_none());
    assert!(!args.debug);
    assert!(args.db.is_none());
}
