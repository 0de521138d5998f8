//! End-to-end extraction over real folders.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use word_extractor::{
    extract_keywords, run, ExtractError, ExtractorConfig, Location, OutputConfig, OutputFormat,
    RankScope,
};

fn corpus() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("a.txt"),
        "Rust compiler. Rust compiler borrow. Rust.",
    )
    .unwrap();
    fs::write(
        dir.path().join("b.txt"),
        "Python interpreter. Python scripts.",
    )
    .unwrap();
    fs::write(dir.path().join("notes.md"), "Markdown markdown markdown.").unwrap();
    dir
}

fn config(folder: &Path, output: PathBuf) -> ExtractorConfig {
    ExtractorConfig {
        folder: folder.to_path_buf(),
        num_of_keywords: 2,
        keyword_limit_in_final_table: 3,
        output: OutputConfig {
            path: Some(output),
            ..Default::default()
        },
        ..Default::default()
    }
}

#[test]
fn test_run_writes_ranked_csv() {
    let dir = corpus();
    let out = TempDir::new().unwrap();
    let cfg = config(dir.path(), out.path().join("key_words_extracted.csv"));

    let summary = run(&cfg, None).unwrap();

    assert_eq!(summary.output, out.path().join("key_words_extracted.csv"));
    let content = fs::read_to_string(&summary.output).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines,
        vec![
            "rank,keyword,frequency,documents,locations",
            "1,rust,3,a.txt,a.txt:0;a.txt:1;a.txt:2",
            "2,compiler,2,a.txt,a.txt:0;a.txt:1",
            "3,python,2,b.txt,b.txt:0;b.txt:1",
        ]
    );
    assert_eq!(summary.table.stats.documents, 2);
}

#[test]
fn test_table_properties_hold() {
    let dir = corpus();
    let out = TempDir::new().unwrap();
    let mut cfg = config(dir.path(), out.path().join("out.csv"));
    cfg.keyword_limit_in_final_table = 10;
    cfg.output.include_sentences = true;

    let table = extract_keywords(&cfg, None).unwrap();

    assert!(table.len() <= cfg.keyword_limit_in_final_table);
    for (i, record) in table.keywords.iter().enumerate() {
        assert_eq!(record.rank, i + 1);
        assert!(record.frequency >= 1);
        assert!(record.locations.len() <= record.frequency);
        assert_eq!(record.sentences.len(), record.locations.len());
        for sentence in &record.sentences {
            assert!(
                sentence.to_lowercase().contains(&record.keyword),
                "{sentence:?} lacks {}",
                record.keyword
            );
        }
    }
    for pair in table.keywords.windows(2) {
        assert!(pair[0].frequency >= pair[1].frequency);
    }
    assert!(table.get("markdown").is_none());
}

#[test]
fn test_per_document_selection_covers_every_document() {
    let dir = corpus();
    let out = TempDir::new().unwrap();
    let mut cfg = config(dir.path(), out.path().join("out.csv"));
    cfg.num_of_keywords = 1;
    cfg.keyword_limit_in_final_table = 10;

    let table = extract_keywords(&cfg, None).unwrap();

    let keywords: Vec<&str> = table.keywords.iter().map(|r| r.keyword.as_str()).collect();
    assert_eq!(keywords, vec!["rust", "python"]);
}

#[test]
fn test_global_scope_can_skip_a_document() {
    let dir = corpus();
    let out = TempDir::new().unwrap();
    let mut cfg = config(dir.path(), out.path().join("out.csv"));
    cfg.num_of_keywords = 1;
    cfg.scope = RankScope::Global;

    let table = extract_keywords(&cfg, None).unwrap();

    assert_eq!(table.len(), 1);
    assert_eq!(table.keywords[0].keyword, "rust");
    assert_eq!(
        table.keywords[0].locations[0],
        Location::new("a.txt", 0)
    );
}

#[test]
fn test_runs_are_deterministic() {
    let dir = corpus();
    let out = TempDir::new().unwrap();
    let cfg = config(dir.path(), out.path().join("out.csv"));

    let first = fs::read(run(&cfg, None).unwrap().output).unwrap();
    let second = fs::read(run(&cfg, None).unwrap().output).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_empty_folder_writes_header_only() {
    let dir = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let cfg = config(dir.path(), out.path().join("out.csv"));

    let summary = run(&cfg, None).unwrap();

    assert!(summary.table.is_empty());
    assert_eq!(
        fs::read_to_string(summary.output).unwrap(),
        "rank,keyword,frequency,documents,locations\n"
    );
}

#[test]
fn test_missing_folder_is_an_error() {
    let dir = TempDir::new().unwrap();
    let cfg = config(&dir.path().join("nope"), dir.path().join("out.csv"));

    let err = run(&cfg, None).unwrap_err();

    assert!(matches!(err, ExtractError::FolderNotFound(_)));
    assert!(!dir.path().join("out.csv").exists());
}

#[test]
fn test_invalid_config_is_rejected_before_reading() {
    let dir = corpus();
    let mut cfg = config(dir.path(), dir.path().join("out.csv"));
    cfg.num_of_keywords = 0;

    let err = extract_keywords(&cfg, None).unwrap_err();
    assert!(matches!(err, ExtractError::InvalidConfig(_)));
}

#[test]
fn test_json_output() {
    let dir = corpus();
    let out = TempDir::new().unwrap();
    let mut cfg = config(dir.path(), out.path().join("out.json"));
    cfg.output.format = OutputFormat::Json;

    let summary = run(&cfg, None).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(summary.output).unwrap()).unwrap();
    assert_eq!(value["keywords"][0]["keyword"], "rust");
    assert_eq!(value["keywords"][0]["frequency"], 3);
    assert_eq!(value["stats"]["documents"], 2);
}

#[test]
fn test_separator_in_file_name_keeps_locations_unambiguous() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("a;b.txt"), "Rust compiler.").unwrap();
    let out = TempDir::new().unwrap();
    let cfg = config(dir.path(), out.path().join("out.csv"));

    let summary = run(&cfg, None).unwrap();

    let record = summary.table.get("rust").unwrap();
    assert_eq!(record.locations, vec![Location::new("a;b.txt", 0)]);
    let content = fs::read_to_string(summary.output).unwrap();
    let row = content.lines().nth(1).unwrap();
    assert_eq!(row, r"1,rust,1,a\;b.txt,a\;b.txt:0");

    // Unescaped `;` separates items: the locations cell holds one item.
    let locations = row.rsplit(',').next().unwrap();
    let separators = locations
        .char_indices()
        .filter(|&(i, c)| c == ';' && !locations[..i].ends_with('\\'))
        .count();
    assert_eq!(separators, 0);
}
