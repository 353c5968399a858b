//! Drives full commands against dictionary files on disk

#![allow(clippy::expect_used, clippy::unwrap_used)]

use clap::Parser;
use pretty_assertions::assert_eq;
use prspdict_cli::{Cli, run};
use prspdict_formats::test_utils::{DictionaryImage, DictionaryImageBuilder};
use std::io::Write;
use tempfile::NamedTempFile;

fn dictionary() -> (DictionaryImage, NamedTempFile) {
    let image = DictionaryImageBuilder::new()
        .entry("cat", "a small feline", "chat")
        .entry("catalog", "a list of items", "catalogue")
        .entry("do", "to perform", "faire")
        .build();
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(&image.bytes).expect("Failed to write dictionary");
    file.flush().unwrap();
    (image, file)
}

fn run_args(file: &NamedTempFile, args: &[&str]) -> anyhow::Result<String> {
    let path = file.path().to_str().unwrap();
    let mut argv = vec!["prspdict", path];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv)?;

    let mut out = Vec::new();
    run(&cli, &mut out)?;
    Ok(String::from_utf8(out)?)
}

#[test]
fn exact_match_prints_article() {
    let (_, file) = dictionary();
    let output = run_args(&file, &["e", "catalog"]).unwrap();
    assert_eq!(output, "match\na list of items\n");
}

#[test]
fn exact_miss_prints_best_match_list() {
    let (image, file) = dictionary();
    let output = run_args(&file, &["e", "dog"]).unwrap();
    assert_eq!(
        output,
        format!(
            "list\ncat\tchat\ncatalog\tcatalogue\ndo\tfaire\n{}\t{}\n",
            image.header.offset_word_list, image.header.offset_radix
        )
    );
}

#[test]
fn next_and_previous_pages() {
    let (image, file) = dictionary();
    let catalog = image.word_list_offsets["catalog"];

    let output = run_args(&file, &["n", &catalog.to_string(), "--page-size", "1"]).unwrap();
    assert_eq!(
        output,
        format!("list\ncatalog\tcatalogue\n{catalog}\t{}\n", image.word_list_offsets["do"])
    );

    let output = run_args(&file, &["p", &catalog.to_string(), "--page-size", "1"]).unwrap();
    assert_eq!(
        output,
        format!("list\ncat\tchat\n{}\t{catalog}\n", image.word_list_offsets["cat"])
    );
}

#[test]
fn article_at_offset() {
    let (image, file) = dictionary();
    let offset = image.article_offsets["do"].to_string();
    let output = run_args(&file, &["x", &offset]).unwrap();
    assert_eq!(output, "match\nto perform\n");
}

#[test]
fn json_output() {
    let (_, file) = dictionary();
    let output = run_args(&file, &["l", "cat", "--json"]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["entries"][0]["word"], "cat");
    assert_eq!(value["entries"].as_array().unwrap().len(), 3);
}

#[test]
fn bad_offset_is_error() {
    let (_, file) = dictionary();
    assert!(run_args(&file, &["n", "cat"]).is_err());
    assert!(run_args(&file, &["x", "0"]).is_err());
}

#[test]
fn missing_dictionary_is_error() {
    let cli = Cli::try_parse_from(["prspdict", "/nonexistent/dict", "e", "cat"]).unwrap();
    let err = run(&cli, &mut Vec::new()).unwrap_err();
    assert!(format!("{err:#}").contains("failed to open"));
}
