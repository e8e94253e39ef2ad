//! Tests for tab-separated tables

use filedata::{Error, ErrorKind, LoadOptions, SaveOptions, TsvData, TsvOptions, TsvTable};
use filedata_fs::NormalizedPath;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn strings(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

fn sample() -> TsvData {
    TsvData::new(TsvTable::new(
        strings(&["id", "name"]),
        vec![strings(&["1", "alpha"]), strings(&["2", ""])],
    ))
    .unwrap()
}

#[test]
fn test_save_load_roundtrip() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("table.tsv"));

    let data = sample();
    data.save(&path).unwrap();

    assert_eq!(
        std::fs::read_to_string(path.to_native()).unwrap(),
        "id\tname\n1\talpha\n2\t\n"
    );
    assert_eq!(TsvData::load(&path).unwrap(), data);
}

#[test]
fn test_empty_table_is_empty_file() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("empty.tsv"));

    TsvData::default().save(&path).unwrap();
    assert_eq!(std::fs::read_to_string(path.to_native()).unwrap(), "");
    assert_eq!(TsvData::load(&path).unwrap(), TsvData::default());
}

#[test]
fn test_load_ragged_file() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("ragged.tsv"));
    std::fs::write(path.to_native(), "a\tb\n1\n").unwrap();

    let err = TsvData::load(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Load);
    match err {
        Error::Load { source, .. } => assert_eq!(source.kind(), ErrorKind::Format),
        other => panic!("expected a load error, got {other:?}"),
    }
}

#[test]
fn test_strip_on_load() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("padded.tsv"));
    std::fs::write(path.to_native(), " id \tname\n 1\talpha \n").unwrap();

    let options = LoadOptions::default().format(TsvOptions { strip: true });
    let data = TsvData::load_with(&path, &options).unwrap();
    assert_eq!(data.columns(), strings(&["id", "name"]));
    assert_eq!(data.rows(), vec![strings(&["1", "alpha"])]);

    let raw = TsvData::load(&path).unwrap();
    assert_eq!(raw.columns(), strings(&[" id ", "name"]));
}

#[test]
fn test_strip_on_save() {
    let temp = TempDir::new().unwrap();
    let path = NormalizedPath::new(temp.path().join("out.tsv"));

    let data = TsvData::new(TsvTable::new(strings(&[" a"]), vec![strings(&["x "])])).unwrap();
    let options = SaveOptions::default().format(TsvOptions { strip: true });
    data.save_with(&path, &options).unwrap();

    assert_eq!(std::fs::read_to_string(path.to_native()).unwrap(), "a\nx\n");
}

#[test]
fn test_text_roundtrip() {
    let data = sample();
    let text = data.to_text().unwrap();
    assert_eq!(text, "id\tname\n1\talpha\n2\t\n");
    assert_eq!(TsvData::from_text(&text).unwrap(), data);
}
