use filedata_fs::NormalizedPath;
use rstest::rstest;

#[test]
fn test_normalize_backslashes_to_forward() {
    let path = NormalizedPath::new("foo\\bar\\baz.txt");
    assert_eq!(path.as_str(), "foo/bar/baz.txt");
}

#[test]
fn test_join_paths() {
    let base = NormalizedPath::new("foo/bar");
    let joined = base.join("baz.toml");
    assert_eq!(joined.as_str(), "foo/bar/baz.toml");
}

#[test]
fn test_file_name() {
    let path = NormalizedPath::new("foo/bar/baz.txt");
    assert_eq!(path.file_name(), Some("baz.txt"));
}

#[test]
fn test_exists_false_for_nonexistent() {
    let path = NormalizedPath::new("/nonexistent/path/that/does/not/exist.txt");
    assert!(!path.exists());
}

#[rstest]
#[case("config.toml", Some(".toml"))]
#[case("dir/lines.txt", Some(".txt"))]
#[case("archive.tar.gz", Some(".gz"))]
#[case("dir.d/file", None)]
#[case(".bashrc", None)]
#[case("..hidden", None)]
#[case("dir/.hidden.txt", Some(".txt"))]
#[case("trailing.", Some("."))]
#[case("", None)]
fn test_suffix(#[case] input: &str, #[case] expected: Option<&str>) {
    assert_eq!(NormalizedPath::new(input).suffix(), expected);
}

#[test]
fn test_suffix_is_case_sensitive() {
    let path = NormalizedPath::new("CONFIG.TOML");
    assert_eq!(path.suffix(), Some(".TOML"));
    assert_ne!(path.suffix(), Some(".toml"));
}
