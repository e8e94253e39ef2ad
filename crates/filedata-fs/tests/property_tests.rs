use filedata_fs::NormalizedPath;
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_normalization_has_no_backslashes(s in "\\PC*") {
        let path = NormalizedPath::new(&s);
        prop_assert!(!path.as_str().contains('\\'));

        let roundtripped = NormalizedPath::new(path.to_native());
        prop_assert_eq!(path, roundtripped);
    }

    #[test]
    fn test_with_suffix_sets_suffix(stem in "[a-z][a-z0-9_]{0,12}", ext in "[a-z]{1,5}") {
        let path = NormalizedPath::new(format!("dir/{stem}.old"));
        let suffix = format!(".{ext}");
        let renamed = path.with_suffix(&suffix);

        prop_assert_eq!(renamed.suffix(), Some(suffix.as_str()));
        prop_assert_eq!(renamed.as_str(), format!("dir/{stem}{suffix}"));
    }

    #[test]
    fn test_suffix_starts_with_dot(s in "[a-z./]{0,20}") {
        if let Some(suffix) = NormalizedPath::new(&s).suffix() {
            prop_assert!(suffix.starts_with('.'));
            prop_assert!(!suffix.contains('/'));
        }
    }
}
