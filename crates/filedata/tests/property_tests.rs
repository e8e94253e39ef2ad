//! Property-based tests for normalization and text round-trips

use std::collections::BTreeMap;

use filedata::{TomlData, TsvData, TsvTable, TxtData, Value, normalize};
use proptest::prelude::*;

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        "[a-z ]{0,8}".prop_map(Value::from),
        any::<i64>().prop_map(Value::Integer),
        any::<bool>().prop_map(Value::Boolean),
        any::<f64>().prop_map(Value::from),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map("[a-z]{1,6}", inner, 0..4).prop_map(Value::Table),
        ]
    })
}

fn arb_config() -> impl Strategy<Value = BTreeMap<String, Value>> {
    let leaf = prop_oneof![
        "[a-zA-Z0-9 _-]{0,12}".prop_map(Value::from),
        any::<i64>().prop_map(Value::Integer),
        any::<bool>().prop_map(Value::Boolean),
        (-1.0e6..1.0e6f64).prop_map(Value::Float),
    ];
    let nested = prop::collection::btree_map("[a-z]{1,6}", leaf.clone(), 1..4).prop_map(Value::Table);
    prop::collection::btree_map("[a-z]{1,6}", prop_oneof![leaf, nested], 0..6)
}

proptest! {
    #[test]
    fn prop_normalize_idempotent(value in arb_value()) {
        let once = normalize(&value).unwrap();
        let twice = normalize(&once).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_txt_text_roundtrip(lines in prop::collection::vec("[\\s\\S]{0,16}", 0..8)) {
        let data = TxtData::new(lines).unwrap();
        let text = data.to_text().unwrap();
        prop_assert_eq!(TxtData::from_text(&text).unwrap(), data);
    }

    #[test]
    fn prop_toml_text_roundtrip(table in arb_config()) {
        let data = TomlData::from_value(&table).unwrap();
        let text = data.to_text().unwrap();
        prop_assert_eq!(TomlData::from_text(&text).unwrap(), data);
    }

    #[test]
    fn prop_tsv_text_roundtrip(
        rows in prop::collection::vec(prop::collection::vec("[a-z0-9 ]{0,6}", 2), 0..5)
    ) {
        let table = TsvTable::new(vec!["left".to_string(), "right".to_string()], rows);
        let data = TsvData::new(table).unwrap();
        let text = data.to_text().unwrap();
        prop_assert_eq!(TsvData::from_text(&text).unwrap(), data);
    }
}
