// envmap: Platform-aware environment variable maps
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tests for the environment module.

use super::{
    CanonicalKeyRegistry, EnvList, EnvOptions, EnvSource, EnvValue, EnvironmentMap, merge,
    merge_impl, merge_preserve_null,
};
use crate::error::LayerError;
use std::collections::BTreeMap;

const ENV_A: [(&str, Option<&str>); 2] = [("A", Some("x")), ("B", None)];
const ENV_B: [(&str, Option<&str>); 2] = [("a", Some("T")), ("u", Some("BBQ"))];

fn case_insensitive() -> EnvironmentMap {
    EnvironmentMap::with_options(EnvOptions::builder().case_insensitive(true).build())
}

fn case_sensitive() -> EnvironmentMap {
    EnvironmentMap::with_options(EnvOptions::builder().case_insensitive(false).build())
}

fn keys(env: &EnvironmentMap) -> Vec<&str> {
    env.keys().collect()
}

// --- Registry ---

#[test]
fn test_registry_first_spelling_becomes_canonical() {
    let mut registry = CanonicalKeyRegistry::new();
    assert_eq!(registry.resolve("Path", true), "Path");
    assert_eq!(registry.resolve("PATH", true), "Path");
    assert_eq!(registry.resolve("path", false), "Path");
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_registry_lookup_does_not_register() {
    let mut registry = CanonicalKeyRegistry::new();
    assert_eq!(registry.resolve("Home", false), "Home");
    assert_eq!(registry.lookup("home"), "home");
    assert!(registry.is_empty());
}

#[test]
fn test_registry_folding_is_unicode_aware() {
    let mut registry = CanonicalKeyRegistry::new();
    registry.resolve("straße", true);
    assert_eq!(registry.lookup("STRASSE"), "straße");
}

// --- Basic operations ---

#[test]
fn test_env_basic_operations() {
    let mut env = case_sensitive();
    env.set("FOO", "bar");

    assert_eq!(env.get("FOO"), Some(Some("bar")));
    assert_eq!(env.get("foo"), None);
    assert_eq!(env.get_str("FOO"), Some("bar"));
    assert!(env.has("FOO"));
    assert!(!env.has("NOTEXIST"));
    assert_eq!(env.len(), 1);
}

#[test]
fn test_env_case_folding_keeps_first_spelling() {
    let mut env = case_insensitive();
    env.set("Path", "/usr/bin");
    env.set("PATH", "/bin");

    assert_eq!(env.get_str("path"), Some("/bin"));
    assert_eq!(env.get_str("pAtH"), Some("/bin"));
    assert_eq!(keys(&env), ["Path"]);
}

#[test]
fn test_env_read_of_unset_key_does_not_register() {
    let mut env = case_insensitive();
    assert_eq!(env.get("Foo"), None);
    assert!(!env.has("fOO"));
    env.set("FOO", "1");
    assert_eq!(keys(&env), ["FOO"]);
}

#[test]
fn test_env_null_removes_without_preserve() {
    let mut env = case_sensitive();
    env.set("KEY", "value");
    env.set("KEY", None::<&str>);

    assert!(!env.has("KEY"));
    assert_eq!(env.get("KEY"), None);
    assert!(env.is_empty());
}

#[test]
fn test_env_null_is_stored_with_preserve() {
    let mut env = EnvironmentMap::create_preserve_null(None::<&EnvList>);
    env.set("KEY", EnvValue::Null);

    assert!(env.has("KEY"));
    assert_eq!(env.get("KEY"), Some(None));
    assert_eq!(env.get_str("KEY"), None);
    assert!(env.preserve_null());
}

#[test]
fn test_env_unset_always_removes() {
    let mut env = EnvironmentMap::create(None::<&EnvList>, true, false);
    env.set("KEY", "value");
    env.set("KEY", EnvValue::Unset);
    assert!(!env.has("KEY"));
}

#[test]
fn test_env_coerces_non_string_values() {
    let mut env = case_sensitive();
    env.set("INT", 42)
        .set("NEG", -7_i64)
        .set("BOOL", true)
        .set("CHAR", 'x')
        .set("FLOAT", 1.5)
        .set("JSON", serde_json::json!([1, "two"]));

    insta::assert_snapshot!(env.to_string(), @r#"
    INT=42
    NEG=-7
    BOOL=true
    CHAR=x
    FLOAT=1.5
    JSON=[1,"two"]
    "#);
}

#[test]
fn test_env_json_null_follows_null_policy() {
    let mut env = case_sensitive();
    env.set("A", serde_json::Value::Null);
    assert!(!env.has("A"));

    let mut env = EnvironmentMap::create(None::<&EnvList>, true, false);
    env.set("A", serde_json::Value::Null);
    assert_eq!(env.get("A"), Some(None));
}

#[test]
fn test_env_json_floats_use_shortest_form() {
    let list = EnvList::from_json_str(r#"{"F": 1.0, "G": 2.5, "I": 10}"#, "<test>").unwrap();
    let env = EnvironmentMap::create(Some(&list), false, false);
    insta::assert_snapshot!(format!("{env:?}"), @r#"{"F": "1", "G": "2.5", "I": "10"}"#);
}

#[test]
fn test_env_removal_write_claims_casing() {
    let nulls = [("path", None::<&str>)];
    let values = [("PATH", Some("/bin"))];
    let env = merge_impl(false, true, [Some(&nulls), Some(&values)]);

    assert_eq!(keys(&env), ["path"]);
    assert_eq!(env.get_str("Path"), Some("/bin"));
}

// --- Enumeration ---

#[test]
fn test_env_reinsert_moves_key_to_end() {
    let mut env = case_sensitive();
    env.set("A", "1").set("B", "2").set("C", "3");

    assert!(env.delete("B"));
    env.set("B", "4");

    assert_eq!(keys(&env), ["A", "C", "B"]);
    assert_eq!(env.get_str("C"), Some("3"));
}

#[test]
fn test_env_delete_missing_key_is_noop() {
    let mut env = case_sensitive();
    env.set("A", "1").set("B", "2");

    assert!(!env.delete("Z"));
    assert!(!env.delete("a"));
    assert_eq!(keys(&env), ["A", "B"]);
}

#[test]
fn test_env_delete_is_case_insensitive() {
    let mut env = case_insensitive();
    env.set("Path", "/bin");
    assert!(env.delete("PATH"));
    assert!(env.is_empty());
}

#[test]
fn test_env_canonical_casing_sticks_across_delete() {
    let mut env = case_insensitive();
    env.set("Path", "/usr/bin");
    env.delete("PATH");
    env.set("PATH", "/bin");

    assert_eq!(keys(&env), ["Path"]);
    assert_eq!(env.get_str("PATH"), Some("/bin"));
}

#[test]
fn test_env_entries_match_keys() {
    let env = EnvironmentMap::create(Some(&ENV_A), true, false);
    let entries: Vec<_> = env.entries().collect();
    assert_eq!(entries, [("A", Some("x")), ("B", None)]);
    assert_eq!(env.entries().len(), keys(&env).len());
}

// --- Construction ---

#[test]
fn test_create_from_pairs_with_duplicate_folds() {
    let pairs = [("DD", "FF"), ("dd", "FE")];

    let sensitive = EnvironmentMap::create(Some(&pairs), false, false);
    insta::assert_snapshot!(format!("{sensitive:?}"), @r#"{"DD": "FF", "dd": "FE"}"#);

    let mut insensitive = EnvironmentMap::create(Some(&pairs), false, true);
    insta::assert_snapshot!(format!("{insensitive:?}"), @r#"{"DD": "FE"}"#);
    assert_eq!(insensitive.get_str("dd"), Some("FE"));
    assert!(insensitive.has("dD"));
    assert!(insensitive.has("Dd"));
    assert!(!insensitive.has("DD-non-exist-key"));
    assert_eq!(insensitive.get("DD-NON-EXIST-key"), None);
    assert_eq!(keys(&insensitive), ["DD"]);

    insensitive.set("DD-NON-EXIST-KEY", "bb");
    assert_eq!(insensitive.get_str("DD-NON-EXIST-KEY"), Some("bb"));
    assert_eq!(keys(&insensitive), ["DD", "DD-NON-EXIST-KEY"]);

    insensitive.set("DD-NON-EXIST-key", "cc");
    assert_eq!(insensitive.get_str("DD-NON-EXIST-KEY"), Some("cc"));
    assert_eq!(keys(&insensitive), ["DD", "DD-NON-EXIST-KEY"]);
}

#[test]
fn test_create_locale_override() {
    let locale = [("LANG", "C"), ("LC_ALL", "C"), ("lc_all", "GBK")];

    let sensitive = EnvironmentMap::create(Some(&locale), false, false);
    assert_eq!(keys(&sensitive), ["LANG", "LC_ALL", "lc_all"]);

    let insensitive = EnvironmentMap::create(Some(&locale), false, true);
    insta::assert_snapshot!(insensitive.to_string(), @r"
    LANG=C
    LC_ALL=GBK
    ");
}

#[test]
fn test_create_without_source_is_empty() {
    let env = EnvironmentMap::create(None::<&EnvList>, false, true);
    assert!(env.is_empty());
    assert!(env.case_insensitive());
    assert!(!env.preserve_null());
}

#[test]
fn test_create_from_btreemap_and_map() {
    let mut vars = BTreeMap::new();
    vars.insert("KEY2".to_string(), "value2".to_string());
    vars.insert("KEY1".to_string(), "value1".to_string());

    let from_btree = EnvironmentMap::create(Some(&vars), false, false);
    assert_eq!(keys(&from_btree), ["KEY1", "KEY2"]);

    let copy = EnvironmentMap::create(Some(&from_btree), false, false);
    assert_eq!(copy, from_btree);
}

#[test]
fn test_from_iterator_and_extend() {
    let mut env: EnvironmentMap = [("A", "1"), ("B", "2")].into_iter().collect();
    env.extend([("C", EnvValue::from("3")), ("A", EnvValue::Unset)]);
    assert_eq!(keys(&env), ["B", "C"]);
}

// --- Merge ---

#[test]
fn test_merge_case_sensitive_drops_nulls() {
    let result = merge_impl(false, false, [Some(&ENV_A), None, Some(&ENV_B)]);
    insta::assert_snapshot!(format!("{result:?}"), @r#"{"A": "x", "a": "T", "u": "BBQ"}"#);
}

#[test]
fn test_merge_case_sensitive_preserves_nulls() {
    let result = merge_impl(true, false, [Some(&ENV_A), None, Some(&ENV_B)]);
    insta::assert_snapshot!(format!("{result:?}"), @r#"{"A": "x", "B": null, "a": "T", "u": "BBQ"}"#);
}

#[test]
fn test_merge_case_insensitive_drops_nulls() {
    let result = merge_impl(false, true, [Some(&ENV_A), None, Some(&ENV_B)]);
    insta::assert_snapshot!(format!("{result:?}"), @r#"{"A": "T", "u": "BBQ"}"#);
}

#[test]
fn test_merge_case_insensitive_preserves_nulls() {
    let result = merge_impl(true, true, [Some(&ENV_A), None, Some(&ENV_B)]);
    insta::assert_snapshot!(format!("{result:?}"), @r#"{"A": "T", "B": null, "u": "BBQ"}"#);
    assert_eq!(keys(&result), ["A", "B", "u"]);
}

#[test]
fn test_merge_later_null_unsets_earlier_value() {
    let base = [("A", Some("x"))];
    let overlay = [("a", None)];

    let dropped = merge_impl(false, true, [Some(&base[..]), Some(&overlay[..])]);
    assert!(dropped.is_empty());

    let kept = merge_impl(true, true, [Some(&base[..]), Some(&overlay[..])]);
    assert_eq!(kept.get("A"), Some(None));
}

#[test]
fn test_merge_self_is_idempotent() {
    let env = EnvironmentMap::create(Some(&[("B", "2"), ("A", "1"), ("b", "3")]), false, true);

    let once = merge_impl(false, true, [Some(&env)]);
    let twice = merge_impl(false, true, [Some(&env), Some(&env)]);

    assert_eq!(once, env);
    assert_eq!(twice, env);
    assert_eq!(keys(&twice), ["B", "A"]);
}

#[test]
fn test_merge_nothing() {
    let result = merge_impl(false, false, [None::<&EnvList>, None]);
    assert!(result.is_empty());
}

#[test]
fn test_merge_mixed_sources() {
    let mut list = EnvList::new();
    list.push("LANG", "C").push("TMP", EnvValue::Null);
    let map = EnvironmentMap::create(Some(&[("TMP", Some("/tmp"))]), true, false);

    let sources: [Option<&dyn EnvSource>; 3] = [Some(&list), None, Some(&map)];
    let result = merge_preserve_null(sources);

    assert_eq!(result.get_str("LANG"), Some("C"));
    assert_eq!(result.get_str("TMP"), Some("/tmp"));
    assert!(result.preserve_null());
}

#[test]
fn test_merge_default_policy_drops_stored_nulls() {
    let preserved = EnvironmentMap::create(Some(&ENV_A), true, false);
    let result = merge([Some(&preserved)]);

    assert!(!result.preserve_null());
    assert_eq!(result.get_str("A"), Some("x"));
    assert!(!result.has("B"));
}

// --- Formatting ---

#[test]
fn test_display_writes_bare_key_for_null() {
    let env = merge_impl(true, false, [Some(&ENV_A), None, Some(&ENV_B)]);
    insta::assert_snapshot!(env.to_string(), @r"
    A=x
    B
    a=T
    u=BBQ
    ");
}

#[test]
fn test_formatting_excludes_registry() {
    let mut env = case_insensitive();
    env.set("Path", "/bin");
    env.delete("PATH");
    assert_eq!(format!("{env:?}"), "{}");
    assert_eq!(env.to_string(), "");
}

#[test]
fn test_serialize_keeps_order_and_nulls() {
    let env = merge_impl(true, true, [Some(&ENV_A), None, Some(&ENV_B)]);
    let json = serde_json::to_string(&env).unwrap();
    assert_eq!(json, r#"{"A":"T","B":null,"u":"BBQ"}"#);
}

// --- EnvList ---

#[test]
fn test_env_list_from_json_keeps_document_order() {
    let list = EnvList::from_json_str(
        r#"{"DD": "FF", "dd": "FE", "N": 3, "B": false, "Z": null}"#,
        "<test>",
    )
    .unwrap();

    let pairs: Vec<_> = list.iter().map(|(k, v)| (k, v.clone())).collect();
    assert_eq!(
        pairs,
        [
            ("DD", EnvValue::from("FF")),
            ("dd", EnvValue::from("FE")),
            ("N", EnvValue::from("3")),
            ("B", EnvValue::from("false")),
            ("Z", EnvValue::Null),
        ]
    );

    let env = EnvironmentMap::create(Some(&list), false, true);
    insta::assert_snapshot!(format!("{env:?}"), @r#"{"DD": "FE", "N": "3", "B": "false"}"#);
}

#[test]
fn test_env_list_rejects_non_object() {
    let err = EnvList::from_json_str("[1, 2]", "layer.json").unwrap_err();
    assert!(matches!(
        err,
        LayerError::NotAnObject {
            found: "array",
            ..
        }
    ));
}

#[test]
fn test_env_list_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("layer.json");
    std::fs::write(&path, r#"{"LANG": "C", "TZ": null}"#).unwrap();

    let list = EnvList::from_file(&path).unwrap();
    assert_eq!(list.len(), 2);

    let err = EnvList::from_file(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, LayerError::ReadError { .. }));
}

#[test]
fn test_env_list_rejects_invalid_json() {
    let err = EnvList::from_json_str("{\"A\": ", "layer.json").unwrap_err();
    assert!(matches!(err, LayerError::ParseError { .. }));
    assert!(err.to_string().starts_with("failed to parse layer 'layer.json'"));
}

#[test]
fn test_parse_assignment() {
    assert_eq!(
        EnvList::parse_assignment("A=b=c").unwrap(),
        ("A".to_string(), EnvValue::from("b=c"))
    );
    assert_eq!(
        EnvList::parse_assignment("EMPTY=").unwrap(),
        ("EMPTY".to_string(), EnvValue::from(""))
    );
    assert!(EnvList::parse_assignment("=x").is_err());
    assert!(EnvList::parse_assignment("NOVALUE").is_err());
}
