/// Tests for IdString

use super::*;

#[test]
fn test_same_text_same_id() {
    let a = IdString::new("shadowMap0");
    let b = IdString::new("shadowMap0");
    assert_eq!(a, b);
    assert_eq!(a.value(), b.value());
}

#[test]
fn test_different_text_different_id() {
    assert_ne!(IdString::new("shadowMap0"), IdString::new("shadowMap1"));
}

#[test]
fn test_friendly_text_roundtrip() {
    let id = IdString::new("id_string_tests::roundtrip");
    assert_eq!(id.friendly_text(), "id_string_tests::roundtrip");
    assert_eq!(format!("{}", id), "id_string_tests::roundtrip");
}

#[test]
fn test_from_integer() {
    assert_eq!(IdString::from(7u32), IdString::new("7"));
    assert_eq!(IdString::from(3usize), IdString::new("3"));
}

#[test]
fn test_concat_embeds_both_parts() {
    let name = IdString::new("shadowMap0").concat(7u32);
    assert_eq!(name.friendly_text(), "shadowMap0#7");
}

#[test]
fn test_concat_separator_prevents_ambiguity() {
    let a = IdString::new("rt1").concat(12u32);
    let b = IdString::new("rt11").concat(2u32);
    assert_ne!(a, b);
}

#[test]
fn test_concat_chains() {
    let name = IdString::new("gbuffer").concat(2u32).concat(0usize);
    assert_eq!(name.friendly_text(), "gbuffer#2#0");
}

#[test]
fn test_debug_shows_text() {
    let id = IdString::new("dbg");
    assert_eq!(format!("{:?}", id), "IdString(\"dbg\")");
}

#[test]
fn test_usable_as_hash_key() {
    let mut map = rustc_hash::FxHashMap::default();
    map.insert(IdString::new("a"), 1);
    map.insert(IdString::new("b"), 2);
    assert_eq!(map.get(&IdString::from("a")), Some(&1));
}
