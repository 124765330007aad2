use std::fs;

use super::*;
use crate::unicode::Idc;

const STROKE_TABLE: &str = r#"[
  {
    "character": "好",
    "strokes": 6,
    "decomposition": "⿰女子",
    "pinyin": ["hǎo", "hào"],
    "definition": "good, excellent, fine",
    "radical": "女",
    "etymology": {"type": "ideographic", "hint": "A woman 女 with a son 子", "details": ["mother and child"]},
    "compounds": ["好人", "你好", "好好先生"]
  },
  {"character": "女", "strokes": 3, "decomposition": "", "radical": "女", "pinyin": "nǚ"},
  {"character": "子", "strokes": 3, "decomposition": null, "radical": "子"},
  {"character": "妈", "strokes": "6", "decomposition": "⿰女?", "radical": "女"},
  {"character": "xy", "strokes": 2},
  {"strokes": 4},
  {"character": "心", "strokes": -1, "compounds": null}
]"#;

const COMPONENT_MAP: &str = r#"{
  "心": {
    "meta": {"pinyin": ["xīn"], "definition": "heart", "radical": "心", "strokes": 4, "IDC": "—",
             "etymology": {"hint": "A heart"}, "compounds": ["心情", "小心"]},
    "related_characters": ["心", "想", "思", "xx"]
  },
  "想": {
    "meta": {"pinyin": "xiǎng", "radical": "心", "strokes": 13, "IDC": "⿱"},
    "related_characters": ["想"]
  },
  "思": {
    "meta": {"strokes": 9, "IDC": "⿱", "decomposition": "⿱田心"}
  },
  "ab": {"meta": {}}
}"#;

#[test]
fn test_stroke_table_fields() {
    let table = CharTable::from_stroke_json(STROKE_TABLE).unwrap();
    assert_eq!(table.shape(), TableShape::StrokeTable);
    let hao = table.get('好').unwrap();
    assert_eq!(hao.strokes, Some(6));
    assert_eq!(hao.pinyin.as_deref(), Some("hǎo"));
    assert_eq!(hao.radical.as_deref(), Some("女"));
    assert_eq!(hao.structure(), Some(Idc::LeftRight));
    assert_eq!(hao.compounds.len(), 3);
    let ety = hao.etymology.as_ref().unwrap();
    assert_eq!(ety.kind.as_deref(), Some("ideographic"));
    assert_eq!(ety.details.as_deref(), Some("mother and child"));
}

#[test]
fn test_stroke_table_skips_bad_keys() {
    let table = CharTable::from_stroke_json(STROKE_TABLE).unwrap();
    assert_eq!(table.len(), 5);
    assert_eq!(table.stats().skipped, 2);
    let order: String = table.iter().map(|e| e.character).collect();
    assert_eq!(order, "好女子妈心");
}

#[test]
fn test_stroke_table_lenient_values() {
    let table = CharTable::from_stroke_json(STROKE_TABLE).unwrap();
    assert_eq!(table.stroke_count('妈'), Some(6));
    assert_eq!(table.stroke_count('心'), None);
    assert!(table.get('心').unwrap().compounds.is_empty());
    assert!(table.get('子').unwrap().decomposition.is_empty());
}

#[test]
fn test_unknown_marker_counts_as_malformed() {
    let table = CharTable::from_stroke_json(STROKE_TABLE).unwrap();
    assert_eq!(table.stats().malformed, 1);
    let ma = table.get('妈').unwrap();
    assert!(ma.decomposition.is_malformed());
    assert_eq!(ma.structure(), None);
}

#[test]
fn test_duplicate_character_replaces_in_place() {
    let json = r#"[
      {"character": "女", "strokes": 2},
      {"character": "子", "strokes": 3},
      {"character": "女", "strokes": 3}
    ]"#;
    let table = CharTable::from_stroke_json(json).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.stroke_count('女'), Some(3));
    assert_eq!(table.iter().next().map(|e| e.character), Some('女'));
}

#[test]
fn test_component_map_fields_and_precomputed() {
    let table = CharTable::from_component_map_json(COMPONENT_MAP).unwrap();
    assert_eq!(table.shape(), TableShape::ComponentMap);
    assert_eq!(table.len(), 3);
    assert_eq!(table.stats().skipped, 1);

    let xin = table.get('心').unwrap();
    assert_eq!(xin.idc, None);
    assert_eq!(xin.definition.as_deref(), Some("heart"));
    assert_eq!(table.get('想').unwrap().structure(), Some(Idc::TopBottom));

    let related = table.precomputed().unwrap();
    assert_eq!(related.max_depth(), None);
    assert_eq!(related.get('心'), &['心', '想', '思']);
    assert!(related.get('思').is_empty());
    assert!(table.has_decompositions());
}

#[test]
fn test_radicals_are_self_radical_characters() {
    let table = CharTable::from_stroke_json(STROKE_TABLE).unwrap();
    assert_eq!(table.radicals(), vec!['女', '子']);
}

#[test]
fn test_wrong_shape_is_rejected() {
    assert!(matches!(
        CharTable::from_stroke_json("{}"),
        Err(TableError::UnsupportedShape("an object"))
    ));
    assert!(matches!(
        CharTable::from_component_map_json("[]"),
        Err(TableError::UnsupportedShape("an array"))
    ));
    assert!(matches!(
        CharTable::from_stroke_json("not json"),
        Err(TableError::Json(_))
    ));
}

#[test]
fn test_load_table_detects_shape() {
    let dir = tempfile::tempdir().unwrap();
    let strokes = dir.path().join("strokes.json");
    let map = dir.path().join("map.json");
    let scalar = dir.path().join("scalar.json");
    fs::write(&strokes, STROKE_TABLE).unwrap();
    fs::write(&map, COMPONENT_MAP).unwrap();
    fs::write(&scalar, "42").unwrap();

    assert_eq!(load_table(&strokes).unwrap().shape(), TableShape::StrokeTable);
    assert_eq!(load_table(&map).unwrap().shape(), TableShape::ComponentMap);
    assert!(matches!(
        load_table(&scalar),
        Err(TableError::UnsupportedShape("a number"))
    ));
    assert!(matches!(
        load_table(&dir.path().join("missing.json")),
        Err(TableError::Io(_))
    ));
}
