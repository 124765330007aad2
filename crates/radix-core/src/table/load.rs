use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::{info, warn};

use super::{CharTable, CharacterEntry, Decomposition, Etymology, TableError, TableShape};
use crate::decomp::ComponentIndex;
use crate::unicode::{single_char, Idc};

/// Read a table file, picking the parser from the top-level JSON value.
pub fn load_table(path: &Path) -> Result<CharTable, TableError> {
    let content = fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&content)?;
    let table = match value {
        Value::Array(records) => CharTable::from_stroke_records(records),
        Value::Object(map) => CharTable::from_component_map(map),
        other => return Err(TableError::UnsupportedShape(json_kind(&other))),
    };
    info!(
        path = %path.display(),
        shape = ?table.shape(),
        entries = table.len(),
        skipped = table.stats().skipped,
        malformed = table.stats().malformed,
        "loaded character table"
    );
    Ok(table)
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl CharTable {
    /// Parse a stroke table: a JSON array of character records.
    pub fn from_stroke_json(json: &str) -> Result<Self, TableError> {
        match serde_json::from_str::<Value>(json)? {
            Value::Array(records) => Ok(Self::from_stroke_records(records)),
            other => Err(TableError::UnsupportedShape(json_kind(&other))),
        }
    }

    /// Parse a component map: a JSON object keyed by character.
    pub fn from_component_map_json(json: &str) -> Result<Self, TableError> {
        match serde_json::from_str::<Value>(json)? {
            Value::Object(map) => Ok(Self::from_component_map(map)),
            other => Err(TableError::UnsupportedShape(json_kind(&other))),
        }
    }

    fn from_stroke_records(records: Vec<Value>) -> Self {
        let mut table = Self::empty(TableShape::StrokeTable);
        for (i, value) in records.into_iter().enumerate() {
            let record: StrokeRecord = match serde_json::from_value(value) {
                Ok(r) => r,
                Err(e) => {
                    warn!(record = i, "skipping unparsable record: {e}");
                    table.stats.skipped += 1;
                    continue;
                }
            };
            let Some(character) = single_char(&record.character) else {
                warn!(record = i, key = %record.character, "skipping record: key is not a single character");
                table.stats.skipped += 1;
                continue;
            };
            let entry = record.into_entry(character);
            table.note_malformed(&entry);
            table.insert(entry);
        }
        table
    }

    fn from_component_map(map: serde_json::Map<String, Value>) -> Self {
        let mut table = Self::empty(TableShape::ComponentMap);
        let mut related: Vec<(char, Vec<char>)> = Vec::new();
        let mut related_pos: HashMap<char, usize> = HashMap::new();

        for (key, value) in map {
            let Some(character) = single_char(&key) else {
                warn!(key = %key, "skipping record: key is not a single character");
                table.stats.skipped += 1;
                continue;
            };
            let record: ComponentMapRecord = match serde_json::from_value(value) {
                Ok(r) => r,
                Err(e) => {
                    warn!(key = %key, "skipping unparsable record: {e}");
                    table.stats.skipped += 1;
                    continue;
                }
            };
            let bucket: Vec<char> = record
                .related_characters
                .iter()
                .filter_map(|s| single_char(s))
                .collect();
            match related_pos.get(&character) {
                Some(&pos) => related[pos].1 = bucket,
                None => {
                    related_pos.insert(character, related.len());
                    related.push((character, bucket));
                }
            }

            let entry = record.meta.into_entry(character);
            table.note_malformed(&entry);
            table.insert(entry);
        }

        table.precomputed = Some(ComponentIndex::from_buckets(related, None));
        table
    }

    fn note_malformed(&mut self, entry: &CharacterEntry) {
        if entry.decomposition.is_malformed() {
            warn!(
                character = %entry.character,
                decomposition = entry.decomposition.raw(),
                "unknown component in decomposition, treating as empty"
            );
            self.stats.malformed += 1;
        }
    }
}

#[derive(Deserialize)]
struct StrokeRecord {
    character: String,
    #[serde(default, deserialize_with = "stroke_count")]
    strokes: Option<u32>,
    #[serde(default, deserialize_with = "first_text")]
    decomposition: Option<String>,
    #[serde(default, deserialize_with = "first_text")]
    pinyin: Option<String>,
    #[serde(default, deserialize_with = "first_text")]
    definition: Option<String>,
    #[serde(default, deserialize_with = "first_text")]
    radical: Option<String>,
    #[serde(default)]
    etymology: Option<EtymologyRecord>,
    #[serde(default, deserialize_with = "text_list")]
    compounds: Vec<String>,
}

impl StrokeRecord {
    fn into_entry(self, character: char) -> CharacterEntry {
        CharacterEntry {
            character,
            strokes: self.strokes,
            decomposition: Decomposition::parse(self.decomposition.as_deref().unwrap_or("")),
            pinyin: self.pinyin,
            definition: self.definition,
            radical: self.radical,
            etymology: self.etymology.map(EtymologyRecord::into_etymology),
            idc: None,
            compounds: self.compounds,
        }
    }
}

#[derive(Deserialize)]
struct ComponentMapRecord {
    #[serde(default)]
    meta: MetaRecord,
    #[serde(default, deserialize_with = "text_list")]
    related_characters: Vec<String>,
}

#[derive(Deserialize, Default)]
struct MetaRecord {
    #[serde(default, deserialize_with = "stroke_count")]
    strokes: Option<u32>,
    #[serde(default, deserialize_with = "first_text")]
    decomposition: Option<String>,
    #[serde(default, deserialize_with = "first_text")]
    pinyin: Option<String>,
    #[serde(default, deserialize_with = "first_text")]
    definition: Option<String>,
    #[serde(default, deserialize_with = "first_text")]
    radical: Option<String>,
    #[serde(default)]
    etymology: Option<EtymologyRecord>,
    #[serde(rename = "IDC", default, deserialize_with = "first_text")]
    idc: Option<String>,
    #[serde(default, deserialize_with = "text_list")]
    compounds: Vec<String>,
}

impl MetaRecord {
    fn into_entry(self, character: char) -> CharacterEntry {
        CharacterEntry {
            character,
            strokes: self.strokes,
            decomposition: Decomposition::parse(self.decomposition.as_deref().unwrap_or("")),
            pinyin: self.pinyin,
            definition: self.definition,
            radical: self.radical,
            etymology: self.etymology.map(EtymologyRecord::into_etymology),
            idc: self
                .idc
                .as_deref()
                .and_then(single_char)
                .and_then(Idc::from_char),
            compounds: self.compounds,
        }
    }
}

#[derive(Deserialize, Default)]
struct EtymologyRecord {
    #[serde(rename = "type", default, deserialize_with = "first_text")]
    kind: Option<String>,
    #[serde(default, deserialize_with = "first_text")]
    hint: Option<String>,
    #[serde(default, deserialize_with = "first_text")]
    details: Option<String>,
}

impl EtymologyRecord {
    fn into_etymology(self) -> Etymology {
        Etymology {
            kind: self.kind,
            hint: self.hint,
            details: self.details,
        }
    }
}

/// Text fields appear as a plain string, a list of strings, or null.
#[derive(Deserialize)]
#[serde(untagged)]
enum TextField {
    One(String),
    Many(Vec<Value>),
    Other(Value),
}

/// Deserialize a text field, taking the first element of a list. Empty
/// strings and non-text values become `None`.
fn first_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    let text = match Option::<TextField>::deserialize(d)? {
        Some(TextField::One(s)) => Some(s),
        Some(TextField::Many(items)) => items.into_iter().find_map(|v| match v {
            Value::String(s) => Some(s),
            _ => None,
        }),
        Some(TextField::Other(_)) | None => None,
    };
    Ok(text.filter(|s| !s.is_empty()))
}

/// Deserialize a list of strings, dropping non-string items. A bare string
/// becomes a one-element list.
fn text_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Ok(match Option::<TextField>::deserialize(d)? {
        Some(TextField::One(s)) => vec![s],
        Some(TextField::Many(items)) => items
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        Some(TextField::Other(_)) | None => Vec::new(),
    })
}

/// Stroke counts are integers, sometimes strings, with -1 or null for unknown.
fn stroke_count<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u32>, D::Error> {
    Ok(match Option::<Value>::deserialize(d)? {
        Some(Value::Number(n)) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}
