//! Character tables loaded from the static JSON sources.
//!
//! Two shapes are supported. A stroke table is a JSON array of per-character
//! records carrying the raw decomposition. A component map is a JSON object
//! keyed by character with nested `meta` and precomputed
//! `related_characters`. Both load into the same ordered [`CharTable`].

mod decomposition;
mod entry;
mod load;
#[cfg(test)]
mod tests;

pub use decomposition::{Decomposition, UNKNOWN_MARKER};
pub use entry::{CharacterEntry, Etymology};
pub use load::load_table;

use std::collections::HashMap;
use std::io;

use crate::decomp::ComponentIndex;

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported table shape: expected a JSON array or object, found {0}")]
    UnsupportedShape(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableShape {
    /// JSON array of records with raw decomposition strings.
    StrokeTable,
    /// JSON object keyed by character with precomputed related characters.
    ComponentMap,
    /// Built in memory.
    InMemory,
}

/// Counters collected while loading a table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadStats {
    /// Records dropped because the key was not a single character or the
    /// record did not parse.
    pub skipped: usize,
    /// Decompositions containing the unknown-component marker.
    pub malformed: usize,
}

/// Ordered, immutable table of character entries.
#[derive(Debug, Clone)]
pub struct CharTable {
    entries: Vec<CharacterEntry>,
    positions: HashMap<char, usize>,
    precomputed: Option<ComponentIndex>,
    shape: TableShape,
    stats: LoadStats,
}

impl CharTable {
    pub fn from_entries(entries: impl IntoIterator<Item = CharacterEntry>) -> Self {
        let mut table = Self::empty(TableShape::InMemory);
        for entry in entries {
            table.insert(entry);
        }
        table
    }

    fn empty(shape: TableShape) -> Self {
        Self {
            entries: Vec::new(),
            positions: HashMap::new(),
            precomputed: None,
            shape,
            stats: LoadStats::default(),
        }
    }

    /// Insert or replace. A replaced entry keeps its original position.
    fn insert(&mut self, entry: CharacterEntry) {
        match self.positions.get(&entry.character) {
            Some(&pos) => self.entries[pos] = entry,
            None => {
                self.positions.insert(entry.character, self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    pub fn get(&self, c: char) -> Option<&CharacterEntry> {
        self.positions.get(&c).map(|&pos| &self.entries[pos])
    }

    pub fn contains(&self, c: char) -> bool {
        self.positions.contains_key(&c)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in source order.
    pub fn iter(&self) -> impl Iterator<Item = &CharacterEntry> + '_ {
        self.entries.iter()
    }

    pub fn stroke_count(&self, c: char) -> Option<u32> {
        self.get(c).and_then(|e| e.strokes)
    }

    pub fn has_decompositions(&self) -> bool {
        self.entries.iter().any(|e| !e.decomposition.is_empty())
    }

    /// Related-character buckets shipped with a component map.
    pub fn precomputed(&self) -> Option<&ComponentIndex> {
        self.precomputed.as_ref()
    }

    /// Characters that are their own radical, in table order.
    pub fn radicals(&self) -> Vec<char> {
        self.entries
            .iter()
            .filter(|e| {
                let mut buf = [0u8; 4];
                e.radical_is(e.character.encode_utf8(&mut buf))
            })
            .map(|e| e.character)
            .collect()
    }

    pub fn shape(&self) -> TableShape {
        self.shape
    }

    pub fn stats(&self) -> LoadStats {
        self.stats
    }
}
