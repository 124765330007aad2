//! Lookup layer over a loaded table: "which characters contain X", with the
//! stroke/radical/structure filters, compound selection and facets used by
//! front ends.

mod format;
mod page;

pub use format::{describe, etymology_text, export_compounds};
pub use page::{paginate, Page};

use std::collections::BTreeSet;
use std::ops::RangeInclusive;
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, debug_span};

use crate::decomp::{expand, ComponentIndex, IndexCache};
use crate::table::{CharTable, CharacterEntry};
use crate::unicode::{single_char, Idc};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("expected exactly one character, got {0:?}")]
    NotSingleCharacter(String),
    #[error("unknown component: {0}")]
    UnknownComponent(char),
}

/// Which compounds accompany each result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Characters only.
    #[default]
    Single,
    /// Keep compounds of exactly this many characters (2..=4) and drop
    /// characters that have none.
    Phrases(usize),
}

impl DisplayMode {
    /// `1` selects single characters, `2..=4` selects phrases of that length.
    pub fn from_len(len: usize) -> Option<Self> {
        match len {
            1 => Some(Self::Single),
            2..=4 => Some(Self::Phrases(len)),
            _ => None,
        }
    }
}

/// Filters applied to the characters containing a component.
#[derive(Debug, Clone, Default)]
pub struct ResultFilter {
    pub structure: Option<Idc>,
    pub radical: Option<String>,
    /// Characters with unknown stroke counts never match a range.
    pub strokes: Option<RangeInclusive<u32>>,
    pub mode: DisplayMode,
}

impl ResultFilter {
    fn matches(&self, entry: &CharacterEntry) -> bool {
        if let Some(idc) = self.structure {
            if entry.structure() != Some(idc) {
                return false;
            }
        }
        if let Some(radical) = &self.radical {
            if !entry.radical_is(radical) {
                return false;
            }
        }
        if let Some(range) = &self.strokes {
            if !entry.strokes.is_some_and(|s| range.contains(&s)) {
                return false;
            }
        }
        true
    }
}

/// Filters for browsing the components themselves.
#[derive(Debug, Clone, Default)]
pub struct ComponentFilter {
    pub strokes: Option<u32>,
    pub radical: Option<String>,
    pub structure: Option<Idc>,
}

impl ComponentFilter {
    fn matches_strokes(&self, entry: Option<&CharacterEntry>) -> bool {
        self.strokes
            .map_or(true, |n| entry.and_then(|e| e.strokes) == Some(n))
    }

    fn matches_radical(&self, entry: Option<&CharacterEntry>) -> bool {
        self.radical
            .as_deref()
            .map_or(true, |r| entry.is_some_and(|e| e.radical_is(r)))
    }

    fn matches_structure(&self, entry: Option<&CharacterEntry>) -> bool {
        self.structure
            .map_or(true, |idc| entry.and_then(CharacterEntry::structure) == Some(idc))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Hit<'a> {
    pub entry: &'a CharacterEntry,
    pub compounds: Vec<&'a str>,
}

/// Filter values available among a component's results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Facets {
    pub structures: Vec<Idc>,
    pub radicals: Vec<String>,
}

/// Filter values available for browsing components. Each list is narrowed
/// by the filters before it: radicals by stroke count, structures by both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ComponentFacets {
    pub strokes: Vec<u32>,
    pub radicals: Vec<String>,
    pub structures: Vec<Idc>,
}

/// A loaded table plus its memoised indexes.
pub struct Explorer {
    cache: IndexCache,
    precomputed: Option<Arc<ComponentIndex>>,
}

impl Explorer {
    pub fn new(table: CharTable) -> Self {
        Self::from_shared(Arc::new(table))
    }

    pub fn from_shared(table: Arc<CharTable>) -> Self {
        // Component maps without decomposition data can only use the
        // buckets they shipped with.
        let precomputed = if table.has_decompositions() {
            None
        } else {
            table.precomputed().cloned().map(Arc::new)
        };
        Self {
            cache: IndexCache::new(table),
            precomputed,
        }
    }

    pub fn table(&self) -> &CharTable {
        self.cache.table()
    }

    pub fn cache(&self) -> &IndexCache {
        &self.cache
    }

    /// The component index for `depth`. An index already cached for `depth`
    /// (built or loaded from a snapshot) wins; otherwise tables that only
    /// carry precomputed buckets answer with those regardless of `depth`.
    pub fn index(&self, depth: u32) -> Arc<ComponentIndex> {
        if let Some(index) = self.cache.get(depth) {
            return index;
        }
        match &self.precomputed {
            Some(index) => Arc::clone(index),
            None => self.cache.get_or_build(depth),
        }
    }

    /// Validate free-text input as a component.
    pub fn resolve_component(&self, input: &str, depth: u32) -> Result<char, QueryError> {
        let trimmed = input.trim();
        let c = single_char(trimmed)
            .ok_or_else(|| QueryError::NotSingleCharacter(trimmed.to_string()))?;
        if self.table().contains(c) || self.index(depth).contains_component(c) {
            Ok(c)
        } else {
            Err(QueryError::UnknownComponent(c))
        }
    }

    /// Characters containing `component` that pass `filter`, sorted by
    /// stroke count with unknown counts first. Ties keep index order.
    pub fn search(&self, component: char, filter: &ResultFilter, depth: u32) -> Vec<Hit<'_>> {
        let _span = debug_span!("search", %component, depth).entered();
        let mut hits = self.hits(component, filter, depth);
        hits.sort_by_key(|h| h.entry.strokes);
        hits
    }

    /// Same selection as [`Explorer::search`], left in index order. Exports
    /// list compounds in this order.
    pub fn hits(&self, component: char, filter: &ResultFilter, depth: u32) -> Vec<Hit<'_>> {
        let index = self.index(depth);
        let table = self.table();

        let hits: Vec<Hit<'_>> = index
            .get(component)
            .iter()
            .filter_map(|&c| table.get(c))
            .filter(|entry| filter.matches(entry))
            .filter_map(|entry| match filter.mode {
                DisplayMode::Single => Some(Hit {
                    entry,
                    compounds: Vec::new(),
                }),
                DisplayMode::Phrases(len) => {
                    let compounds: Vec<&str> = entry.compounds_of_len(len).collect();
                    (!compounds.is_empty()).then_some(Hit { entry, compounds })
                }
            })
            .collect();

        debug!(bucket = index.get(component).len(), hits = hits.len());
        hits
    }

    /// Structures and radicals present among `component`'s characters.
    pub fn result_facets(&self, component: char, depth: u32) -> Facets {
        let index = self.index(depth);
        let table = self.table();
        let entries = || index.get(component).iter().filter_map(|&c| table.get(c));

        let structures: BTreeSet<Idc> = entries().filter_map(CharacterEntry::structure).collect();
        let radicals: BTreeSet<String> = entries().filter_map(|e| e.radical.clone()).collect();
        Facets {
            structures: structures.into_iter().collect(),
            radicals: radicals.into_iter().collect(),
        }
    }

    /// Indexed components passing `filter`, sorted by stroke count (unknown
    /// first) and then by code point.
    pub fn browse_components(&self, filter: &ComponentFilter, depth: u32) -> Vec<char> {
        let index = self.index(depth);
        let table = self.table();
        let mut components: Vec<char> = index
            .components()
            .filter(|&c| {
                let entry = table.get(c);
                filter.matches_strokes(entry)
                    && filter.matches_radical(entry)
                    && filter.matches_structure(entry)
            })
            .collect();
        components.sort_by_key(|&c| (table.stroke_count(c), c));
        components
    }

    pub fn component_facets(&self, filter: &ComponentFilter, depth: u32) -> ComponentFacets {
        let index = self.index(depth);
        let table = self.table();

        let mut strokes = BTreeSet::new();
        let mut radicals = BTreeSet::new();
        let mut structures = BTreeSet::new();
        for c in index.components() {
            let entry = table.get(c);
            if let Some(n) = entry.and_then(|e| e.strokes) {
                strokes.insert(n);
            }
            if !filter.matches_strokes(entry) {
                continue;
            }
            if let Some(r) = entry.and_then(|e| e.radical.as_ref()) {
                radicals.insert(r.clone());
            }
            if !filter.matches_radical(entry) {
                continue;
            }
            if let Some(idc) = entry.and_then(CharacterEntry::structure) {
                structures.insert(idc);
            }
        }
        ComponentFacets {
            strokes: strokes.into_iter().collect(),
            radicals: radicals.into_iter().collect(),
            structures: structures.into_iter().collect(),
        }
    }

    /// Components `c` expands to, for suggesting neighbouring lookups.
    pub fn related_components(&self, c: char, depth: u32) -> Vec<char> {
        let table = self.table();
        let mut related: Vec<char> = expand(table, c, depth).into_iter().collect();
        related.sort_by_key(|&r| (table.stroke_count(r), r));
        related
    }
}
