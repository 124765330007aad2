//! Decomposition indexer.
//!
//! `expand` walks a character's decomposition recursively up to a depth
//! bound. `build_index` inverts those walks into a component → characters
//! map, and `IndexCache` memoises one map per depth for a loaded table.

mod cache;
mod index_io;
#[cfg(test)]
mod tests;

pub use cache::IndexCache;

use std::collections::{HashMap, HashSet};
use std::io;

use tracing::{debug, debug_span};

use crate::table::CharTable;
use crate::unicode::is_component_char;

/// Error type for reading and writing index snapshots (RDXI files).
#[derive(Debug, thiserror::Error)]
pub enum IndexIoError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid header (too short or truncated)")]
    InvalidHeader,

    #[error("invalid magic bytes (expected RDXI)")]
    InvalidMagic,

    #[error("unsupported version: {0}")]
    UnsupportedVersion(u8),

    #[error("checksum mismatch: snapshot body is corrupted")]
    ChecksumMismatch,

    #[error("snapshot body of {0} bytes exceeds the u32 length field")]
    BodyTooLarge(usize),

    #[error("{0} unexpected bytes after the snapshot body")]
    TrailingData(usize),

    #[error("serialization error: {0}")]
    Serialize(bincode::Error),

    #[error("deserialization error: {0}")]
    Deserialize(bincode::Error),
}

/// Inverse decomposition map: component → characters containing it.
///
/// Bucket order follows the table the index was built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentIndex {
    buckets: HashMap<char, Vec<char>>,
    /// `None` for buckets that were precomputed by the source table.
    max_depth: Option<u32>,
}

impl ComponentIndex {
    pub fn from_buckets(
        buckets: impl IntoIterator<Item = (char, Vec<char>)>,
        max_depth: Option<u32>,
    ) -> Self {
        Self {
            buckets: buckets.into_iter().collect(),
            max_depth,
        }
    }

    /// Characters containing `component`, or an empty slice.
    pub fn get(&self, component: char) -> &[char] {
        self.buckets.get(&component).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_component(&self, component: char) -> bool {
        self.buckets.contains_key(&component)
    }

    /// All indexed components, in no particular order.
    pub fn components(&self) -> impl Iterator<Item = char> + '_ {
        self.buckets.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn max_depth(&self) -> Option<u32> {
        self.max_depth
    }

    /// Total number of (component, character) pairs.
    pub fn bucket_count(&self) -> usize {
        self.buckets.values().map(Vec::len).sum()
    }
}

/// Direct components of `character`: one level of decomposition, operators
/// and out-of-range glyphs removed, duplicates collapsed.
pub fn direct_components(table: &CharTable, character: char) -> HashSet<char> {
    table
        .get(character)
        .map(|e| e.decomposition.components().collect())
        .unwrap_or_default()
}

/// Every component reachable from `character` within `max_depth` levels of
/// recursion below its direct components.
///
/// `expand(c, 0)` is exactly the direct components of `c`. Unknown
/// characters and empty or malformed decompositions expand to nothing.
/// Cycles stop at the first repeat along a path; sibling branches do not
/// share a visited set.
pub fn expand(table: &CharTable, character: char, max_depth: u32) -> HashSet<char> {
    let mut out = HashSet::new();
    let mut path = Vec::new();
    expand_into(table, character, 0, max_depth, &mut path, &mut out);
    out
}

fn expand_into(
    table: &CharTable,
    current: char,
    depth: u32,
    max_depth: u32,
    path: &mut Vec<char>,
    out: &mut HashSet<char>,
) {
    if depth > max_depth || path.contains(&current) || !is_component_char(current) {
        return;
    }
    let Some(entry) = table.get(current) else {
        return;
    };
    path.push(current);
    for component in entry.decomposition.components() {
        out.insert(component);
        expand_into(table, component, depth + 1, max_depth, path, out);
    }
    path.pop();
}

/// Build the component → characters index for `max_depth`.
///
/// Each character lands in its own bucket, the buckets of its direct
/// components, and the buckets of everything those components expand to.
pub fn build_index(table: &CharTable, max_depth: u32) -> ComponentIndex {
    let _span = debug_span!("build_index", max_depth).entered();

    let mut buckets: HashMap<char, Vec<char>> = HashMap::new();
    let mut members: HashSet<char> = HashSet::new();
    let mut path: Vec<char> = Vec::new();

    for entry in table.iter() {
        members.clear();
        members.insert(entry.character);
        for component in entry.decomposition.components() {
            members.insert(component);
            expand_into(table, component, 0, max_depth, &mut path, &mut members);
        }
        for &member in &members {
            buckets.entry(member).or_default().push(entry.character);
        }
    }

    let index = ComponentIndex {
        buckets,
        max_depth: Some(max_depth),
    };
    debug!(
        characters = table.len(),
        components = index.len(),
        pairs = index.bucket_count()
    );
    index
}
