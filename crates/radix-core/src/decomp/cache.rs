use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use super::{build_index, ComponentIndex};
use crate::table::CharTable;

/// Memoised indexes for one loaded table, keyed by depth.
///
/// Uses `RwLock` so lookups can proceed while another caller builds a
/// missing depth. Two callers racing on the same missing depth may both
/// build; the first insert wins and both receive the same `Arc`.
pub struct IndexCache {
    table: Arc<CharTable>,
    built: RwLock<HashMap<u32, Arc<ComponentIndex>>>,
}

impl IndexCache {
    pub fn new(table: Arc<CharTable>) -> Self {
        Self {
            table,
            built: RwLock::new(HashMap::new()),
        }
    }

    pub fn table(&self) -> &Arc<CharTable> {
        &self.table
    }

    pub fn get(&self, max_depth: u32) -> Option<Arc<ComponentIndex>> {
        self.built
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&max_depth)
            .cloned()
    }

    pub fn get_or_build(&self, max_depth: u32) -> Arc<ComponentIndex> {
        if let Some(index) = self.get(max_depth) {
            return index;
        }
        debug!(max_depth, "index cache miss");
        let index = Arc::new(build_index(&self.table, max_depth));
        self.built
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(max_depth)
            .or_insert(index)
            .clone()
    }

    /// Seed the cache with an index built elsewhere (e.g. a snapshot).
    ///
    /// Returns `false` for indexes without a depth, which cannot be keyed.
    pub fn insert(&self, index: ComponentIndex) -> bool {
        let Some(depth) = index.max_depth() else {
            return false;
        };
        self.built
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(depth, Arc::new(index));
        true
    }

    /// Depths currently cached, ascending.
    pub fn cached_depths(&self) -> Vec<u32> {
        let mut depths: Vec<u32> = self
            .built
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .copied()
            .collect();
        depths.sort_unstable();
        depths
    }

    pub fn clear(&self) {
        self.built
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}
