macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            std::process::exit(1);
        })
    };
}

pub mod config_ops;
pub mod query_ops;
pub mod table_ops;

use std::path::Path;
use std::process;
use std::time::Instant;

use tracing::info;

use radix_core::query::Explorer;
use radix_core::settings::{settings, MAX_INDEX_DEPTH};
use radix_core::table::load_table;

/// Load a table file into an explorer, exiting on failure.
pub(crate) fn open_explorer(table_file: &str) -> Explorer {
    let started = Instant::now();
    let table = die!(
        load_table(Path::new(table_file)),
        "Error loading {table_file}: {}"
    );
    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        "table ready"
    );
    Explorer::new(table)
}

/// Resolve the depth argument against settings.
pub(crate) fn depth_or_default(depth: Option<u32>) -> u32 {
    let depth = depth.unwrap_or(settings().index.max_depth);
    if depth > MAX_INDEX_DEPTH {
        eprintln!("Error: depth must be at most {MAX_INDEX_DEPTH}");
        process::exit(1);
    }
    depth
}

/// Parse free-text input as a component, exiting with the reason on failure.
pub(crate) fn resolve_or_exit(explorer: &Explorer, input: &str, depth: u32) -> char {
    die!(explorer.resolve_component(input, depth), "Error: {}")
}
