use std::fs;
use std::path::Path;
use std::time::Instant;

use tracing::info;

use super::{depth_or_default, open_explorer, resolve_or_exit};
use crate::output::{columns, with_strokes};
use radix_core::query::describe;
use radix_core::table::TableShape;

fn shape_name(shape: TableShape) -> &'static str {
    match shape {
        TableShape::StrokeTable => "stroke table",
        TableShape::ComponentMap => "component map",
        TableShape::InMemory => "in-memory",
    }
}

pub fn info(table_file: &str, depth: Option<u32>) {
    let explorer = open_explorer(table_file);
    let depth = depth_or_default(depth);
    let table = explorer.table();
    let stats = table.stats();

    let decomposed = table
        .iter()
        .filter(|e| !e.decomposition.is_empty())
        .count();
    let with_strokes = table.iter().filter(|e| e.strokes.is_some()).count();

    println!("Table: {table_file}");
    println!("  Shape: {}", shape_name(table.shape()));
    println!("  Entries: {}", table.len());
    println!("  With stroke count: {with_strokes}");
    println!(
        "  With decomposition: {decomposed} (malformed: {})",
        stats.malformed
    );
    println!("  Skipped records: {}", stats.skipped);
    println!("  Self-radical characters: {}", table.radicals().len());
    if let Some(pre) = table.precomputed() {
        println!(
            "  Precomputed buckets: {} ({} pairs)",
            pre.len(),
            pre.bucket_count()
        );
    }

    let index = explorer.index(depth);
    match index.max_depth() {
        Some(d) => println!("Index (depth {d}):"),
        None => println!("Index (precomputed):"),
    }
    println!("  Components: {}", index.len());
    println!("  Pairs: {}", index.bucket_count());
}

pub fn show(table_file: &str, input: &str, depth: Option<u32>) {
    let explorer = open_explorer(table_file);
    let depth = depth_or_default(depth);
    let c = resolve_or_exit(&explorer, input, depth);

    match explorer.table().get(c) {
        Some(entry) => {
            println!("{c}  {}", describe(entry));
            if !entry.compounds.is_empty() {
                let mut compounds: Vec<&str> = entry.compounds.iter().map(String::as_str).collect();
                compounds.sort_unstable();
                println!("Compounds: {}", compounds.join(" "));
            }
        }
        None => println!("{c}  (component only, no table entry)"),
    }

    let contained_in = explorer.index(depth).get(c).len();
    println!("Contained in: {contained_in} character(s)");

    let related = explorer.related_components(c, depth);
    if !related.is_empty() {
        let parts: Vec<String> = related.iter().map(char::to_string).collect();
        println!("Components: {}", parts.join(" "));
    }
}

pub fn expand(table_file: &str, input: &str, depth: Option<u32>) {
    let explorer = open_explorer(table_file);
    let depth = depth_or_default(depth);
    let c = resolve_or_exit(&explorer, input, depth);

    let related = explorer.related_components(c, depth);
    println!("{c}: {} component(s) at depth {depth}", related.len());
    let cells: Vec<String> = related
        .iter()
        .map(|&r| with_strokes(explorer.table(), r))
        .collect();
    if !cells.is_empty() {
        println!("{}", columns(&cells, 4));
    }
}

pub fn compile(table_file: &str, output_file: &str, depth: Option<u32>) {
    let explorer = open_explorer(table_file);
    let depth = depth_or_default(depth);

    let started = Instant::now();
    let index = explorer.index(depth);
    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        components = index.len(),
        "index built"
    );
    eprintln!(
        "Built index: {} components, {} pairs",
        index.len(),
        index.bucket_count()
    );

    die!(
        index.save(Path::new(output_file)),
        "Error writing {output_file}: {}"
    );

    let file_size = fs::metadata(output_file).map(|m| m.len()).unwrap_or(0);
    eprintln!("Wrote {output_file} ({:.1} KB)", file_size as f64 / 1024.0);
}
