use std::ops::RangeInclusive;
use std::path::Path;

use serde::Serialize;
use tracing::warn;

use super::{depth_or_default, open_explorer, resolve_or_exit};
use crate::output::{columns, pad, with_strokes};
use radix_core::decomp::ComponentIndex;
use radix_core::query::{
    describe, export_compounds, paginate, ComponentFilter, DisplayMode, Explorer, Hit,
    ResultFilter,
};
use radix_core::settings::settings;
use radix_core::unicode::Idc;

/// Parse `a-b` (inclusive) or a single count `n` into a stroke range.
pub fn parse_stroke_range(s: &str) -> Result<RangeInclusive<u32>, String> {
    let parse = |t: &str| {
        t.trim()
            .parse::<u32>()
            .map_err(|_| format!("invalid stroke count '{t}'"))
    };
    let (lo, hi) = match s.split_once('-') {
        Some((lo, hi)) => (parse(lo)?, parse(hi)?),
        None => {
            let n = parse(s)?;
            (n, n)
        }
    };
    if lo > hi {
        return Err(format!("empty stroke range {lo}-{hi}"));
    }
    Ok(lo..=hi)
}

/// Reject ranges outside the configured stroke bounds.
pub fn check_stroke_bounds(range: &RangeInclusive<u32>) -> Result<(), String> {
    let q = &settings().query;
    if *range.start() < q.stroke_min || *range.end() > q.stroke_max {
        return Err(format!(
            "stroke range {}-{} outside configured bounds {}-{}",
            range.start(),
            range.end(),
            q.stroke_min,
            q.stroke_max
        ));
    }
    Ok(())
}

pub fn parse_structure(s: &str) -> Result<Idc, String> {
    Idc::parse(s).ok_or_else(|| {
        let known: Vec<String> = Idc::ALL.iter().map(Idc::to_string).collect();
        format!("unknown structure '{s}' (expected one of: {})", known.join(", "))
    })
}

pub fn parse_mode(s: &str) -> Result<DisplayMode, String> {
    s.trim()
        .parse::<usize>()
        .ok()
        .and_then(DisplayMode::from_len)
        .ok_or_else(|| format!("invalid mode '{s}' (expected 1 for characters, 2-4 for phrases)"))
}

pub struct LookupOptions {
    pub depth: Option<u32>,
    pub index_file: Option<String>,
    pub filter: ResultFilter,
    pub page: usize,
    pub per_page: Option<usize>,
    pub json: bool,
}

#[derive(Serialize)]
struct LookupReport<'a> {
    component: char,
    depth: Option<u32>,
    total: usize,
    page: usize,
    pages: usize,
    results: &'a [Hit<'a>],
}

/// Seed the explorer's cache from a snapshot and return the snapshot depth.
fn seed_from_snapshot(explorer: &Explorer, index_file: &str, requested: Option<u32>) -> u32 {
    let index = die!(
        ComponentIndex::load(Path::new(index_file)),
        "Error loading {index_file}: {}"
    );
    let Some(depth) = index.max_depth() else {
        eprintln!("Error: {index_file} holds precomputed buckets; pass the component map instead");
        std::process::exit(1);
    };
    if requested.is_some_and(|d| d != depth) {
        warn!(snapshot_depth = depth, "--depth ignored, using the snapshot depth");
    }
    explorer.cache().insert(index);
    depth
}

pub fn lookup(table_file: &str, input: &str, opts: &LookupOptions) {
    let explorer = open_explorer(table_file);
    let depth = match &opts.index_file {
        Some(file) => seed_from_snapshot(&explorer, file, opts.depth),
        None => depth_or_default(opts.depth),
    };
    let component = resolve_or_exit(&explorer, input, depth);

    let hits = explorer.search(component, &opts.filter, depth);
    let per_page = opts
        .per_page
        .unwrap_or(settings().query.results_per_page);
    let page = paginate(&hits, opts.page, per_page);

    if opts.json {
        let report = LookupReport {
            component,
            depth: explorer.index(depth).max_depth(),
            total: page.total,
            page: page.page,
            pages: page.pages,
            results: page.items,
        };
        let json = die!(
            serde_json::to_string_pretty(&report),
            "Error encoding JSON: {}"
        );
        println!("{json}");
        return;
    }

    match explorer.table().get(component) {
        Some(entry) => println!("{component}  {}", describe(entry)),
        None => println!("{component}  (component only, no table entry)"),
    }
    println!(
        "Results for {component}: {} result(s) (page {}/{})",
        page.total,
        page.page,
        page.pages.max(1)
    );
    for hit in page.items {
        println!(
            "{}{}",
            pad(&hit.entry.character.to_string(), 4),
            describe(hit.entry)
        );
        if !hit.compounds.is_empty() {
            let mut compounds = hit.compounds.clone();
            compounds.sort_unstable();
            println!("    {}", compounds.join(" "));
        }
    }
}

pub fn facets(table_file: &str, input: &str, depth: Option<u32>) {
    let explorer = open_explorer(table_file);
    let depth = depth_or_default(depth);
    let component = resolve_or_exit(&explorer, input, depth);

    let facets = explorer.result_facets(component, depth);
    println!("Structures for {component}:");
    for idc in &facets.structures {
        println!("  {idc}");
    }
    println!("Radicals for {component}: {}", facets.radicals.join(" "));
}

pub fn components(table_file: &str, filter: &ComponentFilter, depth: Option<u32>, show_facets: bool) {
    let explorer = open_explorer(table_file);
    let depth = depth_or_default(depth);

    if show_facets {
        let facets = explorer.component_facets(filter, depth);
        let strokes: Vec<String> = facets.strokes.iter().map(u32::to_string).collect();
        println!("Stroke counts: {}", strokes.join(" "));
        println!("Radicals: {}", facets.radicals.join(" "));
        let structures: Vec<String> = facets.structures.iter().map(Idc::to_string).collect();
        println!("Structures: {}", structures.join(", "));
        return;
    }

    let found = explorer.browse_components(filter, depth);
    println!("{} component(s)", found.len());
    let cells: Vec<String> = found
        .iter()
        .map(|&c| with_strokes(explorer.table(), c))
        .collect();
    if !cells.is_empty() {
        println!("{}", columns(&cells, 4));
    }
}

pub fn export(table_file: &str, input: &str, filter: &ResultFilter, depth: Option<u32>, prompt: Option<&str>) {
    if filter.mode == DisplayMode::Single {
        eprintln!("Error: export needs a phrase mode (--mode 2, 3 or 4)");
        std::process::exit(1);
    }
    let explorer = open_explorer(table_file);
    let depth = depth_or_default(depth);
    let component = resolve_or_exit(&explorer, input, depth);

    let hits = explorer.hits(component, filter, depth);
    if hits.is_empty() {
        eprintln!("No compounds found for {component}");
        return;
    }
    let prompt = prompt.unwrap_or(settings().export.prompt.as_str());
    println!("{}", export_compounds(&hits, prompt));
}
