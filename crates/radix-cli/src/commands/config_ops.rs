use std::fs;

use radix_core::settings;

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(settings::parse_settings_toml(&content), "Error: {}");
    println!(
        "OK: index.max_depth={}, query.results_per_page={}, query.strokes={}-{}",
        s.index.max_depth, s.query.results_per_page, s.query.stroke_min, s.query.stroke_max
    );
}

/// Install a custom settings file. Must run before anything reads settings.
pub fn apply_settings_file(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    die!(settings::init_custom(content), "Error in {file}: {}");
}
