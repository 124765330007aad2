fn main() {
    println!("cargo:rerun-if-changed=src/default_settings.toml");
    check_settings(include_str!("src/default_settings.toml"));
}

/// The embedded defaults must parse and carry every settings section.
fn check_settings(content: &str) {
    let value: toml::Value = match content.parse() {
        Ok(v) => v,
        Err(e) => panic!("src/default_settings.toml contains invalid TOML: {e}"),
    };
    for section in ["index", "query", "export"] {
        if !value.get(section).is_some_and(toml::Value::is_table) {
            panic!("src/default_settings.toml is missing the [{section}] table");
        }
    }
}
