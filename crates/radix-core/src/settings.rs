//! Index, query and export settings.
//!
//! The defaults in `default_settings.toml` are compiled in and checked by
//! `build.rs`. A front end may install its own TOML with `init_custom`, which
//! only succeeds before the first `settings()` call.

use std::sync::OnceLock;

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

/// Deepest recursion accepted for index builds.
pub const MAX_INDEX_DEPTH: u32 = 64;

static CUSTOM_TOML: OnceLock<String> = OnceLock::new();

/// Set custom TOML before first `settings()` call.
pub fn init_custom(toml_content: String) -> Result<(), SettingsError> {
    parse_settings_toml(&toml_content)?;
    CUSTOM_TOML
        .set(toml_content)
        .map_err(|_| SettingsError::AlreadyInitialized)
}

/// Get or initialize the global settings singleton.
pub fn settings() -> &'static Settings {
    static INSTANCE: OnceLock<Settings> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let toml_str = CUSTOM_TOML
            .get()
            .map(|s| s.as_str())
            .unwrap_or(DEFAULT_SETTINGS_TOML);
        parse_settings_toml(toml_str).expect("settings TOML must be valid")
    })
}

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("settings already initialized")]
    AlreadyInitialized,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub index: IndexSettings,
    pub query: QuerySettings,
    pub export: ExportSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IndexSettings {
    pub max_depth: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuerySettings {
    pub results_per_page: usize,
    pub stroke_min: u32,
    pub stroke_max: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ExportSettings {
    pub prompt: String,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn invalid(field: &str, reason: &str) -> SettingsError {
    SettingsError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    if s.index.max_depth > MAX_INDEX_DEPTH {
        return Err(SettingsError::InvalidValue {
            field: "index.max_depth".to_string(),
            reason: format!("must be at most {MAX_INDEX_DEPTH}"),
        });
    }
    if s.query.results_per_page == 0 {
        return Err(invalid("query.results_per_page", "must be positive"));
    }
    if s.query.stroke_min > s.query.stroke_max {
        return Err(invalid(
            "query.stroke_min",
            "must not exceed query.stroke_max",
        ));
    }
    if s.export.prompt.trim().is_empty() {
        return Err(invalid("export.prompt", "must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_toml() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert_eq!(s.index.max_depth, 5);
        assert_eq!(s.query.results_per_page, 50);
        assert_eq!(s.query.stroke_min, 0);
        assert_eq!(s.query.stroke_max, 30);
        assert!(s.export.prompt.starts_with("Give me the hanyu pinyin"));
    }

    #[test]
    fn test_parse_valid_custom_toml() {
        let toml = r#"
[index]
max_depth = 2

[query]
results_per_page = 20
stroke_min = 4
stroke_max = 14

[export]
prompt = "List pinyin for:"
"#;
        let s = parse_settings_toml(toml).unwrap();
        assert_eq!(s.index.max_depth, 2);
        assert_eq!(s.query.results_per_page, 20);
        assert_eq!(s.query.stroke_min, 4);
        assert_eq!(s.export.prompt, "List pinyin for:");
    }

    fn with_defaults_replaced(from: &str, to: &str) -> String {
        assert!(DEFAULT_SETTINGS_TOML.contains(from));
        DEFAULT_SETTINGS_TOML.replace(from, to)
    }

    #[test]
    fn test_reject_depth_too_large() {
        let toml = with_defaults_replaced("max_depth = 5", "max_depth = 65");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("index.max_depth"));
    }

    #[test]
    fn test_reject_zero_page_size() {
        let toml = with_defaults_replaced("results_per_page = 50", "results_per_page = 0");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("query.results_per_page"));
    }

    #[test]
    fn test_reject_inverted_stroke_range() {
        let toml = with_defaults_replaced("stroke_min = 0", "stroke_min = 31");
        let err = parse_settings_toml(&toml).unwrap_err();
        assert!(err.to_string().contains("query.stroke_min"));
    }

    #[test]
    fn test_reject_blank_prompt() {
        let toml = r#"
[index]
max_depth = 5

[query]
results_per_page = 50
stroke_min = 0
stroke_max = 30

[export]
prompt = "   "
"#;
        assert!(parse_settings_toml(toml).is_err());
    }

    #[test]
    fn test_reject_missing_section() {
        let toml = "[index]\nmax_depth = 5\n";
        assert!(matches!(
            parse_settings_toml(toml),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_reject_negative_depth() {
        let toml = with_defaults_replaced("max_depth = 5", "max_depth = -1");
        assert!(matches!(
            parse_settings_toml(&toml),
            Err(SettingsError::Parse(_))
        ));
    }
}
