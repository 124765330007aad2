use super::Hit;
use crate::table::CharacterEntry;

const MISSING: &str = "—";

/// Etymology hint, followed by details when present.
pub fn etymology_text(entry: &CharacterEntry) -> String {
    let ety = entry.etymology.as_ref();
    let hint = ety
        .and_then(|e| e.hint.as_deref())
        .unwrap_or("No hint available");
    match ety.and_then(|e| e.details.as_deref()) {
        Some(details) => format!("{hint}; Details: {details}"),
        None => hint.to_string(),
    }
}

/// One-line summary of an entry's metadata.
pub fn describe(entry: &CharacterEntry) -> String {
    let strokes = entry
        .strokes
        .map_or_else(|| "unknown".to_string(), |s| s.to_string());
    format!(
        "Pinyin: {}, Strokes: {}, Radical: {}, Decomposition: {}, Definition: {}, Etymology: {}",
        entry.pinyin.as_deref().unwrap_or(MISSING),
        strokes,
        entry.radical.as_deref().unwrap_or(MISSING),
        entry.decomposition.display(),
        entry
            .definition
            .as_deref()
            .unwrap_or("No definition available"),
        etymology_text(entry),
    )
}

/// Prompt, a blank line, then every hit's compounds one per line, in the
/// order the hits are given.
pub fn export_compounds(hits: &[Hit<'_>], prompt: &str) -> String {
    let mut out = String::from(prompt);
    out.push_str("\n\n");
    let lines: Vec<&str> = hits
        .iter()
        .flat_map(|h| h.compounds.iter().copied())
        .collect();
    out.push_str(&lines.join("\n"));
    out
}
