use crate::unicode::{is_component_char, Idc};

/// Placeholder the source tables use for a component nobody could identify.
pub const UNKNOWN_MARKER: char = '?';

/// Parsed decomposition string: an optional leading structural operator
/// followed by component glyphs.
///
/// A string containing [`UNKNOWN_MARKER`] anywhere is malformed and behaves as
/// empty. The raw text is kept for diagnostics only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decomposition {
    raw: String,
    malformed: bool,
}

impl Decomposition {
    pub fn parse(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            malformed: raw.contains(UNKNOWN_MARKER),
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn is_malformed(&self) -> bool {
        self.malformed
    }

    /// True when there is nothing usable to expand.
    pub fn is_empty(&self) -> bool {
        self.malformed || self.raw.is_empty()
    }

    /// The leading structural operator, if the string starts with one.
    pub fn operator(&self) -> Option<Idc> {
        if self.malformed {
            return None;
        }
        self.raw.chars().next().and_then(Idc::from_char)
    }

    /// Direct components in order, with the leading operator and any glyph
    /// outside the component ranges removed. Duplicates are kept.
    pub fn components(&self) -> impl Iterator<Item = char> + '_ {
        let source = if self.malformed { "" } else { self.raw.as_str() };
        let mut chars = source.chars().peekable();
        if chars.peek().is_some_and(|&c| Idc::from_char(c).is_some()) {
            chars.next();
        }
        chars.filter(|&c| is_component_char(c))
    }

    /// Text for display: the raw string, or `—` when empty or malformed.
    pub fn display(&self) -> &str {
        if self.is_empty() {
            "—"
        } else {
            &self.raw
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_and_components() {
        let d = Decomposition::parse("⿰女子");
        assert_eq!(d.operator(), Some(Idc::LeftRight));
        assert_eq!(d.components().collect::<String>(), "女子");
        assert_eq!(d.display(), "⿰女子");
    }

    #[test]
    fn test_without_operator() {
        let d = Decomposition::parse("木木");
        assert_eq!(d.operator(), None);
        assert_eq!(d.components().collect::<Vec<_>>(), vec!['木', '木']);
    }

    #[test]
    fn test_nested_operator_is_skipped() {
        let d = Decomposition::parse("⿱⿰木木心");
        assert_eq!(d.operator(), Some(Idc::TopBottom));
        assert_eq!(d.components().collect::<String>(), "木木心");
    }

    #[test]
    fn test_unknown_marker_is_malformed() {
        let d = Decomposition::parse("⿰女?");
        assert!(d.is_malformed());
        assert!(d.is_empty());
        assert_eq!(d.operator(), None);
        assert_eq!(d.components().count(), 0);
        assert_eq!(d.display(), "—");
        assert_eq!(d.raw(), "⿰女?");
    }

    #[test]
    fn test_empty() {
        let d = Decomposition::parse("");
        assert!(d.is_empty());
        assert!(!d.is_malformed());
        assert_eq!(d.components().count(), 0);
        assert_eq!(d.display(), "—");
    }
}
