//! Character-level Unicode classification for Chinese character decomposition.

use std::fmt;

use serde::{Deserialize, Serialize};

/// CJK Unified Ideographs (U+4E00..U+9FFF).
pub fn is_unified_ideograph(c: char) -> bool {
    ('\u{4E00}'..='\u{9FFF}').contains(&c)
}

/// CJK Radicals Supplement (U+2E80..U+2EFF). Variant radical forms such as ⺌
/// show up as components in decomposition strings.
pub fn is_radical_supplement(c: char) -> bool {
    ('\u{2E80}'..='\u{2EFF}').contains(&c)
}

/// Extension A (U+3400..U+4DBF) and Extension B (U+20000..U+2A6DF).
pub fn is_extension_ideograph(c: char) -> bool {
    ('\u{3400}'..='\u{4DBF}').contains(&c) || ('\u{20000}'..='\u{2A6DF}').contains(&c)
}

/// Check whether `c` may be indexed as a decomposition component.
///
/// Structural operators (U+2FF0..U+2FFB) and the `?` placeholder fall outside
/// every accepted block, so a single range check filters both.
pub fn is_component_char(c: char) -> bool {
    is_unified_ideograph(c) || is_radical_supplement(c) || is_extension_ideograph(c)
}

/// Ideographic Description Character: the structural operator that may lead
/// a decomposition string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Idc {
    LeftRight,
    TopBottom,
    LeftMiddleRight,
    TopMiddleBottom,
    Surround,
    SurroundTop,
    SurroundBottom,
    SurroundLeft,
    TopLeftCorner,
    TopRightCorner,
    BottomLeftCorner,
    Overlaid,
}

impl Idc {
    pub const ALL: [Idc; 12] = [
        Idc::LeftRight,
        Idc::TopBottom,
        Idc::LeftMiddleRight,
        Idc::TopMiddleBottom,
        Idc::Surround,
        Idc::SurroundTop,
        Idc::SurroundBottom,
        Idc::SurroundLeft,
        Idc::TopLeftCorner,
        Idc::TopRightCorner,
        Idc::BottomLeftCorner,
        Idc::Overlaid,
    ];

    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '\u{2FF0}'..='\u{2FFB}' => Some(Self::ALL[(c as u32 - 0x2FF0) as usize]),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        // Discriminants follow declaration order, matching U+2FF0 onward.
        char::from_u32(0x2FF0 + self as u32).unwrap_or('\u{2FF0}')
    }

    pub fn description(self) -> &'static str {
        match self {
            Idc::LeftRight => "Left Right",
            Idc::TopBottom => "Top Bottom",
            Idc::LeftMiddleRight => "Left Middle Right",
            Idc::TopMiddleBottom => "Top Middle Bottom",
            Idc::Surround => "Surround",
            Idc::SurroundTop => "Surround Top",
            Idc::SurroundBottom => "Surround Bottom",
            Idc::SurroundLeft => "Surround Left",
            Idc::TopLeftCorner => "Top Left Corner",
            Idc::TopRightCorner => "Top Right Corner",
            Idc::BottomLeftCorner => "Bottom Left Corner",
            Idc::Overlaid => "Overlaid",
        }
    }

    /// Parse a user-supplied operator: either the glyph itself or its
    /// description, case-insensitive and ignoring spaces ("leftright").
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(idc) = Self::from_char(c) {
                return Some(idc);
            }
        }
        let key: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
            .flat_map(char::to_lowercase)
            .collect();
        Self::ALL.into_iter().find(|idc| {
            idc.description()
                .chars()
                .filter(|c| !c.is_whitespace())
                .flat_map(char::to_lowercase)
                .eq(key.chars())
        })
    }
}

impl fmt::Display for Idc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.as_char(), self.description())
    }
}

/// Returns `Some(c)` when `s` holds exactly one character.
pub fn single_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
