use serde::Serialize;

use super::Decomposition;
use crate::unicode::Idc;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Etymology {
    pub kind: Option<String>,
    pub hint: Option<String>,
    pub details: Option<String>,
}

/// One character and its metadata, as loaded from a source table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharacterEntry {
    pub character: char,
    pub strokes: Option<u32>,
    #[serde(serialize_with = "serialize_decomposition")]
    pub decomposition: Decomposition,
    pub pinyin: Option<String>,
    pub definition: Option<String>,
    pub radical: Option<String>,
    pub etymology: Option<Etymology>,
    /// Explicit operator from tables that precompute it.
    pub idc: Option<Idc>,
    pub compounds: Vec<String>,
}

fn serialize_decomposition<S: serde::Serializer>(
    d: &Decomposition,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(d.raw())
}

impl CharacterEntry {
    pub fn new(character: char, decomposition: &str) -> Self {
        Self {
            character,
            strokes: None,
            decomposition: Decomposition::parse(decomposition),
            pinyin: None,
            definition: None,
            radical: None,
            etymology: None,
            idc: None,
            compounds: Vec::new(),
        }
    }

    pub fn with_strokes(mut self, strokes: u32) -> Self {
        self.strokes = Some(strokes);
        self
    }

    pub fn with_radical(mut self, radical: &str) -> Self {
        self.radical = Some(radical.to_string());
        self
    }

    pub fn with_pinyin(mut self, pinyin: &str) -> Self {
        self.pinyin = Some(pinyin.to_string());
        self
    }

    pub fn with_definition(mut self, definition: &str) -> Self {
        self.definition = Some(definition.to_string());
        self
    }

    pub fn with_compounds<I, S>(mut self, compounds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.compounds = compounds.into_iter().map(Into::into).collect();
        self
    }

    /// Structural operator of the character: the explicit one if the table
    /// recorded it, otherwise the one leading its decomposition.
    pub fn structure(&self) -> Option<Idc> {
        self.idc.or_else(|| self.decomposition.operator())
    }

    pub fn radical_is(&self, radical: &str) -> bool {
        self.radical.as_deref() == Some(radical)
    }

    /// Compounds whose length in characters is exactly `len`.
    pub fn compounds_of_len(&self, len: usize) -> impl Iterator<Item = &str> + '_ {
        self.compounds
            .iter()
            .map(String::as_str)
            .filter(move |c| c.chars().count() == len)
    }
}
