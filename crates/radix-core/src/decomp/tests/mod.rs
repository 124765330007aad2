mod index;
mod properties;

use crate::table::{CharTable, CharacterEntry};

/// Build a table from `(character, decomposition)` pairs.
pub(super) fn table_of(pairs: &[(char, &str)]) -> CharTable {
    CharTable::from_entries(pairs.iter().map(|&(c, d)| CharacterEntry::new(c, d)))
}

/// 好 = 女 + 子, 妈 = 女 + 马, 女 and 子 are leaves, 马 decomposes into a
/// radical-supplement form.
pub(super) fn sample_table() -> CharTable {
    table_of(&[
        ('好', "⿰女子"),
        ('女', ""),
        ('子', ""),
        ('妈', "⿰女马"),
        ('马', "⺆一"),
        ('字', "⿱宀子"),
        ('宀', ""),
        ('学', "⿱⺍冖子"),
    ])
}
