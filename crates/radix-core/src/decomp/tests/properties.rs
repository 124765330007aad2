//! Property-based tests for the indexer over random, cycle-heavy tables.

use proptest::prelude::*;

use crate::decomp::{build_index, direct_components, expand};
use crate::table::{CharTable, CharacterEntry};

/// A small pool so random decompositions collide and form cycles.
fn arb_glyph() -> impl Strategy<Value = char> {
    (0x4E00u32..0x4E0C).prop_map(|cp| char::from_u32(cp).unwrap())
}

fn arb_decomposition() -> impl Strategy<Value = String> {
    (
        prop::option::of(prop::sample::select(vec!['⿰', '⿱', '⿴', '⿻'])),
        prop::collection::vec(arb_glyph(), 0..4),
        prop::bool::weighted(0.1),
    )
        .prop_map(|(op, glyphs, unknown)| {
            let mut s: String = op.into_iter().collect();
            s.extend(glyphs);
            if unknown {
                s.push('?');
            }
            s
        })
}

fn arb_table() -> impl Strategy<Value = CharTable> {
    prop::collection::vec((arb_glyph(), arb_decomposition()), 1..12).prop_map(|pairs| {
        CharTable::from_entries(
            pairs
                .into_iter()
                .map(|(c, d)| CharacterEntry::new(c, &d)),
        )
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn test_self_inclusion(table in arb_table(), depth in 0u32..5) {
        let index = build_index(&table, depth);
        for entry in table.iter() {
            prop_assert!(index.get(entry.character).contains(&entry.character));
        }
    }

    #[test]
    fn test_expansion_is_monotonic(table in arb_table(), d1 in 0u32..4, extra in 1u32..3) {
        for entry in table.iter() {
            let shallow = expand(&table, entry.character, d1);
            let deep = expand(&table, entry.character, d1 + extra);
            prop_assert!(shallow.is_subset(&deep));
        }
    }

    #[test]
    fn test_zero_depth_matches_direct(table in arb_table()) {
        for entry in table.iter() {
            prop_assert_eq!(
                expand(&table, entry.character, 0),
                direct_components(&table, entry.character)
            );
        }
    }

    #[test]
    fn test_malformed_expands_to_nothing(table in arb_table(), depth in 0u32..5) {
        for entry in table.iter().filter(|e| e.decomposition.is_malformed()) {
            prop_assert!(expand(&table, entry.character, depth).is_empty());
        }
    }

    #[test]
    fn test_buckets_hold_each_character_once(table in arb_table(), depth in 0u32..4) {
        let index = build_index(&table, depth);
        for component in index.components() {
            let bucket = index.get(component);
            let mut seen = std::collections::HashSet::new();
            prop_assert!(bucket.iter().all(|c| seen.insert(*c)));
        }
    }
}
