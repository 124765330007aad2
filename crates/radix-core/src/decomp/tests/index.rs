use std::sync::Arc;

use super::{sample_table, table_of};
use crate::decomp::{build_index, ComponentIndex, IndexCache};

#[test]
fn test_good_example() {
    let table = table_of(&[('好', "⿰女子"), ('女', ""), ('子', "")]);
    let index = build_index(&table, 5);
    assert_eq!(index.get('女'), &['好', '女']);
    assert_eq!(index.get('子'), &['好', '子']);
    assert_eq!(index.get('好'), &['好']);
    assert_eq!(index.max_depth(), Some(5));
}

#[test]
fn test_every_character_is_in_its_own_bucket() {
    let table = sample_table();
    for depth in 0..4 {
        let index = build_index(&table, depth);
        for entry in table.iter() {
            assert!(
                index.get(entry.character).contains(&entry.character),
                "{} missing from own bucket at depth {depth}",
                entry.character
            );
        }
    }
}

#[test]
fn test_buckets_follow_table_order() {
    let table = sample_table();
    let index = build_index(&table, 5);
    assert_eq!(index.get('女'), &['好', '女', '妈']);
    assert_eq!(index.get('子'), &['好', '子', '字', '学']);
}

#[test]
fn test_transitive_components_are_indexed() {
    let table = sample_table();
    let index = build_index(&table, 0);
    // 妈 → 马 → ⺆: one level of expansion below the direct components.
    assert!(index.get('⺆').contains(&'妈'));
    assert!(index.get('⺆').contains(&'马'));
}

#[test]
fn test_components_outside_the_table_get_buckets() {
    let table = sample_table();
    let index = build_index(&table, 5);
    assert_eq!(index.get('冖'), &['学']);
    assert!(index.contains_component('冖'));
    assert!(!index.contains_component('⿱'));
}

#[test]
fn test_malformed_entry_only_indexes_itself() {
    let table = table_of(&[('好', "⿰女?"), ('女', "")]);
    let index = build_index(&table, 5);
    assert_eq!(index.get('好'), &['好']);
    assert_eq!(index.get('女'), &['女']);
}

#[test]
fn test_unknown_component_has_empty_bucket() {
    let index = build_index(&sample_table(), 5);
    assert!(index.get('龍').is_empty());
}

#[test]
fn test_bucket_count_sums_pairs() {
    let table = table_of(&[('好', "⿰女子"), ('女', ""), ('子', "")]);
    let index = build_index(&table, 5);
    assert_eq!(index.len(), 3);
    assert_eq!(index.bucket_count(), 5);
}

#[test]
fn test_cache_returns_shared_index() {
    let cache = IndexCache::new(Arc::new(sample_table()));
    let a = cache.get_or_build(3);
    let b = cache.get_or_build(3);
    assert!(Arc::ptr_eq(&a, &b));
    let c = cache.get_or_build(1);
    assert!(!Arc::ptr_eq(&a, &c));
    assert_eq!(cache.cached_depths(), vec![1, 3]);
    cache.clear();
    assert!(cache.get(3).is_none());
}

#[test]
fn test_cache_matches_direct_build() {
    let table = Arc::new(sample_table());
    let cache = IndexCache::new(Arc::clone(&table));
    assert_eq!(*cache.get_or_build(2), build_index(&table, 2));
}

#[test]
fn test_cache_insert_requires_depth() {
    let cache = IndexCache::new(Arc::new(sample_table()));
    assert!(!cache.insert(ComponentIndex::from_buckets(vec![('女', vec!['好'])], None)));
    assert!(cache.insert(ComponentIndex::from_buckets(vec![('女', vec!['好'])], Some(7))));
    assert_eq!(cache.get(7).map(|i| i.get('女').to_vec()), Some(vec!['好']));
}
