/// One page of a result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    /// 1-based page number that was requested.
    pub page: usize,
    pub pages: usize,
    pub total: usize,
}

/// Slice out page `page` (1-based). Out-of-range pages are empty; a
/// `per_page` of zero is treated as one.
pub fn paginate<T>(items: &[T], page: usize, per_page: usize) -> Page<'_, T> {
    let per_page = per_page.max(1);
    let total = items.len();
    let pages = total.div_ceil(per_page);
    let slice: &[T] = match page.checked_sub(1).and_then(|p| p.checked_mul(per_page)) {
        Some(start) if start < total => &items[start..start.saturating_add(per_page).min(total)],
        _ => &[],
    };
    Page {
        items: slice,
        page,
        pages,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate() {
        let items: Vec<u32> = (1..=7).collect();
        let p1 = paginate(&items, 1, 3);
        assert_eq!(p1.items, &[1, 2, 3]);
        assert_eq!(p1.pages, 3);
        assert_eq!(p1.total, 7);
        assert_eq!(paginate(&items, 3, 3).items, &[7]);
        assert!(paginate(&items, 4, 3).items.is_empty());
        assert!(paginate(&items, 0, 3).items.is_empty());
    }

    #[test]
    fn test_paginate_empty_and_zero_size() {
        let empty: Vec<u32> = Vec::new();
        let p = paginate(&empty, 1, 50);
        assert!(p.items.is_empty());
        assert_eq!(p.pages, 0);
        let items = [1, 2];
        assert_eq!(paginate(&items, 2, 0).items, &[2]);
    }
}
