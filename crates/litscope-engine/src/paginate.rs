use serde::{Deserialize, Serialize};

/// One page of a larger result list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-indexed page actually returned, after clamping.
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<T> {
    pub fn is_first(&self) -> bool {
        self.page == 1
    }

    pub fn is_last(&self) -> bool {
        self.page == self.total_pages
    }

    /// 1-indexed position of the first item on this page, 0 when empty.
    pub fn first_index(&self) -> usize {
        if self.items.is_empty() {
            0
        } else {
            (self.page - 1) * self.page_size + 1
        }
    }
}

/// Slice `records` into a 1-indexed page.
///
/// `total_pages` is never below 1, so an empty input yields one empty page.
/// Out-of-range page numbers are clamped to `[1, total_pages]`, and a
/// `page_size` of 0 is treated as 1.
pub fn paginate<T: Clone>(records: &[T], page_size: usize, page_number: usize) -> Page<T> {
    let page_size = page_size.max(1);
    let total_items = records.len();
    let total_pages = total_items.div_ceil(page_size).max(1);
    let page = page_number.clamp(1, total_pages);

    let start = ((page - 1) * page_size).min(total_items);
    let end = (start + page_size).min(total_items);

    Page {
        items: records[start..end].to_vec(),
        page,
        page_size,
        total_pages,
        total_items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_page_is_partial() {
        let records: Vec<u32> = (1..=45).collect();

        let page = paginate(&records, 20, 3);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items, (41..=45).collect::<Vec<_>>());
        assert!(page.is_last());
        assert_eq!(page.first_index(), 41);
    }

    #[test]
    fn test_exact_multiple() {
        let records: Vec<u32> = (1..=40).collect();
        let page = paginate(&records, 20, 2);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items.len(), 20);
    }

    #[test]
    fn test_empty_input_has_one_page() {
        let records: Vec<u32> = Vec::new();
        let page = paginate(&records, 20, 1);

        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page, 1);
        assert!(page.items.is_empty());
        assert_eq!(page.first_index(), 0);
    }

    #[test]
    fn test_page_number_is_clamped() {
        let records: Vec<u32> = (1..=45).collect();

        let past_end = paginate(&records, 20, 99);
        assert_eq!(past_end.page, 3);
        assert_eq!(past_end.items.len(), 5);

        let zero = paginate(&records, 20, 0);
        assert_eq!(zero.page, 1);
        assert!(zero.is_first());
        assert_eq!(zero.items[0], 1);
    }

    #[test]
    fn test_zero_page_size_is_one() {
        let records = vec!["a", "b"];
        let page = paginate(&records, 0, 2);

        assert_eq!(page.page_size, 1);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.items, vec!["b"]);
    }
}
