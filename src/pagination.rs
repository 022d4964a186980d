//! Client-side pagination over an already-filtered row set

use std::ops::Range;

/// Trait for components with paginated content
pub trait Paginated {
    /// Get current page number (0-based)
    fn get_current_page(&self) -> usize;

    /// Set current page
    fn set_current_page(&mut self, page: usize);

    /// Get total number of pages
    fn get_total_pages(&self) -> usize;

    fn can_paginate_forward(&self) -> bool {
        self.get_current_page() + 1 < self.get_total_pages()
    }

    fn can_paginate_backward(&self) -> bool {
        self.get_current_page() > 0
    }

    /// Go to next page, no-op on the last page
    fn next_page(&mut self) {
        if self.can_paginate_forward() {
            self.set_current_page(self.get_current_page() + 1);
        }
    }

    /// Go to previous page, no-op on the first page
    fn previous_page(&mut self) {
        if self.can_paginate_backward() {
            self.set_current_page(self.get_current_page() - 1);
        }
    }
}

/// Page index and page count for a fixed page size
#[derive(Debug, Clone, PartialEq)]
pub struct Pagination {
    rows_per_page: usize,
    current_page: usize,
    total_pages: usize,
}

impl Pagination {
    pub fn new(rows_per_page: usize) -> Self {
        Self {
            rows_per_page: rows_per_page.max(1),
            current_page: 0,
            total_pages: 0,
        }
    }

    pub fn total_pages_for(row_count: usize, rows_per_page: usize) -> usize {
        let per_page = rows_per_page.max(1);
        (row_count + per_page - 1) / per_page
    }

    /// Recompute the page count for `row_count` rows.
    ///
    /// Returns true when the page count changed, in which case the current
    /// page is back at 0.
    pub fn update(&mut self, row_count: usize) -> bool {
        let total = Self::total_pages_for(row_count, self.rows_per_page);
        if total == self.total_pages {
            return false;
        }
        self.total_pages = total;
        self.current_page = 0;
        true
    }

    /// Index range of the current page within a set of `row_count` rows
    pub fn page_range(&self, row_count: usize) -> Range<usize> {
        let start = std::cmp::min(self.current_page * self.rows_per_page, row_count);
        let end = std::cmp::min(start + self.rows_per_page, row_count);
        start..end
    }

    pub fn slice<'a, T>(&self, rows: &'a [T]) -> &'a [T] {
        &rows[self.page_range(rows.len())]
    }

    /// 1-based number of the row at `index` on the current page
    pub fn row_number(&self, index: usize) -> usize {
        self.current_page * self.rows_per_page + index + 1
    }

    /// Pager text, e.g. " 2 of 5 " or " 0 " when there is nothing to page
    pub fn indicator(&self) -> String {
        if self.total_pages > 0 {
            format!(" {} of {} ", self.current_page + 1, self.total_pages)
        } else {
            " 0 ".to_string()
        }
    }
}

impl Paginated for Pagination {
    fn get_current_page(&self) -> usize {
        self.current_page
    }

    fn set_current_page(&mut self, page: usize) {
        if page < self.total_pages || page == 0 {
            self.current_page = page;
        }
    }

    fn get_total_pages(&self) -> usize {
        self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pagination_over(rows: usize, per_page: usize) -> Pagination {
        let mut pagination = Pagination::new(per_page);
        pagination.update(rows);
        pagination
    }

    #[test]
    fn test_seven_rows_three_per_page() {
        let rows: Vec<u32> = (0..7).collect();
        let mut pagination = pagination_over(rows.len(), 3);

        assert_eq!(pagination.get_total_pages(), 3);
        assert_eq!(pagination.slice(&rows), &[0, 1, 2]);

        pagination.next_page();
        pagination.next_page();
        assert_eq!(pagination.get_current_page(), 2);
        assert_eq!(pagination.slice(&rows), &[6]);
        assert_eq!(pagination.row_number(0), 7);
    }

    #[test]
    fn test_total_pages_and_last_page_length() {
        for per_page in 1..6 {
            for len in 1..20 {
                let total = Pagination::total_pages_for(len, per_page);
                assert_eq!(total, (len as f64 / per_page as f64).ceil() as usize);

                let rows: Vec<usize> = (0..len).collect();
                let mut pagination = pagination_over(len, per_page);
                pagination.set_current_page(total - 1);
                let last = pagination.slice(&rows).len();
                assert_eq!(last, len - (total - 1) * per_page);
                assert!(last >= 1 && last <= per_page);
            }
        }
    }

    #[test]
    fn test_navigation_flags() {
        let mut pagination = pagination_over(7, 3);
        assert!(!pagination.can_paginate_backward());
        assert!(pagination.can_paginate_forward());

        pagination.previous_page();
        assert_eq!(pagination.get_current_page(), 0);

        pagination.next_page();
        assert!(pagination.can_paginate_backward());
        assert!(pagination.can_paginate_forward());

        pagination.next_page();
        assert!(!pagination.can_paginate_forward());
        pagination.next_page();
        assert_eq!(pagination.get_current_page(), 2);
    }

    #[test]
    fn test_shrinking_page_count_resets_to_first_page() {
        let mut pagination = pagination_over(9, 3);
        pagination.next_page();
        pagination.next_page();

        assert!(pagination.update(4));
        assert_eq!(pagination.get_total_pages(), 2);
        assert_eq!(pagination.get_current_page(), 0);
    }

    #[test]
    fn test_same_page_count_keeps_current_page() {
        let mut pagination = pagination_over(9, 3);
        pagination.next_page();

        assert!(!pagination.update(8));
        assert_eq!(pagination.get_current_page(), 1);
    }

    #[test]
    fn test_empty_rows() {
        let rows: Vec<u32> = Vec::new();
        let pagination = pagination_over(0, 3);
        assert_eq!(pagination.get_total_pages(), 0);
        assert!(pagination.slice(&rows).is_empty());
        assert!(!pagination.can_paginate_forward());
        assert!(!pagination.can_paginate_backward());
        assert_eq!(pagination.indicator(), " 0 ");
    }

    #[test]
    fn test_indicator() {
        let mut pagination = pagination_over(5, 2);
        pagination.next_page();
        assert_eq!(pagination.indicator(), " 2 of 3 ");
    }
}
