//! Offset/limit pagination over an already-fetched list.

use crate::error::AppError;
use serde::Serialize;

pub const DEFAULT_PAGE_NUMBER: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;

#[derive(Debug, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: usize,
    /// The requested page size, not the number of items on this page.
    pub count: usize,
    pub pagination: PageLinks,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct PageLinks {
    pub previous: Option<String>,
    pub next: Option<String>,
}

fn link(route: &str, page_number: usize, page_size: usize) -> String {
    format!("{}?page_number={}&page_size={}", route, page_number, page_size)
}

/// Slice `items` to page `page_number` (1-based) of `page_size` and build previous/next links on `route`.
pub fn paginate<T>(
    items: Vec<T>,
    page_number: i64,
    page_size: i64,
    route: &str,
) -> Result<Page<T>, AppError> {
    if page_number < 1 {
        return Err(AppError::Validation("page_number must be at least 1".into()));
    }
    if page_size < 1 {
        return Err(AppError::Validation("page_size must be at least 1".into()));
    }
    let page_number = page_number as usize;
    let page_size = page_size as usize;
    let total = items.len();
    let start = (page_number - 1).saturating_mul(page_size);
    let end = start.saturating_add(page_size);

    let data: Vec<T> = items.into_iter().skip(start).take(page_size).collect();
    let previous = (page_number > 1).then(|| link(route, page_number - 1, page_size));
    let next = (end < total).then(|| link(route, page_number + 1, page_size));

    Ok(Page {
        data,
        total,
        count: page_size,
        pagination: PageLinks { previous, next },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const ROUTE: &str = "/api/inventory";

    #[test]
    fn first_page_has_only_next() {
        let page = paginate((1..=25).collect(), 1, 10, ROUTE).unwrap();
        assert_eq!(page.data, (1..=10).collect::<Vec<_>>());
        assert_eq!(page.total, 25);
        assert_eq!(page.count, 10);
        assert_eq!(
            page.pagination,
            PageLinks {
                previous: None,
                next: Some("/api/inventory?page_number=2&page_size=10".into()),
            }
        );
    }

    #[test]
    fn middle_page_has_both_links() {
        let page = paginate((1..=25).collect(), 2, 10, ROUTE).unwrap();
        assert_eq!(page.data, (11..=20).collect::<Vec<_>>());
        assert!(page.pagination.previous.is_some());
        assert!(page.pagination.next.is_some());
    }

    #[test]
    fn last_partial_page_has_only_previous() {
        let page = paginate((1..=25).collect(), 3, 10, ROUTE).unwrap();
        assert_eq!(page.data, vec![21, 22, 23, 24, 25]);
        assert_eq!(
            page.pagination.previous.as_deref(),
            Some("/api/inventory?page_number=2&page_size=10")
        );
        assert_eq!(page.pagination.next, None);
    }

    #[test]
    fn exact_fit_has_no_next() {
        let page = paginate((1..=20).collect(), 2, 10, ROUTE).unwrap();
        assert_eq!(page.data.len(), 10);
        assert_eq!(page.pagination.next, None);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let page = paginate(vec![1, 2, 3], 5, 10, ROUTE).unwrap();
        assert!(page.data.is_empty());
        assert_eq!(page.total, 3);
        assert!(page.pagination.previous.is_some());
    }

    #[test]
    fn rejects_non_positive_inputs() {
        assert!(matches!(
            paginate(vec![1], 0, 10, ROUTE),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            paginate(vec![1], 1, 0, ROUTE),
            Err(AppError::Validation(_))
        ));
    }
}
