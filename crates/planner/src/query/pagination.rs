use crate::error::PaginationError;
use model::pagination::{
    limits::CompileLimits,
    page::{PageWindow, Pagination},
};

/// Validates a page request and resolves it to an offset and limit.
///
/// Missing fields fall back to page 1 and the configured default page size.
pub fn compile_pagination(
    pagination: Option<&Pagination>,
    limits: &CompileLimits,
) -> Result<PageWindow, PaginationError> {
    let page = pagination.and_then(|p| p.page).unwrap_or(1);
    let per_page = pagination
        .and_then(|p| p.per_page)
        .unwrap_or(i64::from(limits.default_page_size));

    if page < 1 {
        return Err(PaginationError::PageBelowMinimum { page });
    }
    if per_page < 1 {
        return Err(PaginationError::PerPageBelowMinimum { per_page });
    }
    if per_page > i64::from(limits.max_page_size) {
        return Err(PaginationError::PerPageAboveMaximum {
            per_page,
            max: limits.max_page_size,
        });
    }

    let offset = (page - 1)
        .checked_mul(per_page)
        .ok_or(PaginationError::OffsetOverflow { page, per_page })?;

    Ok(PageWindow {
        offset: offset as u64,
        limit: per_page as u64,
    })
}

pub fn render_window(window: &PageWindow) -> String {
    format!("OFFSET {} LIMIT {}", window.offset, window.limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window(offset: u64, limit: u64) -> PageWindow {
        PageWindow { offset, limit }
    }

    #[test]
    fn test_defaults() {
        let limits = CompileLimits::default();
        assert_eq!(compile_pagination(None, &limits), Ok(window(0, 20)));
        assert_eq!(
            compile_pagination(Some(&Pagination::page(3)), &limits),
            Ok(window(40, 20))
        );
    }

    #[test]
    fn test_offset_from_page() {
        let limits = CompileLimits::default();
        let pagination = Pagination::new(2, 10);
        let w = compile_pagination(Some(&pagination), &limits).unwrap();
        assert_eq!(w, window(10, 10));
        assert_eq!(render_window(&w), "OFFSET 10 LIMIT 10");
    }

    #[test]
    fn test_bounds() {
        let limits = CompileLimits::default();

        assert_eq!(
            compile_pagination(Some(&Pagination::new(0, 10)), &limits),
            Err(PaginationError::PageBelowMinimum { page: 0 })
        );
        assert_eq!(
            compile_pagination(Some(&Pagination::new(1, 0)), &limits),
            Err(PaginationError::PerPageBelowMinimum { per_page: 0 })
        );
        assert_eq!(
            compile_pagination(Some(&Pagination::new(1, 101)), &limits),
            Err(PaginationError::PerPageAboveMaximum {
                per_page: 101,
                max: 100
            })
        );
        assert_eq!(
            compile_pagination(Some(&Pagination::new(1, 100)), &limits),
            Ok(window(0, 100))
        );
    }

    #[test]
    fn test_offset_overflow() {
        let limits = CompileLimits::default();
        let err = compile_pagination(Some(&Pagination::new(i64::MAX, 100)), &limits).unwrap_err();
        assert!(matches!(err, PaginationError::OffsetOverflow { .. }));
    }
}
