/// Default page sizes per listing kind. Callers pass the one that matches
/// the listing being rendered; nothing below hard-codes a default.
pub const SHARE_PAGE_SIZE: usize = 20;
pub const FILE_PAGE_SIZE: usize = 100;
pub const ACTIVITY_PAGE_SIZE: usize = 5;

/// Offset/limit contract derived from a 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationPlan {
    pub page: usize,
    pub limit: usize,
}

impl PaginationPlan {
    /// Build a plan from raw user input. Non-positive or missing values are
    /// corrected to page 1 / `default_limit` rather than rejected; bad
    /// pagination is a display inconvenience, not a security boundary.
    pub fn clamped(page: Option<i64>, limit: Option<i64>, default_limit: usize) -> Self {
        let page = match page {
            Some(p) if p >= 1 => p as usize,
            _ => 1,
        };
        let limit = match limit {
            Some(l) if l >= 1 => l as usize,
            _ => default_limit,
        };
        Self { page, limit }
    }

    pub fn offset(&self) -> usize {
        (self.page - 1) * self.limit
    }

    pub fn total_pages(&self, total: usize) -> usize {
        total.div_ceil(self.limit)
    }

    /// The page's window of a fully sorted result. Pages past the end are
    /// empty rather than an error.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset().min(items.len());
        let end = (start + self.limit).min(items.len());
        &items[start..end]
    }
}
