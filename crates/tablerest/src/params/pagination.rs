use super::LimitParam;
use serde::Serialize;

/// The pagination block of a response envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: u64,
    pub size: u32,
    pub pages: Option<u64>,
    pub total: Option<u64>,
}

impl Pagination {
    /// Derive the block for a read paged by `limit` that matched `total` rows.
    ///
    /// `total` and `pages` are `None` when the total is unknown or zero.
    pub fn of(limit: &LimitParam, total: Option<u64>) -> Self {
        let size = limit.limit().max(1);
        let page = u64::from(limit.start()) / u64::from(size) + 1;
        let total = total.filter(|t| *t > 0);
        Self {
            page,
            size,
            pages: total.map(|t| t.div_ceil(u64::from(size))),
            total,
        }
    }
}
