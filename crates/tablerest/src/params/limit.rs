use super::QueryParams;
use serde::Serialize;

/// Page size and start offset of a paginated read.
///
/// Parsing never fails: anything that is missing, non-numeric or out of range
/// falls back to a default. `limit` and `offset` are treated as a pair, so an
/// unusable `limit` resets `start` to 0 even when `offset` was valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LimitParam {
    limit: u32,
    start: u32,
}

impl Default for LimitParam {
    fn default() -> Self {
        Self {
            limit: Self::DEFAULT_LIMIT,
            start: 0,
        }
    }
}

impl LimitParam {
    pub const DEFAULT_LIMIT: u32 = 25;
    pub const MAX_LIMIT: u32 = 1000;

    /// `limit` is clamped to `1..=MAX_LIMIT`.
    pub fn new(limit: u32, start: u32) -> Self {
        Self {
            limit: limit.clamp(1, Self::MAX_LIMIT),
            start,
        }
    }

    /// Build from a 1-based page number. Page 0 is treated as page 1.
    pub fn from_page(page: u32, size: u32) -> Self {
        let size = size.clamp(1, Self::MAX_LIMIT);
        let start = page.max(1).saturating_sub(1).saturating_mul(size);
        Self { limit: size, start }
    }

    /// Read `limit` / `offset`.
    pub fn parse(params: &QueryParams) -> Self {
        let limit = match params.first_numeric("limit") {
            Some(0) | None => {
                if params.contains_key("limit") {
                    tracing::trace!(raw = ?params.first("limit"), "unusable limit, using defaults");
                }
                return Self::default();
            }
            Some(limit) => limit,
        };

        let start = params.first_numeric("offset").unwrap_or_else(|| {
            if params.contains_key("offset") {
                tracing::trace!(raw = ?params.first("offset"), "unusable offset, using 0");
            }
            0
        });

        Self::new(limit, start)
    }

    /// Read `page` / `size`, falling back to [`LimitParam::parse`] when no
    /// usable `page` is present. A missing or unusable `size` uses `page_size`.
    pub fn parse_with_page_size(params: &QueryParams, page_size: u32) -> Self {
        let Some(page) = params.first_numeric("page") else {
            return Self::parse(params);
        };
        let size = match params.first_numeric("size") {
            Some(size) if size > 0 => size,
            _ => page_size,
        };
        Self::from_page(page, size)
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    /// Exclusive upper row bound (`start + limit`).
    pub fn end(&self) -> u64 {
        u64::from(self.start) + u64::from(self.limit)
    }
}
