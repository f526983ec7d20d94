//! Page/limit resolution for admin listings.

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u32 = 50;
pub const MAX_LIMIT: u32 = 1000;

/// Bounded window into a listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: u32,
    pub offset: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

/// Resolve raw `page` / `limit` query values into a usable window.
///
/// Anything absent, unparsable or out of range falls back to the default
/// (page 1, limit 50). `limit` must lie in `1..=1000`; `page` must be
/// positive. Never fails.
pub fn resolve_pagination(raw_page: Option<&str>, raw_limit: Option<&str>) -> Pagination {
    let page = raw_page
        .and_then(|p| p.parse::<i64>().ok())
        .filter(|p| *p > 0)
        .map(|p| p as u64)
        .unwrap_or(DEFAULT_PAGE);

    let limit = raw_limit
        .and_then(|l| l.parse::<i64>().ok())
        .filter(|l| *l > 0 && *l <= MAX_LIMIT as i64)
        .map(|l| l as u32)
        .unwrap_or(DEFAULT_LIMIT);

    Pagination {
        limit,
        offset: (page - 1).saturating_mul(limit as u64),
    }
}
