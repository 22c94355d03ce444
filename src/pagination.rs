//! Limit/offset paging parameters.
//!
//! The activity feed is a cursor-less offset scheme: `limit` and `offset`
//! apply after ordering and no total count is returned.

/// Default number of feed entries per request.
pub const DEFAULT_FEED_LIMIT: i64 = 50;

/// Paging window applied after ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: i64,
    pub offset: i64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_FEED_LIMIT,
            offset: 0,
        }
    }
}

impl Pagination {
    /// Clamp user-supplied values to sane bounds. A non-positive limit falls
    /// back to the default page size rather than to a one-row page.
    pub fn new(limit: i64, offset: i64) -> Self {
        Self {
            limit: if limit > 0 { limit } else { DEFAULT_FEED_LIMIT },
            offset: offset.max(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_positive_values() {
        let page = Pagination::new(10, 20);
        assert_eq!(page.limit, 10);
        assert_eq!(page.offset, 20);
    }

    #[test]
    fn non_positive_limit_falls_back_to_the_default() {
        assert_eq!(Pagination::new(0, 0).limit, DEFAULT_FEED_LIMIT);
        assert_eq!(Pagination::new(-5, 0).limit, DEFAULT_FEED_LIMIT);
    }

    #[test]
    fn negative_offset_clamps_to_zero() {
        assert_eq!(Pagination::new(10, -3).offset, 0);
    }
}
