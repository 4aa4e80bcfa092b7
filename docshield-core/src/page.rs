//! Pagination requests for bulk listings.

use crate::{DocResult, ValidationError};

/// Page size used when the caller does not supply one.
pub const DEFAULT_PAGE_LIMIT: usize = 50;

/// Largest page a single listing may request. Larger limits are clamped.
pub const MAX_PAGE_LIMIT: usize = 500;

/// A validated `(limit, offset)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub limit: usize,
    pub offset: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
        }
    }
}

impl PageRequest {
    /// Build a page from raw boundary values.
    ///
    /// Missing values take their defaults, `limit` is clamped to
    /// [`MAX_PAGE_LIMIT`], and negative values are rejected.
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> DocResult<Self> {
        let limit = match limit {
            None => DEFAULT_PAGE_LIMIT,
            Some(l) => non_negative("limit", l)?.min(MAX_PAGE_LIMIT),
        };
        let offset = match offset {
            None => 0,
            Some(o) => non_negative("offset", o)?,
        };
        Ok(Self { limit, offset })
    }
}

fn non_negative(field: &str, value: i64) -> DocResult<usize> {
    usize::try_from(value).map_err(|_| {
        ValidationError::InvalidValue {
            field: field.to_string(),
            reason: format!("must not be negative, got {value}"),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DocShieldError, ErrorKind};

    #[test]
    fn test_defaults() {
        let page = PageRequest::new(None, None).unwrap();
        assert_eq!(page, PageRequest::default());
        assert_eq!(page.limit, 50);
        assert_eq!(page.offset, 0);
    }

    #[test]
    fn test_limit_is_clamped() {
        let page = PageRequest::new(Some(10_000), Some(3)).unwrap();
        assert_eq!(page.limit, MAX_PAGE_LIMIT);
        assert_eq!(page.offset, 3);
    }

    #[test]
    fn test_negative_values_are_rejected() {
        let err = PageRequest::new(Some(-1), None).unwrap_err();
        assert_eq!(ErrorKind::from(&err), ErrorKind::InvalidInput);

        let err = PageRequest::new(None, Some(-5)).unwrap_err();
        match err {
            DocShieldError::Validation(ValidationError::InvalidValue { field, .. }) => {
                assert_eq!(field, "offset");
            }
            other => panic!("Expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_limit_is_allowed() {
        let page = PageRequest::new(Some(0), Some(0)).unwrap();
        assert_eq!(page.limit, 0);
    }
}
