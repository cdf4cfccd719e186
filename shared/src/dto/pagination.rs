//! # Pagination Wrapper
//!
//! Every list endpoint wraps its rows in [`Paginated`].

use serde::{Deserialize, Serialize};

/// One page of rows plus the backend's counters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub data: Vec<T>,
    /// Rows in this page
    #[serde(default)]
    pub count: u64,
    /// Rows matching the query across all pages
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u64,
    #[serde(default)]
    pub page_count: u64,
}

impl<T> Paginated<T> {
    /// Whether another page exists after this one.
    pub fn has_next(&self) -> bool {
        self.page < self.page_count
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl<T> Default for Paginated<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            count: 0,
            total: 0,
            page: 0,
            page_count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_next() {
        let page: Paginated<u32> =
            serde_json::from_str(r#"{"data":[1,2],"count":2,"total":5,"page":1,"pageCount":3}"#)
                .unwrap();
        assert!(page.has_next());

        let last: Paginated<u32> =
            serde_json::from_str(r#"{"data":[5],"page":3,"pageCount":3}"#).unwrap();
        assert!(!last.has_next());
        assert_eq!(last.total, 0);
    }
}
