//! Fetch parameters for scoped and filtered reads.
//!
//! A fetch may be scoped to a parent entity (`GET /api/<resource>/<parent>`)
//! and filtered by a date range or arbitrary query pairs.
//!
//! # Example
//!
//! ```ignore
//! use chalkportal_core::params::FetchParams;
//!
//! // GET /api/attendance/c1?from=2024-01-01&to=2024-01-07
//! let params = FetchParams::scoped("c1").with_range(from, to);
//! assert_eq!(params.path_suffix(), Some("c1"));
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Query parameters for a collection read.
///
/// - `parent`: identifier of the owning entity, appended to the path
/// - `from` / `to`: inclusive date range, sent as `YYYY-MM-DD`
/// - `filters`: extra query pairs passed through unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FetchParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub filters: BTreeMap<String, String>,
}

impl FetchParams {
    /// Parameters scoped to a parent identifier.
    pub fn scoped(parent: impl Into<String>) -> Self {
        Self {
            parent: Some(parent.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_range(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    #[must_use]
    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// Path segment appended after the resource key, if the read is scoped.
    pub fn path_suffix(&self) -> Option<&str> {
        self.parent.as_deref().filter(|p| !p.is_empty())
    }

    /// Query pairs in a stable order: `from`, `to`, then filters by key.
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.filters.len() + 2);

        if let Some(from) = self.from {
            pairs.push(("from".to_string(), from.format("%Y-%m-%d").to_string()));
        }
        if let Some(to) = self.to {
            pairs.push(("to".to_string(), to.format("%Y-%m-%d").to_string()));
        }
        pairs.extend(self.filters.iter().map(|(k, v)| (k.clone(), v.clone())));

        pairs
    }

    /// Whether a date falls inside the configured range. Open ends match.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        self.from.is_none_or(|from| date >= from) && self.to.is_none_or(|to| date <= to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_default_is_unscoped() {
        let params = FetchParams::default();
        assert_eq!(params.path_suffix(), None);
        assert!(params.query_pairs().is_empty());
    }

    #[test]
    fn test_empty_parent_is_unscoped() {
        let params = FetchParams::scoped("");
        assert_eq!(params.path_suffix(), None);
    }

    #[test]
    fn test_query_pairs_order() {
        let params = FetchParams::scoped("c1")
            .with_filter("status", "present")
            .with_range(date(2024, 1, 1), date(2024, 1, 7));

        assert_eq!(params.path_suffix(), Some("c1"));
        assert_eq!(
            params.query_pairs(),
            vec![
                ("from".to_string(), "2024-01-01".to_string()),
                ("to".to_string(), "2024-01-07".to_string()),
                ("status".to_string(), "present".to_string()),
            ]
        );
    }

    #[test]
    fn test_contains_date() {
        let params = FetchParams::default().with_range(date(2024, 1, 1), date(2024, 1, 7));
        assert!(params.contains_date(date(2024, 1, 1)));
        assert!(params.contains_date(date(2024, 1, 7)));
        assert!(!params.contains_date(date(2024, 1, 8)));

        let open = FetchParams::default();
        assert!(open.contains_date(date(1999, 12, 31)));
    }
}
