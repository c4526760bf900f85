//! Per-request state, parsed once at the HTTP seam and threaded through the
//! engine as immutable values. The engine itself holds no request state, so
//! one instance is safe to share across concurrent calls.

use std::collections::HashMap;

/// Control parameters plus equality filters extracted from a request's query
/// string. Any `_`-prefixed key is reserved and never treated as a filter.
#[derive(Debug, Clone)]
pub struct RequestParams {
    /// `_count`: explicit batch size (positive; 0 falls back to random).
    pub count: Option<u64>,
    /// `_only`: comma-separated field allowlist.
    pub only: Option<Vec<String>>,
    /// `_without`: comma-separated field denylist.
    pub without: Option<Vec<String>>,
    /// `_no_relationships`: omit relationship fields entirely.
    pub no_relationships: bool,
    /// `_page`: one-based page number for paginated endpoints.
    pub page: u64,
    /// Everything else: equality constraints, ANDed together.
    pub filters: Vec<FilterClause>,
}

impl Default for RequestParams {
    fn default() -> Self {
        Self {
            count: None,
            only: None,
            without: None,
            no_relationships: false,
            page: 1,
            filters: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterClause {
    pub path: FilterPath,
    pub value: String,
}

/// `outer__inner` addresses one level of nesting into a relationship record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterPath {
    Top(String),
    Nested(String, String),
}

impl RequestParams {
    pub fn from_query(query: &HashMap<String, String>) -> Self {
        let mut params = Self::default();

        for (key, value) in query {
            match key.as_str() {
                "_count" => {
                    params.count = value.parse::<u64>().ok().filter(|c| *c > 0);
                }
                "_only" => {
                    params.only = parse_field_list(value);
                }
                "_without" => {
                    params.without = parse_field_list(value);
                }
                "_no_relationships" => {
                    params.no_relationships = is_truthy(value);
                }
                "_page" => {
                    params.page = value.parse::<u64>().ok().filter(|p| *p > 0).unwrap_or(1);
                }
                // Other reserved keys are control parameters we don't know;
                // they must never become filters.
                _ if key.starts_with('_') => {}
                _ => {
                    let path = match key.split_once("__") {
                        Some((outer, inner)) if !outer.is_empty() && !inner.is_empty() => {
                            FilterPath::Nested(outer.to_string(), inner.to_string())
                        }
                        _ => FilterPath::Top(key.clone()),
                    };
                    params.filters.push(FilterClause {
                        path,
                        value: value.clone(),
                    });
                }
            }
        }

        params
    }
}

fn parse_field_list(raw: &str) -> Option<Vec<String>> {
    let fields: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect();
    if fields.is_empty() {
        None
    } else {
        Some(fields)
    }
}

fn is_truthy(raw: &str) -> bool {
    !raw.is_empty() && raw != "false" && raw != "0"
}

/// Everything one generation call may consult: the parsed parameters and
/// whether the request carried an authorization credential.
#[derive(Debug, Clone, Copy)]
pub struct CallContext<'a> {
    pub request: &'a RequestParams,
    pub authorized: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_reserved_parameters() {
        let params = RequestParams::from_query(&query(&[
            ("_count", "7"),
            ("_only", "id, title"),
            ("_no_relationships", "true"),
            ("_page", "3"),
        ]));
        assert_eq!(params.count, Some(7));
        assert_eq!(
            params.only,
            Some(vec!["id".to_string(), "title".to_string()])
        );
        assert!(params.no_relationships);
        assert_eq!(params.page, 3);
        assert!(params.filters.is_empty());
    }

    #[test]
    fn test_unknown_underscore_keys_are_not_filters() {
        let params = RequestParams::from_query(&query(&[("_whatever", "1")]));
        assert!(params.filters.is_empty());
    }

    #[test]
    fn test_filter_paths() {
        let params = RequestParams::from_query(&query(&[
            ("title", "Hello"),
            ("category__name", "Tech"),
        ]));
        assert_eq!(params.filters.len(), 2);
        assert!(params.filters.contains(&FilterClause {
            path: FilterPath::Top("title".to_string()),
            value: "Hello".to_string(),
        }));
        assert!(params.filters.contains(&FilterClause {
            path: FilterPath::Nested("category".to_string(), "name".to_string()),
            value: "Tech".to_string(),
        }));
    }

    #[test]
    fn test_degenerate_values_fall_back() {
        let params = RequestParams::from_query(&query(&[
            ("_count", "0"),
            ("_page", "zero"),
            ("_only", " , "),
            ("_no_relationships", "false"),
        ]));
        assert_eq!(params.count, None);
        assert_eq!(params.page, 1);
        assert_eq!(params.only, None);
        assert!(!params.no_relationships);
    }
}
