//! Request-driven filtering and pagination of synthesized collections.

use serde_json::{json, Value};

use crate::domain::Record;
use crate::engine::context::{FilterClause, FilterPath};

/// Keep the records matching every filter clause, order preserved,
/// re-indexed without gaps.
pub fn apply(records: Vec<Record>, filters: &[FilterClause]) -> Vec<Record> {
    if filters.is_empty() {
        return records;
    }
    records
        .into_iter()
        .filter(|record| filters.iter().all(|clause| matches(record, clause)))
        .collect()
}

fn matches(record: &Record, clause: &FilterClause) -> bool {
    match &clause.path {
        // A dotted path that doesn't resolve is a non-match, silently.
        FilterPath::Nested(outer, inner) => record
            .get(outer)
            .and_then(|value| value.get(inner))
            .map(|value| loose_eq(value, &clause.value))
            .unwrap_or(false),
        // A top-level key the record doesn't have is ignored, not a
        // rejection.
        FilterPath::Top(field) => match record.get(field) {
            Some(value) => loose_eq(value, &clause.value),
            None => true,
        },
    }
}

/// Loose equality between a generated value and a query-string parameter.
/// Strings compare verbatim, numbers through an f64 parse of the parameter,
/// booleans against the literals `true`/`false`. Null, arrays, and objects
/// never match. Fixture identifiable lookup uses the same rule.
pub fn loose_eq(value: &Value, raw: &str) -> bool {
    match value {
        Value::String(s) => s == raw,
        Value::Number(n) => raw
            .trim()
            .parse::<f64>()
            .ok()
            .zip(n.as_f64())
            .map(|(parsed, actual)| parsed == actual)
            .unwrap_or(false),
        Value::Bool(b) => matches!((raw, b), ("true", true) | ("false", false)),
        _ => false,
    }
}

/// One-based pagination over an already-filtered collection. The page object
/// carries the slice plus enough bookkeeping for a client to iterate.
pub fn paginate(records: Vec<Record>, per_page: usize, page: u64) -> Value {
    let total = records.len();
    let start = (page.saturating_sub(1) as usize).saturating_mul(per_page);
    let data: Vec<Value> = records
        .into_iter()
        .skip(start)
        .take(per_page)
        .map(Value::Object)
        .collect();

    json!({
        "current_page": page,
        "data": data,
        "per_page": per_page,
        "total": total,
    })
}
