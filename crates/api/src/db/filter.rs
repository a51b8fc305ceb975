//! Store-agnostic query description.
//!
//! A [`Filter`] is a small boolean expression over top-level document fields.
//! Backends either translate it (Postgres) or evaluate it directly with
//! [`Filter::matches`] (memory).

use serde_json::Value;

use super::Document;

/// A predicate over the top-level fields of a document.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Matches every document.
    All,
    /// Field equals the given JSON value. Numbers compare by value.
    Eq {
        field: &'static str,
        value: Value,
    },
    /// Field is a number greater than or equal to `value`.
    Gte { field: &'static str, value: f64 },
    /// Field is a string containing `needle`, ignoring case.
    ContainsIgnoreCase {
        field: &'static str,
        needle: String,
    },
    /// Every clause matches. An empty list matches everything.
    And(Vec<Self>),
    /// At least one clause matches. An empty list matches nothing.
    Or(Vec<Self>),
}

impl Filter {
    /// Equality clause.
    #[must_use]
    pub fn eq(field: &'static str, value: impl Into<Value>) -> Self {
        Self::Eq {
            field,
            value: value.into(),
        }
    }

    /// Numeric lower-bound clause.
    #[must_use]
    pub const fn gte(field: &'static str, value: f64) -> Self {
        Self::Gte { field, value }
    }

    /// Case-insensitive literal substring clause.
    #[must_use]
    pub fn contains_ignore_case(field: &'static str, needle: impl Into<String>) -> Self {
        Self::ContainsIgnoreCase {
            field,
            needle: needle.into(),
        }
    }

    /// Conjunction, collapsing the trivial cases.
    #[must_use]
    pub fn and(mut clauses: Vec<Self>) -> Self {
        clauses.retain(|c| *c != Self::All);
        match clauses.len() {
            0 => Self::All,
            1 => clauses.remove(0),
            _ => Self::And(clauses),
        }
    }

    /// Disjunction.
    #[must_use]
    pub const fn or(clauses: Vec<Self>) -> Self {
        Self::Or(clauses)
    }

    /// Evaluate the filter against a document.
    #[must_use]
    pub fn matches(&self, doc: &Document) -> bool {
        match self {
            Self::All => true,
            Self::Eq { field, value } => doc.get(*field).is_some_and(|v| values_equal(v, value)),
            Self::Gte { field, value } => doc
                .get(*field)
                .and_then(Value::as_f64)
                .is_some_and(|v| v >= *value),
            Self::ContainsIgnoreCase { field, needle } => doc
                .get(*field)
                .and_then(Value::as_str)
                .is_some_and(|v| v.to_lowercase().contains(&needle.to_lowercase())),
            Self::And(clauses) => clauses.iter().all(|c| c.matches(doc)),
            Self::Or(clauses) => clauses.iter().any(|c| c.matches(doc)),
        }
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

/// Options for `find`: result cap and field projection.
///
/// Documents always come back in insertion order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FindOptions {
    pub limit: Option<usize>,
    pub projection: Option<&'static [&'static str]>,
}

impl FindOptions {
    #[must_use]
    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub const fn project(mut self, fields: &'static [&'static str]) -> Self {
        self.projection = Some(fields);
        self
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => Document::new(),
        }
    }

    #[test]
    fn test_eq_matches_strings_and_numbers() {
        let d = doc(json!({ "brand": "Apple", "rating": 4 }));
        assert!(Filter::eq("brand", "Apple").matches(&d));
        assert!(!Filter::eq("brand", "apple").matches(&d));
        assert!(Filter::eq("rating", 4.0).matches(&d));
        assert!(!Filter::eq("missing", "x").matches(&d));
    }

    #[test]
    fn test_gte_requires_number() {
        let d = doc(json!({ "rating": 4.5, "name": "x" }));
        assert!(Filter::gte("rating", 4.5).matches(&d));
        assert!(!Filter::gte("rating", 4.6).matches(&d));
        assert!(!Filter::gte("name", 0.0).matches(&d));
    }

    #[test]
    fn test_contains_ignore_case_is_literal() {
        let d = doc(json!({ "name": "Galaxy S24 (Ultra)" }));
        assert!(Filter::contains_ignore_case("name", "galaxy").matches(&d));
        assert!(Filter::contains_ignore_case("name", "(ULTRA)").matches(&d));
        assert!(!Filter::contains_ignore_case("name", "gal.xy").matches(&d));
    }

    #[test]
    fn test_and_or_semantics() {
        let d = doc(json!({ "name": "Pixel", "brand": "Google" }));
        assert!(Filter::and(vec![]).matches(&d));
        assert!(!Filter::or(vec![]).matches(&d));
        assert!(
            Filter::or(vec![
                Filter::eq("brand", "Apple"),
                Filter::eq("name", "Pixel"),
            ])
            .matches(&d)
        );
        assert!(
            !Filter::and(vec![
                Filter::eq("brand", "Google"),
                Filter::eq("name", "iPhone"),
            ])
            .matches(&d)
        );
    }

    #[test]
    fn test_and_collapses_trivial_cases() {
        assert_eq!(Filter::and(vec![Filter::All]), Filter::All);
        assert_eq!(
            Filter::and(vec![Filter::eq("a", 1)]),
            Filter::eq("a", 1)
        );
    }
}
