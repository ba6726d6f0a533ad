//! The filter → sort → limit pipeline shared by every resource.
//!
//! # Design
//! Stages run in a fixed order and each one only runs when its parameter is
//! present. Filters narrow the working set, `orderBy` reorders it with a
//! stable sort, and `limit` truncates it. The first invalid stage aborts the
//! query; errors are never accumulated.
//!
//! The working set is a `Vec<&R>` so filtering and sorting move pointers;
//! records are cloned once, after the last stage.

use std::collections::HashMap;

use crate::error::QueryError;
use crate::schema::Schema;

/// Parameter naming the sort field.
pub const ORDER_BY: &str = "orderBy";

/// Parameter bounding the number of returned records.
pub const LIMIT: &str = "limit";

/// Multi-valued query parameters as received with a request.
///
/// Only the first value of a key is ever consulted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    values: HashMap<String, Vec<String>>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `value` to the values of `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.entry(key.into()).or_default().push(value.into());
    }

    pub fn first(&self, key: &str) -> Option<&str> {
        self.values
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = QueryParams::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

/// Runs queries against a record sequence using one resource's schema.
#[derive(Debug)]
pub struct QueryEngine<R> {
    schema: Schema<R>,
}

impl<R: Clone> QueryEngine<R> {
    pub fn new(schema: Schema<R>) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &Schema<R> {
        &self.schema
    }

    /// Derives the subset of `records` described by `params`.
    ///
    /// With no recognised parameters the result is `records` in their
    /// original order.
    pub fn run(&self, records: &[R], params: &QueryParams) -> Result<Vec<R>, QueryError> {
        let mut selected: Vec<&R> = records.iter().collect();

        for (key, build) in self.schema.filters() {
            if let Some(value) = params.first(key) {
                let predicate = build(value)?;
                selected.retain(|record| predicate(*record));
            }
        }

        if let Some(key) = params.first(ORDER_BY) {
            let compare = self
                .schema
                .sortable_by(key)
                .ok_or_else(|| QueryError::UnknownSortKey(key.to_string()))?;
            selected.sort_by(|a, b| compare(*a, *b));
        }

        if let Some(value) = params.first(LIMIT) {
            selected.truncate(parse_limit(value)?);
        }

        Ok(selected.into_iter().cloned().collect())
    }
}

fn parse_limit(value: &str) -> Result<usize, QueryError> {
    let limit: i64 = value.parse().map_err(|_| QueryError::NotAnInteger {
        key: LIMIT,
        value: value.to_string(),
    })?;
    if limit < 0 {
        return Err(QueryError::NegativeLimit(limit));
    }
    Ok(usize::try_from(limit).unwrap_or(usize::MAX))
}
