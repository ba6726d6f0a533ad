//! Per-resource capability set for the query engine.
//!
//! # Design
//! A `Schema` maps query parameter names to behaviour. Filters are kept in
//! registration order because that order is the pipeline order, and it
//! decides which stage reports first when several values are invalid. Sort
//! keys live in a map so an unknown key is a single lookup miss.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::QueryError;

/// A filter compiled from one query parameter value.
pub type Predicate<R> = Box<dyn Fn(&R) -> bool>;

/// Validates a raw parameter value and compiles it into a `Predicate`.
pub type PredicateBuilder<R> = fn(&str) -> Result<Predicate<R>, QueryError>;

/// Natural ascending order of one field.
pub type Comparator<R> = fn(&R, &R) -> Ordering;

pub struct Schema<R> {
    filters: Vec<(&'static str, PredicateBuilder<R>)>,
    sorts: BTreeMap<&'static str, Comparator<R>>,
}

impl<R> Schema<R> {
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
            sorts: BTreeMap::new(),
        }
    }

    /// Registers a filter stage. Stages run in the order they are added.
    pub fn filter(mut self, key: &'static str, builder: PredicateBuilder<R>) -> Self {
        self.filters.push((key, builder));
        self
    }

    /// Registers `key` as a valid `orderBy` value.
    pub fn sort(mut self, key: &'static str, comparator: Comparator<R>) -> Self {
        self.sorts.insert(key, comparator);
        self
    }

    pub fn filterable_by(&self, key: &str) -> Option<PredicateBuilder<R>> {
        self.filters
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, builder)| *builder)
    }

    pub fn sortable_by(&self, key: &str) -> Option<Comparator<R>> {
        self.sorts.get(key).copied()
    }

    /// Filter stages in pipeline order.
    pub fn filters(&self) -> impl Iterator<Item = (&'static str, PredicateBuilder<R>)> + '_ {
        self.filters.iter().copied()
    }

    pub fn sort_keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.sorts.keys().copied()
    }
}

impl<R> Default for Schema<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> fmt::Debug for Schema<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("filters", &self.filters.iter().map(|(key, _)| key).collect::<Vec<_>>())
            .field("sorts", &self.sorts.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Case-insensitive equality against a value fixed at build time.
pub(crate) fn equals_ignoring_case(target: &str) -> impl Fn(&str) -> bool {
    let target = target.to_lowercase();
    move |field| field.to_lowercase() == target
}

/// Case-insensitive substring match against a value fixed at build time.
pub(crate) fn contains_ignoring_case(needle: &str) -> impl Fn(&str) -> bool {
    let needle = needle.to_lowercase();
    move |field| field.to_lowercase().contains(&needle)
}
