use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::QueryError;
use crate::record::Record;
use crate::schema::{contains_ignoring_case, equals_ignoring_case, Predicate, Schema};

/// A single todo item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    #[serde(rename = "_id")]
    pub id: String,
    pub owner: String,
    /// `true` once the todo is complete.
    pub status: bool,
    pub body: String,
    pub category: String,
}

/// Accepted values of the `status` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TodoStatus {
    Complete,
    Incomplete,
}

impl TodoStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TodoStatus::Complete => "complete",
            TodoStatus::Incomplete => "incomplete",
        }
    }

    pub fn is_complete(self) -> bool {
        self == TodoStatus::Complete
    }
}

impl From<bool> for TodoStatus {
    fn from(complete: bool) -> Self {
        if complete {
            TodoStatus::Complete
        } else {
            TodoStatus::Incomplete
        }
    }
}

impl FromStr for TodoStatus {
    type Err = QueryError;

    /// Parses `complete` or `incomplete` in any letter case.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "complete" => Ok(TodoStatus::Complete),
            "incomplete" => Ok(TodoStatus::Incomplete),
            _ => Err(QueryError::InvalidValue {
                key: "status",
                value: value.to_string(),
            }),
        }
    }
}

impl fmt::Display for TodoStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Record for Todo {
    const COLLECTION: &'static str = "todos";
    const KIND: &'static str = "todo";

    fn id(&self) -> &str {
        &self.id
    }

    fn schema() -> Schema<Self> {
        Schema::new()
            .filter("status", by_status)
            .filter("contains", by_body)
            .filter("owner", by_owner)
            .filter("category", by_category)
            .sort("owner", |a, b| a.owner.cmp(&b.owner))
            .sort("body", |a, b| a.body.cmp(&b.body))
            .sort("status", |a, b| a.status.cmp(&b.status))
            .sort("category", |a, b| a.category.cmp(&b.category))
    }
}

fn by_status(value: &str) -> Result<Predicate<Todo>, QueryError> {
    let complete = value.parse::<TodoStatus>()?.is_complete();
    Ok(Box::new(move |todo: &Todo| todo.status == complete))
}

fn by_body(value: &str) -> Result<Predicate<Todo>, QueryError> {
    let matches = contains_ignoring_case(value);
    Ok(Box::new(move |todo: &Todo| matches(&todo.body)))
}

fn by_owner(value: &str) -> Result<Predicate<Todo>, QueryError> {
    let matches = equals_ignoring_case(value);
    Ok(Box::new(move |todo: &Todo| matches(&todo.owner)))
}

fn by_category(value: &str) -> Result<Predicate<Todo>, QueryError> {
    let matches = equals_ignoring_case(value);
    Ok(Box::new(move |todo: &Todo| matches(&todo.category)))
}
