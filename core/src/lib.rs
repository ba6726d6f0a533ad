//! Record store, query engine and API client core for the roster service.
//!
//! # Overview
//! Two read-only collections (users and todos) are loaded once from JSON and
//! queried through a single generic filter → sort → limit pipeline. The same
//! crate also carries a host-does-IO client that builds requests and parses
//! responses for the HTTP surface without touching the network.
//!
//! # Design
//! - `Record` ties a resource type to its identifier and its `Schema`, the
//!   named set of filters and sort keys the query engine may apply.
//! - `QueryEngine` is resource-agnostic; adding a resource means writing a
//!   schema, not another pipeline.
//! - `RecordStore` is immutable after construction and is shared across
//!   request handlers without locking.
//! - Loading returns `LoadError` instead of exiting; the binary decides.

pub mod client;
pub mod error;
pub mod http;
pub mod query;
pub mod record;
pub mod schema;
pub mod store;
pub mod todo;
pub mod user;

pub use client::{RosterClient, TodoQuery, UserQuery};
pub use error::{ApiError, LoadError, QueryError};
pub use http::{HttpRequest, HttpResponse};
pub use query::{QueryEngine, QueryParams};
pub use record::Record;
pub use schema::Schema;
pub use store::RecordStore;
pub use todo::{Todo, TodoStatus};
pub use user::User;
