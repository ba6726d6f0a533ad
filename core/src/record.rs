use serde::{de::DeserializeOwned, Serialize};

use crate::schema::Schema;

/// A read-only resource served by the API.
///
/// Implementors are plain values decoded from the backing JSON array. The
/// schema decides which query parameters filter or sort the collection.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Path segment under `/api`, e.g. `todos`.
    const COLLECTION: &'static str;

    /// Singular name used in log lines and error messages.
    const KIND: &'static str;

    fn id(&self) -> &str;

    fn schema() -> Schema<Self>;
}
