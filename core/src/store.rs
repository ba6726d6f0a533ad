//! Immutable in-memory collections loaded once at startup.
//!
//! # Design
//! A `RecordStore` owns its records and the `QueryEngine` built from the
//! record type's schema. Nothing mutates it after construction, so callers
//! share it behind an `Arc` without any locking. Loading reports failures as
//! `LoadError`; whether that aborts the process is the caller's decision.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{LoadError, QueryError};
use crate::query::{QueryEngine, QueryParams};
use crate::record::Record;

#[derive(Debug)]
pub struct RecordStore<R> {
    records: Vec<R>,
    engine: QueryEngine<R>,
}

impl<R: Record> RecordStore<R> {
    /// Builds a store, rejecting duplicate identifiers.
    pub fn from_records(records: Vec<R>) -> Result<Self, LoadError> {
        let duplicate = {
            let mut seen = HashSet::with_capacity(records.len());
            let repeated = records.iter().find(|record| !seen.insert(record.id()));
            repeated.map(|record| record.id().to_string())
        };
        if let Some(id) = duplicate {
            return Err(LoadError::DuplicateId { kind: R::KIND, id });
        }

        Ok(Self {
            records,
            engine: QueryEngine::new(R::schema()),
        })
    }

    /// Decodes a JSON array of records.
    pub fn from_reader(reader: impl Read) -> Result<Self, LoadError> {
        let records: Vec<R> = serde_json::from_reader(reader)
            .map_err(|source| LoadError::Json { kind: R::KIND, source })?;
        Self::from_records(records)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self::from_reader(BufReader::new(file))?;
        tracing::info!(
            kind = R::KIND,
            count = store.size(),
            path = %path.display(),
            "loaded records"
        );
        Ok(store)
    }

    pub fn size(&self) -> usize {
        self.records.len()
    }

    /// Finds the record whose identifier equals `id` exactly.
    pub fn get_by_id(&self, id: &str) -> Option<&R> {
        self.records.iter().find(|record| record.id() == id)
    }

    /// All records in load order.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Runs the query pipeline over the whole collection.
    pub fn list(&self, params: &QueryParams) -> Result<Vec<R>, QueryError> {
        self.engine.run(&self.records, params)
    }

    pub fn engine(&self) -> &QueryEngine<R> {
        &self.engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::todo::Todo;
    use crate::user::User;

    const TODOS: &str = r#"[
        {"_id":"a1","owner":"Blanche","status":false,"body":"Tempor cillum","category":"homework"},
        {"_id":"b2","owner":"Fry","status":true,"body":"Nisi ut aliquip","category":"groceries"}
    ]"#;

    #[test]
    fn loads_from_reader() {
        let store = RecordStore::<Todo>::from_reader(TODOS.as_bytes()).unwrap();
        assert_eq!(store.size(), 2);
        assert_eq!(store.records()[1].owner, "Fry");
    }

    #[test]
    fn get_by_id_uses_exact_match() {
        let store = RecordStore::<Todo>::from_reader(TODOS.as_bytes()).unwrap();
        assert_eq!(store.get_by_id("b2").map(|todo| todo.owner.as_str()), Some("Fry"));
        assert!(store.get_by_id("B2").is_none());
        assert!(store.get_by_id("b").is_none());
        assert!(store.get_by_id("").is_none());
    }

    #[test]
    fn list_delegates_to_engine() {
        let store = RecordStore::<Todo>::from_reader(TODOS.as_bytes()).unwrap();
        let params: QueryParams = [("status", "complete")].into_iter().collect();
        let todos = store.list(&params).unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].id, "b2");
    }

    #[test]
    fn rejects_duplicate_ids() {
        let json = r#"[
            {"_id":"x","name":"A","age":1,"company":"C","email":"a@c.com"},
            {"_id":"x","name":"B","age":2,"company":"C","email":"b@c.com"}
        ]"#;
        let err = RecordStore::<User>::from_reader(json.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::DuplicateId { kind: "user", ref id } if id == "x"));
    }

    #[test]
    fn rejects_malformed_json() {
        let err = RecordStore::<Todo>::from_reader(r#"[{"_id":"x"}]"#.as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Json { kind: "todo", .. }));

        let err = RecordStore::<Todo>::from_reader("not json".as_bytes()).unwrap_err();
        assert!(matches!(err, LoadError::Json { .. }));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = RecordStore::<Todo>::from_path("does/not/exist.json").unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }
}
