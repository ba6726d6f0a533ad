//! Generic get-one / get-many handlers, mounted once per record type.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use roster_core::{QueryParams, Record, RecordStore};

use crate::error::AppError;

/// Routes `GET /api/{collection}` and `GET /api/{collection}/{id}` for `R`.
pub fn resource_router<R: Record>(store: Arc<RecordStore<R>>) -> Router {
    let collection = format!("/api/{}", R::COLLECTION);
    let member = format!("{collection}/{{id}}");
    Router::new()
        .route(&collection, get(list_records::<R>))
        .route(&member, get(get_record::<R>))
        .with_state(store)
}

#[tracing::instrument(skip(store), fields(kind = R::KIND))]
pub async fn get_record<R: Record>(
    State(store): State<Arc<RecordStore<R>>>,
    Path(id): Path<String>,
) -> Result<Json<R>, AppError> {
    match store.get_by_id(&id) {
        Some(record) => Ok(Json(record.clone())),
        None => {
            tracing::debug!("no record with this id");
            Err(AppError::NotFound { resource: R::KIND, id })
        }
    }
}

/// Query pairs arrive in request order; repeated keys keep every value.
#[tracing::instrument(skip(store), fields(kind = R::KIND))]
pub async fn list_records<R: Record>(
    State(store): State<Arc<RecordStore<R>>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<R>>, AppError> {
    let params: QueryParams = pairs.into_iter().collect();
    let records = store.list(&params).inspect_err(|err| {
        tracing::debug!(%err, "rejected query");
    })?;
    tracing::debug!(count = records.len(), "query matched");
    Ok(Json(records))
}
