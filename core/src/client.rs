//! Stateless HTTP request builder and response parser for the roster API.
//!
//! # Design
//! `RosterClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method that
//! consumes an `HttpResponse`. The caller executes the round-trip.
//!
//! `TodoQuery` and `UserQuery` are typed builders for the list endpoints.
//! They encode only the parameters that are set, using the same keys the
//! server's query engine recognises.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::query::{LIMIT, ORDER_BY};
use crate::record::Record;
use crate::todo::{Todo, TodoStatus};
use crate::user::User;

/// Filters, sort and limit for `GET /api/todos`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoQuery {
    pub status: Option<TodoStatus>,
    pub contains: Option<String>,
    pub owner: Option<String>,
    pub category: Option<String>,
    pub order_by: Option<String>,
    pub limit: Option<u64>,
}

impl TodoQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(mut self, status: TodoStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn contains(mut self, text: impl Into<String>) -> Self {
        self.contains = Some(text.into());
        self
    }

    pub fn owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn order_by(mut self, field: impl Into<String>) -> Self {
        self.order_by = Some(field.into());
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(status) = self.status {
            pairs.push(("status", status.as_str().to_string()));
        }
        push_opt(&mut pairs, "contains", &self.contains);
        push_opt(&mut pairs, "owner", &self.owner);
        push_opt(&mut pairs, "category", &self.category);
        push_opt(&mut pairs, ORDER_BY, &self.order_by);
        if let Some(limit) = self.limit {
            pairs.push((LIMIT, limit.to_string()));
        }
        pairs
    }
}

/// Filters, sort and limit for `GET /api/users`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserQuery {
    pub age: Option<i64>,
    pub company: Option<String>,
    pub order_by: Option<String>,
    pub limit: Option<u64>,
}

impl UserQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn age(mut self, age: i64) -> Self {
        self.age = Some(age);
        self
    }

    pub fn company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn order_by(mut self, field: impl Into<String>) -> Self {
        self.order_by = Some(field.into());
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(age) = self.age {
            pairs.push(("age", age.to_string()));
        }
        push_opt(&mut pairs, "company", &self.company);
        push_opt(&mut pairs, ORDER_BY, &self.order_by);
        if let Some(limit) = self.limit {
            pairs.push((LIMIT, limit.to_string()));
        }
        pairs
    }
}

fn push_opt(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: &Option<String>) {
    if let Some(value) = value {
        pairs.push((key, value.clone()));
    }
}

/// Synchronous, stateless client for the roster API.
#[derive(Debug, Clone)]
pub struct RosterClient {
    base_url: String,
}

impl RosterClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list_todos(&self, query: &TodoQuery) -> Result<HttpRequest, ApiError> {
        self.build_list::<Todo>(&query.pairs())
    }

    pub fn build_get_todo(&self, id: &str) -> HttpRequest {
        self.build_get::<Todo>(id)
    }

    pub fn build_list_users(&self, query: &UserQuery) -> Result<HttpRequest, ApiError> {
        self.build_list::<User>(&query.pairs())
    }

    pub fn build_get_user(&self, id: &str) -> HttpRequest {
        self.build_get::<User>(id)
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        parse_ok(response)
    }

    pub fn parse_get_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_ok(response)
    }

    pub fn parse_list_users(&self, response: HttpResponse) -> Result<Vec<User>, ApiError> {
        parse_ok(response)
    }

    pub fn parse_get_user(&self, response: HttpResponse) -> Result<User, ApiError> {
        parse_ok(response)
    }

    fn build_list<R: Record>(&self, pairs: &[(&'static str, String)]) -> Result<HttpRequest, ApiError> {
        let mut url = format!("{}/api/{}", self.base_url, R::COLLECTION);
        if !pairs.is_empty() {
            let query = serde_urlencoded::to_string(pairs)
                .map_err(|e| ApiError::SerializationError(e.to_string()))?;
            url.push('?');
            url.push_str(&query);
        }
        Ok(HttpRequest::get(url))
    }

    fn build_get<R: Record>(&self, id: &str) -> HttpRequest {
        HttpRequest::get(format!("{}/api/{}/{id}", self.base_url, R::COLLECTION))
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

fn parse_ok<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-200 status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    match response.status {
        200 => Ok(()),
        404 => Err(ApiError::NotFound),
        400 => {
            let message = serde_json::from_str::<ErrorBody>(&response.body)
                .map(|body| body.error)
                .unwrap_or_else(|_| response.body.clone());
            Err(ApiError::BadRequest(message))
        }
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> RosterClient {
        RosterClient::new("http://localhost:4567")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn build_list_todos_without_filters_has_no_query_string() {
        let req = client().build_list_todos(&TodoQuery::new()).unwrap();
        assert_eq!(req.url, "http://localhost:4567/api/todos");
        assert_eq!(
            req.headers,
            vec![("accept".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn build_list_todos_encodes_every_parameter() {
        let query = TodoQuery::new()
            .status(TodoStatus::Complete)
            .contains("tempor")
            .owner("Blanche")
            .category("software design")
            .order_by("owner")
            .limit(20);
        let req = client().build_list_todos(&query).unwrap();
        assert_eq!(
            req.url,
            "http://localhost:4567/api/todos?status=complete&contains=tempor&owner=Blanche\
             &category=software+design&orderBy=owner&limit=20"
        );
    }

    #[test]
    fn build_list_users_encodes_reserved_characters() {
        let query = UserQuery::new().age(25).company("Frogs, Inc.&Co");
        let req = client().build_list_users(&query).unwrap();
        assert_eq!(
            req.url,
            "http://localhost:4567/api/users?age=25&company=Frogs%2C+Inc.%26Co"
        );
    }

    #[test]
    fn build_get_requests() {
        assert_eq!(
            client().build_get_todo("58895985a22c04e761776d54").url,
            "http://localhost:4567/api/todos/58895985a22c04e761776d54"
        );
        assert_eq!(
            client().build_get_user("abc").url,
            "http://localhost:4567/api/users/abc"
        );
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = RosterClient::new("http://localhost:4567/");
        let req = client.build_list_users(&UserQuery::new()).unwrap();
        assert_eq!(req.url, "http://localhost:4567/api/users");
    }

    #[test]
    fn parse_list_todos_success() {
        let body = r#"[{"_id":"1","owner":"Chris","status":true,"body":"UMM","category":"admin"}]"#;
        let todos = client().parse_list_todos(response(200, body)).unwrap();
        assert_eq!(todos.len(), 1);
        assert_eq!(todos[0].owner, "Chris");
        assert!(todos[0].status);
    }

    #[test]
    fn parse_get_user_success() {
        let body = r#"{"_id":"u","name":"Pat","age":37,"company":"IBM","email":"pat@ibm.com"}"#;
        let user = client().parse_get_user(response(200, body)).unwrap();
        assert_eq!(user.name, "Pat");
    }

    #[test]
    fn parse_get_todo_not_found() {
        let err = client().parse_get_todo(response(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_list_bad_request_extracts_message() {
        let body = r#"{"error":"Specified limit 'abc' can't be parsed to an integer"}"#;
        let err = client().parse_list_todos(response(400, body)).unwrap_err();
        match err {
            ApiError::BadRequest(message) => assert!(message.contains("'abc'")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parse_bad_request_falls_back_to_raw_body() {
        let err = client().parse_list_users(response(400, "plain text")).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(ref message) if message == "plain text"));
    }

    #[test]
    fn parse_server_error() {
        let err = client().parse_list_users(response(500, "boom")).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn parse_list_todos_bad_json() {
        let err = client().parse_list_todos(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }
}
