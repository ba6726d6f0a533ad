use serde::{Deserialize, Serialize};

use crate::error::QueryError;
use crate::record::Record;
use crate::schema::{equals_ignoring_case, Predicate, Schema};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub age: i64,
    pub company: String,
    pub email: String,
}

impl Record for User {
    const COLLECTION: &'static str = "users";
    const KIND: &'static str = "user";

    fn id(&self) -> &str {
        &self.id
    }

    fn schema() -> Schema<Self> {
        Schema::new()
            .filter("age", by_age)
            .filter("company", by_company)
            .sort("name", |a, b| a.name.cmp(&b.name))
            .sort("age", |a, b| a.age.cmp(&b.age))
            .sort("company", |a, b| a.company.cmp(&b.company))
            .sort("email", |a, b| a.email.cmp(&b.email))
    }
}

fn by_age(value: &str) -> Result<Predicate<User>, QueryError> {
    let age: i64 = value.parse().map_err(|_| QueryError::NotAnInteger {
        key: "age",
        value: value.to_string(),
    })?;
    Ok(Box::new(move |user: &User| user.age == age))
}

fn by_company(value: &str) -> Result<Predicate<User>, QueryError> {
    let matches = equals_ignoring_case(value);
    Ok(Box::new(move |user: &User| matches(&user.company)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{QueryEngine, QueryParams};

    fn user(id: &str, name: &str, age: i64, company: &str) -> User {
        User {
            id: id.to_string(),
            name: name.to_string(),
            age,
            company: company.to_string(),
            email: format!("{}@{}.com", name.to_lowercase(), company.to_lowercase()),
        }
    }

    fn users() -> Vec<User> {
        vec![
            user("u1", "Chris", 25, "UMM"),
            user("u2", "Pat", 37, "IBM"),
            user("u3", "Jamie", 37, "Frogs, Inc."),
            user("u4", "Alex", 9, "umm"),
        ]
    }

    fn list(pairs: &[(&str, &str)]) -> Result<Vec<User>, QueryError> {
        let params: QueryParams = pairs.iter().copied().collect();
        QueryEngine::new(User::schema()).run(&users(), &params)
    }

    fn ids(users: &[User]) -> Vec<&str> {
        users.iter().map(|user| user.id.as_str()).collect()
    }

    #[test]
    fn deserializes_from_underscore_id() {
        let user: User = serde_json::from_str(
            r#"{"_id":"abc","name":"Connie Stewart","age":25,"company":"OHMNET","email":"conniestewart@ohmnet.com"}"#,
        )
        .unwrap();
        assert_eq!(user.id(), "abc");
        assert_eq!(user.age, 25);
    }

    #[test]
    fn filters_by_exact_age() {
        assert_eq!(ids(&list(&[("age", "37")]).unwrap()), ["u2", "u3"]);
        assert!(list(&[("age", "3")]).unwrap().is_empty());
    }

    #[test]
    fn rejects_non_numeric_age() {
        let err = list(&[("age", "abc")]).unwrap_err();
        assert_eq!(err, QueryError::NotAnInteger { key: "age", value: "abc".into() });
    }

    #[test]
    fn filters_by_company_ignoring_case() {
        assert_eq!(ids(&list(&[("company", "Umm")]).unwrap()), ["u1", "u4"]);
        assert!(list(&[("company", "Frogs")]).unwrap().is_empty());
    }

    #[test]
    fn sorts_numerically_by_age() {
        assert_eq!(
            ids(&list(&[("orderBy", "age")]).unwrap()),
            ["u4", "u1", "u2", "u3"]
        );
    }

    #[test]
    fn sorts_by_name_then_limits() {
        let result = list(&[("orderBy", "name"), ("limit", "2")]).unwrap();
        assert_eq!(ids(&result), ["u4", "u1"]);
    }

    #[test]
    fn todo_only_keys_are_ignored() {
        assert_eq!(list(&[("status", "bogus")]).unwrap().len(), 4);
        assert!(list(&[("orderBy", "status")]).is_err());
    }
}
