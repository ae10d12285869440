//! Host-integration contract: picking request parameters and reporting failures.
//!
//! Transport-agnostic; a web framework adapter fills in [`RequestParams`]
//! from its own request type and maps [`RequestError::status`] onto a
//! response.

use crate::error::{RuleError, ValidationFailed};
use crate::validator::Validator;
use serde_json::{Map, Value};
use std::convert::Infallible;
use std::str::FromStr;
use thiserror::Error;

/// Request method, as far as parameter selection cares
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestMethod {
    Get,
    Post,
    Delete,
    Other(String),
}

impl From<&str> for RequestMethod {
    fn from(method: &str) -> Self {
        let method = method.trim().to_ascii_uppercase();
        match method.as_str() {
            "GET" => Self::Get,
            "POST" => Self::Post,
            "DELETE" => Self::Delete,
            _ => Self::Other(method),
        }
    }
}

impl FromStr for RequestMethod {
    type Err = Infallible;

    fn from_str(method: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(method))
    }
}

/// Parameters a host extracted from an inbound request
#[derive(Debug, Clone)]
pub struct RequestParams {
    pub method: RequestMethod,
    pub query: Map<String, Value>,
    pub body: Map<String, Value>,
}

impl RequestParams {
    pub fn new(method: impl Into<RequestMethod>) -> Self {
        Self {
            method: method.into(),
            query: Map::new(),
            body: Map::new(),
        }
    }

    pub fn query(mut self, query: Map<String, Value>) -> Self {
        self.query = query;
        self
    }

    pub fn body(mut self, body: Map<String, Value>) -> Self {
        self.body = body;
        self
    }

    /// Query for reads, body for writes and deletes, nothing otherwise
    pub fn select(&self) -> Value {
        match self.method {
            RequestMethod::Get => Value::Object(self.query.clone()),
            RequestMethod::Post | RequestMethod::Delete => Value::Object(self.body.clone()),
            RequestMethod::Other(_) => Value::Object(Map::new()),
        }
    }
}

/// Why a request failed validation
#[derive(Debug, Error)]
pub enum RequestError {
    /// The data was bad; answer 422 with [`ValidationFailed::to_json`]
    #[error(transparent)]
    Invalid(#[from] ValidationFailed),

    /// The rules were bad; a server-side fault
    #[error(transparent)]
    Rule(#[from] RuleError),
}

impl RequestError {
    /// HTTP status a host should answer with
    pub fn status(&self) -> u16 {
        match self {
            Self::Invalid(failed) => failed.status(),
            Self::Rule(_) => 500,
        }
    }
}

impl Validator {
    /// Validate a request, defaulting to the parameters its method selects.
    ///
    /// An explicit `data` mapping takes precedence over the request's own.
    pub fn validate_request(
        &self,
        rules: &Value,
        params: &RequestParams,
        data: Option<&Value>,
    ) -> Result<(), RequestError> {
        let selected;
        let data = match data {
            Some(data) => data,
            None => {
                selected = params.select();
                &selected
            }
        };

        match self.validate(rules, data)? {
            Some(errors) => {
                tracing::debug!(method = ?params.method, errors = errors.len(), "request failed validation");
                Err(ValidationFailed::new(errors).into())
            }
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_method_parsing() {
        assert_eq!(RequestMethod::from("get"), RequestMethod::Get);
        assert_eq!(RequestMethod::from(" Post "), RequestMethod::Post);
        assert_eq!(RequestMethod::from("DELETE"), RequestMethod::Delete);
        assert_eq!(RequestMethod::from("patch"), RequestMethod::Other("PATCH".to_string()));
        assert_eq!("get".parse::<RequestMethod>(), Ok(RequestMethod::Get));
    }

    #[test]
    fn test_select_by_method() {
        let query = map(json!({ "q": "search" }));
        let body = map(json!({ "b": 1 }));

        let get = RequestParams::new("GET").query(query.clone()).body(body.clone());
        assert_eq!(get.select(), json!({ "q": "search" }));

        let post = RequestParams::new("POST").query(query.clone()).body(body.clone());
        assert_eq!(post.select(), json!({ "b": 1 }));

        let delete = RequestParams::new("DELETE").query(query.clone()).body(body.clone());
        assert_eq!(delete.select(), json!({ "b": 1 }));

        let put = RequestParams::new("PUT").query(query).body(body);
        assert_eq!(put.select(), json!({}));
    }

    #[test]
    fn test_validate_request_uses_query_for_get() {
        let validator = Validator::new();
        let params = RequestParams::new("GET").query(map(json!({ "page": "2" })));

        assert!(validator
            .validate_request(&json!({ "page": "int" }), &params, None)
            .is_ok());
    }

    #[test]
    fn test_validate_request_failure_payload() {
        let validator = Validator::new();
        let params = RequestParams::new("POST").body(map(json!({ "age": 150 })));

        let err = validator
            .validate_request(&json!({ "age": { "type": "number", "max": 120 } }), &params, None)
            .unwrap_err();

        assert_eq!(err.status(), 422);
        match err {
            RequestError::Invalid(failed) => assert_eq!(
                failed.to_json(),
                json!({
                    "code": "invalid_param",
                    "errors": [{ "field": "age", "error": "should smaller than 120" }]
                })
            ),
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn test_explicit_data_wins() {
        let validator = Validator::new();
        let params = RequestParams::new("POST").body(map(json!({ "name": 1 })));

        let result = validator.validate_request(
            &json!({ "name": "string" }),
            &params,
            Some(&json!({ "name": "Ada" })),
        );
        assert!(result.is_ok());
    }

    #[test]
    fn test_rule_errors_are_server_faults() {
        let validator = Validator::new();
        let params = RequestParams::new("GET");

        let err = validator
            .validate_request(&json!("number"), &params, None)
            .unwrap_err();
        assert_eq!(err.status(), 500);
        assert!(matches!(err, RequestError::Rule(RuleError::RulesNotObject)));
    }
}
