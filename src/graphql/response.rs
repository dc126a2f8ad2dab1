//! GraphQL response types.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// A GraphQL error returned by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQLError {
    pub message: String,

    /// Path to the field that caused the error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<Vec<Value>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Value>,
}

impl GraphQLError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            path: None,
            extensions: None,
        }
    }

    /// Attach the path of the field that failed.
    pub fn at(mut self, field: &str) -> Self {
        self.path = Some(vec![Value::String(field.to_string())]);
        self
    }
}

impl fmt::Display for GraphQLError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref path) = self.path {
            let joined = path
                .iter()
                .map(|segment| match segment {
                    Value::String(name) => name.clone(),
                    other => other.to_string(),
                })
                .collect::<Vec<_>>()
                .join(".");
            write!(f, " (at {})", joined)?;
        }
        Ok(())
    }
}

impl std::error::Error for GraphQLError {}

/// A GraphQL response body: `{ data, errors }`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphQLResponse {
    #[serde(default)]
    pub data: Option<Value>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<GraphQLError>,
}

impl GraphQLResponse {
    /// A successful response carrying `data`.
    pub fn with_data(data: Value) -> Self {
        Self {
            data: Some(data),
            errors: Vec::new(),
        }
    }

    /// A failed response with a single error and no data.
    pub fn with_error(error: GraphQLError) -> Self {
        Self {
            data: None,
            errors: vec![error],
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// All error messages joined with `"; "`.
    pub fn error_message(&self) -> Option<String> {
        if self.errors.is_empty() {
            None
        } else {
            Some(
                self.errors
                    .iter()
                    .map(|e| e.message.as_str())
                    .collect::<Vec<_>>()
                    .join("; "),
            )
        }
    }

    /// Decode `data` into the operation's payload type.
    pub fn decode<T: DeserializeOwned>(&self) -> Option<Result<T, serde_json::Error>> {
        self.data
            .as_ref()
            .filter(|data| !data.is_null())
            .map(|data| serde_json::from_value(data.clone()))
    }
}
