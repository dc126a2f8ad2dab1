//! GraphQL request types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::operations::Operation;

/// Whether a document reads or writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    #[default]
    Query,
    Mutation,
}

/// A GraphQL request as sent over the wire: `{ query, variables, operationName }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphQLRequest {
    /// The GraphQL document.
    pub query: String,

    /// Variables for the operation, omitted when the operation takes none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Value>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        rename = "operationName"
    )]
    pub operation_name: Option<String>,

    /// Not serialized; transports use it for logging only.
    #[serde(skip)]
    pub kind: OperationKind,
}

impl GraphQLRequest {
    /// Create a new query request.
    pub fn query(document: impl Into<String>) -> Self {
        Self {
            query: document.into(),
            variables: None,
            operation_name: None,
            kind: OperationKind::Query,
        }
    }

    /// Create a new mutation request.
    pub fn mutation(document: impl Into<String>) -> Self {
        Self {
            kind: OperationKind::Mutation,
            ..Self::query(document)
        }
    }

    /// Build the request for a typed operation.
    ///
    /// Variables that serialize to `null` (the unit type) are left out.
    pub fn for_operation<O: Operation>(
        variables: &O::Variables,
    ) -> Result<Self, serde_json::Error> {
        let base = match O::KIND {
            OperationKind::Query => Self::query(O::DOCUMENT),
            OperationKind::Mutation => Self::mutation(O::DOCUMENT),
        };
        base.operation_name(O::NAME).variables(variables)
    }

    /// Set the operation name.
    pub fn operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }

    /// Set the variables from any serializable value.
    pub fn variables(mut self, variables: impl Serialize) -> Result<Self, serde_json::Error> {
        self.variables = match serde_json::to_value(variables)? {
            Value::Null => None,
            value => Some(value),
        };
        Ok(self)
    }

    /// The operation name, or `"anonymous"` for unnamed documents.
    pub fn name(&self) -> &str {
        self.operation_name.as_deref().unwrap_or("anonymous")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::operations::{CreateNewPost, CreatePostVariables, GetPost};
    use serde_json::json;

    #[test]
    fn test_unit_variables_are_omitted() {
        let request = GraphQLRequest::for_operation::<GetPost>(&()).unwrap();
        assert_eq!(request.kind, OperationKind::Query);
        assert!(request.variables.is_none());

        let body = serde_json::to_value(&request).unwrap();
        assert!(body.get("variables").is_none());
        assert_eq!(body["operationName"], "GetPost");
    }

    #[test]
    fn test_mutation_carries_variables() {
        let vars = CreatePostVariables {
            title: "Hello".into(),
            text: "World".into(),
        };
        let request = GraphQLRequest::for_operation::<CreateNewPost>(&vars).unwrap();
        assert_eq!(request.kind, OperationKind::Mutation);
        assert_eq!(request.variables, Some(json!({"title": "Hello", "text": "World"})));
        assert_eq!(request.name(), "CreateNewPost");
    }
}
