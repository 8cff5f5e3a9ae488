//! GraphQL request envelope.

use serde::Serialize;
use serde_json::Value;

/// A GraphQL query with optional variables.
#[derive(Debug, Clone, Serialize)]
pub struct GraphqlRequest {
    /// The GraphQL document.
    pub query: String,

    /// Variables for the document.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variables: Option<Value>,

    /// Operation name, required when the document holds several operations.
    #[serde(skip_serializing_if = "Option::is_none", rename = "operationName")]
    pub operation_name: Option<String>,
}

impl GraphqlRequest {
    pub fn query(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            variables: None,
            operation_name: None,
        }
    }

    /// Set the variables from a serializable value.
    pub fn variables(mut self, variables: impl Serialize) -> Self {
        self.variables = serde_json::to_value(variables).ok();
        self
    }

    pub fn operation_name(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }
}
