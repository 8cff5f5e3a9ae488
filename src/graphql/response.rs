//! GraphQL response envelope.

use std::fmt;

use serde::{de::DeserializeOwned, Deserialize};
use serde_json::Value;

use super::error::GraphqlError;

/// An error reported by the server inside an otherwise valid response.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerError {
    pub message: String,

    /// Path to the field that failed, if the server reported one.
    #[serde(default)]
    pub path: Option<Vec<PathSegment>>,
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref path) = self.path {
            write!(f, " (at ")?;
            for (i, segment) in path.iter().enumerate() {
                if i > 0 {
                    write!(f, ".")?;
                }
                match segment {
                    PathSegment::Field(name) => write!(f, "{}", name)?,
                    PathSegment::Index(idx) => write!(f, "[{}]", idx)?,
                }
            }
            write!(f, ")")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

/// The `{data, errors}` envelope every GraphQL reply arrives in.
///
/// Partial data alongside errors is legal GraphQL; `field()` refuses to
/// decode in that case and reports the server errors instead, which is what
/// the single "query failed" taxonomy wants.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlResponse {
    #[serde(default)]
    pub data: Option<Value>,

    #[serde(default)]
    pub errors: Vec<ServerError>,
}

impl GraphqlResponse {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// All server errors joined into one message.
    pub fn error_message(&self) -> Option<String> {
        if self.errors.is_empty() {
            None
        } else {
            Some(
                self.errors
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join("; "),
            )
        }
    }

    /// Decode one named field out of `data`.
    pub fn field<T: DeserializeOwned>(&self, field: &str) -> Result<T, GraphqlError> {
        if let Some(message) = self.error_message() {
            return Err(GraphqlError::Server(message));
        }

        match &self.data {
            Some(Value::Object(data)) => {
                let value = data.get(field).ok_or_else(|| {
                    GraphqlError::Decode(format!("field '{}' missing from response", field))
                })?;
                serde_json::from_value(value.clone()).map_err(|e| {
                    GraphqlError::Decode(format!("field '{}': {}", field, e))
                })
            }
            Some(_) => Err(GraphqlError::Decode("response data is not an object".into())),
            None => Err(GraphqlError::NoData),
        }
    }
}
