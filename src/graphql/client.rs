//! HTTP executor for GraphQL operations.

use std::time::Duration;

use super::error::GraphqlError;
use super::request::GraphqlRequest;
use super::response::GraphqlResponse;

/// Builder for a [`GraphqlClient`].
pub struct GraphqlClientBuilder {
    url: String,
    request_timeout: Duration,
    user_agent: Option<String>,
}

impl GraphqlClientBuilder {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            request_timeout: Duration::from_secs(30),
            user_agent: None,
        }
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn build(self) -> Result<GraphqlClient, GraphqlError> {
        let mut builder = reqwest::Client::builder().timeout(self.request_timeout);
        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        Ok(GraphqlClient {
            http: builder.build()?,
            url: self.url,
        })
    }
}

/// A query-only GraphQL client over HTTP POST.
#[derive(Debug, Clone)]
pub struct GraphqlClient {
    http: reqwest::Client,
    url: String,
}

impl GraphqlClient {
    pub fn builder(url: impl Into<String>) -> GraphqlClientBuilder {
        GraphqlClientBuilder::new(url)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Execute one operation and return the raw response envelope.
    pub async fn execute(&self, request: GraphqlRequest) -> Result<GraphqlResponse, GraphqlError> {
        let response = self
            .http
            .post(&self.url)
            .header("Accept", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GraphqlError::HttpStatus {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: GraphqlResponse = response
            .json()
            .await
            .map_err(|e| GraphqlError::Decode(e.to_string()))?;
        Ok(envelope)
    }

    /// Execute a named query with variables and decode one field of the data.
    pub async fn query_field<T: serde::de::DeserializeOwned>(
        &self,
        query: impl Into<String>,
        operation: &str,
        variables: impl serde::Serialize,
        field: &str,
    ) -> Result<T, GraphqlError> {
        let request = GraphqlRequest::query(query)
            .operation_name(operation)
            .variables(variables);
        let response = self.execute(request).await?;
        response.field(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let client = GraphqlClient::builder("https://rickandmortyapi.com/graphql")
            .build()
            .unwrap();
        assert_eq!(client.url(), "https://rickandmortyapi.com/graphql");
    }

    #[test]
    fn test_builder_options() {
        let client = GraphqlClient::builder("http://localhost:4000/graphql")
            .request_timeout(Duration::from_secs(5))
            .user_agent("citadel-test")
            .build()
            .unwrap();
        assert_eq!(client.url(), "http://localhost:4000/graphql");
    }
}
