//! GraphQL wire layer: request/response envelopes and an HTTP executor.
//!
//! Query-only: the catalog API exposes no mutations or subscriptions.

pub mod client;
pub mod error;
pub mod request;
pub mod response;

pub use client::{GraphqlClient, GraphqlClientBuilder};
pub use error::GraphqlError;
pub use request::GraphqlRequest;
pub use response::{GraphqlResponse, ServerError};
