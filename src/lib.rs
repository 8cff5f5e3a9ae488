//! citadel - terminal explorer for the Rick and Morty GraphQL catalog
//!
//! Module structure:
//! - core: framework (View, InputEvent, EventResult)
//! - graphql: transport (client, request/response envelope)
//! - models: entities, filters and the pagination envelope
//! - services: typed catalog operations and configuration
//! - app: state machines (ListPane, SearchDebouncer, Workbench)
//! - views: per-tab rendering and key handling
//! - runtime: async fetch runtime and result messages
//! - tui: terminal setup/restore lifecycle

pub mod app;
pub mod core;
pub mod graphql;
pub mod logging;
pub mod models;
pub mod runtime;
pub mod services;
pub mod tui;
pub mod views;
