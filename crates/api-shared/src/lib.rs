//! # API Shared
//!
//! Shared wire types and services for the HealthChat HTTP API.
//!
//! Contains:
//! - Request/response bodies (`wire` module), usable with serde and OpenAPI
//! - Shared services like `HealthService`
//!
//! Used by `api-rest` and the `healthchat-run` binary.

pub mod health;
pub mod wire;

pub use health::HealthService;
pub use wire::*;
