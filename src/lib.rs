//! # Mirage - Fake REST API Server
//!
//! Mirage is a configuration-driven fake REST API server built in Rust.
//! Endpoints are declared as field schemas with generator directives; every
//! request synthesizes fresh JSON records on the fly.
//!
//! ## Features
//!
//! - **Declarative endpoints**: field → directive schemas in YAML/JSON files
//! - **Faker-backed values**: scalar generation via the `fake` crate
//! - **Relationships**: nested records with cardinality inferred from the
//!   field name (`category` → one record, `categories` → a collection)
//! - **Preset fixtures**: static override records by position or key
//! - **Request shaping**: `_count`, `_only`, `_without`, `_no_relationships`,
//!   equality filters (including `outer__inner` nested paths), pagination
//! - **Health Checks**: Kubernetes-ready health endpoints
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use mirage::config::Settings;
//!
//! fn main() -> anyhow::Result<()> {
//!     // Load configuration
//!     let settings = Settings::new()?;
//!
//!     // Server will start on configured host:port
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! Mirage follows Hexagonal Architecture:
//! - **Domain**: schemas, errors, and the inflection heuristic
//! - **Engine**: the response-synthesis core
//! - **Adapters**: HTTP handlers
//! - **Config**: configuration management

pub mod adapters;
pub mod cli;
pub mod config;
pub mod domain;
pub mod engine;

use crate::adapters::api_handler::{self, ApiState};
use crate::adapters::health_handler::HealthHandler;
use crate::engine::Engine;
use axum::{routing::get, Router};
use std::sync::Arc;

/// Creates the Axum application router with all endpoints configured.
///
/// # Arguments
///
/// * `engine` - The response-synthesis engine (immutable, shared)
/// * `base_path` - Path prefix for the fake API routes
/// * `health_handler` - Health check handler
///
/// # Returns
///
/// Configured Axum Router
pub fn create_app(
    engine: Arc<Engine>,
    base_path: &str,
    health_handler: Arc<HealthHandler>,
) -> Router {
    let api_router = Router::new()
        .route("/:endpoint", get(api_handler::collection))
        .route("/:endpoint/:key", get(api_handler::single))
        .with_state(ApiState { engine });

    let router = Router::new()
        // Health check endpoints
        .route(
            "/health",
            get({
                let handler = health_handler.clone();
                move || {
                    let h = handler.clone();
                    async move { h.health().await }
                }
            }),
        )
        .route(
            "/health/ready",
            get({
                let handler = health_handler.clone();
                move || {
                    let h = handler.clone();
                    async move { h.ready().await }
                }
            }),
        )
        .route(
            "/health/live",
            get({
                let handler = health_handler.clone();
                move || {
                    let h = handler.clone();
                    async move { h.live().await }
                }
            }),
        )
        // Fake API endpoints
        .nest(base_path, api_router);

    router.layer(
        tower_http::cors::CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any),
    )
}
