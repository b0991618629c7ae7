//! Canteen API server library.
//!
//! Exposes config, state, error handling and routes so integration tests,
//! the server binary and the demo seeder can share them.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod query;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
