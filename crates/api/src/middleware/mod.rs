//! Authentication and role-gate extractors.
//!
//! - [`auth::AuthUser`] -- the caller identified by a JWT Bearer token.
//! - [`rbac::RequireStudent`], [`rbac::RequireCook`], [`rbac::RequireAdmin`]
//!   -- one gate per canteen role.

pub mod auth;
pub mod rbac;
