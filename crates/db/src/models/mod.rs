//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod allergen;
pub mod application;
pub mod attendance;
pub mod dish;
pub mod menu;
pub mod payment;
pub mod product;
pub mod report;
pub mod review;
pub mod session;
pub mod status;
pub mod subscription;
pub mod user;
