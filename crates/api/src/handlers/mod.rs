pub mod admin;
pub mod auth;
pub mod cook;
pub mod profile;
pub mod student;
