//! Authentication primitives.
//!
//! - [`password`] -- Argon2id hashing and the registration password policy.
//! - [`jwt`] -- access tokens for canteen roles and opaque refresh tokens.

pub mod jwt;
pub mod password;
