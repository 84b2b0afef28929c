//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Centralizes login, token and permission logic under the service crate.
//! Web handlers only translate errors to responses; every rule lives here.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::{hash_password, verify_password, AuthConfig, AuthService};
