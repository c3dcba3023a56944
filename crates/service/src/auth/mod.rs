//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Registration, login and the `Authorization` header check live here so the
//! web layer only maps results onto HTTP.

pub mod domain;
pub mod errors;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::AuthService;
