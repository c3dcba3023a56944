//! Assignments posted by classroom teachers.

pub mod domain;
pub mod repository;
pub mod service;

pub use service::AssignmentService;
