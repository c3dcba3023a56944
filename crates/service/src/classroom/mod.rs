//! Classrooms and their memberships.

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::ClassroomService;
