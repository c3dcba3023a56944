pub mod errors;
pub mod db;
pub mod user;
pub mod classroom;
pub mod classroom_collaborator;
pub mod comment;
pub mod assignment;

#[cfg(test)]
mod tests;
