pub mod auth;
pub mod dashboard;
pub mod genre;
pub mod movie;
pub mod trailer;
pub mod upload;
