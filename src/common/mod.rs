pub mod error;
pub mod response;
pub mod upload;
pub mod video;
