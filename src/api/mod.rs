pub mod auth;
pub mod error;
pub mod export;
pub mod http;
pub mod request;
pub mod resume;
