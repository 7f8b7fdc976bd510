pub mod auth;
pub mod resume;

pub use auth::AuthStore;
pub use resume::{Artifact, Operation, ResumeStore};
