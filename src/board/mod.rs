pub mod client;
pub mod models;

// Re-export commonly used types
pub use client::{BoardError, JobBoard};
pub use models::{Job, LocationType};
