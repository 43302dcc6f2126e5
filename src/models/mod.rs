//! Data models for the Code Collabo backend.

mod project;

pub use project::*;
