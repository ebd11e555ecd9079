//! Shared types for the gym management backend
//!
//! Domain models and DTOs exchanged between the server and its API
//! clients, plus small ID/time utilities.

pub mod models;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};
