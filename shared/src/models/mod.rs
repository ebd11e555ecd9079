//! Data models
//!
//! Shared between the server and frontend (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` (SQLite INTEGER PRIMARY KEY, snowflake-generated).
//! Calendar dates (membership windows, session dates) are `NaiveDate` /
//! `YYYY-MM-DD` TEXT; audit timestamps are Unix milliseconds.

pub mod attendance;
pub mod membership;
pub mod plan;
pub mod request;
pub mod serde_helpers;
pub mod session;
pub mod stats;
pub mod user;

// Re-exports
pub use attendance::*;
pub use membership::*;
pub use plan::*;
pub use request::*;
pub use session::*;
pub use stats::*;
pub use user::*;
