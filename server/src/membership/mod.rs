//! Membership Lifecycle Engine
//!
//! The business rules governing how a person becomes a member and how
//! their membership evolves:
//!
//! - [`requests`] - public intake and admin approval of membership
//!   requests, with atomic member provisioning on approval
//! - [`assignment`] - trainer/plan assignment, direct status updates,
//!   membership window updates
//! - [`renewal`] - paid-through date extension by one plan duration
//! - [`roster`] - the joined member listing with the derived expiry flag
//! - [`dashboard`] - point-in-time aggregate counts
//! - [`dates`] - calendar month arithmetic (pure)
//! - [`clock`] - injectable "today" source
//!
//! The engine holds no state of its own; every operation reads and
//! writes through `db::repository` within the scope of one request.
//! Expiry is a read-time derivation — there is no background task that
//! flips memberships to expired.

pub mod assignment;
pub mod clock;
pub mod dashboard;
pub mod dates;
pub mod error;
pub mod renewal;
pub mod requests;
pub mod roster;

pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{LifecycleError, LifecycleResult};
