//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, dates, errors)
//! - `catalog` - Launchpads and destinations, read-only for bookings
//! - `booking` - Bookings, scheduled slots, admission rules and outcomes

pub mod booking;
pub mod catalog;
pub mod foundation;
