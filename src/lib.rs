//! Space Booking - Launchpad Reservation Service
//!
//! This crate admits passenger bookings onto launchpad days, enforcing that a
//! launchpad flies once per day and to one destination per ISO week, even
//! under concurrent requests. Launchpads and scheduled launches are imported
//! from the SpaceX launch feed.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
