//! SpaceX adapter - the public launch feed.

mod client;

pub use client::{SpaceXClient, SpaceXConfig};
