//! Core types for the smart city traffic dashboard.
//!
//! This crate provides:
//! - `category`: the fixed set of map data categories
//! - `records`: typed record shapes for every backend endpoint
//! - `congestion`: density tiers shared by cameras and road segments
//! - `transport`: the async `Transport` seam plus JSON decoding
//! - `client`: a `reqwest`-backed `Transport` (feature `api`)

pub mod category;
#[cfg(feature = "api")]
pub mod client;
pub mod congestion;
pub mod error;
pub mod paths;
pub mod records;
pub mod transport;

pub use category::Category;
pub use error::{DashboardError, Result};
pub use transport::Transport;
