//! Layer and state synchronisation for the smart city traffic dashboard.
//!
//! Data flows one way: the `scheduler` asks the `dashboard` actor to refresh,
//! the actor runs the `fetch` table concurrently, stores each result in the
//! `store`, and the `layers` registry re-renders (`render`) and swaps the
//! primitives onto the map `surface` for visible categories. `widgets` turns
//! the same store into counters, lists and chart series.

pub mod config;
pub mod dashboard;
pub mod fetch;
pub mod layers;
pub mod render;
pub mod scheduler;
pub mod store;
pub mod surface;
pub mod widgets;

#[cfg(test)]
pub(crate) mod testing;

pub use config::DashboardConfig;
pub use dashboard::{Dashboard, DashboardHandle};
pub use scheduler::{RefreshScheduler, RefreshTrigger};
pub use store::{DataStore, Snapshot};
pub use surface::{LayerHandle, LogSurface, MapSurface, MemorySurface};
