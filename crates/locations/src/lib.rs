//! Locations domain module.
//!
//! Storage locations (warehouses, shelves, virtual sinks) that movements
//! transfer stock between. Pure domain logic, no IO.

pub mod location;

pub use location::{Location, LocationChanges, NewLocation};
pub use stockroom_core::LocationId;
