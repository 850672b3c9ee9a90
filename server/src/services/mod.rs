//! Services module
//!
//! Business logic services that coordinate between routes and storage.

pub mod items;

pub use items::ItemsService;
