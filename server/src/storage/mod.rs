//! Storage module
//!
//! Provides on-disk storage for uploaded item photos.

pub mod photo_store;

pub use photo_store::PhotoStore;
