//! Database module
//!
//! The inventory is a flat JSON file rather than a database server:
//! - Model definitions
//! - The inventory store with load/save and collection helpers

pub mod models;
pub mod repository;

pub use models::*;
pub use repository::{find_by_id, next_id, position_of, InventoryStore};
