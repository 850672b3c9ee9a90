//! Inventory models
//!
//! Rust structs representing the persisted item record and the
//! request shapes the lifecycle operations accept.

use serde::{Deserialize, Serialize};

/// A furniture item in the inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: u64,
    pub name: String,
    pub value: f64,
    pub cost: f64,
    #[serde(default)]
    pub notes: String,
    /// Public URL of the item photo, fixed at creation
    pub photo_path: String,
    #[serde(default)]
    pub archived: bool,
}

impl Item {
    /// Active items are those not yet archived
    pub fn is_active(&self) -> bool {
        !self.archived
    }
}

/// Which partition of the collection to list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemFilter {
    Active,
    Archived,
}

impl ItemFilter {
    pub fn matches(&self, item: &Item) -> bool {
        match self {
            ItemFilter::Active => !item.archived,
            ItemFilter::Archived => item.archived,
        }
    }
}

/// Raw text fields submitted by the create and edit forms.
///
/// Field names match the HTML form inputs. Every field is optional here;
/// presence and number parsing are checked by the items service.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ItemForm {
    #[serde(rename = "itemName")]
    pub name: Option<String>,
    #[serde(rename = "itemValue")]
    pub value: Option<String>,
    #[serde(rename = "itemCost")]
    pub cost: Option<String>,
    #[serde(rename = "itemNotes")]
    pub notes: Option<String>,
}

impl ItemForm {
    pub fn new(
        name: impl Into<String>,
        value: impl Into<String>,
        cost: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            value: Some(value.into()),
            cost: Some(cost.into()),
            notes: Some(notes.into()),
        }
    }
}

/// An uploaded photo file
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub file_name: String,
    pub data: Vec<u8>,
}

impl PhotoUpload {
    pub fn new(file_name: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            data: data.into(),
        }
    }

    /// A file input submitted without a selection arrives with an empty name
    pub fn is_empty(&self) -> bool {
        self.file_name.trim().is_empty()
    }
}
