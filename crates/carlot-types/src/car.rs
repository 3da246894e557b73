use std::fmt;

use serde::{Deserialize, Serialize};

use crate::price::Price;

/// Key of a car record.
///
/// Freshly generated ids are UUID v4 strings, but any string read back from
/// the table (or named in a delete form) is accepted as an id.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CarId(String);

impl CarId {
    /// Generate a new random id (UUID v4).
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Wrap an existing key.
    pub fn from_string(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short representation (first 8 characters).
    pub fn short_id(&self) -> &str {
        let end = self
            .0
            .char_indices()
            .nth(8)
            .map(|(i, _)| i)
            .unwrap_or(self.0.len());
        &self.0[..end]
    }
}

impl fmt::Debug for CarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CarId({})", self.short_id())
    }
}

impl fmt::Display for CarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CarId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// A persisted car record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Car {
    pub id: CarId,
    pub name: String,
    pub category: String,
    pub price: Price,
    /// Location reported by the blob store for the uploaded image.
    pub image_location: String,
}

/// Raw form fields submitted for a new car. Nothing here is validated yet.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarForm {
    pub name: Option<String>,
    pub category: Option<String>,
    pub price: Option<String>,
}

impl CarForm {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        price: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            category: Some(category.into()),
            price: Some(price.into()),
        }
    }

    /// Set a field by its form name. Accepts both the current names and the
    /// legacy ones (`TenXe`, `LoaiXe`, `GiaXe`). Returns `false` for a name
    /// that is not a car field.
    pub fn set_field(&mut self, field: &str, value: String) -> bool {
        match field {
            "name" | "TenXe" => self.name = Some(value),
            "category" | "LoaiXe" => self.category = Some(value),
            "price" | "GiaXe" => self.price = Some(value),
            _ => return false,
        }
        true
    }
}
