//! Listing row model.
//!
//! Serialized field names keep the wire shape the original clients
//! expect (`type`, `createdAt`); column names follow the schema.

use serde::Serialize;
use sqlx::FromRow;

use haven_core::listing::{Category, ListingRecord};
use haven_core::types::{DbId, Timestamp};

/// A row from the `listings` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Listing {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub property_type: String,
    pub category: String,
    pub location: String,
    pub price: f64,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub size: Option<f64>,
    pub images: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: Timestamp,
}

impl ListingRecord for Listing {
    fn property_type(&self) -> &str {
        &self.property_type
    }

    fn category(&self) -> Category {
        // The CHECK constraint limits the column to rent|sell.
        Category::parse(&self.category).unwrap_or(Category::Sell)
    }

    fn location(&self) -> &str {
        &self.location
    }

    fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    fn price(&self) -> f64 {
        self.price
    }

    fn bedrooms(&self) -> Option<i32> {
        self.bedrooms
    }

    fn bathrooms(&self) -> Option<i32> {
        self.bathrooms
    }

    fn size(&self) -> Option<f64> {
        self.size
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}
