//! Listing submission validation.
//!
//! Creation payloads come from web clients that send numeric fields
//! as JSON numbers or as strings, so [`CreateListing`] accepts both
//! and `validate` coerces strictly: anything that is not a usable
//! number is rejected with an error naming the field. A non-number is
//! never persisted.

use serde::Deserialize;

use crate::error::CoreError;
use crate::listing::Category;

/// A property creation payload as received from a client.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateListing {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub price: Option<NumberOrText>,
    pub bedrooms: Option<NumberOrText>,
    pub bathrooms: Option<NumberOrText>,
    pub size: Option<NumberOrText>,
    pub images: Option<Vec<String>>,
}

/// A numeric field that may arrive as a JSON number or a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText {
    Number(f64),
    Text(String),
}

/// A validated listing ready for insertion.
#[derive(Debug, Clone, PartialEq)]
pub struct NewListing {
    pub title: String,
    pub description: Option<String>,
    pub property_type: String,
    pub category: Category,
    pub location: String,
    pub price: f64,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub size: Option<f64>,
    pub images: Vec<String>,
}

impl CreateListing {
    /// Validate required fields and coerce numeric ones.
    ///
    /// The 5-image cap some clients enforce is a client convenience;
    /// no count limit is applied here.
    pub fn validate(self) -> Result<NewListing, CoreError> {
        let title = require_text("title", self.title)?;
        let property_type = require_text("type", self.property_type)?;
        let location = require_text("location", self.location)?;

        let raw_category = require_text("category", self.category)?;
        let category = Category::parse(&raw_category).ok_or_else(|| {
            CoreError::validation(
                "category",
                format!("must be \"rent\" or \"sell\", got \"{raw_category}\""),
            )
        })?;

        let price = match self.price {
            Some(value) => coerce_number("price", &value)?,
            None => return Err(missing("price")),
        };

        let bedrooms = self
            .bedrooms
            .map(|v| coerce_count("bedrooms", &v))
            .transpose()?;
        let bathrooms = self
            .bathrooms
            .map(|v| coerce_count("bathrooms", &v))
            .transpose()?;
        let size = self.size.map(|v| coerce_number("size", &v)).transpose()?;

        let description = self
            .description
            .map(|d| d.trim().to_string())
            .filter(|d| !d.is_empty());

        Ok(NewListing {
            title,
            description,
            property_type,
            category,
            location,
            price,
            bedrooms,
            bathrooms,
            size,
            images: self.images.unwrap_or_default(),
        })
    }
}

fn missing(field: &str) -> CoreError {
    CoreError::validation(field, "is required")
}

/// Required text field: present and non-empty after trimming.
fn require_text(field: &str, value: Option<String>) -> Result<String, CoreError> {
    let trimmed = value.as_deref().map(str::trim).unwrap_or("");
    if trimmed.is_empty() {
        return Err(missing(field));
    }
    Ok(trimmed.to_string())
}

/// Strict coercion to a finite, non-negative number.
fn coerce_number(field: &str, value: &NumberOrText) -> Result<f64, CoreError> {
    let number = match value {
        NumberOrText::Number(n) => *n,
        NumberOrText::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| CoreError::validation(field, format!("must be a number, got \"{s}\"")))?,
    };
    if !number.is_finite() {
        return Err(CoreError::validation(field, "must be a finite number"));
    }
    if number < 0.0 {
        return Err(CoreError::validation(field, "must not be negative"));
    }
    Ok(number)
}

/// Strict coercion to a non-negative whole number (bedrooms,
/// bathrooms).
fn coerce_count(field: &str, value: &NumberOrText) -> Result<i32, CoreError> {
    let number = coerce_number(field, value)?;
    if number.fract() != 0.0 || number > i32::MAX as f64 {
        return Err(CoreError::validation(field, "must be a whole number"));
    }
    Ok(number as i32)
}
