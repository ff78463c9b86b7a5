//! Listing categories, sort keys, and the record-access trait the
//! filter engine is generic over.

use serde::{Deserialize, Serialize};

use crate::types::Timestamp;

/// Property type value that the `buy` category filter excludes.
pub const LAND_TYPE: &str = "land";

/// Whether a listing is offered for rent or for sale.
///
/// This is the canonical stored representation: `category` is kept
/// directly on the row as `rent`/`sell`. `"buy"` is a query-time
/// alias only (see [`CategoryFilter`]) and is never storable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Rent,
    Sell,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Rent => "rent",
            Category::Sell => "sell",
        }
    }

    /// Parse a stored category value, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("rent") {
            Some(Category::Rent)
        } else if value.eq_ignore_ascii_case("sell") {
            Some(Category::Sell)
        } else {
            None
        }
    }
}

/// Query-time category filter.
///
/// `buy` and `sell` both select listings for sale; `rent` selects
/// listings for rent. `buy` is the purchase-intent view and
/// additionally excludes raw land, an asymmetry `sell` does not have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    Buy,
    Sell,
    Rent,
}

impl CategoryFilter {
    /// Parse a `category` query parameter. Unknown values mean "no
    /// category filter" at the call site, hence `Option`.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("buy") {
            Some(CategoryFilter::Buy)
        } else if value.eq_ignore_ascii_case("sell") {
            Some(CategoryFilter::Sell)
        } else if value.eq_ignore_ascii_case("rent") {
            Some(CategoryFilter::Rent)
        } else {
            None
        }
    }

    /// The stored category this filter selects.
    pub fn category(self) -> Category {
        match self {
            CategoryFilter::Buy | CategoryFilter::Sell => Category::Sell,
            CategoryFilter::Rent => Category::Rent,
        }
    }

    /// Whether listings of type [`LAND_TYPE`] fall out of this filter.
    pub fn excludes_land(self) -> bool {
        matches!(self, CategoryFilter::Buy)
    }
}

/// Sort order for listing results.
///
/// Exactly one key applies per query; the default is newest first.
/// Listings missing the sorted-on optional field order after all
/// listings that have it, in both directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Ascending price (`sortBy=price-low`).
    PriceLow,
    /// Descending price (`sortBy=price-high`).
    PriceHigh,
    /// Descending size (`sortBy=size-large`).
    SizeLarge,
    /// Ascending size (`sortBy=size-small`).
    SizeSmall,
    /// Descending bedroom count (`sortBy=bedrooms`).
    Bedrooms,
    /// Descending creation time (default).
    #[default]
    Newest,
}

impl SortKey {
    /// Parse a `sortBy` query parameter. Absent or unrecognized
    /// values fall back to newest-first.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("price-low") => SortKey::PriceLow,
            Some("price-high") => SortKey::PriceHigh,
            Some("size-large") => SortKey::SizeLarge,
            Some("size-small") => SortKey::SizeSmall,
            Some("bedrooms") => SortKey::Bedrooms,
            _ => SortKey::Newest,
        }
    }
}

/// Field access the filter engine needs from a listing record.
///
/// The database row model implements this, so the same predicate and
/// comparators run over any in-memory collection of rows. Optional
/// accessors return `None` when the listing never recorded the field.
pub trait ListingRecord {
    fn property_type(&self) -> &str;
    fn category(&self) -> Category;
    fn location(&self) -> &str;
    fn description(&self) -> Option<&str>;
    fn price(&self) -> f64;
    fn bedrooms(&self) -> Option<i32>;
    fn bathrooms(&self) -> Option<i32>;
    fn size(&self) -> Option<f64>;
    fn created_at(&self) -> Timestamp;
}
