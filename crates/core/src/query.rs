//! The unified listing query specification.
//!
//! [`ListingQuery`] is the single description of what to filter and
//! how to sort. It has two interpreters: the repository layer
//! translates it to SQL, and [`crate::filter`] evaluates it over an
//! in-memory collection. Keeping one spec type prevents the two
//! paths from drifting apart.

use serde::Deserialize;

use crate::listing::{CategoryFilter, SortKey};

/// Raw query-string shape of `GET /api/properties`.
///
/// Everything arrives as an optional string; parsing into typed
/// bounds happens in [`ListingQuery::from_params`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ListingParams {
    pub category: Option<String>,
    #[serde(rename = "propertyType")]
    pub property_type: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "minPrice")]
    pub min_price: Option<String>,
    #[serde(rename = "maxPrice")]
    pub max_price: Option<String>,
    pub bedrooms: Option<String>,
    pub bathrooms: Option<String>,
    #[serde(rename = "minSize")]
    pub min_size: Option<String>,
    #[serde(rename = "maxSize")]
    pub max_size: Option<String>,
    pub search: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort_by: Option<String>,
}

/// Filter and sort specification for listing queries.
///
/// All filters are AND-ed. Range bounds are inclusive; an unset
/// bound is unbounded on that side. `search` and `quick` each
/// OR-match case-insensitively across property type, description,
/// and location; `quick` is the secondary quick-search box and is
/// never populated from HTTP query parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingQuery {
    pub category: Option<CategoryFilter>,
    pub property_type: Option<String>,
    pub location: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_bedrooms: Option<i32>,
    pub min_bathrooms: Option<i32>,
    pub min_size: Option<f64>,
    pub max_size: Option<f64>,
    pub search: Option<String>,
    pub quick: Option<String>,
    pub sort: SortKey,
}

impl ListingQuery {
    /// Build the typed query from raw parameters.
    ///
    /// Parsing is lenient on purpose: a malformed or negative numeric
    /// bound and an unrecognized category are treated as absent, not
    /// as errors. Blank text filters are dropped.
    pub fn from_params(params: &ListingParams) -> Self {
        ListingQuery {
            category: params.category.as_deref().and_then(CategoryFilter::parse),
            property_type: clean_text(params.property_type.as_deref()),
            location: clean_text(params.location.as_deref()),
            min_price: parse_bound(params.min_price.as_deref()),
            max_price: parse_bound(params.max_price.as_deref()),
            min_bedrooms: parse_count(params.bedrooms.as_deref()),
            min_bathrooms: parse_count(params.bathrooms.as_deref()),
            min_size: parse_bound(params.min_size.as_deref()),
            max_size: parse_bound(params.max_size.as_deref()),
            search: clean_text(params.search.as_deref()),
            quick: None,
            sort: SortKey::parse(params.sort_by.as_deref()),
        }
    }
}

/// Trim a text filter; blank means no filter.
fn clean_text(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Lenient numeric bound: full-string parse, non-finite and negative
/// values dropped.
fn parse_bound(value: Option<&str>) -> Option<f64> {
    value?
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite() && *n >= 0.0)
}

/// Lenient count bound (bedrooms/bathrooms): non-negative integer or
/// nothing.
fn parse_count(value: Option<&str>) -> Option<i32> {
    value?.trim().parse::<i32>().ok().filter(|n| *n >= 0)
}

/// Escape `%`, `_`, and `\` so user text is matched literally inside
/// a SQL `ILIKE` pattern (paired with `ESCAPE '\'`).
pub fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> ListingParams {
        let mut p = ListingParams::default();
        for (k, v) in pairs {
            let v = Some(v.to_string());
            match *k {
                "category" => p.category = v,
                "propertyType" => p.property_type = v,
                "location" => p.location = v,
                "minPrice" => p.min_price = v,
                "maxPrice" => p.max_price = v,
                "bedrooms" => p.bedrooms = v,
                "bathrooms" => p.bathrooms = v,
                "minSize" => p.min_size = v,
                "maxSize" => p.max_size = v,
                "search" => p.search = v,
                "sortBy" => p.sort_by = v,
                other => panic!("unknown param {other}"),
            }
        }
        p
    }

    #[test]
    fn parses_full_parameter_set() {
        let q = ListingQuery::from_params(&params(&[
            ("category", "rent"),
            ("propertyType", "duplex"),
            ("location", "Lekki"),
            ("minPrice", "100"),
            ("maxPrice", "500"),
            ("bedrooms", "3"),
            ("bathrooms", "2"),
            ("minSize", "50"),
            ("maxSize", "120.5"),
            ("search", "garden"),
            ("sortBy", "price-high"),
        ]));

        assert_eq!(q.category, Some(CategoryFilter::Rent));
        assert_eq!(q.property_type.as_deref(), Some("duplex"));
        assert_eq!(q.location.as_deref(), Some("Lekki"));
        assert_eq!(q.min_price, Some(100.0));
        assert_eq!(q.max_price, Some(500.0));
        assert_eq!(q.min_bedrooms, Some(3));
        assert_eq!(q.min_bathrooms, Some(2));
        assert_eq!(q.min_size, Some(50.0));
        assert_eq!(q.max_size, Some(120.5));
        assert_eq!(q.search.as_deref(), Some("garden"));
        assert_eq!(q.quick, None);
        assert_eq!(q.sort, SortKey::PriceHigh);
    }

    #[test]
    fn malformed_numeric_bounds_are_ignored() {
        let q = ListingQuery::from_params(&params(&[
            ("minPrice", "abc"),
            ("maxPrice", "12x"),
            ("bedrooms", "two"),
            ("minSize", "-5"),
        ]));

        assert_eq!(q.min_price, None);
        assert_eq!(q.max_price, None);
        assert_eq!(q.min_bedrooms, None);
        assert_eq!(q.min_size, None);
    }

    #[test]
    fn zero_is_a_valid_bound() {
        let q = ListingQuery::from_params(&params(&[("minPrice", "0")]));
        assert_eq!(q.min_price, Some(0.0));
    }

    #[test]
    fn blank_and_unknown_values_mean_no_filter() {
        let q = ListingQuery::from_params(&params(&[
            ("category", "lease"),
            ("location", "   "),
            ("sortBy", "whatever"),
        ]));

        assert_eq!(q.category, None);
        assert_eq!(q.location, None);
        assert_eq!(q.sort, SortKey::Newest);
    }

    #[test]
    fn empty_params_give_the_default_query() {
        let q = ListingQuery::from_params(&ListingParams::default());
        assert_eq!(q, ListingQuery::default());
    }

    #[test]
    fn escape_like_escapes_wildcards() {
        assert_eq!(escape_like("50%_off\\now"), "50\\%\\_off\\\\now");
        assert_eq!(escape_like("plain"), "plain");
    }
}
