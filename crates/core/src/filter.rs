//! In-memory interpreter for [`ListingQuery`].
//!
//! `matches` is a pure predicate, `sort` a stable sort, and `apply`
//! runs them in that order over a snapshot of the collection. The two
//! passes are never interleaved, so the predicate can be re-run from
//! scratch every time the inputs change.

use std::cmp::Ordering;

use crate::listing::{ListingRecord, SortKey, LAND_TYPE};
use crate::query::ListingQuery;

/// Evaluate the full filter conjunction against one record.
pub fn matches<R: ListingRecord>(record: &R, query: &ListingQuery) -> bool {
    if let Some(filter) = query.category {
        if record.category() != filter.category() {
            return false;
        }
        if filter.excludes_land() && record.property_type().eq_ignore_ascii_case(LAND_TYPE) {
            return false;
        }
    }

    if let Some(wanted) = &query.property_type {
        if !contains_ci(record.property_type(), wanted) {
            return false;
        }
    }

    if let Some(wanted) = &query.location {
        if !contains_ci(record.location(), wanted) {
            return false;
        }
    }

    if let Some(min) = query.min_price {
        if record.price() < min {
            return false;
        }
    }
    if let Some(max) = query.max_price {
        if record.price() > max {
            return false;
        }
    }

    // A record that never recorded an optional numeric field fails
    // any active filter on that field.
    if let Some(min) = query.min_bedrooms {
        if !record.bedrooms().is_some_and(|b| b >= min) {
            return false;
        }
    }
    if let Some(min) = query.min_bathrooms {
        if !record.bathrooms().is_some_and(|b| b >= min) {
            return false;
        }
    }
    if let Some(min) = query.min_size {
        if !record.size().is_some_and(|s| s >= min) {
            return false;
        }
    }
    if let Some(max) = query.max_size {
        if !record.size().is_some_and(|s| s <= max) {
            return false;
        }
    }

    if let Some(text) = &query.search {
        if !matches_text(record, text) {
            return false;
        }
    }
    if let Some(text) = &query.quick {
        if !matches_text(record, text) {
            return false;
        }
    }

    true
}

/// Stable sort by the query's sort key.
pub fn sort<R: ListingRecord>(records: &mut [R], key: SortKey) {
    records.sort_by(|a, b| compare(a, b, key));
}

/// Filter, then stable-sort. Pure function of the query and the
/// collection snapshot.
pub fn apply<R: ListingRecord>(mut records: Vec<R>, query: &ListingQuery) -> Vec<R> {
    records.retain(|r| matches(r, query));
    sort(&mut records, query.sort);
    records
}

/// Free-text OR-match across property type, description, and
/// location. Case-insensitive substring, never tokenized.
fn matches_text<R: ListingRecord>(record: &R, text: &str) -> bool {
    contains_ci(record.property_type(), text)
        || record.description().is_some_and(|d| contains_ci(d, text))
        || contains_ci(record.location(), text)
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn compare<R: ListingRecord>(a: &R, b: &R, key: SortKey) -> Ordering {
    match key {
        SortKey::PriceLow => a.price().total_cmp(&b.price()),
        SortKey::PriceHigh => b.price().total_cmp(&a.price()),
        SortKey::SizeLarge => cmp_f64_desc(a.size(), b.size()),
        SortKey::SizeSmall => cmp_f64_asc(a.size(), b.size()),
        SortKey::Bedrooms => cmp_i32_desc(a.bedrooms(), b.bedrooms()),
        SortKey::Newest => b.created_at().cmp(&a.created_at()),
    }
}

// Missing values order after present ones in both directions.

fn cmp_f64_asc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn cmp_f64_desc(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn cmp_i32_desc(a: Option<i32>, b: Option<i32>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listing::{Category, CategoryFilter};
    use crate::types::Timestamp;
    use chrono::TimeZone;

    #[derive(Debug, Clone, PartialEq)]
    struct TestListing {
        title: &'static str,
        property_type: &'static str,
        category: Category,
        location: &'static str,
        description: Option<&'static str>,
        price: f64,
        bedrooms: Option<i32>,
        bathrooms: Option<i32>,
        size: Option<f64>,
        created_at: Timestamp,
    }

    impl ListingRecord for TestListing {
        fn property_type(&self) -> &str {
            self.property_type
        }
        fn category(&self) -> Category {
            self.category
        }
        fn location(&self) -> &str {
            self.location
        }
        fn description(&self) -> Option<&str> {
            self.description
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

    fn at(day: u32) -> Timestamp {
        chrono::Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap()
    }

    fn listing(title: &'static str) -> TestListing {
        TestListing {
            title,
            property_type: "apartment",
            category: Category::Sell,
            location: "Lekki",
            description: None,
            price: 100_000.0,
            bedrooms: Some(2),
            bathrooms: Some(1),
            size: Some(80.0),
            created_at: at(1),
        }
    }

    fn apartment_a() -> TestListing {
        TestListing {
            price: 500_000.0,
            ..listing("A")
        }
    }

    fn land_b() -> TestListing {
        TestListing {
            property_type: "land",
            price: 300_000.0,
            bedrooms: None,
            bathrooms: None,
            ..listing("B")
        }
    }

    fn titles(records: &[TestListing]) -> Vec<&'static str> {
        records.iter().map(|r| r.title).collect()
    }

    #[test]
    fn empty_query_matches_everything() {
        let q = ListingQuery::default();
        assert!(matches(&apartment_a(), &q));
        assert!(matches(&land_b(), &q));
    }

    #[test]
    fn buy_excludes_land_but_sell_does_not() {
        let records = vec![apartment_a(), land_b()];

        let buy = ListingQuery {
            category: Some(CategoryFilter::Buy),
            ..Default::default()
        };
        assert_eq!(titles(&apply(records.clone(), &buy)), vec!["A"]);

        let sell = ListingQuery {
            category: Some(CategoryFilter::Sell),
            ..Default::default()
        };
        assert_eq!(titles(&apply(records, &sell)), vec!["A", "B"]);
    }

    #[test]
    fn rent_filter_only_matches_rentals() {
        let rental = TestListing {
            category: Category::Rent,
            ..listing("R")
        };
        let q = ListingQuery {
            category: Some(CategoryFilter::Rent),
            ..Default::default()
        };
        assert!(matches(&rental, &q));
        assert!(!matches(&apartment_a(), &q));
    }

    #[test]
    fn price_range_is_inclusive_at_both_bounds() {
        let exact = TestListing {
            price: 100.0,
            ..listing("X")
        };
        let q = ListingQuery {
            min_price: Some(100.0),
            max_price: Some(100.0),
            ..Default::default()
        };
        assert!(matches(&exact, &q));

        let below = TestListing {
            price: 99.99,
            ..listing("Y")
        };
        assert!(!matches(&below, &q));
    }

    #[test]
    fn missing_field_fails_an_active_range_filter() {
        let unsized_listing = TestListing {
            size: None,
            ..listing("U")
        };
        let q = ListingQuery {
            min_size: Some(10.0),
            ..Default::default()
        };
        assert!(!matches(&unsized_listing, &q));

        // With the filter unset the same record passes.
        assert!(matches(&unsized_listing, &ListingQuery::default()));
    }

    #[test]
    fn bedroom_minimum_is_inclusive() {
        let q = ListingQuery {
            min_bedrooms: Some(2),
            ..Default::default()
        };
        assert!(matches(&listing("two-bed"), &q));
        assert!(!matches(&land_b(), &q));
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let duplex = TestListing {
            property_type: "Duplex",
            ..listing("D")
        };
        let q = ListingQuery {
            search: Some("duplex".into()),
            ..Default::default()
        };
        assert!(matches(&duplex, &q));

        let described = TestListing {
            description: Some("A quiet DUPLEX near the park"),
            ..listing("E")
        };
        assert!(matches(&described, &q));

        assert!(!matches(&apartment_a(), &q));
    }

    #[test]
    fn quick_search_is_a_separate_conjunct() {
        let record = TestListing {
            description: Some("garden view"),
            ..listing("G")
        };
        let both = ListingQuery {
            search: Some("garden".into()),
            quick: Some("lekki".into()),
            ..Default::default()
        };
        assert!(matches(&record, &both));

        let conflicting = ListingQuery {
            search: Some("garden".into()),
            quick: Some("ikoyi".into()),
            ..Default::default()
        };
        assert!(!matches(&record, &conflicting));
    }

    #[test]
    fn property_type_and_location_are_substring_matches() {
        let q = ListingQuery {
            property_type: Some("apart".into()),
            location: Some("lek".into()),
            ..Default::default()
        };
        assert!(matches(&apartment_a(), &q));
        assert!(!matches(&land_b(), &q));
    }

    #[test]
    fn sorts_by_each_key() {
        let records = vec![
            TestListing {
                price: 300.0,
                size: Some(50.0),
                bedrooms: Some(1),
                created_at: at(2),
                ..listing("mid")
            },
            TestListing {
                price: 100.0,
                size: Some(90.0),
                bedrooms: Some(4),
                created_at: at(3),
                ..listing("cheap")
            },
            TestListing {
                price: 500.0,
                size: Some(70.0),
                bedrooms: Some(2),
                created_at: at(1),
                ..listing("dear")
            },
        ];

        let by = |key: SortKey| {
            let mut r = records.clone();
            sort(&mut r, key);
            titles(&r)
        };

        assert_eq!(by(SortKey::PriceLow), vec!["cheap", "mid", "dear"]);
        assert_eq!(by(SortKey::PriceHigh), vec!["dear", "mid", "cheap"]);
        assert_eq!(by(SortKey::SizeLarge), vec!["cheap", "dear", "mid"]);
        assert_eq!(by(SortKey::SizeSmall), vec!["mid", "dear", "cheap"]);
        assert_eq!(by(SortKey::Bedrooms), vec!["cheap", "dear", "mid"]);
        assert_eq!(by(SortKey::Newest), vec!["cheap", "mid", "dear"]);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let records = vec![
            TestListing {
                price: 100.0,
                ..listing("first")
            },
            TestListing {
                price: 100.0,
                ..listing("second")
            },
            TestListing {
                price: 50.0,
                ..listing("third")
            },
        ];
        let mut sorted = records;
        sort(&mut sorted, SortKey::PriceLow);
        assert_eq!(titles(&sorted), vec!["third", "first", "second"]);
    }

    #[test]
    fn missing_fields_sort_last_in_both_directions() {
        let records = vec![
            TestListing {
                size: None,
                ..listing("no-size")
            },
            TestListing {
                size: Some(40.0),
                ..listing("small")
            },
            TestListing {
                size: Some(90.0),
                ..listing("big")
            },
        ];

        let mut asc = records.clone();
        sort(&mut asc, SortKey::SizeSmall);
        assert_eq!(titles(&asc), vec!["small", "big", "no-size"]);

        let mut desc = records;
        sort(&mut desc, SortKey::SizeLarge);
        assert_eq!(titles(&desc), vec!["big", "small", "no-size"]);
    }

    #[test]
    fn apply_filters_then_sorts() {
        let records = vec![
            TestListing {
                price: 900.0,
                ..listing("expensive")
            },
            TestListing {
                price: 200.0,
                ..listing("b")
            },
            TestListing {
                price: 100.0,
                ..listing("a")
            },
        ];
        let q = ListingQuery {
            max_price: Some(500.0),
            sort: SortKey::PriceLow,
            ..Default::default()
        };
        assert_eq!(titles(&apply(records, &q)), vec!["a", "b"]);
    }

    #[test]
    fn apply_is_a_pure_function_of_its_inputs() {
        let records = vec![apartment_a(), land_b()];
        let q = ListingQuery {
            category: Some(CategoryFilter::Buy),
            ..Default::default()
        };
        let once = apply(records.clone(), &q);
        let twice = apply(records, &q);
        assert_eq!(once, twice);
    }
}
