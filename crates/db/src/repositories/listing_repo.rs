//! Repository for the `listings` table.
//!
//! `search` is the SQL interpretation of the shared
//! [`ListingQuery`] specification: the same membership and ordering
//! rules as `haven_core::filter`, expressed as a dynamic WHERE clause.

use sqlx::{PgPool, Postgres, QueryBuilder};

use haven_core::listing::{SortKey, LAND_TYPE};
use haven_core::query::{escape_like, ListingQuery};
use haven_core::validate::NewListing;

use crate::models::listing::Listing;

/// Column list for `listings` queries.
const LISTING_COLUMNS: &str = "\
    id, title, description, property_type, category, location, \
    price, bedrooms, bathrooms, size, images, created_at";

/// Provides query and insert operations for listings. Listings are
/// append-only; there is no update or delete.
pub struct ListingRepo;

impl ListingRepo {
    /// Execute the full filtered, sorted query. Returns the entire
    /// matching set; there is no pagination.
    pub async fn search(pool: &PgPool, query: &ListingQuery) -> Result<Vec<Listing>, sqlx::Error> {
        let mut builder: QueryBuilder<Postgres> =
            QueryBuilder::new(format!("SELECT {LISTING_COLUMNS} FROM listings WHERE TRUE"));

        if let Some(filter) = query.category {
            builder
                .push(" AND category = ")
                .push_bind(filter.category().as_str());
            if filter.excludes_land() {
                builder
                    .push(" AND LOWER(property_type) <> ")
                    .push_bind(LAND_TYPE);
            }
        }

        if let Some(wanted) = &query.property_type {
            push_substring_match(&mut builder, "property_type", wanted);
        }
        if let Some(wanted) = &query.location {
            push_substring_match(&mut builder, "location", wanted);
        }

        if let Some(min) = query.min_price {
            builder.push(" AND price >= ").push_bind(min);
        }
        if let Some(max) = query.max_price {
            builder.push(" AND price <= ").push_bind(max);
        }

        // NULL comparisons are not true, so a listing missing an
        // optional field falls out of any active filter on it, same
        // as the in-memory engine.
        if let Some(min) = query.min_bedrooms {
            builder.push(" AND bedrooms >= ").push_bind(min);
        }
        if let Some(min) = query.min_bathrooms {
            builder.push(" AND bathrooms >= ").push_bind(min);
        }
        if let Some(min) = query.min_size {
            builder.push(" AND size >= ").push_bind(min);
        }
        if let Some(max) = query.max_size {
            builder.push(" AND size <= ").push_bind(max);
        }

        if let Some(text) = &query.search {
            push_text_search(&mut builder, text);
        }
        if let Some(text) = &query.quick {
            push_text_search(&mut builder, text);
        }

        builder.push(order_clause(query.sort));

        builder.build_query_as::<Listing>().fetch_all(pool).await
    }

    /// Insert a validated listing. Single atomic insert; the store
    /// assigns `id` and `created_at`.
    pub async fn create(pool: &PgPool, listing: &NewListing) -> Result<Listing, sqlx::Error> {
        let query = format!(
            "INSERT INTO listings \
                 (title, description, property_type, category, location, \
                  price, bedrooms, bathrooms, size, images) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10) \
             RETURNING {LISTING_COLUMNS}"
        );
        sqlx::query_as::<_, Listing>(&query)
            .bind(&listing.title)
            .bind(listing.description.as_deref())
            .bind(&listing.property_type)
            .bind(listing.category.as_str())
            .bind(&listing.location)
            .bind(listing.price)
            .bind(listing.bedrooms)
            .bind(listing.bathrooms)
            .bind(listing.size)
            .bind(&listing.images)
            .fetch_one(pool)
            .await
    }
}

/// Case-insensitive substring match on a single column.
fn push_substring_match(builder: &mut QueryBuilder<'_, Postgres>, column: &str, text: &str) {
    let pattern = format!("%{}%", escape_like(text));
    builder
        .push(format!(" AND {column} ILIKE "))
        .push_bind(pattern)
        .push(" ESCAPE '\\'");
}

/// Free-text OR-group across property type, description, and
/// location, AND-ed with the rest of the filter.
fn push_text_search(builder: &mut QueryBuilder<'_, Postgres>, text: &str) {
    let pattern = format!("%{}%", escape_like(text));
    builder
        .push(" AND (property_type ILIKE ")
        .push_bind(pattern.clone())
        .push(" ESCAPE '\\' OR description ILIKE ")
        .push_bind(pattern.clone())
        .push(" ESCAPE '\\' OR location ILIKE ")
        .push_bind(pattern)
        .push(" ESCAPE '\\')");
}

/// ORDER BY clause per sort key. `NULLS LAST` and the `id` tiebreak
/// keep the ordering deterministic and aligned with the in-memory
/// comparators (missing fields after present ones, insertion order
/// for equal keys).
fn order_clause(key: SortKey) -> &'static str {
    match key {
        SortKey::PriceLow => " ORDER BY price ASC, id ASC",
        SortKey::PriceHigh => " ORDER BY price DESC, id ASC",
        SortKey::SizeLarge => " ORDER BY size DESC NULLS LAST, id ASC",
        SortKey::SizeSmall => " ORDER BY size ASC NULLS LAST, id ASC",
        SortKey::Bedrooms => " ORDER BY bedrooms DESC NULLS LAST, id ASC",
        SortKey::Newest => " ORDER BY created_at DESC, id DESC",
    }
}
