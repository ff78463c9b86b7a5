//! Handlers for property listings.
//!
//! Listings are append-only: the surface is one filtered/sorted query
//! endpoint and one create endpoint. No authentication applies.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use haven_core::query::{ListingParams, ListingQuery};
use haven_core::validate::CreateListing;
use haven_db::repositories::ListingRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/properties
///
/// Filtered, sorted listing query. Returns the full matching set; no
/// pagination. Malformed numeric parameters are treated as absent
/// bounds, not errors.
pub async fn list_listings(
    State(state): State<AppState>,
    Query(params): Query<ListingParams>,
) -> AppResult<impl IntoResponse> {
    let query = ListingQuery::from_params(&params);
    let listings = ListingRepo::search(&state.pool, &query).await?;

    tracing::debug!(count = listings.len(), "Listings query served");

    Ok(Json(DataResponse { data: listings }))
}

/// POST /api/properties
///
/// Validate and persist a new listing. Image URLs in the body are
/// already hosted (clients upload before submitting); an empty list
/// is fine and no server-side count limit applies.
pub async fn create_listing(
    State(state): State<AppState>,
    Json(input): Json<CreateListing>,
) -> AppResult<impl IntoResponse> {
    let draft = input.validate()?;
    let listing = ListingRepo::create(&state.pool, &draft).await?;

    tracing::info!(
        listing_id = listing.id,
        category = %listing.category,
        location = %listing.location,
        "Listing created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: listing })))
}
