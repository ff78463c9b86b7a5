//! Routes for property listings, mounted at `/properties`.

use axum::routing::get;
use axum::Router;

use crate::handlers::listings;
use crate::state::AppState;

/// ```text
/// GET  /    -> list_listings
/// POST /    -> create_listing
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(listings::list_listings).post(listings::create_listing),
    )
}
