pub mod blogs;
pub mod health;
pub mod listings;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /properties          GET (filtered query), POST (create)
/// /blogs               GET (list), POST (multipart create)
/// /blogs/{id}          GET
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/properties", listings::router())
        .nest("/blogs", blogs::router())
}
