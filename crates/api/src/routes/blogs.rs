//! Routes for blog posts, mounted at `/blogs`.

use axum::routing::get;
use axum::Router;

use crate::handlers::blogs;
use crate::state::AppState;

/// ```text
/// GET  /       -> list_blogs
/// POST /       -> create_blog (multipart)
/// GET  /{id}   -> get_blog
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(blogs::list_blogs).post(blogs::create_blog))
        .route("/{id}", get(blogs::get_blog))
}
