//! Handlers for blog posts.
//!
//! Create is multipart: text parts plus a required `image` file. The
//! image goes to the hosting collaborator first; the row is only
//! inserted once the upload has succeeded, so a post is never
//! persisted with a failed image.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use haven_core::error::CoreError;
use haven_core::types::DbId;
use haven_db::models::blog_post::NewBlogPost;
use haven_db::repositories::BlogRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/blogs
///
/// All posts, newest first.
pub async fn list_blogs(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let posts = BlogRepo::list(&state.pool).await?;

    Ok(Json(DataResponse { data: posts }))
}

/// GET /api/blogs/{id}
pub async fn get_blog(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let post = BlogRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "BlogPost",
            id,
        }))?;

    Ok(Json(DataResponse { data: post }))
}

/// Collected multipart fields for a blog create request.
#[derive(Default)]
struct BlogForm {
    title: Option<String>,
    excerpt: Option<String>,
    content: Option<String>,
    image: Option<ImagePart>,
}

struct ImagePart {
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
}

/// POST /api/blogs
///
/// Multipart create. The image is uploaded to the hosting
/// collaborator before anything is persisted; upload failure aborts
/// the create with 502.
pub async fn create_blog(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut form = BlogForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("title") => form.title = Some(read_text(field).await?),
            Some("excerpt") => form.excerpt = Some(read_text(field).await?),
            Some("content") => form.content = Some(read_text(field).await?),
            Some("image") => {
                let file_name = field.file_name().unwrap_or("image").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Invalid image part: {e}")))?;
                form.image = Some(ImagePart {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
            // Unknown parts are ignored rather than rejected.
            _ => {}
        }
    }

    let title = require_part("title", form.title)?;
    let content = require_part("content", form.content)?;
    let image = form
        .image
        .ok_or_else(|| AppError::Core(CoreError::validation("image", "is required")))?;

    let image_host = state.image_host.as_ref().ok_or_else(|| {
        AppError::InternalError("Image hosting is not configured".to_string())
    })?;

    let image_url = image_host
        .upload(&image.file_name, &image.content_type, image.bytes)
        .await?;

    let post = BlogRepo::create(
        &state.pool,
        &NewBlogPost {
            title,
            excerpt: form.excerpt.filter(|e| !e.trim().is_empty()),
            content,
            image_url,
        },
    )
    .await?;

    tracing::info!(blog_id = post.id, "Blog post created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: post })))
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart field: {e}")))
}

fn require_part(name: &str, value: Option<String>) -> AppResult<String> {
    let trimmed = value.as_deref().map(str::trim).unwrap_or("");
    if trimmed.is_empty() {
        return Err(AppError::Core(CoreError::validation(name, "is required")));
    }
    Ok(trimmed.to_string())
}
