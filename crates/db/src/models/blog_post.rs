//! Blog post row model and insert shape.

use serde::Serialize;
use sqlx::FromRow;

use haven_core::types::{DbId, Timestamp};

/// A row from the `blog_posts` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct BlogPost {
    pub id: DbId,
    pub title: String,
    pub excerpt: Option<String>,
    pub content: String,
    #[serde(rename = "image")]
    pub image_url: String,
    #[serde(rename = "date")]
    pub published_at: Timestamp,
}

/// A validated blog post ready for insertion. The image has already
/// been uploaded to the hosting collaborator; `image_url` is the
/// hosted URL.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBlogPost {
    pub title: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub image_url: String,
}
