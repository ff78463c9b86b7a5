//! Repository for the `blog_posts` table.

use sqlx::PgPool;

use haven_core::types::DbId;

use crate::models::blog_post::{BlogPost, NewBlogPost};

/// Column list for `blog_posts` queries.
const BLOG_COLUMNS: &str = "id, title, excerpt, content, image_url, published_at";

/// Provides read and insert operations for blog posts.
pub struct BlogRepo;

impl BlogRepo {
    /// List all posts, newest first.
    pub async fn list(pool: &PgPool) -> Result<Vec<BlogPost>, sqlx::Error> {
        let query = format!(
            "SELECT {BLOG_COLUMNS} FROM blog_posts ORDER BY published_at DESC, id DESC"
        );
        sqlx::query_as::<_, BlogPost>(&query).fetch_all(pool).await
    }

    /// Find a post by its ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<BlogPost>, sqlx::Error> {
        let query = format!("SELECT {BLOG_COLUMNS} FROM blog_posts WHERE id = $1");
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a post. The store assigns `id` and `published_at`.
    pub async fn create(pool: &PgPool, post: &NewBlogPost) -> Result<BlogPost, sqlx::Error> {
        let query = format!(
            "INSERT INTO blog_posts (title, excerpt, content, image_url) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {BLOG_COLUMNS}"
        );
        sqlx::query_as::<_, BlogPost>(&query)
            .bind(&post.title)
            .bind(post.excerpt.as_deref())
            .bind(&post.content)
            .bind(&post.image_url)
            .fetch_one(pool)
            .await
    }
}
