//! Blog post model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Blog post, listed newest publish date first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: i64,
    pub title: String,
    /// Unique URL identifier
    pub slug: String,
    pub excerpt: String,
    /// HTML body
    pub content: String,
    /// Free-form label, may be empty
    pub category: String,
    /// Path relative to the media root, under `posts/`
    pub hero_image: Option<String>,
    pub published_at: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl std::fmt::Display for Post {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.title)
    }
}

/// Input for creating a post
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePostInput {
    pub title: String,
    /// Generated from the title when absent
    #[serde(default)]
    pub slug: Option<String>,
    pub excerpt: String,
    pub content: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub hero_image: Option<String>,
    pub published_at: NaiveDate,
}

/// A post together with the related posts shown beneath it
#[derive(Debug, Clone, Serialize)]
pub struct PostDetail {
    pub post: Post,
    pub related_posts: Vec<Post>,
}
