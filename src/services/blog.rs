//! Blog post service
//!
//! Listing, detail with related posts, and creation with slug generation.

use std::sync::Arc;

use chrono::Utc;

use super::{generate_slug, ServiceError};
use crate::db::repositories::PostRepository;
use crate::forms::{FormErrors, REQUIRED_MESSAGE};
use crate::models::{CreatePostInput, Post, PostDetail};

/// Number of related posts shown under a post
pub const RELATED_POSTS_LIMIT: i64 = 3;

pub struct PostService {
    repo: Arc<dyn PostRepository>,
}

impl PostService {
    pub fn new(repo: Arc<dyn PostRepository>) -> Self {
        Self { repo }
    }

    /// All posts, newest publish date first
    pub async fn list(&self) -> Result<Vec<Post>, ServiceError> {
        Ok(self.repo.list().await?)
    }

    /// A post and up to three other posts in listing order
    pub async fn detail(&self, slug: &str) -> Result<PostDetail, ServiceError> {
        let post = self
            .repo
            .get_by_slug(slug)
            .await?
            .ok_or_else(|| ServiceError::not_found(format!("post {}", slug)))?;
        let related_posts = self.repo.list_excluding(post.id, RELATED_POSTS_LIMIT).await?;

        Ok(PostDetail { post, related_posts })
    }

    /// Create a post, generating the slug from the title when none is given
    pub async fn create(&self, input: CreatePostInput) -> Result<Post, ServiceError> {
        let slug = input
            .slug
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| generate_slug(&input.title));

        let mut errors = FormErrors::new();
        if input.title.trim().is_empty() {
            errors.add("title", REQUIRED_MESSAGE);
        }
        if slug.is_empty() {
            errors.add("slug", REQUIRED_MESSAGE);
        }
        if !errors.is_empty() {
            return Err(ServiceError::Validation(errors));
        }

        if self.repo.exists_by_slug(&slug).await? {
            return Err(ServiceError::DuplicateSlug(slug));
        }

        let now = Utc::now();
        let post = Post {
            id: 0,
            title: input.title.trim().to_string(),
            slug,
            excerpt: input.excerpt,
            content: input.content,
            category: input.category,
            hero_image: input.hero_image,
            published_at: input.published_at,
            created_at: now,
            updated_at: now,
        };
        Ok(self.repo.create(&post).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::SqlxPostRepository;
    use crate::db::{create_test_pool, migrations};
    use chrono::NaiveDate;

    async fn setup_test_service() -> PostService {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        PostService::new(SqlxPostRepository::boxed(pool))
    }

    fn input(title: &str, slug: Option<&str>, date: (i32, u32, u32)) -> CreatePostInput {
        CreatePostInput {
            title: title.to_string(),
            slug: slug.map(str::to_string),
            excerpt: "excerpt".to_string(),
            content: "<p>content</p>".to_string(),
            category: "دليل".to_string(),
            hero_image: None,
            published_at: NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_list_sorted_by_publish_date() {
        let service = setup_test_service().await;
        service.create(input("B", Some("b"), (2025, 11, 15))).await.unwrap();
        service.create(input("C", Some("c"), (2025, 11, 10))).await.unwrap();
        service.create(input("A", Some("a"), (2025, 11, 20))).await.unwrap();

        let dates: Vec<NaiveDate> = service.list().await.unwrap().iter().map(|p| p.published_at).collect();
        assert_eq!(
            dates,
            vec![
                NaiveDate::from_ymd_opt(2025, 11, 20).unwrap(),
                NaiveDate::from_ymd_opt(2025, 11, 15).unwrap(),
                NaiveDate::from_ymd_opt(2025, 11, 10).unwrap(),
            ]
        );
    }

    #[tokio::test]
    async fn test_detail_excludes_self_and_caps_related() {
        let service = setup_test_service().await;
        for day in 1..=5 {
            service
                .create(input(&format!("Post {}", day), None, (2025, 10, day)))
                .await
                .unwrap();
        }

        let detail = service.detail("post-3").await.unwrap();
        assert_eq!(detail.post.slug, "post-3");
        let related: Vec<&str> = detail.related_posts.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(related, vec!["post-5", "post-4", "post-2"]);
    }

    #[tokio::test]
    async fn test_detail_not_found() {
        let service = setup_test_service().await;
        assert!(matches!(
            service.detail("missing").await,
            Err(ServiceError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_slug() {
        let service = setup_test_service().await;
        service.create(input("Guide", None, (2025, 1, 1))).await.unwrap();
        let result = service.create(input("Guide", None, (2025, 1, 2))).await;
        assert!(matches!(result, Err(ServiceError::DuplicateSlug(slug)) if slug == "guide"));
    }

    #[tokio::test]
    async fn test_create_requires_title() {
        let service = setup_test_service().await;
        let result = service.create(input("  ", None, (2025, 1, 1))).await;
        match result {
            Err(ServiceError::Validation(errors)) => {
                assert!(errors.has("title"));
                assert!(errors.has("slug"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
