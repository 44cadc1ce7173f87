//! Seed data and cleanup routines
//!
//! Used at server startup (when `site.seed_posts` is set) and by the
//! `edupath-admin` binary.

use anyhow::Result;
use chrono::{NaiveDate, Utc};

use crate::db::repositories::PostRepository;
use crate::models::Post;

struct SeedPost {
    title: &'static str,
    slug: &'static str,
    excerpt: &'static str,
    category: &'static str,
    published_at: (i32, u32, u32),
    content: &'static str,
}

const SEED_POSTS: [SeedPost; 3] = [
    SeedPost {
        title: "دليلك الشامل للدراسة في ماليزيا",
        slug: "study-in-malaysia-guide",
        excerpt: "كل ما تحتاج معرفته عن الدراسة في ماليزيا من الألف للياء: الجامعات، التأشيرات، تكاليف المعيشة، وأفضل التخصصات للطلاب الدوليين.",
        category: "دليل",
        published_at: (2025, 11, 20),
        content: r#"<p class="lead">ماليزيا واحدة من أفضل الوجهات التعليمية للطلاب الدوليين، حيث تجمع بين جودة التعليم وتكلفة المعيشة المعقولة.</p>
<h2 id="why-malaysia">لماذا الدراسة في ماليزيا؟</h2>
<ul>
    <li><strong>جودة التعليم:</strong> جامعات معترف بها دوليًا بمعايير تعليمية عالية.</li>
    <li><strong>تكلفة معقولة:</strong> رسوم دراسية ومعيشة أقل مقارنة بالدول الأخرى.</li>
    <li><strong>لغة الدراسة:</strong> معظم البرامج متاحة باللغة الإنجليزية.</li>
</ul>
<h2 id="admission">شروط القبول</h2>
<p>تختلف الشروط حسب المستوى الدراسي، لكن غالبًا ما تحتاج إلى شهادة ثانوية أو بكالوريوس وسجل أكاديمي جيد.</p>
<h2 id="costs">تكاليف الدراسة والمعيشة</h2>
<p>الرسوم الدراسية السنوية للبكالوريوس تبدأ من 3500 دولار، بينما المعيشة الشهرية بين 450-800 دولار.</p>
<h2 id="visa">إجراءات التأشيرة</h2>
<p>بعد الحصول على القبول الجامعي، يتم التقديم على تأشيرة الطالب (Student Pass) والتي تستغرق عادة 4-8 أسابيع.</p>"#,
    },
    SeedPost {
        title: "أفضل الجامعات الماليزية للطلاب الدوليين",
        slug: "best-malaysian-universities",
        excerpt: "تعرف على أفضل الجامعات في ماليزيا والتخصصات المتاحة، مع مقارنة بين الجودة والتكلفة والاعتماد الدولي.",
        category: "جامعات",
        published_at: (2025, 11, 15),
        content: r#"<p>تضم ماليزيا جامعات مرموقة مثل University of Malaya وAPU وMMU، تقدم برامج حديثة ومعتمدة عالميًا.</p>
<p>يتميز النظام التعليمي بوجود شراكات مع جامعات بريطانية وأسترالية تمنح شهادات مزدوجة.</p>"#,
    },
    SeedPost {
        title: "تكلفة المعيشة والدراسة في ماليزيا",
        slug: "cost-of-living-malaysia",
        excerpt: "دليل شامل لتكاليف الدراسة والسكن والمعيشة في ماليزيا مع نصائح للتخطيط المالي الذكي.",
        category: "تكاليف",
        published_at: (2025, 11, 10),
        content: r#"<p>تتراوح الرسوم الدراسية بين 3500 و8000 دولار سنويًا حسب الجامعة والتخصص.</p>
<p>تكاليف السكن تتراوح بين 800 - 1500 رنجت شهريًا، بينما المواصلات العامة اقتصادية ومتوفرة.</p>"#,
    },
];

/// Slugs of the launch posts
pub fn seed_post_slugs() -> Vec<&'static str> {
    SEED_POSTS.iter().map(|p| p.slug).collect()
}

/// Insert the launch posts if the table is empty.
///
/// Returns the number of posts inserted.
pub async fn seed_posts(posts: &dyn PostRepository) -> Result<usize> {
    if posts.count().await? > 0 {
        tracing::debug!("Posts already present, skipping seed");
        return Ok(0);
    }

    let now = Utc::now();
    for seed in &SEED_POSTS {
        let (year, month, day) = seed.published_at;
        let published_at = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| anyhow::anyhow!("Invalid seed date for {}", seed.slug))?;

        posts
            .create(&Post {
                id: 0,
                title: seed.title.to_string(),
                slug: seed.slug.to_string(),
                excerpt: seed.excerpt.to_string(),
                content: seed.content.to_string(),
                category: seed.category.to_string(),
                hero_image: None,
                published_at,
                created_at: now,
                updated_at: now,
            })
            .await?;
    }

    tracing::info!("Seeded {} posts", SEED_POSTS.len());
    Ok(SEED_POSTS.len())
}

/// Remove the launch posts; returns the number deleted
pub async fn unseed_posts(posts: &dyn PostRepository) -> Result<u64> {
    let deleted = posts.delete_by_slugs(&seed_post_slugs()).await?;
    tracing::info!("Removed {} seeded post(s)", deleted);
    Ok(deleted)
}

/// Clear every hero image reference; returns the number of posts changed
pub async fn clear_hero_images(posts: &dyn PostRepository) -> Result<u64> {
    let cleared = posts.clear_hero_images().await?;
    tracing::info!("Cleared hero image on {} post(s)", cleared);
    Ok(cleared)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::SqlxPostRepository;
    use crate::db::{create_test_pool, migrations};
    use crate::services::PostService;
    use std::sync::Arc;

    async fn setup() -> Arc<dyn PostRepository> {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        SqlxPostRepository::boxed(pool)
    }

    #[tokio::test]
    async fn test_seed_posts_once() {
        let repo = setup().await;
        assert_eq!(seed_posts(repo.as_ref()).await.unwrap(), 3);
        assert_eq!(seed_posts(repo.as_ref()).await.unwrap(), 0);
        assert_eq!(repo.count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_seeded_posts_list_and_detail() {
        let repo = setup().await;
        seed_posts(repo.as_ref()).await.unwrap();
        let service = PostService::new(repo.clone());

        let slugs: Vec<String> = service.list().await.unwrap().into_iter().map(|p| p.slug).collect();
        assert_eq!(
            slugs,
            vec![
                "study-in-malaysia-guide",
                "best-malaysian-universities",
                "cost-of-living-malaysia"
            ]
        );

        let detail = service.detail("study-in-malaysia-guide").await.unwrap();
        assert_eq!(detail.related_posts.len(), 2);
        assert!(detail
            .related_posts
            .iter()
            .all(|p| p.slug != "study-in-malaysia-guide"));
    }

    #[tokio::test]
    async fn test_seed_skipped_when_posts_exist() {
        let repo = setup().await;
        let now = Utc::now();
        repo.create(&Post {
            id: 0,
            title: "Existing".to_string(),
            slug: "existing".to_string(),
            excerpt: String::new(),
            content: String::new(),
            category: String::new(),
            hero_image: Some("posts/x.jpg".to_string()),
            published_at: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            created_at: now,
            updated_at: now,
        })
        .await
        .unwrap();

        assert_eq!(seed_posts(repo.as_ref()).await.unwrap(), 0);
        assert_eq!(clear_hero_images(repo.as_ref()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_unseed_posts() {
        let repo = setup().await;
        seed_posts(repo.as_ref()).await.unwrap();
        assert_eq!(unseed_posts(repo.as_ref()).await.unwrap(), 3);
        assert_eq!(repo.count().await.unwrap(), 0);
        assert_eq!(unseed_posts(repo.as_ref()).await.unwrap(), 0);
    }
}
