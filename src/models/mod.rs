//! Data models
//!
//! Data structures used throughout the Edupath site:
//! - Database entities (Post, University, LanguageCenter, LanguageCenterApplication, ContactMessage)
//! - Create inputs consumed by repositories
//! - View aggregates handed to templates

mod application;
mod contact_message;
mod language_center;
mod post;
mod university;

pub use application::{CreateApplicationInput, LanguageCenterApplication};
pub use contact_message::{ContactMessage, CreateContactMessageInput};
pub use language_center::{
    CreateLanguageCenterInput, LanguageCenter, PartnerDirectory, PartnerImport,
};
pub use post::{CreatePostInput, Post, PostDetail};
pub use university::{CreateUniversityInput, University};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn center() -> LanguageCenter {
        let now = Utc::now();
        LanguageCenter {
            id: 1,
            name: "ELS Kuala Lumpur".to_string(),
            slug: "els-kl".to_string(),
            description: String::new(),
            about: String::new(),
            features: String::new(),
            programs: String::new(),
            fees: String::new(),
            location_info: String::new(),
            location: String::new(),
            website: String::new(),
            logo: None,
            detail_url: String::new(),
            sort_order: 0,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_display_labels() {
        let now = Utc::now();
        let message = ContactMessage {
            id: 1,
            name: "Sara".to_string(),
            email: "sara@example.com".to_string(),
            phone: "0123456".to_string(),
            country: "Oman".to_string(),
            major: "Medicine".to_string(),
            message: "Hello".to_string(),
            created_at: now,
        };
        assert_eq!(message.to_string(), "Sara - sara@example.com");
        assert_eq!(center().to_string(), "ELS Kuala Lumpur");

        let post = Post {
            id: 1,
            title: "Guide".to_string(),
            slug: "guide".to_string(),
            excerpt: String::new(),
            content: String::new(),
            category: String::new(),
            hero_image: None,
            published_at: NaiveDate::from_ymd_opt(2025, 11, 20).unwrap(),
            created_at: now,
            updated_at: now,
        };
        assert_eq!(post.to_string(), "Guide");
    }

    #[test]
    fn test_application_label() {
        let application = LanguageCenterApplication {
            id: 7,
            language_center_id: 1,
            full_name: "Ali Hassan".to_string(),
            nationality: "Yemeni".to_string(),
            country_of_residence: "Malaysia".to_string(),
            study_duration: 6,
            email: "ali@example.com".to_string(),
            country_code: "+60".to_string(),
            phone_number: "123456789".to_string(),
            passport_photo: "applications/passport/a.jpg".to_string(),
            personal_photo: "applications/personal/b.jpg".to_string(),
            high_school_certificate: "applications/certificates/c.pdf".to_string(),
            accept_terms: true,
            created_at: Utc::now(),
        };
        assert_eq!(application.label(&center()), "Ali Hassan - ELS Kuala Lumpur");
    }

    #[test]
    fn test_partner_import_defaults() {
        let yaml = "universities:\n  - name: University of Malaya\n    sort_order: 2\n";
        let import: PartnerImport = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(import.universities.len(), 1);
        assert!(import.universities[0].is_active);
        assert_eq!(import.universities[0].sort_order, 2);
        assert!(import.universities[0].slug.is_none());
        assert!(import.language_centers.is_empty());
    }
}
