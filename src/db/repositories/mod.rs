//! Database repositories
//!
//! Repository pattern implementations for database access.
//! Each repository handles the queries for a specific entity.

pub mod application;
pub mod contact_message;
pub mod language_center;
pub mod post;
pub mod university;

pub use application::{ApplicationRepository, SqlxApplicationRepository};
pub use contact_message::{ContactMessageRepository, SqlxContactMessageRepository};
pub use language_center::{LanguageCenterRepository, SqlxLanguageCenterRepository};
pub use post::{PostRepository, SqlxPostRepository};
pub use university::{SqlxUniversityRepository, UniversityRepository};
