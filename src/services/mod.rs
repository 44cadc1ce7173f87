//! Services layer - Business logic
//!
//! Services sit between the page handlers and the repositories:
//! - resolving records by slug and mapping misses to `NotFound`
//! - running form validation before anything is stored
//! - storing uploaded documents alongside their records

pub mod application;
pub mod blog;
pub mod contact;
pub mod error;
pub mod maintenance;
pub mod partner;
pub mod slug;
pub mod storage;

pub use application::ApplicationService;
pub use blog::{PostService, RELATED_POSTS_LIMIT};
pub use contact::ContactService;
pub use error::ServiceError;
pub use partner::{ImportSummary, PartnerService};
pub use slug::generate_slug;
pub use storage::{MediaCategory, MediaStorage};
