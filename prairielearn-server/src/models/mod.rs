//! Domain models with validation at construction
//!
//! Ids and route parameters are validated when these types are built.
//! Invalid input returns ValidationError, not panic.

pub mod course;
pub mod id;
pub mod news_item;
pub mod question;
pub mod user;
pub mod validation;
pub mod variant;

pub use course::{AuthzData, Course, CourseInstance, CourseRole};
pub use id::Id;
pub use news_item::{sanitize_asset_path, NewsItem, NewsItemSummary, NEWS_ITEM_INDEX_FILE};
pub use question::{
    partition_sharing_sets, AssessmentBadge, AssessmentsInCourseInstance, GradingMethod, Question,
    QuestionType, SharingSetRow, Tag, Topic,
};
pub use user::User;
pub use validation::ValidationError;
pub use variant::{Variant, VariantWithScore};
