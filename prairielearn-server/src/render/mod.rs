//! Server-rendered HTML pages
//!
//! Renderers are pure functions of their inputs. Values are escaped with
//! `escape_html` unless a field is documented as trusted markup.

pub mod html;
pub mod layout;
pub mod modal;
pub mod news_item;
pub mod question_settings;

pub use html::escape_html;
pub use news_item::{NewsItemIndexPage, NewsItemPage};
pub use question_settings::QuestionSettingsPage;
