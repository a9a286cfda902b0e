//! Route handlers organized by resource

pub mod health;
pub mod news_items;
pub mod question_settings;
