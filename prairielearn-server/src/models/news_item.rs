//! News items: announcements stored as HTML bundles on disk

use std::path::{Component, Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use super::{Id, ValidationError};

/// Name of the page file inside every news item directory
pub const NEWS_ITEM_INDEX_FILE: &str = "index.html";

/// News item row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct NewsItem {
    pub id: Id,
    pub uuid: Uuid,
    pub title: String,
    pub date: DateTime<Utc>,
    /// Directory under the news items root holding `index.html` and assets.
    pub directory: String,
    pub order_by: i32,
    pub visible_to_students: bool,
}

impl NewsItem {
    /// Directory holding this item's files.
    pub fn content_dir(&self, news_items_root: &Path) -> PathBuf {
        news_items_root.join(&self.directory)
    }

    /// Location of the item's `index.html`.
    pub fn index_path(&self, news_items_root: &Path) -> PathBuf {
        self.content_dir(news_items_root).join(NEWS_ITEM_INDEX_FILE)
    }
}

/// News item with the viewer's unread flag, for the index page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct NewsItemSummary {
    #[sqlx(flatten)]
    pub item: NewsItem,
    pub unread: bool,
}

/// Validate a relative asset path requested under a news item directory.
///
/// Only plain path components are allowed: no `..`, no root or drive
/// prefix, so the result can never escape the directory it is joined to.
/// `.` components and empty segments are dropped.
pub fn sanitize_asset_path(path: &str) -> Result<PathBuf, ValidationError> {
    let mut clean = PathBuf::new();

    for component in Path::new(path).components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(ValidationError::InvalidFormat {
                    field: "path",
                    reason: "must stay inside the news item directory",
                });
            }
        }
    }

    if clean.as_os_str().is_empty() {
        return Err(ValidationError::Empty { field: "path" });
    }

    Ok(clean)
}
