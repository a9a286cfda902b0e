//! News item repository

use sqlx::PgPool;

use super::DbError;
use crate::models::{Id, NewsItem, NewsItemSummary};

const NEWS_ITEM_COLUMNS: &str =
    "ni.id, ni.uuid, ni.title, ni.date, ni.directory, ni.order_by, ni.visible_to_students";

/// Visibility predicate shared by the read and list queries.
///
/// Binds `$1` user id, `$2` course instance id and `$3` course id. Items
/// marked for students are visible to everyone. Staff-only items are
/// visible to administrators, to users holding a role in the current
/// course or course instance, and, outside any course, to anyone who is
/// an instructor somewhere.
const VISIBLE_TO_USER: &str = r#"
    (
        ni.visible_to_students
        OR EXISTS (SELECT 1 FROM users AS u WHERE u.user_id = $1 AND u.is_administrator)
        OR EXISTS (
            SELECT 1
            FROM course_permissions AS cp
            WHERE cp.user_id = $1
                AND cp.course_id = $3::BIGINT
                AND cp.course_role != 'None'
        )
        OR EXISTS (
            SELECT 1
            FROM course_instance_permissions AS cip
            JOIN course_permissions AS cp ON cp.id = cip.course_permission_id
            WHERE cp.user_id = $1
                AND cip.course_instance_id = $2::BIGINT
                AND cip.course_instance_role != 'None'
        )
        OR (
            $2::BIGINT IS NULL
            AND $3::BIGINT IS NULL
            AND users_is_instructor_in_any_course($1)
        )
    )
"#;

/// News item repository
pub struct NewsItemRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> NewsItemRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Look up a news item by id, without any visibility check.
    pub async fn select_news_item(&self, news_item_id: Id) -> Result<Option<NewsItem>, DbError> {
        let item = sqlx::query_as::<_, NewsItem>(&format!(
            "SELECT {NEWS_ITEM_COLUMNS} FROM news_items AS ni WHERE ni.id = $1"
        ))
        .bind(news_item_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(item)
    }

    /// Load a news item the user is allowed to see and mark it read.
    ///
    /// Returns `None` when the item does not exist or is hidden from the
    /// user; the user's notification is only cleared when it is returned.
    pub async fn select_news_item_for_read(
        &self,
        news_item_id: Id,
        user_id: Id,
        course_instance_id: Option<Id>,
        course_id: Option<Id>,
    ) -> Result<Option<NewsItem>, DbError> {
        let item = sqlx::query_as::<_, NewsItem>(&format!(
            r#"
            WITH
                visible_item AS (
                    SELECT {NEWS_ITEM_COLUMNS}
                    FROM news_items AS ni
                    WHERE ni.id = $4 AND {VISIBLE_TO_USER}
                ),
                read_notification AS (
                    DELETE FROM news_item_notifications AS n
                    USING visible_item AS vi
                    WHERE n.news_item_id = vi.id AND n.user_id = $1
                )
            SELECT * FROM visible_item
            "#
        ))
        .bind(user_id)
        .bind(course_instance_id)
        .bind(course_id)
        .bind(news_item_id)
        .fetch_optional(self.pool)
        .await?;

        if item.is_some() {
            tracing::debug!(%news_item_id, %user_id, "News item read");
        }

        Ok(item)
    }

    /// Every news item the user can see, newest first, with unread flags.
    pub async fn select_news_items_for_user(
        &self,
        user_id: Id,
        course_instance_id: Option<Id>,
        course_id: Option<Id>,
    ) -> Result<Vec<NewsItemSummary>, DbError> {
        let items = sqlx::query_as::<_, NewsItemSummary>(&format!(
            r#"
            SELECT
                {NEWS_ITEM_COLUMNS},
                EXISTS (
                    SELECT 1
                    FROM news_item_notifications AS n
                    WHERE n.news_item_id = ni.id AND n.user_id = $1
                ) AS unread
            FROM news_items AS ni
            WHERE {VISIBLE_TO_USER}
            ORDER BY ni.date DESC, ni.order_by DESC, ni.id DESC
            "#
        ))
        .bind(user_id)
        .bind(course_instance_id)
        .bind(course_id)
        .fetch_all(self.pool)
        .await?;

        Ok(items)
    }
}
