//! Course repository - courses, course instances and course roles

use sqlx::PgPool;

use super::DbError;
use crate::models::{Course, CourseInstance, CourseRole, Id, User};

const COURSE_COLUMNS: &str =
    "c.id, c.short_name, c.title, c.example_course, c.repository, c.branch, c.sharing_name";

/// Course repository
pub struct CourseRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> CourseRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Look up a course that has not been deleted.
    pub async fn select_course(&self, course_id: Id) -> Result<Option<Course>, DbError> {
        let course = sqlx::query_as::<_, Course>(&format!(
            "SELECT {COURSE_COLUMNS} FROM courses AS c WHERE c.id = $1 AND c.deleted_at IS NULL"
        ))
        .bind(course_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(course)
    }

    /// Look up a course instance that has not been deleted.
    pub async fn select_course_instance(
        &self,
        course_instance_id: Id,
    ) -> Result<Option<CourseInstance>, DbError> {
        let course_instance = sqlx::query_as::<_, CourseInstance>(
            r#"
            SELECT ci.id, ci.course_id, ci.short_name, ci.long_name
            FROM course_instances AS ci
            WHERE ci.id = $1 AND ci.deleted_at IS NULL
            "#,
        )
        .bind(course_instance_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(course_instance)
    }

    /// The user's role on a course, `None` when no permission row exists.
    pub async fn select_course_role(
        &self,
        user_id: Id,
        course_id: Id,
    ) -> Result<Option<CourseRole>, DbError> {
        let role: Option<String> = sqlx::query_scalar(
            "SELECT course_role FROM course_permissions WHERE user_id = $1 AND course_id = $2",
        )
        .bind(user_id)
        .bind(course_id)
        .fetch_optional(self.pool)
        .await?;

        role.map(CourseRole::try_from)
            .transpose()
            .map_err(|e| DbError::Sqlx(sqlx::Error::Decode(Box::new(e))))
    }

    /// Courses the user may copy questions into.
    ///
    /// Editors and owners of a course can edit it; administrators can edit
    /// every course. The read-only example course is never a destination.
    pub async fn select_editable_courses(&self, user: &User) -> Result<Vec<Course>, DbError> {
        let courses = sqlx::query_as::<_, Course>(&format!(
            r#"
            SELECT {COURSE_COLUMNS}
            FROM courses AS c
            WHERE
                c.deleted_at IS NULL
                AND NOT c.example_course
                AND (
                    $2
                    OR EXISTS (
                        SELECT 1
                        FROM course_permissions AS cp
                        WHERE
                            cp.course_id = c.id
                            AND cp.user_id = $1
                            AND cp.course_role IN ('Editor', 'Owner')
                    )
                )
            ORDER BY c.short_name, c.id
            "#
        ))
        .bind(user.user_id)
        .bind(user.is_administrator)
        .fetch_all(self.pool)
        .await?;

        Ok(courses)
    }
}
