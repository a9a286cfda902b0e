//! Question repository - the question itself and everything the settings page shows with it

use sqlx::{FromRow, PgPool};

use super::DbError;
use crate::models::{
    AssessmentBadge, AssessmentsInCourseInstance, Id, Question, SharingSetRow, Tag, Topic,
};

/// Flat row joining an assessment to its set and course instance
#[derive(Debug, Clone, FromRow)]
struct AssessmentRow {
    course_instance_id: Id,
    short_name: String,
    long_name: String,
    assessment_id: Id,
    color: String,
    label: String,
    title: String,
    assessment_type: String,
}

/// Group consecutive rows by course instance, keeping row order.
fn group_by_course_instance(rows: Vec<AssessmentRow>) -> Vec<AssessmentsInCourseInstance> {
    let mut groups: Vec<AssessmentsInCourseInstance> = Vec::new();

    for row in rows {
        let badge = AssessmentBadge {
            assessment_id: row.assessment_id,
            color: row.color,
            label: row.label,
            title: row.title,
            assessment_type: row.assessment_type,
        };

        match groups.last_mut() {
            Some(group) if group.course_instance_id == row.course_instance_id => {
                group.assessments.push(badge);
            }
            _ => groups.push(AssessmentsInCourseInstance {
                short_name: row.short_name,
                long_name: row.long_name,
                course_instance_id: row.course_instance_id,
                assessments: vec![badge],
            }),
        }
    }

    groups
}

/// Question repository
pub struct QuestionRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> QuestionRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Look up a question as seen from a course.
    ///
    /// The question must either belong to the course or be publicly shared.
    pub async fn select_question_in_course(
        &self,
        question_id: Id,
        course_id: Id,
    ) -> Result<Option<Question>, DbError> {
        let question = sqlx::query_as::<_, Question>(
            r#"
            SELECT q.id, q.course_id, q.qid, q.title, q.type, q.grading_method,
                q.shared_publicly, q.topic_id
            FROM questions AS q
            WHERE
                q.id = $1
                AND q.deleted_at IS NULL
                AND (q.course_id = $2 OR q.shared_publicly)
            "#,
        )
        .bind(question_id)
        .bind(course_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(question)
    }

    pub async fn select_topic(&self, topic_id: Id) -> Result<Option<Topic>, DbError> {
        let topic = sqlx::query_as::<_, Topic>(
            "SELECT id, name, color, description FROM topics WHERE id = $1",
        )
        .bind(topic_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(topic)
    }

    pub async fn select_tags_for_question(&self, question_id: Id) -> Result<Vec<Tag>, DbError> {
        let tags = sqlx::query_as::<_, Tag>(
            r#"
            SELECT t.id, t.name, t.color, t.description
            FROM question_tags AS qt
            JOIN tags AS t ON t.id = qt.tag_id
            WHERE qt.question_id = $1
            ORDER BY t.number NULLS LAST, t.name, t.id
            "#,
        )
        .bind(question_id)
        .fetch_all(self.pool)
        .await?;

        Ok(tags)
    }

    /// Every live QID in the course, used to reject duplicate renames.
    pub async fn select_qids_in_course(&self, course_id: Id) -> Result<Vec<String>, DbError> {
        let qids = sqlx::query_scalar(
            "SELECT qid FROM questions WHERE course_id = $1 AND deleted_at IS NULL ORDER BY qid",
        )
        .bind(course_id)
        .fetch_all(self.pool)
        .await?;

        Ok(qids)
    }

    /// Assessments that include the question, grouped by course instance.
    pub async fn select_assessments_with_question(
        &self,
        question_id: Id,
    ) -> Result<Vec<AssessmentsInCourseInstance>, DbError> {
        let rows = sqlx::query_as::<_, AssessmentRow>(
            r#"
            SELECT
                ci.id AS course_instance_id,
                ci.short_name,
                ci.long_name,
                a.id AS assessment_id,
                COALESCE(aset.color, 'gray1') AS color,
                COALESCE(aset.abbreviation, '') || a.number AS label,
                a.title,
                a.type AS assessment_type
            FROM assessment_questions AS aq
            JOIN assessments AS a ON a.id = aq.assessment_id
            JOIN course_instances AS ci ON ci.id = a.course_instance_id
            LEFT JOIN assessment_sets AS aset ON aset.id = a.assessment_set_id
            WHERE
                aq.question_id = $1
                AND aq.deleted_at IS NULL
                AND a.deleted_at IS NULL
                AND ci.deleted_at IS NULL
            ORDER BY ci.id, aset.number NULLS LAST, a.number, a.id
            "#,
        )
        .bind(question_id)
        .fetch_all(self.pool)
        .await?;

        Ok(group_by_course_instance(rows))
    }

    /// Sharing sets of the course, flagged by whether they contain the question.
    pub async fn select_sharing_sets(
        &self,
        question_id: Id,
        course_id: Id,
    ) -> Result<Vec<SharingSetRow>, DbError> {
        let rows = sqlx::query_as::<_, SharingSetRow>(
            r#"
            SELECT
                ss.id,
                ss.name,
                EXISTS (
                    SELECT 1
                    FROM sharing_set_questions AS ssq
                    WHERE ssq.sharing_set_id = ss.id AND ssq.question_id = $1
                ) AS in_set
            FROM sharing_sets AS ss
            WHERE ss.course_id = $2
            ORDER BY ss.name, ss.id
            "#,
        )
        .bind(question_id)
        .bind(course_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::fixtures::{self, AssessmentScenario};
    use crate::db::pool::testing::test_pool;
    use crate::models::partition_sharing_sets;

    fn row(course_instance_id: i64, assessment_id: i64, label: &str) -> AssessmentRow {
        AssessmentRow {
            course_instance_id: Id::new(course_instance_id),
            short_name: format!("ci{}", course_instance_id),
            long_name: format!("Course instance {}", course_instance_id),
            assessment_id: Id::new(assessment_id),
            color: "blue1".into(),
            label: label.into(),
            title: "Homework".into(),
            assessment_type: "Homework".into(),
        }
    }

    #[test]
    fn groups_rows_by_course_instance() {
        let groups =
            group_by_course_instance(vec![row(1, 10, "HW1"), row(1, 11, "HW2"), row(2, 20, "E1")]);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].course_instance_id, Id::new(1));
        assert_eq!(groups[0].short_name, "ci1");
        let labels: Vec<&str> = groups[0].assessments.iter().map(|a| a.label.as_str()).collect();
        assert_eq!(labels, vec!["HW1", "HW2"]);
        assert_eq!(groups[1].assessments[0].assessment_id, Id::new(20));
    }

    #[test]
    fn grouping_empty_rows_is_empty() {
        assert!(group_by_course_instance(Vec::new()).is_empty());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn question_is_scoped_to_course() {
        let pool = test_pool().await;
        let course_id = fixtures::insert_course(&pool, false).await;
        let other_course_id = fixtures::insert_course(&pool, false).await;
        let question_id = fixtures::insert_question(&pool, course_id, None).await;
        let repo = QuestionRepo::new(&pool);

        let question = repo
            .select_question_in_course(question_id, course_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(question.id, question_id);
        assert!(question.topic_id.is_none());

        assert!(repo
            .select_question_in_course(question_id, other_course_id)
            .await
            .unwrap()
            .is_none());

        sqlx::query("UPDATE questions SET shared_publicly = TRUE WHERE id = $1")
            .bind(question_id)
            .execute(&pool)
            .await
            .unwrap();
        assert!(repo
            .select_question_in_course(question_id, other_course_id)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn topic_and_tags_are_loaded() {
        let pool = test_pool().await;
        let course_id = fixtures::insert_course(&pool, false).await;
        let topic_id = fixtures::insert_topic(&pool, course_id).await;
        let question_id = fixtures::insert_question(&pool, course_id, Some(topic_id)).await;
        let repo = QuestionRepo::new(&pool);

        let topic = repo.select_topic(topic_id).await.unwrap().unwrap();
        assert_eq!(topic.name, "Arithmetic");
        assert!(repo.select_tags_for_question(question_id).await.unwrap().is_empty());

        let tag_id: Id = sqlx::query_scalar(
            "INSERT INTO tags (course_id, name, color) VALUES ($1, 'v3', 'green1') RETURNING id",
        )
        .bind(course_id)
        .fetch_one(&pool)
        .await
        .unwrap();
        sqlx::query("INSERT INTO question_tags (question_id, tag_id) VALUES ($1, $2)")
            .bind(question_id)
            .bind(tag_id)
            .execute(&pool)
            .await
            .unwrap();

        let tags = repo.select_tags_for_question(question_id).await.unwrap();
        assert_eq!(tags.len(), 1);
        assert_eq!(tags[0].name, "v3");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn qids_are_sorted() {
        let pool = test_pool().await;
        let course_id = fixtures::insert_course(&pool, false).await;
        fixtures::insert_question(&pool, course_id, None).await;
        fixtures::insert_question(&pool, course_id, None).await;

        let qids = QuestionRepo::new(&pool)
            .select_qids_in_course(course_id)
            .await
            .unwrap();
        assert_eq!(qids.len(), 2);
        assert!(qids[0] <= qids[1]);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn assessments_with_question_use_set_abbreviation() {
        let pool = test_pool().await;
        let scenario = AssessmentScenario::create(&pool).await;

        let set_id: Id = sqlx::query_scalar(
            r#"
            INSERT INTO assessment_sets (course_id, abbreviation, name, color)
            VALUES ($1, 'HW', 'Homework', 'green2')
            RETURNING id
            "#,
        )
        .bind(scenario.course_id)
        .fetch_one(&pool)
        .await
        .unwrap();
        sqlx::query("UPDATE assessments SET assessment_set_id = $1 WHERE id = $2")
            .bind(set_id)
            .bind(scenario.assessment_id)
            .execute(&pool)
            .await
            .unwrap();

        let groups = QuestionRepo::new(&pool)
            .select_assessments_with_question(scenario.question_id)
            .await
            .unwrap();

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].course_instance_id, scenario.course_instance_id);
        assert_eq!(groups[0].short_name, "Sp24");
        let badge = &groups[0].assessments[0];
        assert_eq!(badge.label, "HW1");
        assert_eq!(badge.color, "green2");
        assert_eq!(badge.assessment_type, "Homework");
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn sharing_sets_are_flagged() {
        let pool = test_pool().await;
        let course_id = fixtures::insert_course(&pool, false).await;
        let question_id = fixtures::insert_question(&pool, course_id, None).await;

        let mut set_ids = Vec::new();
        for name in ["alpha", "beta"] {
            let id: Id = sqlx::query_scalar(
                "INSERT INTO sharing_sets (course_id, name) VALUES ($1, $2) RETURNING id",
            )
            .bind(course_id)
            .bind(name)
            .fetch_one(&pool)
            .await
            .unwrap();
            set_ids.push(id);
        }
        sqlx::query(
            "INSERT INTO sharing_set_questions (sharing_set_id, question_id) VALUES ($1, $2)",
        )
        .bind(set_ids[0])
        .bind(question_id)
        .execute(&pool)
        .await
        .unwrap();

        let rows = QuestionRepo::new(&pool)
            .select_sharing_sets(question_id, course_id)
            .await
            .unwrap();
        let (sets_in, sets_other) = partition_sharing_sets(rows);

        assert_eq!(sets_in.len(), 1);
        assert_eq!(sets_in[0].name, "alpha");
        assert_eq!(sets_other.len(), 1);
        assert_eq!(sets_other[0].name, "beta");
    }
}
