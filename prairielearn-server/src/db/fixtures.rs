//! Row builders for database-backed tests.
//!
//! Every name carries a random suffix so tests can share one database.

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{CourseRole, Id};

pub fn unique(prefix: &str) -> String {
    format!("{}-{}", prefix, Uuid::new_v4().simple())
}

pub async fn insert_user(pool: &PgPool) -> Id {
    sqlx::query_scalar("INSERT INTO users (uid, name) VALUES ($1, 'Test User') RETURNING user_id")
        .bind(format!("{}@example.com", unique("user")))
        .fetch_one(pool)
        .await
        .expect("fixture insert failed")
}

pub async fn insert_course(pool: &PgPool, example_course: bool) -> Id {
    sqlx::query_scalar(
        r#"
        INSERT INTO courses (short_name, title, example_course, repository)
        VALUES ($1, 'Test course', $2, 'git@github.com:PrairieLearn/test.git')
        RETURNING id
        "#,
    )
    .bind(unique("TEST"))
    .bind(example_course)
    .fetch_one(pool)
    .await
    .expect("fixture insert failed")
}

pub async fn insert_course_instance(pool: &PgPool, course_id: Id) -> Id {
    sqlx::query_scalar(
        r#"
        INSERT INTO course_instances (course_id, short_name, long_name)
        VALUES ($1, 'Sp24', 'Spring 2024')
        RETURNING id
        "#,
    )
    .bind(course_id)
    .fetch_one(pool)
    .await
    .expect("fixture insert failed")
}

pub async fn grant_course_role(pool: &PgPool, user_id: Id, course_id: Id, role: CourseRole) -> Id {
    sqlx::query_scalar(
        r#"
        INSERT INTO course_permissions (user_id, course_id, course_role)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id, course_id) DO UPDATE SET course_role = EXCLUDED.course_role
        RETURNING id
        "#,
    )
    .bind(user_id)
    .bind(course_id)
    .bind(role.as_str())
    .fetch_one(pool)
    .await
    .expect("fixture insert failed")
}

pub async fn insert_topic(pool: &PgPool, course_id: Id) -> Id {
    sqlx::query_scalar(
        r#"
        INSERT INTO topics (course_id, name, color, description)
        VALUES ($1, 'Arithmetic', 'blue1', '<em>Adding</em> things')
        RETURNING id
        "#,
    )
    .bind(course_id)
    .fetch_one(pool)
    .await
    .expect("fixture insert failed")
}

pub async fn insert_question(pool: &PgPool, course_id: Id, topic_id: Option<Id>) -> Id {
    sqlx::query_scalar(
        r#"
        INSERT INTO questions (course_id, qid, title, topic_id)
        VALUES ($1, $2, 'Add two numbers', $3)
        RETURNING id
        "#,
    )
    .bind(course_id)
    .bind(unique("q"))
    .bind(topic_id)
    .fetch_one(pool)
    .await
    .expect("fixture insert failed")
}

pub async fn insert_assessment(pool: &PgPool, course_instance_id: Id) -> Id {
    sqlx::query_scalar(
        r#"
        INSERT INTO assessments (course_instance_id, number, title, type)
        VALUES ($1, '1', 'Homework 1', 'Homework')
        RETURNING id
        "#,
    )
    .bind(course_instance_id)
    .fetch_one(pool)
    .await
    .expect("fixture insert failed")
}

pub async fn insert_assessment_question(pool: &PgPool, assessment_id: Id, question_id: Id) -> Id {
    sqlx::query_scalar(
        "INSERT INTO assessment_questions (assessment_id, question_id) VALUES ($1, $2) RETURNING id",
    )
    .bind(assessment_id)
    .bind(question_id)
    .fetch_one(pool)
    .await
    .expect("fixture insert failed")
}

pub async fn insert_assessment_instance(pool: &PgPool, assessment_id: Id, user_id: Id) -> Id {
    sqlx::query_scalar(
        "INSERT INTO assessment_instances (assessment_id, user_id) VALUES ($1, $2) RETURNING id",
    )
    .bind(assessment_id)
    .bind(user_id)
    .fetch_one(pool)
    .await
    .expect("fixture insert failed")
}

pub async fn insert_instance_question(
    pool: &PgPool,
    assessment_instance_id: Id,
    assessment_question_id: Id,
) -> Id {
    sqlx::query_scalar(
        r#"
        INSERT INTO instance_questions (assessment_instance_id, assessment_question_id)
        VALUES ($1, $2)
        RETURNING id
        "#,
    )
    .bind(assessment_instance_id)
    .bind(assessment_question_id)
    .fetch_one(pool)
    .await
    .expect("fixture insert failed")
}

pub async fn insert_variant(
    pool: &PgPool,
    question_id: Id,
    course_id: Id,
    instance_question_id: Option<Id>,
    user_id: Id,
) -> Id {
    sqlx::query_scalar(
        r#"
        INSERT INTO variants (
            question_id, course_id, instance_question_id, user_id, authn_user_id,
            variant_seed, params, true_answer, options
        )
        VALUES ($1, $2, $3, $4, $4, $5, '{"a": 1, "b": 2}', '{"c": 3}', '{}')
        RETURNING id
        "#,
    )
    .bind(question_id)
    .bind(course_id)
    .bind(instance_question_id)
    .bind(user_id)
    .bind(unique("seed"))
    .fetch_one(pool)
    .await
    .expect("fixture insert failed")
}

pub async fn insert_submission(pool: &PgPool, variant_id: Id, score: Option<f64>) {
    sqlx::query("INSERT INTO submissions (variant_id, score) VALUES ($1, $2)")
        .bind(variant_id)
        .bind(score)
        .execute(pool)
        .await
        .expect("fixture insert failed");
}

pub async fn insert_news_item(pool: &PgPool, directory: &str, visible_to_students: bool) -> Id {
    sqlx::query_scalar(
        r#"
        INSERT INTO news_items (uuid, title, directory, visible_to_students)
        VALUES ($1, 'Spring release notes', $2, $3)
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(directory)
    .bind(visible_to_students)
    .fetch_one(pool)
    .await
    .expect("fixture insert failed")
}

/// One student working through one assessment question, with all parent rows.
pub struct AssessmentScenario {
    pub user_id: Id,
    pub course_id: Id,
    pub course_instance_id: Id,
    pub question_id: Id,
    pub assessment_id: Id,
    pub assessment_question_id: Id,
    pub assessment_instance_id: Id,
    pub instance_question_id: Id,
}

impl AssessmentScenario {
    pub async fn create(pool: &PgPool) -> Self {
        let user_id = insert_user(pool).await;
        let course_id = insert_course(pool, false).await;
        let course_instance_id = insert_course_instance(pool, course_id).await;
        let topic_id = insert_topic(pool, course_id).await;
        let question_id = insert_question(pool, course_id, Some(topic_id)).await;
        let assessment_id = insert_assessment(pool, course_instance_id).await;
        let assessment_question_id =
            insert_assessment_question(pool, assessment_id, question_id).await;
        let assessment_instance_id =
            insert_assessment_instance(pool, assessment_id, user_id).await;
        let instance_question_id =
            insert_instance_question(pool, assessment_instance_id, assessment_question_id).await;

        Self {
            user_id,
            course_id,
            course_instance_id,
            question_id,
            assessment_id,
            assessment_question_id,
            assessment_instance_id,
            instance_question_id,
        }
    }

    /// Add a variant for this scenario's instance question.
    pub async fn add_variant(&self, pool: &PgPool) -> Id {
        insert_variant(
            pool,
            self.question_id,
            self.course_id,
            Some(self.instance_question_id),
            self.user_id,
        )
        .await
    }
}
