//! Database schema
//!
//! Every statement is idempotent so `run` can be called on each start.
//! Concurrent runs (several replicas, parallel tests) are serialized by a
//! transaction-scoped advisory lock.

use sqlx::PgPool;

use super::repos::DbError;

/// Advisory lock key held while the schema is created
const MIGRATION_LOCK_KEY: i64 = 0x706c_5f73_6368_656d;

/// Tables, in dependency order
const TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS users (
        user_id BIGSERIAL PRIMARY KEY,
        uid TEXT NOT NULL UNIQUE,
        name TEXT,
        is_administrator BOOLEAN NOT NULL DEFAULT FALSE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS courses (
        id BIGSERIAL PRIMARY KEY,
        short_name TEXT NOT NULL,
        title TEXT NOT NULL DEFAULT '',
        example_course BOOLEAN NOT NULL DEFAULT FALSE,
        repository TEXT,
        branch TEXT NOT NULL DEFAULT 'master',
        sharing_name TEXT,
        deleted_at TIMESTAMPTZ
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS course_instances (
        id BIGSERIAL PRIMARY KEY,
        course_id BIGINT NOT NULL REFERENCES courses(id) ON DELETE CASCADE,
        short_name TEXT NOT NULL,
        long_name TEXT NOT NULL,
        deleted_at TIMESTAMPTZ
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS course_permissions (
        id BIGSERIAL PRIMARY KEY,
        user_id BIGINT NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
        course_id BIGINT NOT NULL REFERENCES courses(id) ON DELETE CASCADE,
        course_role TEXT NOT NULL DEFAULT 'None'
            CHECK (course_role IN ('None', 'Previewer', 'Viewer', 'Editor', 'Owner')),
        UNIQUE (user_id, course_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS course_instance_permissions (
        id BIGSERIAL PRIMARY KEY,
        course_permission_id BIGINT NOT NULL REFERENCES course_permissions(id) ON DELETE CASCADE,
        course_instance_id BIGINT NOT NULL REFERENCES course_instances(id) ON DELETE CASCADE,
        course_instance_role TEXT NOT NULL DEFAULT 'None'
            CHECK (course_instance_role IN ('None', 'Student Data Viewer', 'Student Data Editor')),
        UNIQUE (course_permission_id, course_instance_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS topics (
        id BIGSERIAL PRIMARY KEY,
        course_id BIGINT NOT NULL REFERENCES courses(id) ON DELETE CASCADE,
        name TEXT NOT NULL,
        color TEXT NOT NULL DEFAULT 'gray1',
        description TEXT NOT NULL DEFAULT ''
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS tags (
        id BIGSERIAL PRIMARY KEY,
        course_id BIGINT NOT NULL REFERENCES courses(id) ON DELETE CASCADE,
        name TEXT NOT NULL,
        color TEXT NOT NULL DEFAULT 'gray1',
        description TEXT NOT NULL DEFAULT '',
        number INTEGER
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS questions (
        id BIGSERIAL PRIMARY KEY,
        course_id BIGINT NOT NULL REFERENCES courses(id) ON DELETE CASCADE,
        qid TEXT NOT NULL,
        title TEXT NOT NULL DEFAULT '',
        type TEXT NOT NULL DEFAULT 'Freeform'
            CHECK (type IN ('Calculation', 'Checkbox', 'File', 'Freeform',
                            'MultipleChoice', 'MultipleTrueFalse')),
        grading_method TEXT NOT NULL DEFAULT 'Internal'
            CHECK (grading_method IN ('Internal', 'External', 'Manual')),
        shared_publicly BOOLEAN NOT NULL DEFAULT FALSE,
        topic_id BIGINT REFERENCES topics(id) ON DELETE SET NULL,
        deleted_at TIMESTAMPTZ
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS question_tags (
        id BIGSERIAL PRIMARY KEY,
        question_id BIGINT NOT NULL REFERENCES questions(id) ON DELETE CASCADE,
        tag_id BIGINT NOT NULL REFERENCES tags(id) ON DELETE CASCADE,
        UNIQUE (question_id, tag_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS sharing_sets (
        id BIGSERIAL PRIMARY KEY,
        course_id BIGINT NOT NULL REFERENCES courses(id) ON DELETE CASCADE,
        name TEXT NOT NULL,
        description TEXT,
        UNIQUE (course_id, name)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS sharing_set_questions (
        id BIGSERIAL PRIMARY KEY,
        sharing_set_id BIGINT NOT NULL REFERENCES sharing_sets(id) ON DELETE CASCADE,
        question_id BIGINT NOT NULL REFERENCES questions(id) ON DELETE CASCADE,
        UNIQUE (sharing_set_id, question_id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS assessment_sets (
        id BIGSERIAL PRIMARY KEY,
        course_id BIGINT NOT NULL REFERENCES courses(id) ON DELETE CASCADE,
        abbreviation TEXT NOT NULL,
        name TEXT NOT NULL,
        color TEXT NOT NULL DEFAULT 'blue1',
        number INTEGER
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS assessments (
        id BIGSERIAL PRIMARY KEY,
        course_instance_id BIGINT NOT NULL REFERENCES course_instances(id) ON DELETE CASCADE,
        assessment_set_id BIGINT REFERENCES assessment_sets(id) ON DELETE SET NULL,
        number TEXT NOT NULL DEFAULT '1',
        title TEXT NOT NULL DEFAULT '',
        type TEXT NOT NULL DEFAULT 'Homework' CHECK (type IN ('Homework', 'Exam')),
        deleted_at TIMESTAMPTZ
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS assessment_questions (
        id BIGSERIAL PRIMARY KEY,
        assessment_id BIGINT NOT NULL REFERENCES assessments(id) ON DELETE CASCADE,
        question_id BIGINT NOT NULL REFERENCES questions(id) ON DELETE CASCADE,
        number INTEGER,
        deleted_at TIMESTAMPTZ
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS assessment_instances (
        id BIGSERIAL PRIMARY KEY,
        assessment_id BIGINT NOT NULL REFERENCES assessments(id) ON DELETE CASCADE,
        user_id BIGINT REFERENCES users(user_id) ON DELETE CASCADE,
        number INTEGER NOT NULL DEFAULT 1
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS instance_questions (
        id BIGSERIAL PRIMARY KEY,
        assessment_instance_id BIGINT NOT NULL REFERENCES assessment_instances(id) ON DELETE CASCADE,
        assessment_question_id BIGINT NOT NULL REFERENCES assessment_questions(id) ON DELETE CASCADE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS variants (
        id BIGSERIAL PRIMARY KEY,
        question_id BIGINT NOT NULL REFERENCES questions(id) ON DELETE CASCADE,
        course_id BIGINT NOT NULL REFERENCES courses(id) ON DELETE CASCADE,
        course_instance_id BIGINT REFERENCES course_instances(id) ON DELETE CASCADE,
        instance_question_id BIGINT REFERENCES instance_questions(id) ON DELETE CASCADE,
        user_id BIGINT REFERENCES users(user_id) ON DELETE CASCADE,
        group_id BIGINT,
        authn_user_id BIGINT REFERENCES users(user_id) ON DELETE SET NULL,
        number INTEGER,
        variant_seed TEXT NOT NULL,
        params JSONB,
        true_answer JSONB,
        options JSONB,
        open BOOLEAN NOT NULL DEFAULT TRUE,
        num_tries INTEGER NOT NULL DEFAULT 0,
        date TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        modified_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        broken_at TIMESTAMPTZ,
        broken_by BIGINT REFERENCES users(user_id) ON DELETE SET NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS submissions (
        id BIGSERIAL PRIMARY KEY,
        variant_id BIGINT NOT NULL REFERENCES variants(id) ON DELETE CASCADE,
        score DOUBLE PRECISION,
        date TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS news_items (
        id BIGSERIAL PRIMARY KEY,
        uuid UUID NOT NULL UNIQUE,
        title TEXT NOT NULL,
        date TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        directory TEXT NOT NULL,
        order_by INTEGER NOT NULL DEFAULT 0,
        visible_to_students BOOLEAN NOT NULL DEFAULT FALSE
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS news_item_notifications (
        id BIGSERIAL PRIMARY KEY,
        news_item_id BIGINT NOT NULL REFERENCES news_items(id) ON DELETE CASCADE,
        user_id BIGINT NOT NULL REFERENCES users(user_id) ON DELETE CASCADE,
        UNIQUE (news_item_id, user_id)
    )
    "#,
];

/// Indexes backing the lookups in `repos`
const INDEXES: &[&str] = &[
    "CREATE UNIQUE INDEX IF NOT EXISTS idx_questions_course_qid ON questions(course_id, qid) WHERE deleted_at IS NULL",
    "CREATE INDEX IF NOT EXISTS idx_variants_instance_question ON variants(instance_question_id)",
    "CREATE INDEX IF NOT EXISTS idx_submissions_variant ON submissions(variant_id)",
    "CREATE INDEX IF NOT EXISTS idx_instance_questions_assessment_instance ON instance_questions(assessment_instance_id)",
    "CREATE INDEX IF NOT EXISTS idx_instance_questions_assessment_question ON instance_questions(assessment_question_id)",
    "CREATE INDEX IF NOT EXISTS idx_assessment_questions_question ON assessment_questions(question_id)",
    "CREATE INDEX IF NOT EXISTS idx_news_item_notifications_user ON news_item_notifications(user_id)",
];

/// Instructor check used by the news item pages.
///
/// Administrators, anyone with a course role above `None`, and anyone with
/// a course instance role above `None` count as instructors.
const FUNCTIONS: &[&str] = &[r#"
    CREATE OR REPLACE FUNCTION users_is_instructor_in_any_course(BIGINT)
    RETURNS BOOLEAN
    LANGUAGE SQL STABLE
    AS $$
        SELECT
            EXISTS (SELECT 1 FROM users AS u WHERE u.user_id = $1 AND u.is_administrator)
            OR EXISTS (
                SELECT 1
                FROM course_permissions AS cp
                JOIN courses AS c ON c.id = cp.course_id
                WHERE cp.user_id = $1
                    AND cp.course_role != 'None'
                    AND c.deleted_at IS NULL
            )
            OR EXISTS (
                SELECT 1
                FROM course_instance_permissions AS cip
                JOIN course_permissions AS cp ON cp.id = cip.course_permission_id
                JOIN course_instances AS ci ON ci.id = cip.course_instance_id
                WHERE cp.user_id = $1
                    AND cip.course_instance_role != 'None'
                    AND ci.deleted_at IS NULL
            )
    $$
    "#];

/// Create all tables, indexes and SQL functions.
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running database migrations...");

    let mut tx = pool.begin().await?;
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(MIGRATION_LOCK_KEY)
        .execute(&mut *tx)
        .await?;

    for statement in TABLES.iter().chain(INDEXES).chain(FUNCTIONS) {
        sqlx::query(statement).execute(&mut *tx).await?;
    }
    tx.commit().await?;

    tracing::info!(
        tables = TABLES.len(),
        indexes = INDEXES.len(),
        functions = FUNCTIONS.len(),
        "Database migrations complete"
    );
    Ok(())
}
