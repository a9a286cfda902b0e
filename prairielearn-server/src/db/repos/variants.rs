//! Variant repository
//!
//! Select-by-id, the two instructor "reset" mutations and the listing used
//! by the instance question pages. Resetting marks variants broken instead
//! of deleting them, so submissions keep pointing at valid rows.

use sqlx::PgPool;

use super::DbError;
use crate::models::{Id, Variant, VariantWithScore};

/// Variant repository
pub struct VariantRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> VariantRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Look up a variant. A missing id is `Ok(None)`, not an error.
    pub async fn select_variant_by_id(&self, variant_id: Id) -> Result<Option<Variant>, DbError> {
        let variant = sqlx::query_as::<_, Variant>("SELECT v.* FROM variants AS v WHERE v.id = $1")
            .bind(variant_id)
            .fetch_optional(self.pool)
            .await?;

        Ok(variant)
    }

    /// Reset every variant of an assessment question, across all students.
    ///
    /// `unsafe_assessment_question_id` comes from a form field; the join on
    /// `assessment_id` guarantees it belongs to the assessment the caller is
    /// authorized for. A mismatched pair resets nothing.
    pub async fn reset_variants_for_assessment_question(
        &self,
        assessment_id: Id,
        unsafe_assessment_question_id: Id,
        authn_user_id: Id,
    ) -> Result<(), DbError> {
        let result = sqlx::query(
            r#"
            UPDATE variants AS v
            SET
                broken_at = NOW(),
                broken_by = $3,
                modified_at = NOW()
            FROM
                instance_questions AS iq
                JOIN assessment_questions AS aq ON aq.id = iq.assessment_question_id
            WHERE
                aq.assessment_id = $1
                AND aq.id = $2
                AND v.instance_question_id = iq.id
                AND v.broken_at IS NULL
            "#,
        )
        .bind(assessment_id)
        .bind(unsafe_assessment_question_id)
        .bind(authn_user_id)
        .execute(self.pool)
        .await?;

        tracing::info!(
            %assessment_id,
            assessment_question_id = %unsafe_assessment_question_id,
            %authn_user_id,
            reset = result.rows_affected(),
            "Reset variants for assessment question"
        );
        Ok(())
    }

    /// Reset the variants of one student's instance question.
    ///
    /// `unsafe_instance_question_id` must belong to `assessment_instance_id`.
    pub async fn reset_variants_for_instance_question(
        &self,
        assessment_instance_id: Id,
        unsafe_instance_question_id: Id,
        authn_user_id: Id,
    ) -> Result<(), DbError> {
        let result = sqlx::query(
            r#"
            UPDATE variants AS v
            SET
                broken_at = NOW(),
                broken_by = $3,
                modified_at = NOW()
            FROM instance_questions AS iq
            WHERE
                iq.assessment_instance_id = $1
                AND iq.id = $2
                AND v.instance_question_id = iq.id
                AND v.broken_at IS NULL
            "#,
        )
        .bind(assessment_instance_id)
        .bind(unsafe_instance_question_id)
        .bind(authn_user_id)
        .execute(self.pool)
        .await?;

        tracing::info!(
            %assessment_instance_id,
            instance_question_id = %unsafe_instance_question_id,
            %authn_user_id,
            reset = result.rows_affected(),
            "Reset variants for instance question"
        );
        Ok(())
    }

    /// Variants of an assessment instance, oldest first, each with its best
    /// submission score. Pass `instance_question_id` to restrict the list to
    /// one question.
    pub async fn select_variants_by_instance_question(
        &self,
        assessment_instance_id: Id,
        instance_question_id: Option<Id>,
    ) -> Result<Vec<VariantWithScore>, DbError> {
        let variants = sqlx::query_as::<_, VariantWithScore>(
            r#"
            SELECT
                v.*,
                COALESCE(MAX(s.score), 0)::DOUBLE PRECISION AS max_submission_score
            FROM
                variants AS v
                JOIN instance_questions AS iq ON iq.id = v.instance_question_id
                LEFT JOIN submissions AS s ON s.variant_id = v.id
            WHERE
                iq.assessment_instance_id = $1
                AND ($2::BIGINT IS NULL OR iq.id = $2)
            GROUP BY v.id
            ORDER BY v.date, v.id
            "#,
        )
        .bind(assessment_instance_id)
        .bind(instance_question_id)
        .fetch_all(self.pool)
        .await?;

        Ok(variants)
    }
}
