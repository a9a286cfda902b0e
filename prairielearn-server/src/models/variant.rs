//! Variant records
//!
//! A variant is one randomized instance of a question: a seed plus the
//! parameters, true answer and options generated from it.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value as JsonValue;
use sqlx::FromRow;

use super::Id;

/// Variant row from the `variants` table
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Variant {
    pub id: Id,
    pub question_id: Id,
    pub course_id: Id,
    pub course_instance_id: Option<Id>,
    pub instance_question_id: Option<Id>,
    pub user_id: Option<Id>,
    pub group_id: Option<Id>,
    pub authn_user_id: Option<Id>,
    pub number: Option<i32>,
    pub variant_seed: String,
    pub params: Option<JsonValue>,
    pub true_answer: Option<JsonValue>,
    pub options: Option<JsonValue>,
    pub open: bool,
    pub num_tries: i32,
    pub date: DateTime<Utc>,
    pub modified_at: DateTime<Utc>,
    pub broken_at: Option<DateTime<Utc>>,
    pub broken_by: Option<Id>,
}

impl Variant {
    /// Whether an instructor has reset this variant.
    pub fn is_reset(&self) -> bool {
        self.broken_at.is_some()
    }
}

/// Variant attached to an instance question, with its best submission score
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct VariantWithScore {
    #[sqlx(flatten)]
    pub variant: Variant,
    /// Owning instance question; only variants assigned to one are listed.
    pub instance_question_id: Id,
    /// Highest submission score, `0.0` when nothing has been scored.
    pub max_submission_score: f64,
}

#[cfg(test)]
pub(crate) fn sample_variant(id: i64) -> Variant {
    let now = Utc::now();
    Variant {
        id: Id::new(id),
        question_id: Id::new(1),
        course_id: Id::new(1),
        course_instance_id: Some(Id::new(1)),
        instance_question_id: Some(Id::new(3)),
        user_id: Some(Id::new(2)),
        group_id: None,
        authn_user_id: Some(Id::new(2)),
        number: Some(1),
        variant_seed: "4a1f".into(),
        params: Some(serde_json::json!({ "a": 1, "b": 2 })),
        true_answer: Some(serde_json::json!({ "c": 3 })),
        options: Some(serde_json::json!({})),
        open: true,
        num_tries: 0,
        date: now,
        modified_at: now,
        broken_at: None,
        broken_by: None,
    }
}
