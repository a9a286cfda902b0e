//! Questions and the records shown alongside them on the settings page

use std::fmt;

use serde::Serialize;
use sqlx::FromRow;

use super::{Id, ValidationError};

/// Question type, stored as text in `questions.type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QuestionType {
    Calculation,
    Checkbox,
    File,
    Freeform,
    MultipleChoice,
    MultipleTrueFalse,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Calculation => "Calculation",
            Self::Checkbox => "Checkbox",
            Self::File => "File",
            Self::Freeform => "Freeform",
            Self::MultipleChoice => "MultipleChoice",
            Self::MultipleTrueFalse => "MultipleTrueFalse",
        }
    }
}

impl TryFrom<String> for QuestionType {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "Calculation" => Ok(Self::Calculation),
            "Checkbox" => Ok(Self::Checkbox),
            "File" => Ok(Self::File),
            "Freeform" => Ok(Self::Freeform),
            "MultipleChoice" => Ok(Self::MultipleChoice),
            "MultipleTrueFalse" => Ok(Self::MultipleTrueFalse),
            _ => Err(ValidationError::InvalidVariant {
                field: "question type",
                value,
            }),
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How submissions to a question are graded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GradingMethod {
    Internal,
    External,
    Manual,
}

impl GradingMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Internal => "Internal",
            Self::External => "External",
            Self::Manual => "Manual",
        }
    }
}

impl TryFrom<String> for GradingMethod {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "Internal" => Ok(Self::Internal),
            "External" => Ok(Self::External),
            "Manual" => Ok(Self::Manual),
            _ => Err(ValidationError::InvalidVariant {
                field: "grading method",
                value,
            }),
        }
    }
}

/// Question row
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Question {
    pub id: Id,
    pub course_id: Id,
    pub qid: String,
    pub title: String,
    #[sqlx(rename = "type", try_from = "String")]
    pub question_type: QuestionType,
    #[sqlx(try_from = "String")]
    pub grading_method: GradingMethod,
    pub shared_publicly: bool,
    pub topic_id: Option<Id>,
}

impl Question {
    /// Freeform questions graded in-process can be exercised by the
    /// "test once / test 100 times" buttons.
    pub fn supports_question_tests(&self) -> bool {
        self.question_type == QuestionType::Freeform
            && self.grading_method != GradingMethod::External
    }

    /// Path of the question's `info.json`, relative to the course root.
    pub fn info_path(&self) -> String {
        format!("questions/{}/info.json", self.qid)
    }
}

/// Topic a question belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Topic {
    pub id: Id,
    pub name: String,
    pub color: String,
    /// Trusted HTML from the course repository.
    pub description: String,
}

/// Tag attached to a question
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Tag {
    pub id: Id,
    pub name: String,
    pub color: String,
    /// Trusted HTML from the course repository.
    pub description: String,
}

/// Sharing set with a flag telling whether the question is in it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct SharingSetRow {
    pub id: Id,
    pub name: String,
    pub in_set: bool,
}

/// Split sharing sets into the ones containing the question and the rest.
pub fn partition_sharing_sets(
    rows: Vec<SharingSetRow>,
) -> (Vec<SharingSetRow>, Vec<SharingSetRow>) {
    rows.into_iter().partition(|row| row.in_set)
}

/// One assessment that includes a question
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssessmentBadge {
    pub assessment_id: Id,
    pub color: String,
    pub label: String,
    pub title: String,
    pub assessment_type: String,
}

/// Assessments including a question, grouped by course instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssessmentsInCourseInstance {
    pub short_name: String,
    pub long_name: String,
    pub course_instance_id: Id,
    pub assessments: Vec<AssessmentBadge>,
}

#[cfg(test)]
pub(crate) fn sample_question() -> Question {
    Question {
        id: Id::new(10),
        course_id: Id::new(1),
        qid: "addNumbers".into(),
        title: "Add two numbers".into(),
        question_type: QuestionType::Freeform,
        grading_method: GradingMethod::Internal,
        shared_publicly: false,
        topic_id: Some(Id::new(4)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_type_from_text() {
        assert_eq!(
            QuestionType::try_from("Freeform".to_string()).unwrap(),
            QuestionType::Freeform
        );
        let err = QuestionType::try_from("Essay".to_string()).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidVariant { .. }));
    }

    #[test]
    fn grading_method_round_trips_text() {
        for method in [
            GradingMethod::Internal,
            GradingMethod::External,
            GradingMethod::Manual,
        ] {
            assert_eq!(
                GradingMethod::try_from(method.as_str().to_string()).unwrap(),
                method
            );
        }
    }

    #[test]
    fn question_tests_need_internal_freeform() {
        let mut question = sample_question();
        assert!(question.supports_question_tests());

        question.grading_method = GradingMethod::Manual;
        assert!(question.supports_question_tests());

        question.grading_method = GradingMethod::External;
        assert!(!question.supports_question_tests());

        question.grading_method = GradingMethod::Internal;
        question.question_type = QuestionType::Calculation;
        assert!(!question.supports_question_tests());
    }

    #[test]
    fn info_path_uses_qid() {
        assert_eq!(sample_question().info_path(), "questions/addNumbers/info.json");
    }

    #[test]
    fn partitions_sharing_sets() {
        let rows = vec![
            SharingSetRow { id: Id::new(1), name: "intro".into(), in_set: true },
            SharingSetRow { id: Id::new(2), name: "advanced".into(), in_set: false },
            SharingSetRow { id: Id::new(3), name: "exam".into(), in_set: true },
        ];

        let (sets_in, sets_other) = partition_sharing_sets(rows);
        assert_eq!(sets_in.len(), 2);
        assert_eq!(sets_other.len(), 1);
        assert_eq!(sets_other[0].name, "advanced");
    }
}
