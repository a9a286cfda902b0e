//! Courses, course instances and course-level permissions

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use sqlx::FromRow;

use super::{Id, ValidationError};

/// Repository URLs we know how to turn into GitHub links:
/// `git@github.com:owner/repo.git` and `https://github.com/owner/repo(.git)`
static GITHUB_REPO_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:git@github\.com:|https://github\.com/)([\w.-]+/[\w.-]+?)(?:\.git)?/?$")
        .expect("invalid github repository regex")
});

/// Course row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Course {
    pub id: Id,
    pub short_name: String,
    pub title: String,
    /// The read-only example course shipped with every installation.
    pub example_course: bool,
    pub repository: Option<String>,
    pub branch: String,
    pub sharing_name: Option<String>,
}

impl Course {
    /// Link to `path` in the course's GitHub repository, if it is hosted there.
    pub fn github_link(&self, path: &str) -> Option<String> {
        let repository = self.repository.as_deref()?;
        let caps = GITHUB_REPO_RE.captures(repository)?;
        Some(format!(
            "https://github.com/{}/tree/{}/{}",
            &caps[1], self.branch, path
        ))
    }
}

/// Course instance row (one offering of a course)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct CourseInstance {
    pub id: Id,
    pub course_id: Id,
    pub short_name: String,
    pub long_name: String,
}

/// Role of a user on a course, ordered from least to most privileged
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum CourseRole {
    None,
    Previewer,
    Viewer,
    Editor,
    Owner,
}

impl CourseRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Previewer => "Previewer",
            Self::Viewer => "Viewer",
            Self::Editor => "Editor",
            Self::Owner => "Owner",
        }
    }
}

impl TryFrom<String> for CourseRole {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "None" => Ok(Self::None),
            "Previewer" => Ok(Self::Previewer),
            "Viewer" => Ok(Self::Viewer),
            "Editor" => Ok(Self::Editor),
            "Owner" => Ok(Self::Owner),
            _ => Err(ValidationError::InvalidVariant {
                field: "course_role",
                value,
            }),
        }
    }
}

/// Course permission flags used by page renderers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct AuthzData {
    pub has_course_permission_preview: bool,
    pub has_course_permission_view: bool,
    pub has_course_permission_edit: bool,
    pub has_course_permission_own: bool,
}

impl AuthzData {
    /// Derive permission flags from a course role.
    ///
    /// Administrators are treated as owners of every course.
    pub fn from_role(role: Option<CourseRole>, is_administrator: bool) -> Self {
        let role = if is_administrator {
            CourseRole::Owner
        } else {
            role.unwrap_or(CourseRole::None)
        };

        Self {
            has_course_permission_preview: role >= CourseRole::Previewer,
            has_course_permission_view: role >= CourseRole::Viewer,
            has_course_permission_edit: role >= CourseRole::Editor,
            has_course_permission_own: role >= CourseRole::Owner,
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_course() -> Course {
    Course {
        id: Id::new(1),
        short_name: "CS 101".into(),
        title: "Intro to Computing".into(),
        example_course: false,
        repository: Some("git@github.com:PrairieLearn/cs101.git".into()),
        branch: "master".into(),
        sharing_name: None,
    }
}
