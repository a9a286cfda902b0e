//! Per-request page context
//!
//! Built once per request by the HTTP layer and passed by reference to
//! handlers and renderers.

use crate::models::{AuthzData, Course, CourseInstance, User};

/// Who is asking, where in the site they are, and what they may do there
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub authn_user: User,
    pub course: Option<Course>,
    pub course_instance: Option<CourseInstance>,
    pub authz: AuthzData,
    /// Prefix for links within the current course or course instance
    pub url_prefix: String,
    /// CSRF token for forms posting back to the current URL
    pub csrf_token: String,
}

impl RequestContext {
    /// Prefix for links inside a course, course instance or neither.
    pub fn url_prefix_for(
        course: Option<&Course>,
        course_instance: Option<&CourseInstance>,
    ) -> String {
        match (course_instance, course) {
            (Some(ci), _) => format!("/pl/course_instance/{}/instructor", ci.id),
            (None, Some(course)) => format!("/pl/course/{}", course.id),
            (None, None) => "/pl".to_string(),
        }
    }

    /// Heading shown next to the brand in the navbar.
    pub fn navbar_label(&self) -> Option<String> {
        match (&self.course, &self.course_instance) {
            (Some(course), Some(ci)) => Some(format!("{}, {}", course.short_name, ci.short_name)),
            (Some(course), None) => Some(course.short_name.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
pub(crate) fn sample_context() -> RequestContext {
    use crate::models::{course::sample_course, user::sample_user, CourseRole};

    let course = sample_course();
    RequestContext {
        authn_user: sample_user(),
        url_prefix: RequestContext::url_prefix_for(Some(&course), None),
        course: Some(course),
        course_instance: None,
        authz: AuthzData::from_role(Some(CourseRole::Owner), false),
        csrf_token: "test-csrf-token".into(),
    }
}
