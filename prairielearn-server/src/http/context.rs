//! Building the per-request page context

use crate::context::RequestContext;
use crate::csrf;
use crate::db::CourseRepo;
use crate::models::{AuthzData, Id, User};

use super::error::ApiError;
use super::server::AppState;

/// Resolve the course location, permissions and CSRF token for a request.
///
/// A course instance implies its course. Unknown or deleted course (instance)
/// ids are reported as 404.
pub async fn load_context(
    state: &AppState,
    authn_user: User,
    course_id: Option<Id>,
    course_instance_id: Option<Id>,
    request_path: &str,
) -> Result<RequestContext, ApiError> {
    let repo = CourseRepo::new(&state.pool);

    let course_instance = match course_instance_id {
        Some(id) => Some(
            repo.select_course_instance(id)
                .await?
                .ok_or_else(|| ApiError::not_found("Invalid course instance ID"))?,
        ),
        None => None,
    };

    let course_id = course_instance.as_ref().map(|ci| ci.course_id).or(course_id);
    let course = match course_id {
        Some(id) => Some(
            repo.select_course(id)
                .await?
                .ok_or_else(|| ApiError::not_found("Invalid course ID"))?,
        ),
        None => None,
    };

    let role = match &course {
        Some(course) => repo.select_course_role(authn_user.user_id, course.id).await?,
        None => None,
    };
    let authz = if course.is_some() {
        AuthzData::from_role(role, authn_user.is_administrator)
    } else {
        AuthzData::default()
    };

    let csrf_token =
        csrf::generate_token(&state.config.csrf_secret, request_path, authn_user.user_id)?;

    Ok(RequestContext {
        url_prefix: RequestContext::url_prefix_for(course.as_ref(), course_instance.as_ref()),
        authn_user,
        course,
        course_instance,
        authz,
        csrf_token,
    })
}
