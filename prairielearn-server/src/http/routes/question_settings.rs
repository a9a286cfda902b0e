//! Question settings page endpoint

use std::sync::Arc;

use axum::{extract::State, http::Uri, response::Html, routing::get, Router};

use crate::csrf;
use crate::db::{CourseRepo, QuestionRepo};
use crate::http::context::load_context;
use crate::http::error::ApiError;
use crate::http::extractors::{AuthnUser, QuestionPath};
use crate::http::server::AppState;
use crate::models::partition_sharing_sets;
use crate::render::QuestionSettingsPage;

/// GET /pl/course/{course_id}/question/{question_id}/settings
async fn question_settings(
    State(state): State<Arc<AppState>>,
    path: QuestionPath,
    AuthnUser(user): AuthnUser,
    uri: Uri,
) -> Result<Html<String>, ApiError> {
    let ctx = load_context(&state, user, Some(path.course_id), None, uri.path()).await?;
    if !ctx.authz.has_course_permission_preview {
        return Err(ApiError::forbidden("Access denied (must be a course Previewer)"));
    }
    let Some(course) = ctx.course.as_ref() else {
        return Err(ApiError::not_found("Invalid course ID"));
    };

    let questions = QuestionRepo::new(&state.pool);
    let question = questions
        .select_question_in_course(path.question_id, course.id)
        .await?
        .ok_or_else(|| ApiError::not_found("Invalid question ID"))?;

    let topic = match question.topic_id {
        Some(topic_id) => questions.select_topic(topic_id).await?,
        None => None,
    };
    let tags = questions.select_tags_for_question(question.id).await?;
    let qids = questions.select_qids_in_course(course.id).await?;
    let assessments = questions.select_assessments_with_question(question.id).await?;

    let (sharing_sets_in, sharing_sets_other) = if state.config.sharing_enabled {
        partition_sharing_sets(questions.select_sharing_sets(question.id, course.id).await?)
    } else {
        (Vec::new(), Vec::new())
    };

    let editable_courses = CourseRepo::new(&state.pool)
        .select_editable_courses(&ctx.authn_user)
        .await?;

    let question_test_path = format!("{}/question/{}/preview", ctx.url_prefix, question.id);
    let question_test_csrf_token = csrf::generate_token(
        &state.config.csrf_secret,
        &question_test_path,
        ctx.authn_user.user_id,
    )?;
    let github_link = course.github_link(&format!("questions/{}", question.qid));
    let info_path = question.info_path();

    tracing::debug!(
        question_id = %question.id,
        assessments = assessments.len(),
        editable_courses = editable_courses.len(),
        "Rendering question settings"
    );

    Ok(Html(
        QuestionSettingsPage {
            ctx: &ctx,
            course,
            question: &question,
            topic: topic.as_ref(),
            tags: &tags,
            qids: &qids,
            assessments_with_question: &assessments,
            sharing_enabled: state.config.sharing_enabled,
            enterprise: state.config.enterprise,
            sharing_sets_in: &sharing_sets_in,
            sharing_sets_other: &sharing_sets_other,
            editable_courses: &editable_courses,
            question_test_path: &question_test_path,
            question_test_csrf_token: &question_test_csrf_token,
            question_github_link: github_link.as_deref(),
            info_path: &info_path,
        }
        .render(),
    ))
}

/// Question settings routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route(
        "/pl/course/{course_id}/question/{question_id}/settings",
        get(question_settings),
    )
}
