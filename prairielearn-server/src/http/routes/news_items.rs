//! News item endpoints
//!
//! Each route is mounted at the site root and again inside a course and a
//! course instance, which decide who may see staff-only items.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    http::Uri,
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::context::RequestContext;
use crate::db::{NewsItemRepo, UserRepo};
use crate::http::context::load_context;
use crate::http::error::ApiError;
use crate::http::extractors::{AuthnUser, CourseScope, NewsItemPath};
use crate::http::server::AppState;
use crate::models::{sanitize_asset_path, Id};
use crate::render::{NewsItemIndexPage, NewsItemPage};

const PREFIXES: &[&str] = &[
    "/news_items",
    "/pl/course/{course_id}/news_items",
    "/pl/course_instance/{course_instance_id}/news_items",
];

const INVALID_NEWS_ITEM: &str = "Invalid news item ID";

fn scope_ids(ctx: &RequestContext) -> (Option<Id>, Option<Id>) {
    (
        ctx.course_instance.as_ref().map(|ci| ci.id),
        ctx.course.as_ref().map(|c| c.id),
    )
}

/// GET /news_items - items visible to the user, newest first
async fn list_news_items(
    State(state): State<Arc<AppState>>,
    scope: CourseScope,
    AuthnUser(user): AuthnUser,
    uri: Uri,
) -> Result<Html<String>, ApiError> {
    let ctx = load_context(
        &state,
        user,
        scope.course_id,
        scope.course_instance_id,
        uri.path(),
    )
    .await?;
    let (course_instance_id, course_id) = scope_ids(&ctx);

    let items = NewsItemRepo::new(&state.pool)
        .select_news_items_for_user(ctx.authn_user.user_id, course_instance_id, course_id)
        .await?;

    Ok(Html(
        NewsItemIndexPage {
            ctx: &ctx,
            items: &items,
            base_path: uri.path(),
        }
        .render(),
    ))
}

/// GET /news_items/{news_item_id}/ - show one item and mark it read
async fn read_news_item(
    State(state): State<Arc<AppState>>,
    path: NewsItemPath,
    AuthnUser(user): AuthnUser,
    uri: Uri,
) -> Result<Html<String>, ApiError> {
    let ctx = load_context(
        &state,
        user,
        path.course_id,
        path.course_instance_id,
        uri.path(),
    )
    .await?;
    let (course_instance_id, course_id) = scope_ids(&ctx);
    let user_id = ctx.authn_user.user_id;

    let item = NewsItemRepo::new(&state.pool)
        .select_news_item_for_read(path.news_item_id, user_id, course_instance_id, course_id)
        .await?
        .ok_or_else(|| ApiError::not_found(INVALID_NEWS_ITEM))?;

    let index_path = item.index_path(&state.config.news_items_dir);
    let item_html = tokio::fs::read_to_string(&index_path).await.map_err(|e| {
        tracing::error!(path = %index_path.display(), "Failed to read news item: {}", e);
        ApiError::Io(e)
    })?;

    let user_is_instructor = UserRepo::new(&state.pool)
        .is_instructor_in_any_course(user_id)
        .await?;
    let base_href = format!("{}/", uri.path().trim_end_matches('/'));

    Ok(Html(
        NewsItemPage {
            ctx: &ctx,
            item: &item,
            item_html: &item_html,
            user_is_instructor,
            base_href: &base_href,
        }
        .render(),
    ))
}

/// GET /news_items/{news_item_id}/{*path} - static asset from the item directory
async fn news_item_asset(
    State(state): State<Arc<AppState>>,
    path: NewsItemPath,
    AuthnUser(_user): AuthnUser,
    request: Request,
) -> Result<Response, ApiError> {
    let item = NewsItemRepo::new(&state.pool)
        .select_news_item(path.news_item_id)
        .await?
        .ok_or_else(|| ApiError::not_found(INVALID_NEWS_ITEM))?;

    let requested = path.path.as_deref().unwrap_or_default();
    let relative = sanitize_asset_path(requested.trim_start_matches('/')).map_err(|e| {
        tracing::warn!(news_item_id = %item.id, requested, "Rejected asset path: {}", e);
        ApiError::forbidden("Forbidden")
    })?;

    let file = item.content_dir(&state.config.news_items_dir).join(relative);
    tracing::debug!(path = %file.display(), "Serving news item asset");

    match ServeFile::new(file).oneshot(request).await {
        Ok(response) => Ok(response.map(Body::new).into_response()),
        Err(never) => match never {},
    }
}

/// News item routes
pub fn router() -> Router<Arc<AppState>> {
    PREFIXES.iter().fold(Router::new(), |router, prefix| {
        router
            .route(prefix, get(list_news_items))
            .route(&format!("{prefix}/{{news_item_id}}"), get(read_news_item))
            .route(&format!("{prefix}/{{news_item_id}}/"), get(read_news_item))
            .route(
                &format!("{prefix}/{{news_item_id}}/{{*path}}"),
                get(news_item_asset),
            )
    })
}
