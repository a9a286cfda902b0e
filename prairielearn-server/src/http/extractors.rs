//! Custom Axum extractors

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use super::error::ApiError;
use super::server::AppState;
use crate::db::UserRepo;
use crate::models::{Id, User};

/// Header set by the authenticating proxy in front of the server
pub const AUTHN_UID_HEADER: &str = "x-authn-uid";

/// Route segments that do not parse as ids are treated as unknown routes.
fn not_found() -> ApiError {
    ApiError::not_found("Not Found")
}

fn parse_optional_id(params: &HashMap<String, String>, name: &str) -> Result<Option<Id>, ApiError> {
    params
        .get(name)
        .map(|raw| Id::parse(raw).map_err(|_| not_found()))
        .transpose()
}

fn parse_required_id(params: &HashMap<String, String>, name: &str) -> Result<Id, ApiError> {
    parse_optional_id(params, name)?.ok_or_else(not_found)
}

async fn path_params<S>(parts: &mut Parts, state: &S) -> Result<HashMap<String, String>, ApiError>
where
    S: Send + Sync,
{
    let Path(params): Path<HashMap<String, String>> = Path::from_request_parts(parts, state)
        .await
        .map_err(|_| not_found())?;
    Ok(params)
}

/// Path parameters of the news item routes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsItemPath {
    pub course_id: Option<Id>,
    pub course_instance_id: Option<Id>,
    pub news_item_id: Id,
    /// Asset path below the item directory, unvalidated
    pub path: Option<String>,
}

impl<S> FromRequestParts<S> for NewsItemPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let params = path_params(parts, state).await?;

        Ok(Self {
            course_id: parse_optional_id(&params, "course_id")?,
            course_instance_id: parse_optional_id(&params, "course_instance_id")?,
            news_item_id: parse_required_id(&params, "news_item_id")?,
            path: params.get("path").cloned(),
        })
    }
}

/// Optional course or course instance around a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CourseScope {
    pub course_id: Option<Id>,
    pub course_instance_id: Option<Id>,
}

impl<S> FromRequestParts<S> for CourseScope
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        // Unscoped routes have no path parameters at all.
        let params = match Path::<HashMap<String, String>>::from_request_parts(parts, state).await {
            Ok(Path(params)) => params,
            Err(_) => HashMap::new(),
        };

        Ok(Self {
            course_id: parse_optional_id(&params, "course_id")?,
            course_instance_id: parse_optional_id(&params, "course_instance_id")?,
        })
    }
}

/// Path parameters of the question settings route
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionPath {
    pub course_id: Id,
    pub question_id: Id,
}

impl<S> FromRequestParts<S> for QuestionPath
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let params = path_params(parts, state).await?;

        Ok(Self {
            course_id: parse_required_id(&params, "course_id")?,
            question_id: parse_required_id(&params, "question_id")?,
        })
    }
}

/// The authenticated user making the request.
///
/// Taken from the `X-Authn-Uid` header, falling back to the configured
/// development user. The uid must belong to a known user.
pub struct AuthnUser(pub User);

impl FromRequestParts<Arc<AppState>> for AuthnUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header_uid = parts
            .headers
            .get(AUTHN_UID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|uid| !uid.is_empty());

        let uid = header_uid
            .or(state.config.dev_authn_uid.as_deref())
            .ok_or_else(|| ApiError::Unauthorized {
                reason: "no authenticated user".into(),
            })?;

        let user = UserRepo::new(&state.pool)
            .select_by_uid(uid)
            .await?
            .ok_or_else(|| {
                tracing::warn!(uid, "Unknown authenticated uid");
                ApiError::Unauthorized {
                    reason: "unknown user".into(),
                }
            })?;

        Ok(Self(user))
    }
}
