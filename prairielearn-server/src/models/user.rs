//! Authenticated users

use serde::Serialize;
use sqlx::FromRow;

use super::Id;

/// User row
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct User {
    pub user_id: Id,
    /// Login identifier, usually an email address.
    pub uid: String,
    pub name: Option<String>,
    pub is_administrator: bool,
}

impl User {
    /// Name shown in the navbar, falling back to the uid.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.uid)
    }
}

#[cfg(test)]
pub(crate) fn sample_user() -> User {
    User {
        user_id: Id::new(2),
        uid: "dev@example.com".into(),
        name: Some("Dev User".into()),
        is_administrator: false,
    }
}
