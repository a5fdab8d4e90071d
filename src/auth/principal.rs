use std::collections::BTreeSet;
use std::convert::Infallible;
use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::request::Parts;
use crate::core::library::Permission;

pub(crate) const USER_ID_HEADER: &str = "x-user-id";
pub(crate) const PERMISSIONS_HEADER: &str = "x-user-permissions";

// Principal is the caller identity injected by the API gateway authorizer through
// x-user-id (the patron id) and x-user-permissions (comma separated). A request
// without a user id is anonymous; guards decide what an anonymous caller may do.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Principal {
    pub user_id: Option<String>,
    pub permissions: BTreeSet<Permission>,
}

impl Principal {
    pub fn anonymous() -> Self {
        Principal::default()
    }

    pub fn user(user_id: &str, permissions: &[Permission]) -> Self {
        Principal {
            user_id: Some(user_id.to_string()),
            permissions: permissions.iter().copied().collect(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }

    // unknown permission names are ignored
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let user_id = headers.get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        let permissions = headers.get(PERMISSIONS_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.split(',').filter_map(Permission::parse).collect())
            .unwrap_or_default();
        Principal { user_id, permissions }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Principal::from_headers(&parts.headers))
    }
}
