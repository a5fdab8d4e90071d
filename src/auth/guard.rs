use crate::auth::principal::Principal;
use crate::core::library::{LibraryError, LibraryResult, Permission};

// Guard is one precondition on the caller; guards compose by listing them.
pub(crate) trait Guard: Sync + Send {
    fn check(&self, principal: &Principal) -> LibraryResult<()>;
}

pub(crate) struct LoginRequired;

impl Guard for LoginRequired {
    fn check(&self, principal: &Principal) -> LibraryResult<()> {
        if principal.is_authenticated() {
            Ok(())
        } else {
            Err(LibraryError::access_denied("login required", Some("401".to_string())))
        }
    }
}

pub(crate) struct PermissionRequired(pub Permission);

impl Guard for PermissionRequired {
    fn check(&self, principal: &Principal) -> LibraryResult<()> {
        if principal.has_permission(self.0) {
            Ok(())
        } else {
            Err(LibraryError::not_granted(
                format!("{} permission required", self.0).as_str(), Some("403".to_string())))
        }
    }
}

// first failing guard wins
pub(crate) fn authorize(principal: &Principal, guards: &[&dyn Guard]) -> LibraryResult<()> {
    for guard in guards {
        guard.check(principal)?;
    }
    Ok(())
}
