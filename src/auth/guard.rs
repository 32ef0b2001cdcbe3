use crate::auth::Principal;
use crate::database::models::task::Task;
use crate::error::ApiError;

/// Outcome of an ownership check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Allow,
    Deny,
}

/// Allow iff the task belongs to `principal`.
pub fn authorize(principal: &Principal, task: &Task) -> Access {
    if task.owner == principal.id() {
        Access::Allow
    } else {
        Access::Deny
    }
}

/// Read/update form of [`authorize`]. A denial is reported exactly like a
/// missing task so callers cannot probe for other users' ids.
pub fn ensure_owner(principal: &Principal, task: &Task) -> Result<(), ApiError> {
    match authorize(principal, task) {
        Access::Allow => Ok(()),
        Access::Deny => {
            tracing::warn!("Ownership denied: task '{}' requested by '{}'", task.id, principal);
            Err(not_found(&task.id))
        }
    }
}

/// The error surfaced for both absent and unowned tasks
pub fn not_found(task_id: &str) -> ApiError {
    ApiError::not_found(format!("task {} does not exist", task_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task_owned_by(owner: &str) -> Task {
        Task::new("t1".into(), owner.into(), "x".into())
    }

    #[test]
    fn owner_is_allowed() {
        let task = task_owned_by("alice");
        assert_eq!(authorize(&Principal::new("alice"), &task), Access::Allow);
        assert!(ensure_owner(&Principal::new("alice"), &task).is_ok());
    }

    #[test]
    fn everyone_else_is_denied() {
        let task = task_owned_by("alice");
        for other in ["bob", "Alice", "alice ", ""] {
            assert_eq!(authorize(&Principal::new(other), &task), Access::Deny, "{other:?}");
        }
    }

    #[test]
    fn denial_is_indistinguishable_from_missing() {
        let task = task_owned_by("alice");
        let denied = ensure_owner(&Principal::new("bob"), &task).unwrap_err();
        let missing = not_found("t1");
        assert_eq!(denied.status_code(), 404);
        assert_eq!(denied.to_json(), missing.to_json());
    }
}
