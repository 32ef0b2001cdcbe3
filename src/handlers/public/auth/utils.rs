use crate::auth::password::{hash_password, verify_password};
use crate::error::ApiError;

/// Argon2 is deliberately slow; keep it off the async workers.
pub async fn hash_off_thread(password: String) -> Result<String, ApiError> {
    tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| {
            tracing::error!("Password hashing task failed: {}", e);
            ApiError::internal("Failed to process credentials")
        })?
        .map_err(ApiError::from)
}

pub async fn verify_off_thread(password: String, digest: String) -> Result<bool, ApiError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &digest))
        .await
        .map_err(|e| {
            tracing::error!("Password verification task failed: {}", e);
            ApiError::internal("Failed to process credentials")
        })
}

/// Reject empty or whitespace-only input
pub fn require(value: &str, what: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::invalid_argument(format!("{} cannot be blank", what)));
    }
    Ok(())
}
