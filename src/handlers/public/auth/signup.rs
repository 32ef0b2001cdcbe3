// handlers/public/auth/signup.rs - POST /service.Todo/Signup handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::Principal;
use crate::database::models::User;
use crate::error::ApiError;
use crate::middleware::ApiResponse;
use crate::state::AppState;

use super::utils::{hash_off_thread, require};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub access_jwt: String,
    pub user_id: String,
}

/// Create an account and return its first credential.
///
/// ```json
/// { "first_name": "Ada", "last_name": "Lovelace", "email": "ada@example.com", "password": "..." }
/// ```
///
/// The new user id is bound to the response so the interceptor rotates a
/// credential for it as with any other successful call.
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> Result<(Extension<Principal>, ApiResponse<SignupResponse>), ApiError> {
    let Json(req) = payload?;

    require(&req.first_name, "first name")?;
    // TODO: validate email format before accepting the account
    require(&req.email, "email")?;
    require(&req.password, "password")?;

    let hashed_password = hash_off_thread(req.password).await?;
    let user_id = Uuid::new_v4().to_string();

    state
        .users
        .add_user(User {
            id: user_id.clone(),
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            hashed_password,
        })
        .await?;

    let access_jwt = state.tokens.issue(&user_id)?;
    info!("Created user {}", user_id);

    Ok((
        Extension(Principal::new(user_id.clone())),
        ApiResponse::created(SignupResponse { access_jwt, user_id }),
    ))
}
