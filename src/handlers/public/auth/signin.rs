// handlers/public/auth/signin.rs - POST /service.Todo/Signin handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth::Principal;
use crate::error::ApiError;
use crate::middleware::ApiResponse;
use crate::state::AppState;

use super::utils::{require, verify_off_thread};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SigninRequest {
    pub user_id: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SigninResponse {
    pub access_jwt: String,
}

/// Exchange a user id and password for a credential. Unknown users and wrong
/// passwords produce the same error.
pub async fn signin(
    State(state): State<AppState>,
    payload: Result<Json<SigninRequest>, JsonRejection>,
) -> Result<(Extension<Principal>, ApiResponse<SigninResponse>), ApiError> {
    let Json(req) = payload?;
    require(&req.user_id, "user id")?;

    let user = state.users.get_user(&req.user_id).await?;
    let matched = match user {
        Some(user) => verify_off_thread(req.password, user.hashed_password).await?,
        None => false,
    };
    if !matched {
        warn!("Failed sign-in for user {}", req.user_id);
        return Err(ApiError::unauthenticated("invalid user id or password"));
    }

    let access_jwt = state.tokens.issue(&req.user_id)?;
    info!("User {} signed in", req.user_id);

    Ok((Extension(Principal::new(req.user_id)), ApiResponse::success(SigninResponse { access_jwt })))
}
