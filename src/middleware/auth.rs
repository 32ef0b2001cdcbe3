use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{request::Parts, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::{debug, warn};

use crate::auth::Principal;
use crate::error::ApiError;
use crate::state::AppState;

/// Inbound credential
pub const AUTHORIZATION_HEADER: &str = "authorization";
/// Outbound rotated credential
pub const JWT_HEADER: &str = "jwt";

/// Operations that hand out a first credential and so cannot require one
pub const BOOTSTRAP_OPERATIONS: &[&str] = &["Signup", "Signin"];

/// Auth interceptor wrapped around every RPC route.
///
/// The `authorization` header must be present on every call. Bootstrap
/// operations skip verification; all others verify it and bind the resulting
/// [`Principal`] into the request. After a successful handler a fresh
/// credential for the bound principal is attached in the `jwt` header. Handler
/// failures pass through untouched and rotate nothing. If the call is dropped
/// (client gone, timeout) this future is dropped with it and no credential is
/// issued.
pub async fn auth_interceptor(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_credential(request.headers())?;
    let operation = operation_name(request.uri().path()).to_string();

    let verified = if is_bootstrap(&operation) {
        debug!("Bootstrap operation '{}': skipping credential verification", operation);
        None
    } else {
        let principal_id = state.tokens.verify(&token).map_err(|e| {
            warn!("Rejected credential for '{}': {}", operation, e);
            ApiError::unauthenticated(format!("invalid token: {}", e))
        })?;
        let principal = Principal::new(principal_id);
        debug!("Verified '{}' for operation '{}'", principal, operation);
        request.extensions_mut().insert(principal.clone());
        Some(principal)
    };

    let mut response = next.run(request).await;
    if !response.status().is_success() {
        return Ok(response);
    }

    // Bootstrap handlers bind the principal they just authenticated
    let principal = verified
        .or_else(|| response.extensions().get::<Principal>().cloned())
        .ok_or_else(|| ApiError::unauthenticated("user id is not bound to the call"))?;

    let jwt = state
        .tokens
        .issue(principal.id())
        .map_err(|e| ApiError::unauthenticated(format!("failed to issue jwt: {}", e)))?;
    let value = HeaderValue::from_str(&jwt)
        .map_err(|e| ApiError::unauthenticated(format!("failed to set jwt into header: {}", e)))?;
    response.headers_mut().insert(JWT_HEADER, value);

    Ok(response)
}

/// Pull the raw credential out of the `authorization` header. An optional
/// `Bearer ` prefix is stripped; the remainder may be empty.
pub fn extract_credential(headers: &HeaderMap) -> Result<String, ApiError> {
    let header = headers
        .get(AUTHORIZATION_HEADER)
        .ok_or_else(|| ApiError::unauthenticated("authorization token is not provided in metadata"))?;

    let raw = header
        .to_str()
        .map_err(|_| ApiError::unauthenticated("Invalid authorization header format"))?;

    Ok(raw.strip_prefix("Bearer ").unwrap_or(raw).trim().to_string())
}

/// `/service.Todo/GetTask` -> `GetTask`
pub fn operation_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

pub fn is_bootstrap(operation: &str) -> bool {
    BOOTSTRAP_OPERATIONS.contains(&operation)
}

/// Handlers take a `Principal` argument to run only with a bound principal
#[async_trait]
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Principal>()
            .cloned()
            .ok_or_else(|| ApiError::unauthenticated("user id is not provided in metadata"))
    }
}
