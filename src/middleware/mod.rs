pub mod auth;
pub mod response;

pub use auth::{auth_interceptor, AUTHORIZATION_HEADER, JWT_HEADER};
pub use response::{ApiResponse, ApiResult};
