// handlers/public/auth/mod.rs - Bootstrap authentication handlers
//
// The two operations the interceptor lets through without verifying the
// inbound credential. Each binds the principal it authenticated so the
// response still carries a rotated credential.

pub mod signin;
pub mod signup;
mod utils;

pub use signin::signin;
pub use signup::signup;
