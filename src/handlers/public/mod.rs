// handlers/public/mod.rs - Bootstrap handlers
//
// Security Level: credential header must be present, but is not verified.

pub mod auth;
