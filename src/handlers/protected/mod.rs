// handlers/protected/mod.rs - Handlers that require a verified credential
//
// Security Level: credential verified by the interceptor; every handler takes
// a `Principal` and consults the ownership guard before touching a task.

pub mod tasks;
