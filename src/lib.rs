pub mod app;
pub mod auth;
pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod schedule;
pub mod state;

pub use app::{app, with_global_layers};
pub use state::AppState;
