use std::time::Duration;

use axum::{
    middleware,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::handlers;
use crate::middleware::auth_interceptor;
use crate::state::AppState;

/// Path prefix shared by every RPC operation
pub const RPC_PREFIX: &str = "/service.Todo";

/// All routes, without the process-level layers
pub fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Every RPC goes through the auth interceptor
        .merge(rpc_routes(state.clone()))
        .with_state(state)
}

/// Wrap the router with the timeout, tracing and CORS layers `config` asks for.
/// A timed-out call is dropped before the interceptor can rotate a credential.
pub fn with_global_layers(router: Router, config: &AppConfig) -> Router {
    let mut router = router.layer(TimeoutLayer::new(Duration::from_secs(config.api.request_timeout_secs)));
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }
    if config.security.enable_cors {
        router = router.layer(CorsLayer::permissive());
    }
    router
}

fn rpc_routes(state: AppState) -> Router<AppState> {
    use handlers::protected::tasks;
    use handlers::public::auth;

    Router::new()
        // Bootstrap
        .route(&rpc("Signup"), post(auth::signup))
        .route(&rpc("Signin"), post(auth::signin))
        // Tasks
        .route(&rpc("AddTask"), post(tasks::add_task))
        .route(&rpc("GetTask"), post(tasks::get_task))
        .route(&rpc("GetAllTasks"), post(tasks::get_all_tasks))
        .route(&rpc("UpdateTask"), post(tasks::update_task))
        .route(&rpc("DeleteTask"), post(tasks::delete_task))
        .route_layer(middleware::from_fn_with_state(state, auth_interceptor))
}

fn rpc(operation: &str) -> String {
    format!("{}/{}", RPC_PREFIX, operation)
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "success": true,
        "data": {
            "name": "Todo API (Rust)",
            "version": version,
            "endpoints": {
                "health": "/health (public)",
                "bootstrap": "/service.Todo/Signup, /service.Todo/Signin (authorization header required, not verified)",
                "tasks": "/service.Todo/{AddTask,GetTask,GetAllTasks,UpdateTask,DeleteTask} (verified)",
            },
            "credentials": {
                "request_header": "authorization",
                "response_header": "jwt",
            }
        }
    }))
}

async fn health() -> impl IntoResponse {
    Json(json!({
        "success": true,
        "data": {
            "status": "ok",
            "timestamp": chrono::Utc::now(),
        }
    }))
}
