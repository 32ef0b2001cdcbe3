use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::{guard, Principal};
use crate::database::models::Task;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GetTaskRequest {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct GetTaskResponse {
    pub task: Task,
}

#[derive(Debug, Serialize)]
pub struct GetAllTasksResponse {
    pub tasks: Vec<Task>,
}

/// POST /service.Todo/GetTask
pub async fn get_task(
    State(state): State<AppState>,
    principal: Principal,
    payload: Result<Json<GetTaskRequest>, JsonRejection>,
) -> ApiResult<GetTaskResponse> {
    let Json(req) = payload?;
    if req.id.trim().is_empty() {
        return Err(ApiError::invalid_argument("id cannot be blank"));
    }

    let task = state
        .tasks
        .get(principal.id(), &req.id)
        .await?
        .ok_or_else(|| guard::not_found(&req.id))?;
    guard::ensure_owner(&principal, &task)?;

    Ok(ApiResponse::success(GetTaskResponse { task }))
}

/// POST /service.Todo/GetAllTasks - every task the caller owns
pub async fn get_all_tasks(State(state): State<AppState>, principal: Principal) -> ApiResult<GetAllTasksResponse> {
    let tasks = state.tasks.list(principal.id()).await?;
    Ok(ApiResponse::success(GetAllTasksResponse { tasks }))
}
