use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::auth::{authorize, Access, Principal};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DeleteTaskRequest {
    pub task_id: String,
}

#[derive(Debug, Default, Serialize)]
pub struct DeleteTaskResponse {}

/// POST /service.Todo/DeleteTask
///
/// Succeeds whether or not the task exists or belongs to the caller; only an
/// owned task is actually removed. Unlike reads and updates, a denial here is
/// not reported.
pub async fn delete_task(
    State(state): State<AppState>,
    principal: Principal,
    payload: Result<Json<DeleteTaskRequest>, JsonRejection>,
) -> ApiResult<DeleteTaskResponse> {
    let Json(req) = payload?;
    if req.task_id.trim().is_empty() {
        return Err(ApiError::invalid_argument("task id cannot be blank"));
    }

    match state.tasks.get(principal.id(), &req.task_id).await? {
        Some(task) if authorize(&principal, &task) == Access::Allow => {
            state.tasks.delete(principal.id(), &req.task_id).await?;
            info!("Task {} deleted by {}", req.task_id, principal);
        }
        _ => debug!("Delete of task {} by {} matched nothing", req.task_id, principal),
    }

    Ok(ApiResponse::success(DeleteTaskResponse::default()))
}
