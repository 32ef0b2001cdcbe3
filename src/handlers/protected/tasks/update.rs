use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::info;

use crate::auth::{guard, Principal};
use crate::database::models::Task;
use crate::database::update::UpdatePlan;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateTaskRequest {
    pub id: String,
    /// Sparse map of field name to new value
    pub fields: Map<String, Value>,
}

#[derive(Debug, Serialize)]
pub struct UpdateTaskResponse {
    pub task: Task,
}

/// POST /service.Todo/UpdateTask
///
/// ```json
/// { "id": "<task id>", "fields": { "status": "COMPLETE", "tags": ["home"] } }
/// ```
///
/// The field map is validated in full before storage is touched.
pub async fn update_task(
    State(state): State<AppState>,
    principal: Principal,
    payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> ApiResult<UpdateTaskResponse> {
    let Json(req) = payload?;
    if req.id.trim().is_empty() {
        return Err(ApiError::invalid_argument("task id cannot be blank"));
    }

    let plan = UpdatePlan::build(&req.fields, Utc::now().timestamp())?;

    let existing = state
        .tasks
        .get(principal.id(), &req.id)
        .await?
        .ok_or_else(|| guard::not_found(&req.id))?;
    guard::ensure_owner(&principal, &existing)?;

    // Absent here means it was deleted after the ownership check
    let task = state
        .tasks
        .update_fields(principal.id(), &req.id, &plan)
        .await?
        .ok_or_else(|| guard::not_found(&req.id))?;
    info!("Task {} updated by {} ({} field(s))", task.id, principal, plan.updates().len());

    Ok(ApiResponse::success(UpdateTaskResponse { task }))
}
