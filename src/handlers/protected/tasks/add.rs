use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::Principal;
use crate::database::models::{RecurringRule, Status, Task};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AddTaskRequest {
    pub title: String,
    pub description: String,
    pub status: Status,
    pub tags: Vec<String>,
    pub parents: Vec<String>,
    pub due_date: Option<i64>,
    pub recurring_rule: Option<RecurringRule>,
}

#[derive(Debug, Serialize)]
pub struct AddTaskResponse {
    pub id: String,
}

/// POST /service.Todo/AddTask - create a task owned by the caller
pub async fn add_task(
    State(state): State<AppState>,
    principal: Principal,
    payload: Result<Json<AddTaskRequest>, JsonRejection>,
) -> ApiResult<AddTaskResponse> {
    let Json(req) = payload?;

    if req.title.trim().is_empty() {
        return Err(ApiError::invalid_argument("title cannot be blank"));
    }
    if let Some(rule) = &req.recurring_rule {
        rule.validate()
            .map_err(|reason| ApiError::invalid_argument(format!("invalid recurring rule: {}", reason)))?;
    }

    let now = Utc::now().timestamp();
    let id = Uuid::new_v4().to_string();
    let task = Task {
        id: id.clone(),
        owner: principal.id().to_string(),
        title: req.title,
        description: req.description,
        status: req.status,
        tags: req.tags.into_iter().collect(),
        parents: req.parents,
        due_date: req.due_date,
        recurring_rule: req.recurring_rule,
        created_at: now,
        updated_at: now,
    };

    state.tasks.put(task).await?;
    info!("Task {} created by {}", id, principal);

    Ok(ApiResponse::created(AddTaskResponse { id }))
}
