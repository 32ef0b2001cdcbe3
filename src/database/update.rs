use serde_json::{Map, Value};

use crate::database::models::task::{RecurringRule, Status, Task};

pub const TITLE: &str = "title";
pub const DESCRIPTION: &str = "description";
pub const STATUS: &str = "status";
pub const DUE_DATE: &str = "due_date";
pub const TAGS: &str = "tags";
pub const PARENTS: &str = "parents";
pub const RECURRING_RULE: &str = "recurring_rule";

/// Identity fields. Present in the record, never writable.
const IMMUTABLE_FIELDS: &[&str] = &["user_id", "owner", "task_id", "id"];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UpdateError {
    #[error("not allowed to update {0}")]
    NotAllowed(String),
    #[error("unknown attribute: {0}")]
    UnknownAttribute(String),
    #[error("the value type of {field} should be {expected}")]
    WrongType { field: String, expected: &'static str },
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Value shapes the task schema accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Int,
    StringList,
    RecurringRule,
}

impl ValueKind {
    fn describe(&self) -> &'static str {
        match self {
            ValueKind::String => "a string",
            ValueKind::Int => "an integer",
            ValueKind::StringList => "a list of strings",
            ValueKind::RecurringRule => "a recurring rule",
        }
    }
}

/// Writable task attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskAttribute {
    Title,
    Description,
    Status,
    DueDate,
    Tags,
    Parents,
    RecurringRule,
}

impl TaskAttribute {
    /// Schema lookup for a caller-supplied field name
    pub fn lookup(name: &str) -> Result<Self, UpdateError> {
        match name {
            TITLE => Ok(TaskAttribute::Title),
            DESCRIPTION => Ok(TaskAttribute::Description),
            STATUS => Ok(TaskAttribute::Status),
            DUE_DATE => Ok(TaskAttribute::DueDate),
            TAGS => Ok(TaskAttribute::Tags),
            PARENTS => Ok(TaskAttribute::Parents),
            RECURRING_RULE => Ok(TaskAttribute::RecurringRule),
            other if IMMUTABLE_FIELDS.contains(&other) => Err(UpdateError::NotAllowed(other.to_string())),
            other => Err(UpdateError::UnknownAttribute(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TaskAttribute::Title => TITLE,
            TaskAttribute::Description => DESCRIPTION,
            TaskAttribute::Status => STATUS,
            TaskAttribute::DueDate => DUE_DATE,
            TaskAttribute::Tags => TAGS,
            TaskAttribute::Parents => PARENTS,
            TaskAttribute::RecurringRule => RECURRING_RULE,
        }
    }

    pub fn kind(&self) -> ValueKind {
        match self {
            TaskAttribute::Title | TaskAttribute::Description | TaskAttribute::Status => ValueKind::String,
            TaskAttribute::DueDate => ValueKind::Int,
            TaskAttribute::Tags | TaskAttribute::Parents => ValueKind::StringList,
            TaskAttribute::RecurringRule => ValueKind::RecurringRule,
        }
    }
}

/// A type-checked new value, one variant per schema field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    Title(String),
    Description(String),
    Status(Status),
    DueDate(i64),
    Tags(Vec<String>),
    Parents(Vec<String>),
    RecurringRule(RecurringRule),
}

/// Validated set of mutations for one task. `updated_at` is always written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePlan {
    updates: Vec<FieldUpdate>,
    updated_at: i64,
}

impl UpdatePlan {
    /// Validate a sparse field map against the task schema.
    ///
    /// Field names are checked before any value, so a disallowed or unknown
    /// key fails the whole map regardless of what else it contains. A `null`
    /// recurring rule is skipped rather than rejected.
    pub fn build(fields: &Map<String, Value>, now: i64) -> Result<Self, UpdateError> {
        let attributes = fields
            .keys()
            .map(|name| TaskAttribute::lookup(name))
            .collect::<Result<Vec<_>, _>>()?;

        let mut updates = Vec::with_capacity(attributes.len());
        for (attribute, value) in attributes.into_iter().zip(fields.values()) {
            if let Some(update) = parse_value(attribute, value)? {
                updates.push(update);
            }
        }

        Ok(Self { updates, updated_at: now })
    }

    pub fn updates(&self) -> &[FieldUpdate] {
        &self.updates
    }

    pub fn updated_at(&self) -> i64 {
        self.updated_at
    }

    /// Write every staged value into `task`
    pub fn apply(&self, task: &mut Task) {
        for update in &self.updates {
            match update {
                FieldUpdate::Title(v) => task.title = v.clone(),
                FieldUpdate::Description(v) => task.description = v.clone(),
                FieldUpdate::Status(v) => task.status = *v,
                FieldUpdate::DueDate(v) => task.due_date = Some(*v),
                FieldUpdate::Tags(v) => task.tags = v.iter().cloned().collect(),
                FieldUpdate::Parents(v) => task.parents = v.clone(),
                FieldUpdate::RecurringRule(v) => task.recurring_rule = Some(v.clone()),
            }
        }
        task.updated_at = self.updated_at;
    }
}

fn parse_value(attribute: TaskAttribute, value: &Value) -> Result<Option<FieldUpdate>, UpdateError> {
    let field = attribute.name();
    let wrong_type = || UpdateError::WrongType {
        field: field.to_string(),
        expected: attribute.kind().describe(),
    };

    let update = match attribute {
        TaskAttribute::Title => FieldUpdate::Title(value.as_str().ok_or_else(wrong_type)?.to_string()),
        TaskAttribute::Description => FieldUpdate::Description(value.as_str().ok_or_else(wrong_type)?.to_string()),
        TaskAttribute::Status => {
            let raw = value.as_str().ok_or_else(wrong_type)?;
            let status = raw.parse::<Status>().map_err(|reason| UpdateError::InvalidValue {
                field: field.to_string(),
                reason,
            })?;
            FieldUpdate::Status(status)
        }
        TaskAttribute::DueDate => FieldUpdate::DueDate(value.as_i64().ok_or_else(wrong_type)?),
        TaskAttribute::Tags => FieldUpdate::Tags(string_list(value).ok_or_else(wrong_type)?),
        TaskAttribute::Parents => FieldUpdate::Parents(string_list(value).ok_or_else(wrong_type)?),
        TaskAttribute::RecurringRule => {
            if value.is_null() {
                return Ok(None);
            }
            let rule: RecurringRule = serde_json::from_value(value.clone()).map_err(|_| wrong_type())?;
            rule.validate().map_err(|reason| UpdateError::InvalidValue {
                field: field.to_string(),
                reason,
            })?;
            FieldUpdate::RecurringRule(rule)
        }
    };

    Ok(Some(update))
}

fn string_list(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|v| v.as_str().map(str::to_string))
        .collect()
}
