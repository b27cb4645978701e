use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::apps::projects::models::Project;

/// Wire format for creation timestamps.
pub const CREATED_FORMAT: &str = "%d/%m/%YT%H:%M:%SZ%z";

/// Wire format for deadlines, both directions.
pub const DEADLINE_FORMAT: &str = "%d/%m/%Y";

#[derive(Debug, Clone, FromRow)]
pub struct Task {
	pub id: i64,
	pub title: String,
	pub content: String,
	pub date_creation: DateTime<Utc>,
	pub priority_id: i64,
	pub deadline: Option<DateTime<Utc>>,
	pub status_id: Option<i64>,
}

/// Serialized task: fixed-format date strings, deadline as explicit
/// null when absent.
#[derive(Debug, Clone, Serialize)]
pub struct TaskOut {
	pub id: i64,
	pub title: String,
	pub content: String,
	pub date_creation: String,
	pub priority_id: i64,
	pub deadline: Option<String>,
	pub status_id: Option<i64>,
}

impl From<Task> for TaskOut {
	fn from(task: Task) -> Self {
		Self {
			id: task.id,
			title: task.title,
			content: task.content,
			date_creation: task.date_creation.format(CREATED_FORMAT).to_string(),
			priority_id: task.priority_id,
			deadline: task
				.deadline
				.map(|d| d.format(DEADLINE_FORMAT).to_string()),
			status_id: task.status_id,
		}
	}
}

#[derive(Debug, Deserialize)]
pub struct CreateTask {
	pub title: String,
	pub content: String,
	pub priority_id: i64,
	pub project_id: i64,
	pub deadline: Option<String>,
	pub status_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTask {
	pub title: Option<String>,
	pub content: Option<String>,
	pub priority_id: Option<i64>,
	pub deadline: Option<String>,
	pub status_id: Option<i64>,
}

/// Assignment request; `user_id` defaults to the assigner.
#[derive(Debug, Deserialize)]
pub struct AssignTask {
	pub project_id: i64,
	pub user_id: Option<String>,
}

/// Visibility filters for task listings; absent fields add no
/// constraint.
#[derive(Debug, Default)]
pub struct TaskFilters {
	pub project_id: Option<i64>,
	pub priority_id: Option<i64>,
	pub status_id: Option<i64>,
	pub deadline_before: Option<DateTime<Utc>>,
}

/// One project with its visible tasks, from the grouped listing.
#[derive(Debug, Serialize)]
pub struct ProjectTasks {
	pub project: Project,
	pub tasks: Vec<TaskOut>,
}
