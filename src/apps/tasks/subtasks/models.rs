use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::apps::tasks::models::CREATED_FORMAT;

#[derive(Debug, Clone, FromRow)]
pub struct Subtask {
	pub id: i64,
	pub task_id: i64,
	pub title: String,
	pub content: String,
	pub date_creation: DateTime<Utc>,
	pub status_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SubtaskOut {
	pub id: i64,
	pub task_id: i64,
	pub title: String,
	pub content: String,
	pub date_creation: String,
	pub status_id: Option<i64>,
}

impl From<Subtask> for SubtaskOut {
	fn from(subtask: Subtask) -> Self {
		Self {
			id: subtask.id,
			task_id: subtask.task_id,
			title: subtask.title,
			content: subtask.content,
			date_creation: subtask.date_creation.format(CREATED_FORMAT).to_string(),
			status_id: subtask.status_id,
		}
	}
}

#[derive(Debug, Deserialize)]
pub struct CreateSubtask {
	pub title: String,
	pub content: String,
	pub status_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateSubtask {
	pub title: Option<String>,
	pub content: Option<String>,
	pub status_id: Option<i64>,
}
