use uuid::Uuid;

use super::models::{Subtask, SubtaskOut};
use crate::context::AppContext;
use crate::error::{Error, Result};
use crate::policy::{Action, Resource};

/// Subtasks of a task the identity can touch, optionally narrowed to a
/// status.
pub async fn list_subtasks_by_task(
	ctx: &AppContext,
	identity: Option<Uuid>,
	task_id: i64,
	status_filter: Option<i64>,
) -> Result<Vec<SubtaskOut>> {
	ctx.policy
		.authorize(identity, Action::Read, Resource::Task(task_id))
		.await?
		.require()?;

	let mut qb = sqlx::QueryBuilder::<sqlx::Sqlite>::new(
		"SELECT id, task_id, title, content, date_creation, status_id \
		 FROM subtasks WHERE task_id = ",
	);
	qb.push_bind(task_id);
	if let Some(status_id) = status_filter {
		qb.push(" AND status_id = ");
		qb.push_bind(status_id);
	}
	qb.push(" ORDER BY id");

	let subtasks = qb
		.build_query_as::<Subtask>()
		.fetch_all(ctx.db.pool())
		.await?;
	Ok(subtasks.into_iter().map(SubtaskOut::from).collect())
}

/// Single subtask, scoped through its owning task.
pub async fn get_subtask_by_id(
	ctx: &AppContext,
	identity: Option<Uuid>,
	subtask_id: i64,
) -> Result<SubtaskOut> {
	ctx.policy
		.authorize(identity, Action::Read, Resource::Subtask(subtask_id))
		.await?
		.require()?;

	let subtask: Option<Subtask> = sqlx::query_as(
		"SELECT id, task_id, title, content, date_creation, status_id \
		 FROM subtasks WHERE id = ?",
	)
	.bind(subtask_id)
	.fetch_optional(ctx.db.pool())
	.await?;
	subtask
		.map(SubtaskOut::from)
		.ok_or_else(|| Error::NotFound("subtask not found".to_string()))
}
