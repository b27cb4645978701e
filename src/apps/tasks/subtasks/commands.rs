use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use super::models::{CreateSubtask, UpdateSubtask};
use crate::context::AppContext;
use crate::error::{Error, Result};
use crate::policy::{Action, Resource};

/// Creates a subtask under a task the identity can touch.
pub async fn create_subtask(
	ctx: &AppContext,
	identity: Option<Uuid>,
	task_id: i64,
	input: CreateSubtask,
) -> Result<i64> {
	ctx.policy
		.authorize(identity, Action::Create, Resource::Task(task_id))
		.await?
		.require()?;

	let result = sqlx::query(
		"INSERT INTO subtasks (task_id, title, content, date_creation, status_id) \
		 VALUES (?, ?, ?, ?, ?)",
	)
	.bind(task_id)
	.bind(&input.title)
	.bind(&input.content)
	.bind(Utc::now())
	.bind(input.status_id)
	.execute(ctx.db.pool())
	.await?;

	let subtask_id = result.last_insert_rowid();
	info!(subtask_id, task_id, "subtask created");
	Ok(subtask_id)
}

/// Updates a subtask from the provided fields.
pub async fn update_subtask(
	ctx: &AppContext,
	identity: Option<Uuid>,
	subtask_id: i64,
	input: UpdateSubtask,
) -> Result<()> {
	ctx.policy
		.authorize(identity, Action::Update, Resource::Subtask(subtask_id))
		.await?
		.require()?;

	let provided = [
		input.title.is_some(),
		input.content.is_some(),
		input.status_id.is_some(),
	];
	if !provided.contains(&true) {
		return Err(Error::InvalidArgument("no fields to update".to_string()));
	}

	let mut qb = sqlx::QueryBuilder::<sqlx::Sqlite>::new("UPDATE subtasks SET ");
	let mut fields = qb.separated(", ");
	if let Some(title) = &input.title {
		fields.push("title = ");
		fields.push_bind_unseparated(title);
	}
	if let Some(content) = &input.content {
		fields.push("content = ");
		fields.push_bind_unseparated(content);
	}
	if let Some(status_id) = input.status_id {
		fields.push("status_id = ");
		fields.push_bind_unseparated(status_id);
	}
	qb.push(" WHERE id = ");
	qb.push_bind(subtask_id);

	let result = qb.build().execute(ctx.db.pool()).await?;
	if result.rows_affected() == 0 {
		return Err(Error::NotFound("subtask not found".to_string()));
	}
	Ok(())
}

/// Deletes a subtask.
pub async fn delete_subtask(
	ctx: &AppContext,
	identity: Option<Uuid>,
	subtask_id: i64,
) -> Result<()> {
	ctx.policy
		.authorize(identity, Action::Delete, Resource::Subtask(subtask_id))
		.await?
		.require()?;

	let result = sqlx::query("DELETE FROM subtasks WHERE id = ?")
		.bind(subtask_id)
		.execute(ctx.db.pool())
		.await?;
	if result.rows_affected() == 0 {
		return Err(Error::NotFound("subtask not found".to_string()));
	}
	info!(subtask_id, "subtask deleted");
	Ok(())
}
