use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use super::models::{CreateTask, UpdateTask};
use crate::apps::filters::parse_date;
use crate::context::AppContext;
use crate::error::{Error, Result};
use crate::policy::{Action, Resource, require_identity};

/// Creates a task and assigns it to its creator within the target
/// project, both inside one transaction.
///
/// The creator must be chief or collaborator on the project; a plain
/// `user` member receives tasks through assignment rather than creating
/// them.
pub async fn create_task(
	ctx: &AppContext,
	identity: Option<Uuid>,
	input: CreateTask,
) -> Result<i64> {
	let user = require_identity(identity)?;
	ctx.policy
		.authorize(Some(user), Action::Create, Resource::Project(input.project_id))
		.await?
		.require()?;

	let deadline = input.deadline.as_deref().map(parse_date).transpose()?;

	let mut tx = ctx.db.begin().await?;
	let result = sqlx::query(
		"INSERT INTO tasks (title, content, date_creation, priority_id, deadline, status_id) \
		 VALUES (?, ?, ?, ?, ?, ?)",
	)
	.bind(&input.title)
	.bind(&input.content)
	.bind(Utc::now())
	.bind(input.priority_id)
	.bind(deadline)
	.bind(input.status_id)
	.execute(&mut *tx)
	.await?;
	let task_id = result.last_insert_rowid();

	sqlx::query("INSERT INTO task_user_rel (task_id, project_id, user_id) VALUES (?, ?, ?)")
		.bind(task_id)
		.bind(input.project_id)
		.bind(user.to_string())
		.execute(&mut *tx)
		.await?;
	tx.commit().await?;

	info!(task_id, project_id = input.project_id, user_id = %user, "task created");
	Ok(task_id)
}

/// Updates a task from the provided fields.
pub async fn update_task(
	ctx: &AppContext,
	identity: Option<Uuid>,
	task_id: i64,
	input: UpdateTask,
) -> Result<()> {
	ctx.policy
		.authorize(identity, Action::Update, Resource::Task(task_id))
		.await?
		.require()?;

	let deadline = input.deadline.as_deref().map(parse_date).transpose()?;

	let provided = [
		input.title.is_some(),
		input.content.is_some(),
		input.priority_id.is_some(),
		deadline.is_some(),
		input.status_id.is_some(),
	];
	if !provided.contains(&true) {
		return Err(Error::InvalidArgument("no fields to update".to_string()));
	}

	let mut qb = sqlx::QueryBuilder::<sqlx::Sqlite>::new("UPDATE tasks SET ");
	let mut fields = qb.separated(", ");
	if let Some(title) = &input.title {
		fields.push("title = ");
		fields.push_bind_unseparated(title);
	}
	if let Some(content) = &input.content {
		fields.push("content = ");
		fields.push_bind_unseparated(content);
	}
	if let Some(priority_id) = input.priority_id {
		fields.push("priority_id = ");
		fields.push_bind_unseparated(priority_id);
	}
	if let Some(deadline) = deadline {
		fields.push("deadline = ");
		fields.push_bind_unseparated(deadline);
	}
	if let Some(status_id) = input.status_id {
		fields.push("status_id = ");
		fields.push_bind_unseparated(status_id);
	}
	qb.push(" WHERE id = ");
	qb.push_bind(task_id);

	let result = qb.build().execute(ctx.db.pool()).await?;
	if result.rows_affected() == 0 {
		return Err(Error::NotFound("task not found".to_string()));
	}
	Ok(())
}

/// Deletes a task; subtasks and assignments cascade.
pub async fn delete_task(ctx: &AppContext, identity: Option<Uuid>, task_id: i64) -> Result<()> {
	ctx.policy
		.authorize(identity, Action::Delete, Resource::Task(task_id))
		.await?
		.require()?;

	let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
		.bind(task_id)
		.execute(ctx.db.pool())
		.await?;
	if result.rows_affected() == 0 {
		return Err(Error::NotFound("task not found".to_string()));
	}
	info!(task_id, "task deleted");
	Ok(())
}

/// Records a task assignment inside a project.
///
/// The assigning identity must be chief or collaborator on the target
/// project; the assignee (defaulting to the assigner) must already be a
/// member. A duplicate assignment surfaces as `Conflict`.
pub async fn assign_task_to_project(
	ctx: &AppContext,
	identity: Option<Uuid>,
	task_id: i64,
	project_id: i64,
	assignee: Option<&str>,
) -> Result<()> {
	let user = require_identity(identity)?;
	ctx.policy
		.authorize(Some(user), Action::Create, Resource::Project(project_id))
		.await?
		.require()?;

	let assignee = match assignee {
		Some(raw) => Uuid::parse_str(raw)
			.map_err(|_| Error::InvalidArgument("user_id must be a uuid".to_string()))?,
		None => user,
	};
	if assignee != user
		&& ctx.policy.project_role(assignee, project_id).await?.is_none()
	{
		return Err(Error::InvalidArgument(
			"user is not a member of the project".to_string(),
		));
	}

	sqlx::query("INSERT INTO task_user_rel (task_id, project_id, user_id) VALUES (?, ?, ?)")
		.bind(task_id)
		.bind(project_id)
		.bind(assignee.to_string())
		.execute(ctx.db.pool())
		.await
		.map_err(|err| match Error::from(err) {
			Error::Conflict(_) => Error::Conflict("task is already assigned".to_string()),
			other => other,
		})?;

	info!(task_id, project_id, assignee = %assignee, "task assigned");
	Ok(())
}
