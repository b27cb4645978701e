use tracing::info;
use uuid::Uuid;

use super::models::{CreatePriority, UpdatePriority};
use crate::context::AppContext;
use crate::error::{Error, Result};
use crate::policy::{Action, Resource};

/// Creates a priority; priorities are global, any authenticated user
/// may manage them.
pub async fn create_priority(
	ctx: &AppContext,
	identity: Option<Uuid>,
	input: CreatePriority,
) -> Result<i64> {
	ctx.policy
		.authorize(identity, Action::Create, Resource::Priority)
		.await?
		.require()?;

	let result = sqlx::query("INSERT INTO priority (title, rank, description) VALUES (?, ?, ?)")
		.bind(&input.title)
		.bind(input.rank)
		.bind(&input.description)
		.execute(ctx.db.pool())
		.await?;

	let priority_id = result.last_insert_rowid();
	info!(priority_id, "priority created");
	Ok(priority_id)
}

/// Updates a priority from the provided fields.
pub async fn update_priority(
	ctx: &AppContext,
	identity: Option<Uuid>,
	priority_id: i64,
	input: UpdatePriority,
) -> Result<()> {
	ctx.policy
		.authorize(identity, Action::Update, Resource::Priority)
		.await?
		.require()?;

	let provided = [
		input.title.is_some(),
		input.rank.is_some(),
		input.description.is_some(),
	];
	if !provided.contains(&true) {
		return Err(Error::InvalidArgument("no fields to update".to_string()));
	}

	let mut qb = sqlx::QueryBuilder::<sqlx::Sqlite>::new("UPDATE priority SET ");
	let mut fields = qb.separated(", ");
	if let Some(title) = &input.title {
		fields.push("title = ");
		fields.push_bind_unseparated(title);
	}
	if let Some(rank) = input.rank {
		fields.push("rank = ");
		fields.push_bind_unseparated(rank);
	}
	if let Some(description) = &input.description {
		fields.push("description = ");
		fields.push_bind_unseparated(description);
	}
	qb.push(" WHERE id = ");
	qb.push_bind(priority_id);

	let result = qb.build().execute(ctx.db.pool()).await?;
	if result.rows_affected() == 0 {
		return Err(Error::NotFound("priority not found".to_string()));
	}
	Ok(())
}

/// Deletes a priority that no task references.
pub async fn delete_priority(
	ctx: &AppContext,
	identity: Option<Uuid>,
	priority_id: i64,
) -> Result<()> {
	ctx.policy
		.authorize(identity, Action::Delete, Resource::Priority)
		.await?
		.require()?;

	let mut tx = ctx.db.begin().await?;
	let referenced: Option<(i64,)> =
		sqlx::query_as("SELECT 1 FROM tasks WHERE priority_id = ? LIMIT 1")
			.bind(priority_id)
			.fetch_optional(&mut *tx)
			.await?;
	if referenced.is_some() {
		return Err(Error::Conflict(
			"priority is referenced by tasks".to_string(),
		));
	}

	let result = sqlx::query("DELETE FROM priority WHERE id = ?")
		.bind(priority_id)
		.execute(&mut *tx)
		.await?;
	if result.rows_affected() == 0 {
		return Err(Error::NotFound("priority not found".to_string()));
	}
	tx.commit().await?;

	info!(priority_id, "priority deleted");
	Ok(())
}
