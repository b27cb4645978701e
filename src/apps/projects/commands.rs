use tracing::info;
use uuid::Uuid;

use super::models::{CreateProject, UpdateProject};
use crate::context::AppContext;
use crate::error::{Error, Result};
use crate::policy::{Action, Resource, Role, require_identity};

/// Creates a project and its chief membership as one unit.
///
/// The membership insert rides the same transaction as the project row;
/// a failure of either leaves nothing behind.
pub async fn create_project(
	ctx: &AppContext,
	identity: Option<Uuid>,
	input: CreateProject,
) -> Result<i64> {
	let user = require_identity(identity)?;

	let mut tx = ctx.db.begin().await?;
	let result = sqlx::query("INSERT INTO projects (name, description) VALUES (?, ?)")
		.bind(&input.name)
		.bind(&input.description)
		.execute(&mut *tx)
		.await?;
	let project_id = result.last_insert_rowid();

	sqlx::query("INSERT INTO project_user_rel (project_id, user_id, role) VALUES (?, ?, 'chief')")
		.bind(project_id)
		.bind(user.to_string())
		.execute(&mut *tx)
		.await?;
	tx.commit().await?;

	info!(project_id, user_id = %user, "project created");
	Ok(project_id)
}

/// Updates name/description from the provided fields; chief only.
pub async fn update_project(
	ctx: &AppContext,
	identity: Option<Uuid>,
	project_id: i64,
	input: UpdateProject,
) -> Result<()> {
	ctx.policy
		.authorize(identity, Action::Update, Resource::Project(project_id))
		.await?
		.require()?;

	if input.name.is_none() && input.description.is_none() {
		return Err(Error::InvalidArgument("no fields to update".to_string()));
	}

	let mut qb = sqlx::QueryBuilder::<sqlx::Sqlite>::new("UPDATE projects SET ");
	let mut fields = qb.separated(", ");
	if let Some(name) = &input.name {
		fields.push("name = ");
		fields.push_bind_unseparated(name);
	}
	if let Some(description) = &input.description {
		fields.push("description = ");
		fields.push_bind_unseparated(description);
	}
	qb.push(" WHERE id = ");
	qb.push_bind(project_id);

	let result = qb.build().execute(ctx.db.pool()).await?;
	if result.rows_affected() == 0 {
		return Err(Error::NotFound("project not found".to_string()));
	}
	Ok(())
}

/// Deletes a project with its tasks, memberships and assignments; chief
/// only.
pub async fn delete_project(
	ctx: &AppContext,
	identity: Option<Uuid>,
	project_id: i64,
) -> Result<()> {
	ctx.policy
		.authorize(identity, Action::Delete, Resource::Project(project_id))
		.await?
		.require()?;

	let mut tx = ctx.db.begin().await?;
	sqlx::query(
		"DELETE FROM tasks WHERE id IN \
		 (SELECT task_id FROM task_user_rel WHERE project_id = ?)",
	)
	.bind(project_id)
	.execute(&mut *tx)
	.await?;
	let result = sqlx::query("DELETE FROM projects WHERE id = ?")
		.bind(project_id)
		.execute(&mut *tx)
		.await?;
	if result.rows_affected() == 0 {
		return Err(Error::NotFound("project not found".to_string()));
	}
	tx.commit().await?;

	info!(project_id, "project deleted");
	Ok(())
}

/// Adds a membership row; chiefs and collaborators may grant
/// `collaborator` or `user`. The chief role moves only via
/// [`set_user_role`].
pub async fn add_user_to_project(
	ctx: &AppContext,
	identity: Option<Uuid>,
	project_id: i64,
	target_user: &str,
	role: Option<&str>,
) -> Result<()> {
	ctx.policy
		.authorize(identity, Action::Create, Resource::Project(project_id))
		.await?
		.require()?;

	let role = match role {
		Some(raw) => Role::parse(raw)?,
		None => Role::User,
	};
	if role == Role::Chief {
		return Err(Error::InvalidArgument(
			"chief is granted by role transfer, not by assignment".to_string(),
		));
	}
	let target = Uuid::parse_str(target_user)
		.map_err(|_| Error::InvalidArgument("user_id must be a uuid".to_string()))?;

	sqlx::query("INSERT INTO project_user_rel (project_id, user_id, role) VALUES (?, ?, ?)")
		.bind(project_id)
		.bind(target.to_string())
		.bind(role.as_str())
		.execute(ctx.db.pool())
		.await
		.map_err(|err| match Error::from(err) {
			Error::Conflict(_) => {
				Error::Conflict("user is already a member of the project".to_string())
			}
			other => other,
		})?;

	info!(project_id, target_user = %target, %role, "membership added");
	Ok(())
}

/// Changes a member's role, keeping exactly one chief per project.
///
/// Promoting a member to chief demotes the current chief to collaborator
/// in the same transaction; demoting the sole chief directly is refused.
pub async fn set_user_role(
	ctx: &AppContext,
	identity: Option<Uuid>,
	project_id: i64,
	target_user: &str,
	role: &str,
) -> Result<()> {
	ctx.policy
		.authorize(identity, Action::Create, Resource::Project(project_id))
		.await?
		.require()?;

	let role = Role::parse(role)?;
	let target = Uuid::parse_str(target_user)
		.map_err(|_| Error::InvalidArgument("user_id must be a uuid".to_string()))?;

	let mut tx = ctx.db.begin().await?;
	let current: Option<(String,)> = sqlx::query_as(
		"SELECT role FROM project_user_rel WHERE project_id = ? AND user_id = ?",
	)
	.bind(project_id)
	.bind(target.to_string())
	.fetch_optional(&mut *tx)
	.await?;
	let Some((current_role,)) = current else {
		return Err(Error::NotFound(
			"user is not a member of the project".to_string(),
		));
	};
	let current_role = Role::parse(&current_role)?;

	match role {
		Role::Chief if current_role == Role::Chief => {}
		Role::Chief => {
			sqlx::query(
				"UPDATE project_user_rel SET role = 'collaborator' \
				 WHERE project_id = ? AND role = 'chief'",
			)
			.bind(project_id)
			.execute(&mut *tx)
			.await?;
			sqlx::query(
				"UPDATE project_user_rel SET role = 'chief' \
				 WHERE project_id = ? AND user_id = ?",
			)
			.bind(project_id)
			.bind(target.to_string())
			.execute(&mut *tx)
			.await?;
		}
		_ if current_role == Role::Chief => {
			return Err(Error::Conflict(
				"a project keeps exactly one chief; promote another member first".to_string(),
			));
		}
		_ => {
			sqlx::query(
				"UPDATE project_user_rel SET role = ? WHERE project_id = ? AND user_id = ?",
			)
			.bind(role.as_str())
			.bind(project_id)
			.bind(target.to_string())
			.execute(&mut *tx)
			.await?;
		}
	}
	tx.commit().await?;

	info!(project_id, target_user = %target, %role, "role changed");
	Ok(())
}
