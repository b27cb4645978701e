use uuid::Uuid;

use super::models::User;
use crate::context::AppContext;
use crate::error::{Error, Result};
use crate::policy::{Role, require_identity};

/// Login lookup: id and password hash for a username.
pub async fn credentials_by_username(
	ctx: &AppContext,
	username: &str,
) -> Result<Option<(String, String)>> {
	let row: Option<(String, String)> =
		sqlx::query_as("SELECT id, password FROM users WHERE username = ?")
			.bind(username)
			.fetch_optional(ctx.db.pool())
			.await?;
	Ok(row)
}

/// All other users; feeds the membership picker.
pub async fn list_users(ctx: &AppContext, identity: Option<Uuid>) -> Result<Vec<User>> {
	let user = require_identity(identity)?;
	let users = sqlx::query_as::<_, User>(
		"SELECT id, username, name, aftername FROM users WHERE id != ? ORDER BY username",
	)
	.bind(user.to_string())
	.fetch_all(ctx.db.pool())
	.await?;
	Ok(users)
}

/// Other members of a project, visible only when the requester holds one
/// of the `role_filter` roles on it.
pub async fn list_users_by_project(
	ctx: &AppContext,
	identity: Option<Uuid>,
	project_id: i64,
	role_filter: &[Role],
) -> Result<Vec<User>> {
	let user = require_identity(identity)?;
	match ctx.policy.project_role(user, project_id).await? {
		Some(role) if role_filter.contains(&role) => {}
		_ => return Err(Error::Forbidden("insufficient role".to_string())),
	}

	let users = sqlx::query_as::<_, User>(
		"SELECT u.id, u.username, u.name, u.aftername \
		 FROM users u \
		 JOIN project_user_rel pur ON u.id = pur.user_id \
		 WHERE pur.project_id = ? AND u.id != ? \
		 ORDER BY u.username",
	)
	.bind(project_id)
	.bind(user.to_string())
	.fetch_all(ctx.db.pool())
	.await?;
	Ok(users)
}
