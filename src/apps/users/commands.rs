use std::sync::LazyLock;

use regex::Regex;
use tracing::info;
use uuid::Uuid;

use super::models::{CreateUser, UpdateUser};
use crate::context::AppContext;
use crate::error::{Error, Result};
use crate::policy::require_identity;

static MAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,7}$").expect("mail pattern")
});

fn check_mail(mail: &str) -> Result<()> {
	if MAIL_RE.is_match(mail) {
		Ok(())
	} else {
		Err(Error::InvalidArgument("mail is not valid".to_string()))
	}
}

/// Self-registration; open to unauthenticated callers.
pub async fn create_user(ctx: &AppContext, input: CreateUser) -> Result<String> {
	check_mail(&input.mail)?;

	let id = Uuid::new_v4();
	let hash = ctx.hasher.hash(&input.password)?;
	sqlx::query(
		"INSERT INTO users (id, username, name, aftername, mail, password) \
		 VALUES (?, ?, ?, ?, ?, ?)",
	)
	.bind(id.to_string())
	.bind(&input.username)
	.bind(&input.name)
	.bind(&input.aftername)
	.bind(&input.mail)
	.bind(&hash)
	.execute(ctx.db.pool())
	.await
	.map_err(|err| match Error::from(err) {
		Error::Conflict(_) => Error::Conflict("username is already taken".to_string()),
		other => other,
	})?;

	info!(user_id = %id, "user registered");
	Ok(id.to_string())
}

/// Updates the acting user's own profile from the provided fields.
pub async fn update_user(
	ctx: &AppContext,
	identity: Option<Uuid>,
	input: UpdateUser,
) -> Result<()> {
	let user = require_identity(identity)?;
	if let Some(mail) = &input.mail {
		check_mail(mail)?;
	}

	let provided = [
		input.username.is_some(),
		input.name.is_some(),
		input.aftername.is_some(),
		input.mail.is_some(),
	];
	if !provided.contains(&true) {
		return Err(Error::InvalidArgument("no fields to update".to_string()));
	}

	let mut qb = sqlx::QueryBuilder::<sqlx::Sqlite>::new("UPDATE users SET ");
	let mut fields = qb.separated(", ");
	if let Some(username) = &input.username {
		fields.push("username = ");
		fields.push_bind_unseparated(username);
	}
	if let Some(name) = &input.name {
		fields.push("name = ");
		fields.push_bind_unseparated(name);
	}
	if let Some(aftername) = &input.aftername {
		fields.push("aftername = ");
		fields.push_bind_unseparated(aftername);
	}
	if let Some(mail) = &input.mail {
		fields.push("mail = ");
		fields.push_bind_unseparated(mail);
	}
	qb.push(" WHERE id = ");
	qb.push_bind(user.to_string());

	let result = qb.build().execute(ctx.db.pool()).await.map_err(|err| {
		match Error::from(err) {
			Error::Conflict(_) => Error::Conflict("username is already taken".to_string()),
			other => other,
		}
	})?;
	if result.rows_affected() == 0 {
		return Err(Error::NotFound("user not found".to_string()));
	}
	Ok(())
}

/// Deletes the acting user's account after password re-verification.
///
/// Memberships and assignments cascade. A sole chief cannot abandon a
/// project that still has other members; projects where the chief is the
/// only member disappear with the account, tasks included.
pub async fn delete_user(ctx: &AppContext, identity: Option<Uuid>, password: &str) -> Result<()> {
	let user = require_identity(identity)?;
	let mut tx = ctx.db.begin().await?;

	let stored: Option<(String,)> = sqlx::query_as("SELECT password FROM users WHERE id = ?")
		.bind(user.to_string())
		.fetch_optional(&mut *tx)
		.await?;
	let Some((hash,)) = stored else {
		return Err(Error::NotFound("user not found".to_string()));
	};
	if !ctx.hasher.verify(password, &hash)? {
		return Err(Error::Forbidden("wrong password".to_string()));
	}

	let chief_projects: Vec<(i64, i64)> = sqlx::query_as(
		"SELECT pur.project_id, \
		        (SELECT COUNT(*) FROM project_user_rel other \
		         WHERE other.project_id = pur.project_id AND other.user_id != pur.user_id) \
		 FROM project_user_rel pur \
		 WHERE pur.user_id = ? AND pur.role = 'chief'",
	)
	.bind(user.to_string())
	.fetch_all(&mut *tx)
	.await?;

	for (project_id, member_count) in &chief_projects {
		if *member_count > 0 {
			return Err(Error::Conflict(format!(
				"transfer leadership of project {project_id} before deleting the account"
			)));
		}
	}

	for (project_id, _) in &chief_projects {
		sqlx::query(
			"DELETE FROM tasks WHERE id IN \
			 (SELECT task_id FROM task_user_rel WHERE project_id = ?)",
		)
		.bind(project_id)
		.execute(&mut *tx)
		.await?;
		sqlx::query("DELETE FROM projects WHERE id = ?")
			.bind(project_id)
			.execute(&mut *tx)
			.await?;
	}

	sqlx::query("DELETE FROM users WHERE id = ?")
		.bind(user.to_string())
		.execute(&mut *tx)
		.await?;

	tx.commit().await?;
	info!(user_id = %user, "user deleted");
	Ok(())
}
