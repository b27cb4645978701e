use uuid::Uuid;

use super::models::Project;
use crate::context::AppContext;
use crate::error::{Error, Result};
use crate::policy::{Role, require_identity};

/// Projects visible to the user through a membership whose role is in
/// `role_filter`.
pub async fn list_projects(
	ctx: &AppContext,
	identity: Option<Uuid>,
	role_filter: &[Role],
) -> Result<Vec<Project>> {
	let user = require_identity(identity)?;

	let mut qb = sqlx::QueryBuilder::<sqlx::Sqlite>::new(
		"SELECT p.id, p.name, p.description \
		 FROM projects p \
		 JOIN project_user_rel pur ON p.id = pur.project_id \
		 WHERE pur.user_id = ",
	);
	qb.push_bind(user.to_string());
	qb.push(" AND pur.role IN (");
	let mut roles = qb.separated(", ");
	for role in role_filter {
		roles.push_bind(role.as_str());
	}
	qb.push(") ORDER BY p.id");

	let projects = qb
		.build_query_as::<Project>()
		.fetch_all(ctx.db.pool())
		.await?;
	Ok(projects)
}

/// Single project, membership-scoped.
pub async fn get_project_by_id(
	ctx: &AppContext,
	identity: Option<Uuid>,
	project_id: i64,
) -> Result<Project> {
	let user = require_identity(identity)?;
	let project: Option<Project> = sqlx::query_as(
		"SELECT p.id, p.name, p.description \
		 FROM projects p \
		 JOIN project_user_rel pur ON p.id = pur.project_id \
		 WHERE pur.user_id = ? AND p.id = ?",
	)
	.bind(user.to_string())
	.bind(project_id)
	.fetch_optional(ctx.db.pool())
	.await?;
	project.ok_or_else(|| Error::NotFound("project not found".to_string()))
}
