use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

use super::models::{ProjectTasks, Task, TaskFilters, TaskOut};
use crate::apps::projects::models::Project;
use crate::context::AppContext;
use crate::error::{Error, Result};
use crate::policy::{Action, Resource, require_identity};

/// Single task, assignment-scoped.
pub async fn get_task_by_id(
	ctx: &AppContext,
	identity: Option<Uuid>,
	task_id: i64,
) -> Result<TaskOut> {
	ctx.policy
		.authorize(identity, Action::Read, Resource::Task(task_id))
		.await?
		.require()?;

	let task: Option<Task> = sqlx::query_as(
		"SELECT id, title, content, date_creation, priority_id, deadline, status_id \
		 FROM tasks WHERE id = ?",
	)
	.bind(task_id)
	.fetch_optional(ctx.db.pool())
	.await?;
	task.map(TaskOut::from)
		.ok_or_else(|| Error::NotFound("task not found".to_string()))
}

/// Tasks assigned to the user, narrowed by any supplied filter.
///
/// Unsupplied filters are no-ops: absence means "no constraint", never
/// "match null".
pub async fn list_tasks(
	ctx: &AppContext,
	identity: Option<Uuid>,
	filters: &TaskFilters,
) -> Result<Vec<TaskOut>> {
	let user = require_identity(identity)?;

	let mut qb = sqlx::QueryBuilder::<sqlx::Sqlite>::new(
		"SELECT DISTINCT t.id, t.title, t.content, t.date_creation, t.priority_id, \
		        t.deadline, t.status_id \
		 FROM tasks t \
		 JOIN task_user_rel tur ON t.id = tur.task_id \
		 WHERE tur.user_id = ",
	);
	qb.push_bind(user.to_string());
	if let Some(project_id) = filters.project_id {
		qb.push(" AND tur.project_id = ");
		qb.push_bind(project_id);
	}
	if let Some(priority_id) = filters.priority_id {
		qb.push(" AND t.priority_id = ");
		qb.push_bind(priority_id);
	}
	if let Some(status_id) = filters.status_id {
		qb.push(" AND t.status_id = ");
		qb.push_bind(status_id);
	}
	if let Some(deadline_before) = filters.deadline_before {
		qb.push(" AND t.deadline <= ");
		qb.push_bind(deadline_before);
	}
	qb.push(" ORDER BY t.id");

	let tasks = qb.build_query_as::<Task>().fetch_all(ctx.db.pool()).await?;
	Ok(tasks.into_iter().map(TaskOut::from).collect())
}

#[derive(FromRow)]
struct GroupedRow {
	project_id: i64,
	name: String,
	description: Option<String>,
	task_id: Option<i64>,
	title: Option<String>,
	content: Option<String>,
	date_creation: Option<DateTime<Utc>>,
	priority_id: Option<i64>,
	deadline: Option<DateTime<Utc>>,
	status_id: Option<i64>,
}

/// Every visible project with its visible tasks, as one joined query.
///
/// Chiefs see all tasks of their projects; collaborators and plain
/// members see the tasks assigned to them. Projects without visible
/// tasks still appear, with an empty list.
pub async fn list_tasks_grouped_by_project(
	ctx: &AppContext,
	identity: Option<Uuid>,
) -> Result<Vec<ProjectTasks>> {
	let user = require_identity(identity)?;

	let rows: Vec<GroupedRow> = sqlx::query_as(
		"SELECT DISTINCT p.id AS project_id, p.name AS name, p.description AS description, \
		        t.id AS task_id, t.title AS title, t.content AS content, \
		        t.date_creation AS date_creation, t.priority_id AS priority_id, \
		        t.deadline AS deadline, t.status_id AS status_id \
		 FROM projects p \
		 JOIN project_user_rel pur ON pur.project_id = p.id AND pur.user_id = ? \
		 LEFT JOIN task_user_rel tur ON tur.project_id = p.id \
		      AND (tur.user_id = ? OR pur.role = 'chief') \
		 LEFT JOIN tasks t ON t.id = tur.task_id \
		 ORDER BY p.id, t.id",
	)
	.bind(user.to_string())
	.bind(user.to_string())
	.fetch_all(ctx.db.pool())
	.await?;

	let mut grouped: Vec<ProjectTasks> = Vec::new();
	for row in rows {
		if grouped
			.last()
			.map(|g| g.project.id != row.project_id)
			.unwrap_or(true)
		{
			grouped.push(ProjectTasks {
				project: Project {
					id: row.project_id,
					name: row.name.clone(),
					description: row.description.clone(),
				},
				tasks: Vec::new(),
			});
		}
		if let (Some(id), Some(title), Some(content), Some(date_creation), Some(priority_id)) = (
			row.task_id,
			row.title,
			row.content,
			row.date_creation,
			row.priority_id,
		) {
			if let Some(group) = grouped.last_mut() {
				group.tasks.push(TaskOut::from(Task {
					id,
					title,
					content,
					date_creation,
					priority_id,
					deadline: row.deadline,
					status_id: row.status_id,
				}));
			}
		}
	}
	Ok(grouped)
}
