//! JSON handlers for tasks, assignments and subtasks.

use hyper::Method;
use serde_json::json;

use super::models::{AssignTask, CreateTask, TaskFilters, UpdateTask};
use super::subtasks::models::{CreateSubtask, UpdateSubtask};
use super::{commands, queries, subtasks};
use crate::apps::filters::parse_date;
use crate::context::AppContext;
use crate::error::Result;
use crate::http::{Request, Response, Router};

pub fn register(router: &mut Router, ctx: &AppContext) {
	let c = ctx.clone();
	router.route(Method::GET, "/tasks", move |req| {
		let ctx = c.clone();
		async move { list(ctx, req).await }
	});

	let c = ctx.clone();
	router.route(Method::POST, "/tasks", move |req| {
		let ctx = c.clone();
		async move { create(ctx, req).await }
	});

	// registered before /tasks/{id} so the literal segment wins
	let c = ctx.clone();
	router.route(Method::GET, "/tasks/grouped", move |req| {
		let ctx = c.clone();
		async move { grouped(ctx, req).await }
	});

	let c = ctx.clone();
	router.route(Method::GET, "/tasks/{id}", move |req| {
		let ctx = c.clone();
		async move { get_by_id(ctx, req).await }
	});

	let c = ctx.clone();
	router.route(Method::PATCH, "/tasks/{id}", move |req| {
		let ctx = c.clone();
		async move { update(ctx, req).await }
	});

	let c = ctx.clone();
	router.route(Method::DELETE, "/tasks/{id}", move |req| {
		let ctx = c.clone();
		async move { delete(ctx, req).await }
	});

	let c = ctx.clone();
	router.route(Method::POST, "/tasks/{id}/assign", move |req| {
		let ctx = c.clone();
		async move { assign(ctx, req).await }
	});

	let c = ctx.clone();
	router.route(Method::GET, "/tasks/{id}/subtasks", move |req| {
		let ctx = c.clone();
		async move { list_subtasks(ctx, req).await }
	});

	let c = ctx.clone();
	router.route(Method::POST, "/tasks/{id}/subtasks", move |req| {
		let ctx = c.clone();
		async move { create_subtask(ctx, req).await }
	});

	let c = ctx.clone();
	router.route(Method::GET, "/subtasks/{id}", move |req| {
		let ctx = c.clone();
		async move { get_subtask(ctx, req).await }
	});

	let c = ctx.clone();
	router.route(Method::PATCH, "/subtasks/{id}", move |req| {
		let ctx = c.clone();
		async move { update_subtask(ctx, req).await }
	});

	let c = ctx.clone();
	router.route(Method::DELETE, "/subtasks/{id}", move |req| {
		let ctx = c.clone();
		async move { delete_subtask(ctx, req).await }
	});
}

fn filters_from_query(req: &Request) -> Result<TaskFilters> {
	let deadline_before = match req.query_param("deadline_before") {
		Some(raw) => Some(parse_date(&raw)?),
		None => None,
	};
	Ok(TaskFilters {
		project_id: req.query_param_i64("project_id")?,
		priority_id: req.query_param_i64("priority_id")?,
		status_id: req.query_param_i64("status_id")?,
		deadline_before,
	})
}

async fn list(ctx: AppContext, req: Request) -> Result<Response> {
	let identity = ctx.identity(&req)?;
	let filters = filters_from_query(&req)?;
	let tasks = queries::list_tasks(&ctx, identity, &filters).await?;
	Response::ok().json(&tasks)
}

async fn grouped(ctx: AppContext, req: Request) -> Result<Response> {
	let identity = ctx.identity(&req)?;
	let grouped = queries::list_tasks_grouped_by_project(&ctx, identity).await?;
	Response::ok().json(&grouped)
}

async fn get_by_id(ctx: AppContext, req: Request) -> Result<Response> {
	let identity = ctx.identity(&req)?;
	let task_id = req.param_i64("id")?;
	let task = queries::get_task_by_id(&ctx, identity, task_id).await?;
	Response::ok().json(&task)
}

async fn create(ctx: AppContext, req: Request) -> Result<Response> {
	let identity = ctx.identity(&req)?;
	let input: CreateTask = req.json()?;
	let id = commands::create_task(&ctx, identity, input).await?;
	Response::created().json(&json!({ "id": id }))
}

async fn update(ctx: AppContext, req: Request) -> Result<Response> {
	let identity = ctx.identity(&req)?;
	let task_id = req.param_i64("id")?;
	let input: UpdateTask = req.json()?;
	commands::update_task(&ctx, identity, task_id, input).await?;
	Ok(Response::no_content())
}

async fn delete(ctx: AppContext, req: Request) -> Result<Response> {
	let identity = ctx.identity(&req)?;
	let task_id = req.param_i64("id")?;
	commands::delete_task(&ctx, identity, task_id).await?;
	Ok(Response::no_content())
}

async fn assign(ctx: AppContext, req: Request) -> Result<Response> {
	let identity = ctx.identity(&req)?;
	let task_id = req.param_i64("id")?;
	let input: AssignTask = req.json()?;
	commands::assign_task_to_project(
		&ctx,
		identity,
		task_id,
		input.project_id,
		input.user_id.as_deref(),
	)
	.await?;
	Ok(Response::created())
}

async fn list_subtasks(ctx: AppContext, req: Request) -> Result<Response> {
	let identity = ctx.identity(&req)?;
	let task_id = req.param_i64("id")?;
	let status_filter = req.query_param_i64("status_id")?;
	let subtasks =
		subtasks::queries::list_subtasks_by_task(&ctx, identity, task_id, status_filter).await?;
	Response::ok().json(&subtasks)
}

async fn create_subtask(ctx: AppContext, req: Request) -> Result<Response> {
	let identity = ctx.identity(&req)?;
	let task_id = req.param_i64("id")?;
	let input: CreateSubtask = req.json()?;
	let id = subtasks::commands::create_subtask(&ctx, identity, task_id, input).await?;
	Response::created().json(&json!({ "id": id }))
}

async fn get_subtask(ctx: AppContext, req: Request) -> Result<Response> {
	let identity = ctx.identity(&req)?;
	let subtask_id = req.param_i64("id")?;
	let subtask = subtasks::queries::get_subtask_by_id(&ctx, identity, subtask_id).await?;
	Response::ok().json(&subtask)
}

async fn update_subtask(ctx: AppContext, req: Request) -> Result<Response> {
	let identity = ctx.identity(&req)?;
	let subtask_id = req.param_i64("id")?;
	let input: UpdateSubtask = req.json()?;
	subtasks::commands::update_subtask(&ctx, identity, subtask_id, input).await?;
	Ok(Response::no_content())
}

async fn delete_subtask(ctx: AppContext, req: Request) -> Result<Response> {
	let identity = ctx.identity(&req)?;
	let subtask_id = req.param_i64("id")?;
	subtasks::commands::delete_subtask(&ctx, identity, subtask_id).await?;
	Ok(Response::no_content())
}
