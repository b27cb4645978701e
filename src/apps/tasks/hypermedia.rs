//! Fragment handlers for tasks.

use hyper::Method;

use super::models::CreateTask;
use super::{commands, queries};
use crate::apps::filters::parse_date;
use crate::apps::fragments;
use crate::context::AppContext;
use crate::error::Result;
use crate::http::{Request, Response, Router};

pub fn register(router: &mut Router, ctx: &AppContext) {
	let c = ctx.clone();
	router.route(Method::GET, "/fragments/tasks", move |req| {
		let ctx = c.clone();
		async move { fragments::catch(&ctx, list(&ctx, req).await).await }
	});

	let c = ctx.clone();
	router.route(Method::POST, "/fragments/tasks", move |req| {
		let ctx = c.clone();
		async move { fragments::catch(&ctx, create(&ctx, req).await).await }
	});
}

async fn list(ctx: &AppContext, req: Request) -> Result<Response> {
	let identity = ctx.identity(&req)?;
	let deadline_before = match req.query_param("deadline_before") {
		Some(raw) => Some(parse_date(&raw)?),
		None => None,
	};
	let filters = super::models::TaskFilters {
		project_id: req.query_param_i64("project_id")?,
		priority_id: req.query_param_i64("priority_id")?,
		status_id: req.query_param_i64("status_id")?,
		deadline_before,
	};
	let tasks = queries::list_tasks(ctx, identity, &filters).await?;

	let mut context = tera::Context::new();
	context.insert("tasks", &tasks);
	let body = ctx.render("tasks/list.html", &context)?;
	Ok(Response::ok().html(body))
}

async fn create(ctx: &AppContext, req: Request) -> Result<Response> {
	let identity = ctx.identity(&req)?;
	let input: CreateTask = req.form()?;
	let id = commands::create_task(ctx, identity, input).await?;
	let task = queries::get_task_by_id(ctx, identity, id).await?;

	let mut context = tera::Context::new();
	context.insert("task", &task);
	let body = ctx.render("tasks/item.html", &context)?;
	Ok(Response::created().html(body))
}
