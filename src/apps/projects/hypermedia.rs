//! Fragment handlers for projects.

use hyper::Method;

use super::models::CreateProject;
use super::{commands, queries};
use crate::apps::filters::roles_from_query;
use crate::apps::fragments;
use crate::context::AppContext;
use crate::error::Result;
use crate::http::{Request, Response, Router};

pub fn register(router: &mut Router, ctx: &AppContext) {
	let c = ctx.clone();
	router.route(Method::GET, "/fragments/projects", move |req| {
		let ctx = c.clone();
		async move { fragments::catch(&ctx, list(&ctx, req).await).await }
	});

	let c = ctx.clone();
	router.route(Method::POST, "/fragments/projects", move |req| {
		let ctx = c.clone();
		async move { fragments::catch(&ctx, create(&ctx, req).await).await }
	});
}

async fn list(ctx: &AppContext, req: Request) -> Result<Response> {
	let identity = ctx.identity(&req)?;
	let roles = roles_from_query(&req)?;
	let projects = queries::list_projects(ctx, identity, &roles).await?;

	let mut context = tera::Context::new();
	context.insert("projects", &projects);
	let body = ctx.render("projects/list.html", &context)?;
	Ok(Response::ok().html(body))
}

async fn create(ctx: &AppContext, req: Request) -> Result<Response> {
	let identity = ctx.identity(&req)?;
	let input: CreateProject = req.form()?;
	let id = commands::create_project(ctx, identity, input).await?;
	let project = queries::get_project_by_id(ctx, identity, id).await?;

	let mut context = tera::Context::new();
	context.insert("project", &project);
	let body = ctx.render("projects/item.html", &context)?;
	Ok(Response::created().html(body))
}
