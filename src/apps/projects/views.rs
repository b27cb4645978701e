//! JSON handlers for projects and memberships.

use hyper::Method;
use serde_json::json;

use super::models::{AssignMember, CreateProject, SetMemberRole, UpdateProject};
use super::{commands, queries};
use crate::apps::filters::roles_from_query;
use crate::context::AppContext;
use crate::error::Result;
use crate::http::{Request, Response, Router};

pub fn register(router: &mut Router, ctx: &AppContext) {
	let c = ctx.clone();
	router.route(Method::GET, "/projects", move |req| {
		let ctx = c.clone();
		async move { list(ctx, req).await }
	});

	let c = ctx.clone();
	router.route(Method::POST, "/projects", move |req| {
		let ctx = c.clone();
		async move { create(ctx, req).await }
	});

	let c = ctx.clone();
	router.route(Method::GET, "/projects/{id}", move |req| {
		let ctx = c.clone();
		async move { get_by_id(ctx, req).await }
	});

	let c = ctx.clone();
	router.route(Method::PATCH, "/projects/{id}", move |req| {
		let ctx = c.clone();
		async move { update(ctx, req).await }
	});

	let c = ctx.clone();
	router.route(Method::DELETE, "/projects/{id}", move |req| {
		let ctx = c.clone();
		async move { delete(ctx, req).await }
	});

	let c = ctx.clone();
	router.route(Method::POST, "/projects/{id}/assign", move |req| {
		let ctx = c.clone();
		async move { assign(ctx, req).await }
	});

	let c = ctx.clone();
	router.route(Method::POST, "/projects/{id}/role", move |req| {
		let ctx = c.clone();
		async move { set_role(ctx, req).await }
	});
}

async fn list(ctx: AppContext, req: Request) -> Result<Response> {
	let identity = ctx.identity(&req)?;
	let roles = roles_from_query(&req)?;
	let projects = queries::list_projects(&ctx, identity, &roles).await?;
	Response::ok().json(&projects)
}

async fn get_by_id(ctx: AppContext, req: Request) -> Result<Response> {
	let identity = ctx.identity(&req)?;
	let project_id = req.param_i64("id")?;
	let project = queries::get_project_by_id(&ctx, identity, project_id).await?;
	Response::ok().json(&project)
}

async fn create(ctx: AppContext, req: Request) -> Result<Response> {
	let identity = ctx.identity(&req)?;
	let input: CreateProject = req.json()?;
	let id = commands::create_project(&ctx, identity, input).await?;
	Response::created().json(&json!({ "id": id }))
}

async fn update(ctx: AppContext, req: Request) -> Result<Response> {
	let identity = ctx.identity(&req)?;
	let project_id = req.param_i64("id")?;
	let input: UpdateProject = req.json()?;
	commands::update_project(&ctx, identity, project_id, input).await?;
	Ok(Response::no_content())
}

async fn delete(ctx: AppContext, req: Request) -> Result<Response> {
	let identity = ctx.identity(&req)?;
	let project_id = req.param_i64("id")?;
	commands::delete_project(&ctx, identity, project_id).await?;
	Ok(Response::no_content())
}

async fn assign(ctx: AppContext, req: Request) -> Result<Response> {
	let identity = ctx.identity(&req)?;
	let project_id = req.param_i64("id")?;
	let input: AssignMember = req.json()?;
	commands::add_user_to_project(
		&ctx,
		identity,
		project_id,
		&input.user_id,
		input.role.as_deref(),
	)
	.await?;
	Ok(Response::created())
}

async fn set_role(ctx: AppContext, req: Request) -> Result<Response> {
	let identity = ctx.identity(&req)?;
	let project_id = req.param_i64("id")?;
	let input: SetMemberRole = req.json()?;
	commands::set_user_role(&ctx, identity, project_id, &input.user_id, &input.role).await?;
	Ok(Response::no_content())
}
