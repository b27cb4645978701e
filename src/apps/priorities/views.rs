//! JSON handlers for priorities.

use hyper::Method;
use serde_json::json;

use super::models::{CreatePriority, UpdatePriority};
use super::{commands, queries};
use crate::context::AppContext;
use crate::error::Result;
use crate::http::{Request, Response, Router};

pub fn register(router: &mut Router, ctx: &AppContext) {
	let c = ctx.clone();
	router.route(Method::GET, "/priorities", move |req| {
		let ctx = c.clone();
		async move { list(ctx, req).await }
	});

	let c = ctx.clone();
	router.route(Method::POST, "/priorities", move |req| {
		let ctx = c.clone();
		async move { create(ctx, req).await }
	});

	let c = ctx.clone();
	router.route(Method::PATCH, "/priorities/{id}", move |req| {
		let ctx = c.clone();
		async move { update(ctx, req).await }
	});

	let c = ctx.clone();
	router.route(Method::DELETE, "/priorities/{id}", move |req| {
		let ctx = c.clone();
		async move { delete(ctx, req).await }
	});
}

async fn list(ctx: AppContext, req: Request) -> Result<Response> {
	let identity = ctx.identity(&req)?;
	let priorities = queries::list_priorities(&ctx, identity).await?;
	Response::ok().json(&priorities)
}

async fn create(ctx: AppContext, req: Request) -> Result<Response> {
	let identity = ctx.identity(&req)?;
	let input: CreatePriority = req.json()?;
	let id = commands::create_priority(&ctx, identity, input).await?;
	Response::created().json(&json!({ "id": id }))
}

async fn update(ctx: AppContext, req: Request) -> Result<Response> {
	let identity = ctx.identity(&req)?;
	let priority_id = req.param_i64("id")?;
	let input: UpdatePriority = req.json()?;
	commands::update_priority(&ctx, identity, priority_id, input).await?;
	Ok(Response::no_content())
}

async fn delete(ctx: AppContext, req: Request) -> Result<Response> {
	let identity = ctx.identity(&req)?;
	let priority_id = req.param_i64("id")?;
	commands::delete_priority(&ctx, identity, priority_id).await?;
	Ok(Response::no_content())
}
