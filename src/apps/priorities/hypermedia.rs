//! Fragment handlers for priorities.

use hyper::Method;

use super::models::CreatePriority;
use super::{commands, queries};
use crate::apps::fragments;
use crate::context::AppContext;
use crate::error::{Error, Result};
use crate::http::{Request, Response, Router};

pub fn register(router: &mut Router, ctx: &AppContext) {
	let c = ctx.clone();
	router.route(Method::GET, "/fragments/priorities", move |req| {
		let ctx = c.clone();
		async move { fragments::catch(&ctx, list(&ctx, req).await).await }
	});

	let c = ctx.clone();
	router.route(Method::POST, "/fragments/priorities", move |req| {
		let ctx = c.clone();
		async move { fragments::catch(&ctx, create(&ctx, req).await).await }
	});
}

async fn list(ctx: &AppContext, req: Request) -> Result<Response> {
	let identity = ctx.identity(&req)?;
	let priorities = queries::list_priorities(ctx, identity).await?;

	let mut context = tera::Context::new();
	context.insert("priorities", &priorities);
	let body = ctx.render("priorities/list.html", &context)?;
	Ok(Response::ok().html(body))
}

async fn create(ctx: &AppContext, req: Request) -> Result<Response> {
	let identity = ctx.identity(&req)?;
	let input: CreatePriority = req.form()?;
	let id = commands::create_priority(ctx, identity, input).await?;
	let priorities = queries::list_priorities(ctx, identity).await?;
	let priority = priorities
		.into_iter()
		.find(|p| p.id == id)
		.ok_or_else(|| Error::NotFound("priority not found".to_string()))?;

	let mut context = tera::Context::new();
	context.insert("priority", &priority);
	let body = ctx.render("priorities/item.html", &context)?;
	Ok(Response::created().html(body))
}
