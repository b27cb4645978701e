//! JSON handlers for accounts and login.

use hyper::Method;
use serde_json::json;

use super::models::{CreateUser, Credentials, DeleteUser, LoginToken, UpdateUser};
use super::{commands, queries};
use crate::apps::filters::roles_from_query;
use crate::auth::AUTH_COOKIE;
use crate::context::AppContext;
use crate::error::{Error, Result};
use crate::http::{Request, Response, Router};

pub fn register(router: &mut Router, ctx: &AppContext) {
	let c = ctx.clone();
	router.route(Method::POST, "/login", move |req| {
		let ctx = c.clone();
		async move { login(ctx, req).await }
	});

	let c = ctx.clone();
	router.route(Method::POST, "/users", move |req| {
		let ctx = c.clone();
		async move { create(ctx, req).await }
	});

	let c = ctx.clone();
	router.route(Method::GET, "/users", move |req| {
		let ctx = c.clone();
		async move { list(ctx, req).await }
	});

	let c = ctx.clone();
	router.route(Method::PATCH, "/users", move |req| {
		let ctx = c.clone();
		async move { update(ctx, req).await }
	});

	let c = ctx.clone();
	router.route(Method::DELETE, "/users", move |req| {
		let ctx = c.clone();
		async move { delete(ctx, req).await }
	});

	let c = ctx.clone();
	router.route(Method::GET, "/projects/{id}/users", move |req| {
		let ctx = c.clone();
		async move { list_by_project(ctx, req).await }
	});
}

/// Issues a bearer token for valid credentials, both as a JSON body and
/// as the `X-AUTH` session cookie.
pub async fn login(ctx: AppContext, req: Request) -> Result<Response> {
	let credentials: Credentials = req.json()?;
	let Some((id, hash)) = queries::credentials_by_username(&ctx, &credentials.username).await?
	else {
		return Err(Error::InvalidArgument("user is not valid".to_string()));
	};
	if !ctx.hasher.verify(&credentials.password, &hash)? {
		return Err(Error::InvalidArgument("password is not valid".to_string()));
	}
	let user_id = uuid::Uuid::parse_str(&id)
		.map_err(|_| Error::Internal("stored user id is not a uuid".to_string()))?;
	let token = ctx.tokens.issue(user_id)?;
	Ok(Response::ok()
		.json(&LoginToken { token: token.clone() })?
		.with_cookie(AUTH_COOKIE, &token))
}

async fn create(ctx: AppContext, req: Request) -> Result<Response> {
	let input: CreateUser = req.json()?;
	let id = commands::create_user(&ctx, input).await?;
	Response::created().json(&json!({ "id": id }))
}

async fn list(ctx: AppContext, req: Request) -> Result<Response> {
	let identity = ctx.identity(&req)?;
	let users = queries::list_users(&ctx, identity).await?;
	Response::ok().json(&users)
}

async fn update(ctx: AppContext, req: Request) -> Result<Response> {
	let identity = ctx.identity(&req)?;
	let input: UpdateUser = req.json()?;
	commands::update_user(&ctx, identity, input).await?;
	Ok(Response::no_content())
}

async fn delete(ctx: AppContext, req: Request) -> Result<Response> {
	let identity = ctx.identity(&req)?;
	let input: DeleteUser = req.json()?;
	commands::delete_user(&ctx, identity, &input.password).await?;
	Ok(Response::no_content())
}

async fn list_by_project(ctx: AppContext, req: Request) -> Result<Response> {
	let identity = ctx.identity(&req)?;
	let project_id = req.param_i64("id")?;
	let roles = roles_from_query(&req)?;
	let users = queries::list_users_by_project(&ctx, identity, project_id, &roles).await?;
	Response::ok().json(&users)
}
