//! Fragment handlers for the session.

use hyper::Method;

use super::models::Credentials;
use super::queries;
use crate::apps::fragments;
use crate::auth::AUTH_COOKIE;
use crate::context::AppContext;
use crate::error::{Error, Result};
use crate::http::{Request, Response, Router};

pub fn register(router: &mut Router, ctx: &AppContext) {
	let c = ctx.clone();
	router.route(Method::POST, "/fragments/login", move |req| {
		let ctx = c.clone();
		async move { fragments::catch(&ctx, login(&ctx, req).await).await }
	});
}

/// Form-based login; sets the session cookie and returns the signed-in
/// fragment.
async fn login(ctx: &AppContext, req: Request) -> Result<Response> {
	let credentials: Credentials = req.form()?;
	let Some((id, hash)) = queries::credentials_by_username(ctx, &credentials.username).await?
	else {
		return Err(Error::InvalidArgument("user is not valid".to_string()));
	};
	if !ctx.hasher.verify(&credentials.password, &hash)? {
		return Err(Error::InvalidArgument("password is not valid".to_string()));
	}
	let user_id = uuid::Uuid::parse_str(&id)
		.map_err(|_| Error::Internal("stored user id is not a uuid".to_string()))?;
	let token = ctx.tokens.issue(user_id)?;

	let mut context = tera::Context::new();
	context.insert("user_id", &id);
	context.insert("username", &credentials.username);
	let body = ctx.render("login.html", &context)?;
	Ok(Response::ok().html(body).with_cookie(AUTH_COOKIE, &token))
}
