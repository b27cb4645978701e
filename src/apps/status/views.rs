use hyper::Method;

use super::queries;
use crate::context::AppContext;
use crate::error::Result;
use crate::http::{Request, Response, Router};

pub fn register(router: &mut Router, ctx: &AppContext) {
	let c = ctx.clone();
	router.route(Method::GET, "/status", move |req| {
		let ctx = c.clone();
		async move { list(ctx, req).await }
	});
}

async fn list(ctx: AppContext, req: Request) -> Result<Response> {
	let identity = ctx.identity(&req)?;
	let statuses = queries::list_statuses(&ctx, identity).await?;
	Response::ok().json(&statuses)
}
