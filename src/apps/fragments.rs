//! Shared helper for the hypermedia surface.

use crate::context::AppContext;
use crate::error::Result;
use crate::http::Response;

/// Turns client-side failures into rendered error fragments.
///
/// Server-side failures keep bubbling so the boundary returns the usual
/// generic 500.
pub async fn catch(ctx: &AppContext, result: Result<Response>) -> Result<Response> {
	match result {
		Ok(response) => Ok(response),
		Err(err) if err.status().is_client_error() => {
			let mut context = tera::Context::new();
			context.insert("detail", &err.detail());
			context.insert("status", &err.status().as_u16());
			let body = ctx.render("error.html", &context)?;
			Ok(Response::new(err.status()).html(body))
		}
		Err(err) => Err(err),
	}
}
