use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use hyper::Method;
use regex::Regex;

use super::{Request, Response};
use crate::error::{Error, Result};

/// Handler trait for processing requests
///
/// This is the core abstraction - all request handlers implement this
#[async_trait]
pub trait Handler: Send + Sync {
	async fn handle(&self, request: Request) -> Result<Response>;
}

/// Blanket implementation for `Arc<T>` where T: Handler
#[async_trait]
impl<T: Handler + ?Sized> Handler for Arc<T> {
	async fn handle(&self, request: Request) -> Result<Response> {
		(**self).handle(request).await
	}
}

struct FnHandler<F>(F);

#[async_trait]
impl<F, Fut> Handler for FnHandler<F>
where
	F: Fn(Request) -> Fut + Send + Sync + 'static,
	Fut: Future<Output = Result<Response>> + Send + 'static,
{
	async fn handle(&self, request: Request) -> Result<Response> {
		(self.0)(request).await
	}
}

/// URL pattern with `{param}` placeholders, compiled to a regex once.
///
/// `/projects/{id}/users` matches `/projects/7/users` and captures
/// `id = "7"`.
struct PathPattern {
	regex: Regex,
}

impl PathPattern {
	fn new(pattern: &str) -> Self {
		let mut source = String::from("^");
		let mut rest = pattern;
		while let Some(start) = rest.find('{') {
			let (literal, tail) = rest.split_at(start);
			source.push_str(&regex::escape(literal));
			let end = tail
				.find('}')
				.unwrap_or_else(|| panic!("unclosed parameter in route pattern '{pattern}'"));
			let name = &tail[1..end];
			source.push_str(&format!("(?P<{name}>[^/]+)"));
			rest = &tail[end + 1..];
		}
		source.push_str(&regex::escape(rest));
		source.push('$');
		let regex = Regex::new(&source)
			.unwrap_or_else(|e| panic!("invalid route pattern '{pattern}': {e}"));
		Self { regex }
	}

	fn matches(&self, path: &str) -> Option<Vec<(String, String)>> {
		let captures = self.regex.captures(path)?;
		let mut params = Vec::new();
		for name in self.regex.capture_names().flatten() {
			if let Some(value) = captures.name(name) {
				params.push((name.to_string(), value.as_str().to_string()));
			}
		}
		Some(params)
	}
}

struct Route {
	method: Method,
	pattern: PathPattern,
	handler: Arc<dyn Handler>,
}

/// Pattern router dispatching requests to registered handlers.
pub struct Router {
	routes: Vec<Route>,
}

impl Router {
	pub fn new() -> Self {
		Self { routes: Vec::new() }
	}

	/// Registers a handler function for a method and path pattern.
	pub fn route<F, Fut>(&mut self, method: Method, pattern: &str, handler: F)
	where
		F: Fn(Request) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = Result<Response>> + Send + 'static,
	{
		self.routes.push(Route {
			method,
			pattern: PathPattern::new(pattern),
			handler: Arc::new(FnHandler(handler)),
		});
	}

	/// Finds the matching route and invokes its handler.
	///
	/// A path that matches a pattern under a different method yields 405;
	/// no pattern match at all is `NotFound`.
	pub async fn dispatch(&self, mut request: Request) -> Result<Response> {
		let mut path_matched = false;
		for route in &self.routes {
			let Some(params) = route.pattern.matches(request.path()) else {
				continue;
			};
			if route.method != request.method {
				path_matched = true;
				continue;
			}
			request.params.extend(params);
			return route.handler.handle(request).await;
		}
		if path_matched {
			return Ok(Response::method_not_allowed());
		}
		Err(Error::NotFound("not found".to_string()))
	}
}

impl Default for Router {
	fn default() -> Self {
		Self::new()
	}
}
