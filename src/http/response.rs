use bytes::Bytes;
use hyper::{HeaderMap, StatusCode};
use serde::Serialize;

use crate::error::{Error, Result};

/// HTTP response representation
pub struct Response {
	pub status: StatusCode,
	pub headers: HeaderMap,
	pub body: Bytes,
}

impl Response {
	/// Create a new response with the given status code
	pub fn new(status: StatusCode) -> Self {
		Self {
			status,
			headers: HeaderMap::new(),
			body: Bytes::new(),
		}
	}

	pub fn ok() -> Self {
		Self::new(StatusCode::OK)
	}

	pub fn created() -> Self {
		Self::new(StatusCode::CREATED)
	}

	pub fn no_content() -> Self {
		Self::new(StatusCode::NO_CONTENT)
	}

	pub fn method_not_allowed() -> Self {
		Self::new(StatusCode::METHOD_NOT_ALLOWED)
	}

	/// Sets the body without touching headers.
	pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
		self.body = body.into();
		self
	}

	pub fn with_header(mut self, name: &'static str, value: &str) -> Self {
		if let Ok(value) = value.parse() {
			self.headers.append(name, value);
		}
		self
	}

	/// Serializes `value` as the JSON body.
	pub fn json<T: Serialize>(self, value: &T) -> Result<Self> {
		let body = serde_json::to_vec(value).map_err(|e| Error::Internal(e.to_string()))?;
		Ok(self
			.with_header("content-type", "application/json")
			.with_body(body))
	}

	/// Sets an HTML body for the hypermedia surface.
	pub fn html(self, body: String) -> Self {
		self.with_header("content-type", "text/html; charset=utf-8")
			.with_body(body)
	}

	/// Appends a session cookie, HttpOnly and path-wide.
	pub fn with_cookie(self, name: &str, value: &str) -> Self {
		let cookie = format!("{name}={value}; Path=/; HttpOnly");
		let mut response = self;
		if let Ok(value) = cookie.parse() {
			response.headers.append("set-cookie", value);
		}
		response
	}

	/// Renders an error as a JSON response; the boundary translation for
	/// the API flavor.
	pub fn from_error(err: &Error) -> Self {
		let body = serde_json::json!({ "detail": err.detail() });
		Self::new(err.status())
			.with_header("content-type", "application/json")
			.with_body(body.to_string())
	}
}
