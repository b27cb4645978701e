use std::collections::HashMap;

use bytes::Bytes;
use hyper::{HeaderMap, Method, Uri};
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// HTTP request representation handed to handlers.
///
/// Path parameters captured by the router land in `params`; the body is
/// fully buffered before dispatch.
#[derive(Debug)]
pub struct Request {
	pub method: Method,
	pub uri: Uri,
	pub headers: HeaderMap,
	pub body: Bytes,
	pub params: HashMap<String, String>,
}

impl Request {
	pub fn new(method: Method, uri: Uri, headers: HeaderMap, body: Bytes) -> Self {
		Self {
			method,
			uri,
			headers,
			body,
			params: HashMap::new(),
		}
	}

	pub fn path(&self) -> &str {
		self.uri.path()
	}

	/// First header value as a string, lowercase name.
	pub fn header(&self, name: &str) -> Option<&str> {
		self.headers.get(name).and_then(|v| v.to_str().ok())
	}

	/// Value of a cookie from the `Cookie` header.
	pub fn cookie(&self, name: &str) -> Option<String> {
		let header = self.header("cookie")?;
		for pair in header.split(';') {
			let mut parts = pair.trim().splitn(2, '=');
			if parts.next() == Some(name) {
				return parts.next().map(|v| v.to_string());
			}
		}
		None
	}

	/// Path parameter captured by the router pattern.
	pub fn param(&self, name: &str) -> Option<&str> {
		self.params.get(name).map(|s| s.as_str())
	}

	/// Path parameter parsed as an integer id.
	pub fn param_i64(&self, name: &str) -> Result<i64> {
		self.param(name)
			.ok_or_else(|| Error::InvalidArgument(format!("missing path parameter '{name}'")))?
			.parse::<i64>()
			.map_err(|_| Error::InvalidArgument(format!("path parameter '{name}' must be an integer")))
	}

	/// Query string parameter, if present.
	pub fn query_param(&self, name: &str) -> Option<String> {
		let query = self.uri.query()?;
		let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query).ok()?;
		pairs.into_iter().find(|(k, _)| k == name).map(|(_, v)| v)
	}

	/// Query string parameter parsed as an integer.
	pub fn query_param_i64(&self, name: &str) -> Result<Option<i64>> {
		match self.query_param(name) {
			None => Ok(None),
			Some(raw) => raw.parse::<i64>().map(Some).map_err(|_| {
				Error::InvalidArgument(format!("query parameter '{name}' must be an integer"))
			}),
		}
	}

	/// Deserializes the body as JSON.
	pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
		serde_json::from_slice(&self.body)
			.map_err(|e| Error::InvalidArgument(format!("invalid request body: {e}")))
	}

	/// Deserializes the body as a urlencoded form.
	pub fn form<T: DeserializeOwned>(&self) -> Result<T> {
		serde_urlencoded::from_bytes(&self.body)
			.map_err(|e| Error::InvalidArgument(format!("invalid form body: {e}")))
	}
}
