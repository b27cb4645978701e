#![allow(dead_code)]

use bytes::Bytes;
use hyper::{HeaderMap, Method};
use uuid::Uuid;

use taskboard::apps::projects::models::CreateProject;
use taskboard::apps::users::models::CreateUser;
use taskboard::apps::{projects, users};
use taskboard::http::Request;
use taskboard::{AppContext, Database, Settings};

pub const PASSWORD: &str = "hunter2!secret";

pub fn test_settings() -> Settings {
	Settings {
		database_url: "sqlite::memory:".to_string(),
		jwt_secret: "test-secret".to_string(),
		token_expiry_minutes: 30,
		bind_addr: "127.0.0.1:0".parse().unwrap(),
	}
}

pub async fn test_context() -> AppContext {
	let db = Database::in_memory().await.unwrap();
	AppContext::new(db, &test_settings()).unwrap()
}

pub async fn register_user(ctx: &AppContext, username: &str) -> Uuid {
	let id = users::commands::create_user(
		ctx,
		CreateUser {
			username: username.to_string(),
			name: "Test".to_string(),
			aftername: "User".to_string(),
			mail: format!("{username}@example.com"),
			password: PASSWORD.to_string(),
		},
	)
	.await
	.unwrap();
	Uuid::parse_str(&id).unwrap()
}

pub async fn create_project(ctx: &AppContext, owner: Uuid, name: &str) -> i64 {
	projects::commands::create_project(
		ctx,
		Some(owner),
		CreateProject {
			name: name.to_string(),
			description: None,
		},
	)
	.await
	.unwrap()
}

/// `dd/mm/yyyy` into a UTC midnight timestamp, as the wire format does.
pub fn parse_wire_date(raw: &str) -> chrono::DateTime<chrono::Utc> {
	chrono::NaiveDate::parse_from_str(raw, "%d/%m/%Y")
		.unwrap()
		.and_time(chrono::NaiveTime::MIN)
		.and_utc()
}

/// Request with an optional bearer token and optional JSON body.
pub fn json_request(
	method: Method,
	path: &str,
	token: Option<&str>,
	body: Option<serde_json::Value>,
) -> Request {
	let mut headers = HeaderMap::new();
	if let Some(token) = token {
		headers.insert(
			"authorization",
			format!("Bearer {token}").parse().unwrap(),
		);
	}
	let bytes = match body {
		Some(value) => {
			headers.insert("content-type", "application/json".parse().unwrap());
			Bytes::from(value.to_string())
		}
		None => Bytes::new(),
	};
	Request::new(method, path.parse().unwrap(), headers, bytes)
}

/// Request with a urlencoded form body, for the hypermedia surface.
pub fn form_request(method: Method, path: &str, token: Option<&str>, form: &str) -> Request {
	let mut headers = HeaderMap::new();
	if let Some(token) = token {
		headers.insert(
			"authorization",
			format!("Bearer {token}").parse().unwrap(),
		);
	}
	headers.insert(
		"content-type",
		"application/x-www-form-urlencoded".parse().unwrap(),
	);
	Request::new(
		method,
		path.parse().unwrap(),
		headers,
		Bytes::from(form.to_string()),
	)
}
