//! Runtime settings.
//!
//! Everything the process needs is read once at startup and carried in an
//! explicitly constructed [`Settings`] value; no component reaches for
//! environment variables or global handles after boot.

use std::env;
use std::net::SocketAddr;

use crate::error::{Error, Result};

const ENV_DATABASE_URL: &str = "TASKBOARD_DATABASE_URL";
const ENV_JWT_SECRET: &str = "TASKBOARD_JWT_SECRET";
const ENV_TOKEN_EXPIRY: &str = "TASKBOARD_TOKEN_EXPIRY_MINUTES";
const ENV_BIND_ADDR: &str = "TASKBOARD_BIND_ADDR";

#[derive(Debug, Clone)]
pub struct Settings {
	pub database_url: String,
	pub jwt_secret: String,
	pub token_expiry_minutes: i64,
	pub bind_addr: SocketAddr,
}

impl Settings {
	/// Builds settings from `TASKBOARD_*` environment variables.
	///
	/// `TASKBOARD_JWT_SECRET` is mandatory; the rest fall back to local
	/// development defaults.
	pub fn from_env() -> Result<Self> {
		let jwt_secret = env::var(ENV_JWT_SECRET)
			.map_err(|_| Error::InvalidArgument(format!("{ENV_JWT_SECRET} must be set")))?;

		let database_url = env::var(ENV_DATABASE_URL)
			.unwrap_or_else(|_| "sqlite:taskboard.db?mode=rwc".to_string());

		let token_expiry_minutes = match env::var(ENV_TOKEN_EXPIRY) {
			Ok(raw) => raw.parse::<i64>().map_err(|_| {
				Error::InvalidArgument(format!("{ENV_TOKEN_EXPIRY} must be an integer"))
			})?,
			Err(_) => 30,
		};

		let bind_addr = match env::var(ENV_BIND_ADDR) {
			Ok(raw) => raw.parse::<SocketAddr>().map_err(|_| {
				Error::InvalidArgument(format!("{ENV_BIND_ADDR} must be a socket address"))
			})?,
			Err(_) => SocketAddr::from(([127, 0, 0, 1], 8000)),
		};

		Ok(Self {
			database_url,
			jwt_secret,
			token_expiry_minutes,
			bind_addr,
		})
	}
}
