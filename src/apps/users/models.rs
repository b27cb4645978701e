use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Public profile of a user; the mail and password hash stay internal.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
	pub id: String,
	pub username: String,
	pub name: String,
	pub aftername: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateUser {
	pub username: String,
	pub name: String,
	pub aftername: String,
	pub mail: String,
	pub password: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateUser {
	pub username: Option<String>,
	pub name: Option<String>,
	pub aftername: Option<String>,
	pub mail: Option<String>,
}

/// Account deletion requires the password again.
#[derive(Debug, Deserialize)]
pub struct DeleteUser {
	pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct Credentials {
	pub username: String,
	pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginToken {
	pub token: String,
}
