use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Project {
	pub id: i64,
	pub name: String,
	pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateProject {
	pub name: String,
	pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateProject {
	pub name: Option<String>,
	pub description: Option<String>,
}

/// Membership grant; role defaults to `user`.
#[derive(Debug, Deserialize)]
pub struct AssignMember {
	pub user_id: String,
	pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SetMemberRole {
	pub user_id: String,
	pub role: String,
}
