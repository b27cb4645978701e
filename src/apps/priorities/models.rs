use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Priority {
	pub id: i64,
	pub title: String,
	pub rank: i64,
	pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreatePriority {
	pub title: String,
	pub rank: i64,
	pub description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdatePriority {
	pub title: Option<String>,
	pub rank: Option<i64>,
	pub description: Option<String>,
}
