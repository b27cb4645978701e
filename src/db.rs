//! Database connection management.
//!
//! Wraps a sqlx SQLite pool behind a small handle the rest of the crate
//! borrows. Foreign keys are enabled on every connection so the cascade
//! invariants (user → memberships/assignments, project → memberships,
//! task → subtasks/assignments) hold at the store level.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, Transaction};

use crate::error::Result;

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
	id TEXT PRIMARY KEY,
	username TEXT NOT NULL UNIQUE,
	name TEXT NOT NULL,
	aftername TEXT NOT NULL,
	mail TEXT NOT NULL,
	password TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS priority (
	id INTEGER PRIMARY KEY AUTOINCREMENT,
	title TEXT NOT NULL,
	rank INTEGER NOT NULL,
	description TEXT
);

CREATE TABLE IF NOT EXISTS status (
	id INTEGER PRIMARY KEY AUTOINCREMENT,
	title TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS projects (
	id INTEGER PRIMARY KEY AUTOINCREMENT,
	name TEXT NOT NULL,
	description TEXT
);

CREATE TABLE IF NOT EXISTS project_user_rel (
	id INTEGER PRIMARY KEY AUTOINCREMENT,
	project_id INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
	user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
	role TEXT NOT NULL,
	UNIQUE(project_id, user_id)
);

CREATE TABLE IF NOT EXISTS tasks (
	id INTEGER PRIMARY KEY AUTOINCREMENT,
	title TEXT NOT NULL,
	content TEXT NOT NULL,
	date_creation TEXT NOT NULL,
	priority_id INTEGER NOT NULL REFERENCES priority(id),
	deadline TEXT,
	status_id INTEGER REFERENCES status(id)
);

CREATE TABLE IF NOT EXISTS subtasks (
	id INTEGER PRIMARY KEY AUTOINCREMENT,
	task_id INTEGER NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
	title TEXT NOT NULL,
	content TEXT NOT NULL,
	date_creation TEXT NOT NULL,
	status_id INTEGER REFERENCES status(id)
);

CREATE TABLE IF NOT EXISTS task_user_rel (
	task_id INTEGER NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
	project_id INTEGER NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
	user_id TEXT NOT NULL REFERENCES users(id) ON DELETE CASCADE,
	UNIQUE(task_id, project_id, user_id)
);

INSERT OR IGNORE INTO status (id, title) VALUES (1, 'open');
INSERT OR IGNORE INTO status (id, title) VALUES (2, 'done');
"#;

/// Database connection wrapper
#[derive(Clone)]
pub struct Database {
	pool: SqlitePool,
}

impl Database {
	/// Connects to the given SQLite URL and bootstraps the schema.
	pub async fn connect(url: &str) -> Result<Self> {
		let options = SqliteConnectOptions::from_str(url)
			.map_err(sqlx::Error::from)?
			.create_if_missing(true)
			.foreign_keys(true);
		let pool = SqlitePoolOptions::new().connect_with(options).await?;
		let db = Self { pool };
		db.create_schema().await?;
		Ok(db)
	}

	/// In-memory database for tests.
	///
	/// Pinned to a single connection: each `:memory:` connection is its
	/// own database, so the pool must never open a second one.
	pub async fn in_memory() -> Result<Self> {
		let options = SqliteConnectOptions::from_str("sqlite::memory:")
			.map_err(sqlx::Error::from)?
			.foreign_keys(true);
		let pool = SqlitePoolOptions::new()
			.max_connections(1)
			.connect_with(options)
			.await?;
		let db = Self { pool };
		db.create_schema().await?;
		Ok(db)
	}

	pub fn pool(&self) -> &SqlitePool {
		&self.pool
	}

	pub async fn begin(&self) -> Result<Transaction<'static, Sqlite>> {
		Ok(self.pool.begin().await?)
	}

	async fn create_schema(&self) -> Result<()> {
		sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
		Ok(())
	}
}
