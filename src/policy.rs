//! Access policy evaluation.
//!
//! Every command and scoped query funnels its role check through
//! [`PolicyEvaluator::authorize`] instead of repeating join predicates at
//! each call site. The evaluator only reads membership and assignment
//! rows; it never mutates state. Denial is a normal return value
//! ([`Decision::Denied`]), not an error — `Err` is reserved for store
//! failures.

use std::fmt;

use uuid::Uuid;

use crate::db::Database;
use crate::error::{Error, Result};

/// Project-scoped role carried by a membership row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
	Chief,
	Collaborator,
	User,
}

impl Role {
	pub const ALL: [Role; 3] = [Role::Chief, Role::Collaborator, Role::User];

	/// Roles allowed to manage memberships and task assignments.
	pub const MANAGERS: [Role; 2] = [Role::Chief, Role::Collaborator];

	pub fn as_str(&self) -> &'static str {
		match self {
			Role::Chief => "chief",
			Role::Collaborator => "collaborator",
			Role::User => "user",
		}
	}

	pub fn parse(raw: &str) -> Result<Self> {
		match raw {
			"chief" => Ok(Role::Chief),
			"collaborator" => Ok(Role::Collaborator),
			"user" => Ok(Role::User),
			other => Err(Error::InvalidArgument(format!("unknown role '{other}'"))),
		}
	}
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Operation being authorized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
	Read,
	Create,
	Update,
	Delete,
}

/// Target of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
	Project(i64),
	Task(i64),
	Subtask(i64),
	Priority,
}

/// Why an operation was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
	NotLoggedIn,
	InsufficientRole,
}

impl Denial {
	pub fn reason(&self) -> &'static str {
		match self {
			Denial::NotLoggedIn => "not logged in",
			Denial::InsufficientRole => "insufficient role",
		}
	}
}

/// Outcome of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
	Allowed,
	Denied(Denial),
}

impl Decision {
	pub fn is_allowed(&self) -> bool {
		matches!(self, Decision::Allowed)
	}

	/// Converts a denial into the matching error: missing identity maps
	/// to `Unauthenticated`, a failed role check to `Forbidden`.
	pub fn require(self) -> Result<()> {
		match self {
			Decision::Allowed => Ok(()),
			Decision::Denied(Denial::NotLoggedIn) => {
				Err(Error::Unauthenticated(Denial::NotLoggedIn.reason().to_string()))
			}
			Decision::Denied(Denial::InsufficientRole) => {
				Err(Error::Forbidden(Denial::InsufficientRole.reason().to_string()))
			}
		}
	}
}

/// Unwraps an optional identity or fails with the standard denial.
pub fn require_identity(identity: Option<Uuid>) -> Result<Uuid> {
	identity.ok_or_else(|| Error::Unauthenticated(Denial::NotLoggedIn.reason().to_string()))
}

/// Read-only policy evaluator over membership and assignment rows.
#[derive(Clone)]
pub struct PolicyEvaluator {
	db: Database,
}

impl PolicyEvaluator {
	pub fn new(db: Database) -> Self {
		Self { db }
	}

	/// Central authorization entry point.
	///
	/// Role tiers per resource:
	/// - Project: read accepts any membership; update/delete require
	///   `chief`; create (membership/assignment changes) requires
	///   `chief` or `collaborator`.
	/// - Task/Subtask: an assignment row for the user, or a manager
	///   membership on the owning project. The action does not widen or
	///   narrow the check; visibility and mutability coincide.
	/// - Priority: any authenticated identity.
	pub async fn authorize(
		&self,
		identity: Option<Uuid>,
		action: Action,
		resource: Resource,
	) -> Result<Decision> {
		let Some(user) = identity else {
			return Ok(Decision::Denied(Denial::NotLoggedIn));
		};

		match resource {
			Resource::Priority => Ok(Decision::Allowed),
			Resource::Project(project_id) => {
				let required: &[Role] = match action {
					Action::Read => &Role::ALL,
					Action::Create => &Role::MANAGERS,
					Action::Update | Action::Delete => &[Role::Chief],
				};
				self.check_project(user, project_id, required).await
			}
			Resource::Task(task_id) => self.check_task(user, task_id).await,
			Resource::Subtask(subtask_id) => self.check_subtask(user, subtask_id).await,
		}
	}

	/// Role the user holds on a project, if any.
	pub async fn project_role(&self, user: Uuid, project_id: i64) -> Result<Option<Role>> {
		let row: Option<(String,)> = sqlx::query_as(
			"SELECT role FROM project_user_rel WHERE project_id = ? AND user_id = ?",
		)
		.bind(project_id)
		.bind(user.to_string())
		.fetch_optional(self.db.pool())
		.await?;

		match row {
			Some((role,)) => Ok(Some(Role::parse(&role)?)),
			None => Ok(None),
		}
	}

	async fn check_project(
		&self,
		user: Uuid,
		project_id: i64,
		required: &[Role],
	) -> Result<Decision> {
		match self.project_role(user, project_id).await? {
			Some(role) if required.contains(&role) => Ok(Decision::Allowed),
			_ => Ok(Decision::Denied(Denial::InsufficientRole)),
		}
	}

	async fn check_task(&self, user: Uuid, task_id: i64) -> Result<Decision> {
		let row: Option<(i64,)> = sqlx::query_as(
			"SELECT 1 FROM task_user_rel WHERE task_id = ? AND user_id = ? \
			 UNION \
			 SELECT 1 FROM project_user_rel pur \
			 JOIN task_user_rel tur ON tur.project_id = pur.project_id \
			 WHERE tur.task_id = ? AND pur.user_id = ? \
			   AND pur.role IN ('chief', 'collaborator')",
		)
		.bind(task_id)
		.bind(user.to_string())
		.bind(task_id)
		.bind(user.to_string())
		.fetch_optional(self.db.pool())
		.await?;

		Ok(match row {
			Some(_) => Decision::Allowed,
			None => Decision::Denied(Denial::InsufficientRole),
		})
	}

	async fn check_subtask(&self, user: Uuid, subtask_id: i64) -> Result<Decision> {
		let row: Option<(i64,)> = sqlx::query_as(
			"SELECT st.task_id FROM subtasks st WHERE st.id = ?",
		)
		.bind(subtask_id)
		.fetch_optional(self.db.pool())
		.await?;

		match row {
			Some((task_id,)) => self.check_task(user, task_id).await,
			None => Ok(Decision::Denied(Denial::InsufficientRole)),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn role_strings_round_trip() {
		for role in Role::ALL {
			assert_eq!(Role::parse(role.as_str()).unwrap(), role);
		}
		assert!(Role::parse("admin").is_err());
	}

	#[test]
	fn denial_maps_to_the_right_error() {
		let err = Decision::Denied(Denial::NotLoggedIn).require().unwrap_err();
		assert!(matches!(err, Error::Unauthenticated(_)));

		let err = Decision::Denied(Denial::InsufficientRole)
			.require()
			.unwrap_err();
		assert!(matches!(err, Error::Forbidden(_)));

		assert!(Decision::Allowed.require().is_ok());
	}

	#[tokio::test]
	async fn missing_identity_is_denied_before_touching_the_store() {
		let db = Database::in_memory().await.unwrap();
		let policy = PolicyEvaluator::new(db);
		let decision = policy
			.authorize(None, Action::Update, Resource::Project(1))
			.await
			.unwrap();
		assert_eq!(decision, Decision::Denied(Denial::NotLoggedIn));
	}

	#[tokio::test]
	async fn authenticated_identity_may_touch_priorities() {
		let db = Database::in_memory().await.unwrap();
		let policy = PolicyEvaluator::new(db);
		let decision = policy
			.authorize(Some(Uuid::new_v4()), Action::Create, Resource::Priority)
			.await
			.unwrap();
		assert!(decision.is_allowed());
	}
}
