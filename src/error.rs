//! Error taxonomy shared by every command, query and handler.
//!
//! Policy denials and validation failures are produced locally as typed
//! values and translated to HTTP status codes at the boundary. Storage
//! failures roll the transaction back and surface as a generic operation
//! failure. No error is ever retried; every failure is terminal for the
//! current request.

use hyper::StatusCode;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// No token or an unverifiable token was presented.
	#[error("{0}")]
	Unauthenticated(String),

	/// A valid identity without the role the operation requires.
	#[error("{0}")]
	Forbidden(String),

	/// Missing or malformed payload fields.
	#[error("{0}")]
	InvalidArgument(String),

	/// The referenced entity does not exist within the caller's scope.
	#[error("{0}")]
	NotFound(String),

	/// A uniqueness constraint was violated.
	#[error("{0}")]
	Conflict(String),

	/// Transaction-level store failure; already rolled back by sqlx.
	#[error("database error: {0}")]
	Storage(#[source] sqlx::Error),

	#[error("template error: {0}")]
	Template(#[from] tera::Error),

	/// Failures in ambient services (hashing, token issuance).
	#[error("{0}")]
	Internal(String),
}

impl From<sqlx::Error> for Error {
	fn from(err: sqlx::Error) -> Self {
		if let sqlx::Error::Database(db_err) = &err {
			if db_err.is_unique_violation() {
				return Error::Conflict("resource already exists".to_string());
			}
			if db_err.is_foreign_key_violation() {
				return Error::NotFound("referenced entity does not exist".to_string());
			}
		}
		Error::Storage(err)
	}
}

impl Error {
	pub fn status(&self) -> StatusCode {
		match self {
			Error::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
			Error::Forbidden(_) => StatusCode::FORBIDDEN,
			Error::InvalidArgument(_) => StatusCode::BAD_REQUEST,
			Error::NotFound(_) => StatusCode::NOT_FOUND,
			Error::Conflict(_) => StatusCode::CONFLICT,
			Error::Storage(_) | Error::Template(_) | Error::Internal(_) => {
				StatusCode::INTERNAL_SERVER_ERROR
			}
		}
	}

	/// Human-readable reason surfaced to the client.
	///
	/// Store and template failures are reduced to a generic message so
	/// internal details never cross the boundary.
	pub fn detail(&self) -> String {
		match self {
			Error::Storage(_) => "failed to execute database operation".to_string(),
			Error::Template(_) | Error::Internal(_) => "internal error".to_string(),
			other => other.to_string(),
		}
	}
}
