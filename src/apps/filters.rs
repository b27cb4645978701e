//! Query-parameter parsing shared by the view layers.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::error::{Error, Result};
use crate::http::Request;
use crate::policy::Role;

/// Role filter from a `roles=chief,collaborator` query parameter.
///
/// Absent means "any role".
pub fn roles_from_query(request: &Request) -> Result<Vec<Role>> {
	match request.query_param("roles") {
		None => Ok(Role::ALL.to_vec()),
		Some(raw) => raw
			.split(',')
			.map(|part| Role::parse(part.trim()))
			.collect(),
	}
}

/// Parses a `dd/mm/yyyy` date into a UTC timestamp at midnight.
pub fn parse_date(raw: &str) -> Result<DateTime<Utc>> {
	let date = NaiveDate::parse_from_str(raw, "%d/%m/%Y")
		.map_err(|_| Error::InvalidArgument(format!("'{raw}' is not a dd/mm/yyyy date")))?;
	Ok(date.and_time(NaiveTime::MIN).and_utc())
}
