use uuid::Uuid;

use super::models::Status;
use crate::context::AppContext;
use crate::error::Result;
use crate::policy::require_identity;

pub async fn list_statuses(ctx: &AppContext, identity: Option<Uuid>) -> Result<Vec<Status>> {
	require_identity(identity)?;
	let statuses = sqlx::query_as::<_, Status>("SELECT id, title FROM status ORDER BY id")
		.fetch_all(ctx.db.pool())
		.await?;
	Ok(statuses)
}
