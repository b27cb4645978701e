use uuid::Uuid;

use super::models::Priority;
use crate::context::AppContext;
use crate::error::Result;
use crate::policy::require_identity;

/// All priorities, most urgent rank first.
pub async fn list_priorities(ctx: &AppContext, identity: Option<Uuid>) -> Result<Vec<Priority>> {
	require_identity(identity)?;
	let priorities = sqlx::query_as::<_, Priority>(
		"SELECT id, title, rank, description FROM priority ORDER BY rank, id",
	)
	.fetch_all(ctx.db.pool())
	.await?;
	Ok(priorities)
}
