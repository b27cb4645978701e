use anyhow::anyhow;
use tracing_subscriber::EnvFilter;

use taskboard::http::HttpServer;
use taskboard::{AppContext, Database, Settings, build_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("taskboard=info")),
		)
		.init();

	let settings = Settings::from_env()?;
	let db = Database::connect(&settings.database_url).await?;
	let ctx = AppContext::new(db, &settings)?;
	let addr = settings.bind_addr;

	let router = build_router(ctx);
	HttpServer::new(router)
		.listen(addr)
		.await
		.map_err(|e| anyhow!("server error: {e}"))
}
