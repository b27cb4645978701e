//! # taskboard
//!
//! Task and project management web backend. Users own projects through
//! role-carrying memberships (`chief`, `collaborator`, `user`) and own
//! tasks through per-project assignments; every read and write funnels
//! through a single access policy evaluator before touching the store.
//!
//! Two parallel surfaces share the same command/query services: a JSON
//! API and a server-rendered hypermedia-fragment API.

pub mod apps;
pub mod auth;
pub mod config;
pub mod context;
pub mod db;
pub mod error;
pub mod http;
pub mod policy;

pub use config::Settings;
pub use context::AppContext;
pub use db::Database;
pub use error::{Error, Result};

use http::Router;

/// Builds the full router: JSON views plus hypermedia fragments for
/// every app.
pub fn build_router(ctx: AppContext) -> Router {
	let mut router = Router::new();

	apps::users::views::register(&mut router, &ctx);
	apps::projects::views::register(&mut router, &ctx);
	apps::tasks::views::register(&mut router, &ctx);
	apps::priorities::views::register(&mut router, &ctx);
	apps::status::views::register(&mut router, &ctx);

	apps::users::hypermedia::register(&mut router, &ctx);
	apps::projects::hypermedia::register(&mut router, &ctx);
	apps::tasks::hypermedia::register(&mut router, &ctx);
	apps::priorities::hypermedia::register(&mut router, &ctx);

	router
}
