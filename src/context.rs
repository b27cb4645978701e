//! Application context.
//!
//! One explicitly constructed bundle of collaborators (store handle,
//! policy evaluator, token service, password hasher, template registry)
//! built in `main` and cloned into every handler. Nothing in the crate
//! reads ambient state.

use std::sync::Arc;

use tera::Tera;
use uuid::Uuid;

use crate::auth::{Argon2Hasher, PasswordHasher, TokenService};
use crate::config::Settings;
use crate::db::Database;
use crate::error::Result;
use crate::http::Request;
use crate::policy::PolicyEvaluator;

#[derive(Clone)]
pub struct AppContext {
	pub db: Database,
	pub policy: PolicyEvaluator,
	pub tokens: TokenService,
	pub hasher: Arc<dyn PasswordHasher>,
	pub templates: Arc<Tera>,
}

impl AppContext {
	pub fn new(db: Database, settings: &Settings) -> Result<Self> {
		let mut templates = Tera::default();
		templates.add_raw_templates(vec![
			("error.html", include_str!("../templates/error.html")),
			("login.html", include_str!("../templates/login.html")),
			(
				"projects/list.html",
				include_str!("../templates/projects/list.html"),
			),
			(
				"projects/item.html",
				include_str!("../templates/projects/item.html"),
			),
			("tasks/list.html", include_str!("../templates/tasks/list.html")),
			("tasks/item.html", include_str!("../templates/tasks/item.html")),
			(
				"priorities/list.html",
				include_str!("../templates/priorities/list.html"),
			),
			(
				"priorities/item.html",
				include_str!("../templates/priorities/item.html"),
			),
		])?;

		Ok(Self {
			policy: PolicyEvaluator::new(db.clone()),
			tokens: TokenService::new(
				settings.jwt_secret.as_bytes(),
				settings.token_expiry_minutes,
			),
			hasher: Arc::new(Argon2Hasher::new()),
			templates: Arc::new(templates),
			db,
		})
	}

	/// Identity carried by the request, if any.
	///
	/// `Ok(None)` means no token was presented; commands turn that into
	/// their own "not logged in" denial. A token that fails verification
	/// is an immediate `Unauthenticated` error.
	pub fn identity(&self, request: &Request) -> Result<Option<Uuid>> {
		match TokenService::extract(request) {
			None => Ok(None),
			Some(token) => self.tokens.verify(&token).map(Some),
		}
	}

	pub fn render(&self, template: &str, context: &tera::Context) -> Result<String> {
		Ok(self.templates.render(template, context)?)
	}
}
