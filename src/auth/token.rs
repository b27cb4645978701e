use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{Error, Result};
use crate::http::Request;

/// Cookie carrying the bearer token on the hypermedia surface.
pub const AUTH_COOKIE: &str = "X-AUTH";

/// JWT claims: the subject is the user id, `exp` the expiry timestamp.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
	pub sub: String,
	pub exp: i64,
}

/// Issues and verifies HS256 bearer tokens.
///
/// Constructed once from [`crate::config::Settings`] and injected; the
/// secret never lives in module state.
#[derive(Clone)]
pub struct TokenService {
	encoding: EncodingKey,
	decoding: DecodingKey,
	expiry: Duration,
}

impl TokenService {
	pub fn new(secret: &[u8], expiry_minutes: i64) -> Self {
		Self {
			encoding: EncodingKey::from_secret(secret),
			decoding: DecodingKey::from_secret(secret),
			expiry: Duration::minutes(expiry_minutes),
		}
	}

	/// Issues a token for the given user id.
	pub fn issue(&self, user_id: Uuid) -> Result<String> {
		let claims = Claims {
			sub: user_id.to_string(),
			exp: (Utc::now() + self.expiry).timestamp(),
		};
		encode(&Header::default(), &claims, &self.encoding)
			.map_err(|e| Error::Internal(e.to_string()))
	}

	/// Verifies a token and returns the user id it was issued for.
	///
	/// Expired, tampered and otherwise undecodable tokens all collapse to
	/// the same `Unauthenticated` answer.
	pub fn verify(&self, token: &str) -> Result<Uuid> {
		let data = decode::<Claims>(token, &self.decoding, &Validation::default())
			.map_err(|_| Error::Unauthenticated("could not validate credentials".to_string()))?;
		Uuid::parse_str(&data.claims.sub)
			.map_err(|_| Error::Unauthenticated("could not validate credentials".to_string()))
	}

	/// Pulls the bearer token out of a request, from the `Authorization`
	/// header or the `X-AUTH` cookie.
	pub fn extract(request: &Request) -> Option<String> {
		if let Some(header) = request.header("authorization") {
			let token = header.strip_prefix("Bearer ").unwrap_or(header);
			return Some(token.to_string());
		}
		request.cookie(AUTH_COOKIE)
	}
}
