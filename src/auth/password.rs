use crate::error::{Error, Result};

/// Password hasher trait
///
/// Implement this trait to swap the hashing algorithm; commands only see
/// the trait object carried by the application context.
pub trait PasswordHasher: Send + Sync {
	/// Hashes a plaintext password for storage.
	fn hash(&self, password: &str) -> Result<String>;

	/// Verifies a plaintext password against a stored hash.
	///
	/// `Ok(false)` means the password does not match; `Err` is reserved
	/// for malformed hashes and other internal failures.
	fn verify(&self, password: &str, hash: &str) -> Result<bool>;
}

/// Argon2id password hasher
pub struct Argon2Hasher;

impl Argon2Hasher {
	pub fn new() -> Self {
		Self
	}
}

impl Default for Argon2Hasher {
	fn default() -> Self {
		Self::new()
	}
}

impl PasswordHasher for Argon2Hasher {
	fn hash(&self, password: &str) -> Result<String> {
		use argon2::{
			Argon2,
			password_hash::{PasswordHasher as _, SaltString, rand_core::OsRng},
		};

		let salt = SaltString::generate(&mut OsRng);
		Argon2::default()
			.hash_password(password.as_bytes(), &salt)
			.map(|hash| hash.to_string())
			.map_err(|e| Error::Internal(e.to_string()))
	}

	fn verify(&self, password: &str, hash: &str) -> Result<bool> {
		use argon2::{
			Argon2,
			password_hash::{PasswordHash, PasswordVerifier},
		};

		let parsed_hash =
			PasswordHash::new(hash).map_err(|e| Error::Internal(e.to_string()))?;

		Ok(Argon2::default()
			.verify_password(password.as_bytes(), &parsed_hash)
			.is_ok())
	}
}
