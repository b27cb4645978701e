//! Authentication primitives: password hashing and bearer tokens.
//!
//! Both are consumed as injected collaborators; the policy and command
//! layers never touch argon2 or jsonwebtoken directly.

pub mod password;
pub mod token;

pub use password::{Argon2Hasher, PasswordHasher};
pub use token::{AUTH_COOKIE, Claims, TokenService};
