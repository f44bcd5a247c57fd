//! Credential adapters: password hashing and session token signing.

mod argon2_hasher;
mod jwt_session_tokens;

pub use argon2_hasher::{Argon2PasswordHasher, Argon2Settings};
pub use jwt_session_tokens::JwtSessionTokens;
