//! Authentication infrastructure for the Foresite account service.
//!
//! Provides the building blocks the account service composes into its
//! login/register/verify flows:
//! - Password hashing (Argon2id, tunable work factor)
//! - Session token generation and verification (HS256 JWT)
//! - Authentication coordination
//!
//! This crate knows nothing about accounts, HTTP, or storage. The service
//! defines its own domain types and adapts these primitives.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{JwtHandler, SessionClaims};
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let claims = SessionClaims::new("account123", "a@b.com", 24);
//! let token = handler.encode(&claims).unwrap();
//! let decoded: SessionClaims = handler.decode(&token).unwrap();
//! assert_eq!(decoded.sub, "account123");
//! ```
//!
//! ## Complete Flow
//! ```
//! use auth::{Authenticator, SessionClaims};
//!
//! let auth = Authenticator::new(b"secret_key_at_least_32_bytes_long!");
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and mint a session token
//! let claims = SessionClaims::new("account123", "a@b.com", 24);
//! let result = auth.authenticate("password123", &hash, &claims).unwrap();
//!
//! // Later: verify the presented token
//! let decoded = auth.verify_session(&result.access_token).unwrap();
//! assert_eq!(decoded.email, "a@b.com");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::AuthenticationResult;
pub use authenticator::Authenticator;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::SessionClaims;
pub use password::PasswordError;
pub use password::PasswordHasher;
