use chrono::Duration;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

/// Claim set carried by a session token.
///
/// Identifies one account: the account id rides in the standard `sub` claim
/// and the login email alongside it. Every token carries `iat` and `exp`;
/// tokens without an expiry are rejected at verification time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Subject: the account identifier
    pub sub: String,

    /// Email the account authenticated with
    pub email: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl SessionClaims {
    /// Create claims for a freshly authenticated account.
    ///
    /// # Arguments
    /// * `account_id` - Unique account identifier
    /// * `email` - Email the account authenticated with
    /// * `ttl_hours` - Hours until the token expires
    pub fn new(account_id: impl ToString, email: impl ToString, ttl_hours: i64) -> Self {
        let now = Utc::now();
        let expiration = now + Duration::hours(ttl_hours);

        Self {
            sub: account_id.to_string(),
            email: email.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        }
    }

    /// Check whether the claims are expired at the given instant.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        self.exp < current_timestamp
    }
}
