use std::fmt;
use std::str::FromStr;

use chrono::DateTime;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::account::errors::AccountIdError;
use crate::domain::account::errors::AccountNameError;
use crate::domain::account::errors::EmailError;

/// The two account collections.
///
/// Users and organizations share one credential flow; the kind selects which
/// collection a lookup or insert targets. An email is unique within a
/// collection but may coincide across them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountKind {
    User,
    Organization,
}

impl AccountKind {
    /// Key under which the sanitized account rides in response payloads.
    pub fn payload_key(&self) -> &'static str {
        match self {
            AccountKind::User => "user",
            AccountKind::Organization => "organization",
        }
    }
}

impl fmt::Display for AccountKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.payload_key())
    }
}

/// Account unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AccountId(pub Uuid);

impl AccountId {
    /// Generate a new random account ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an account ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, AccountIdError> {
        Uuid::parse_str(s)
            .map(AccountId)
            .map_err(|e| AccountIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name value type
///
/// A person's name for user accounts, a company name for organizations.
/// Freeform, but never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountName(String);

impl AccountName {
    /// Create a new valid account name.
    ///
    /// # Errors
    /// * `Empty` - Name is the empty string
    pub fn new(name: String) -> Result<Self, AccountNameError> {
        if name.is_empty() {
            Err(AccountNameError::Empty)
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// The sole lookup key at login. Validates format using an RFC 5322
/// compliant parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new validated email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Client-visible account projection.
///
/// Everything a client may see about an account. The password hash lives
/// only on [`Account`]; no response type has a field for it. Users carry
/// `title` and `avatar_url`; organizations carry `plan` and `settings`;
/// the fields for the other kind stay `None`.
#[derive(Debug, Clone)]
pub struct AccountProfile {
    pub id: AccountId,
    pub name: AccountName,
    pub email: EmailAddress,
    pub title: Option<String>,
    pub avatar_url: Option<String>,
    pub plan: Option<String>,
    pub settings: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

/// Account aggregate entity.
///
/// The stored credential record: the client-visible profile plus the
/// password hash.
#[derive(Debug, Clone)]
pub struct Account {
    pub profile: AccountProfile,
    pub password_hash: String,
}

/// Command to register a new account with domain types
#[derive(Debug)]
pub struct RegisterCommand {
    pub kind: AccountKind,
    pub name: AccountName,
    pub email: EmailAddress,
    pub password: String,
}

impl RegisterCommand {
    /// Construct a new register command.
    ///
    /// # Arguments
    /// * `kind` - Collection the account is created in
    /// * `name` - Validated display name
    /// * `email` - Validated email address
    /// * `password` - Plain text password (hashed by the service)
    pub fn new(
        kind: AccountKind,
        name: AccountName,
        email: EmailAddress,
        password: String,
    ) -> Self {
        Self {
            kind,
            name,
            email,
            password,
        }
    }
}

/// An issued session: the signed token plus the account it identifies.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub account: Account,
}
