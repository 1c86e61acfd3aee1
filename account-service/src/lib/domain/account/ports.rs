use async_trait::async_trait;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::AccountKind;
use crate::domain::account::models::AccountProfile;
use crate::domain::account::models::AuthSession;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::RegisterCommand;

/// Port for account session operations.
///
/// Four stateless operations; each is a single request/response with no
/// suspended intermediate state.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Authenticate an account by email and password and issue a session.
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown email or wrong password; the two are
    ///   indistinguishable to the caller
    /// * `Database` - Store operation failed
    async fn login(
        &self,
        kind: AccountKind,
        email: &EmailAddress,
        password: &str,
    ) -> Result<AuthSession, AccountError>;

    /// Create a new account and issue a session for it.
    ///
    /// # Errors
    /// * `AlreadyExists` - The email is taken in the target collection;
    ///   nothing is written
    /// * `Database` - Store operation failed
    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, AccountError>;

    /// Verify a presented session token and return the account it names.
    ///
    /// The token's signature and expiry are checked before any claim is
    /// trusted, and its subject must resolve to a live account in the
    /// collection for `kind`.
    ///
    /// # Errors
    /// * `InvalidToken` - Malformed token, bad signature, or subject does
    ///   not resolve to an account
    /// * `TokenExpired` - The token's expiry has passed
    /// * `Database` - Store operation failed
    async fn verify(
        &self,
        kind: AccountKind,
        token: &str,
    ) -> Result<AccountProfile, AccountError>;
}

/// Persistence operations for the account collections.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persist a new account in the collection for `kind`.
    ///
    /// # Errors
    /// * `AlreadyExists` - The store's email uniqueness constraint fired
    /// * `Database` - Store operation failed
    async fn create(&self, kind: AccountKind, account: Account) -> Result<Account, AccountError>;

    /// Retrieve an account by email.
    ///
    /// # Returns
    /// Optional account entity (None if not found)
    ///
    /// # Errors
    /// * `Database` - Store operation failed
    async fn find_by_email(
        &self,
        kind: AccountKind,
        email: &str,
    ) -> Result<Option<Account>, AccountError>;

    /// Retrieve an account profile by id.
    ///
    /// The password hash is projected out at the query level; it is never
    /// fetched, not merely scrubbed.
    ///
    /// # Errors
    /// * `Database` - Store operation failed
    async fn find_profile_by_id(
        &self,
        kind: AccountKind,
        id: &AccountId,
    ) -> Result<Option<AccountProfile>, AccountError>;
}
