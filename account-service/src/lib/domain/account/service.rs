use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::JwtError;
use auth::SessionClaims;
use chrono::Utc;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::AccountKind;
use crate::domain::account::models::AccountProfile;
use crate::domain::account::models::AuthSession;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::RegisterCommand;
use crate::domain::account::ports::AccountRepository;
use crate::domain::account::ports::AccountServicePort;

/// Plan a fresh organization starts on.
const DEFAULT_ORGANIZATION_PLAN: &str = "free";

/// Domain service implementation for the account session operations.
///
/// The credential store is an injected dependency, threaded through every
/// operation; there is no process-wide store handle. The service keeps no
/// state between requests (no session table, no cache), so concurrent
/// requests never contend on anything here.
pub struct AccountService<R>
where
    R: AccountRepository,
{
    repository: Arc<R>,
    authenticator: Authenticator,
    token_ttl_hours: i64,
}

impl<R> AccountService<R>
where
    R: AccountRepository,
{
    /// Create a new account service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - Account persistence implementation
    /// * `authenticator` - Password hashing and token signing, pre-configured
    ///   with the shared secret and work factor
    /// * `token_ttl_hours` - Lifetime of issued session tokens
    pub fn new(repository: Arc<R>, authenticator: Authenticator, token_ttl_hours: i64) -> Self {
        Self {
            repository,
            authenticator,
            token_ttl_hours,
        }
    }

    fn session_claims(&self, id: AccountId, email: &EmailAddress) -> SessionClaims {
        SessionClaims::new(id, email.as_str(), self.token_ttl_hours)
    }
}

#[async_trait]
impl<R> AccountServicePort for AccountService<R>
where
    R: AccountRepository,
{
    async fn login(
        &self,
        kind: AccountKind,
        email: &EmailAddress,
        password: &str,
    ) -> Result<AuthSession, AccountError> {
        // Unknown email and wrong password fall through to the same error,
        // so a caller cannot probe which emails are registered.
        let account = self
            .repository
            .find_by_email(kind, email.as_str())
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        let claims = self.session_claims(account.profile.id, email);

        let result = self
            .authenticator
            .authenticate(password, &account.password_hash, &claims)
            .map_err(|e| match e {
                AuthenticationError::InvalidCredentials => AccountError::InvalidCredentials,
                AuthenticationError::PasswordError(err) => {
                    AccountError::Internal(format!("Password verification failed: {}", err))
                }
                AuthenticationError::JwtError(err) => {
                    AccountError::Internal(format!("Token generation failed: {}", err))
                }
            })?;

        tracing::debug!(%kind, account_id = %account.profile.id, "Login succeeded");

        Ok(AuthSession {
            token: result.access_token,
            account,
        })
    }

    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, AccountError> {
        // Pre-check so a taken email gets the proper error; the store's
        // uniqueness constraint remains the arbiter under concurrent
        // registration and surfaces as the same error kind.
        if self
            .repository
            .find_by_email(command.kind, command.email.as_str())
            .await?
            .is_some()
        {
            return Err(AccountError::AlreadyExists(
                command.email.as_str().to_string(),
            ));
        }

        let password_hash = self
            .authenticator
            .hash_password(&command.password)
            .map_err(|e| AccountError::Internal(format!("Password hashing failed: {}", e)))?;

        let (plan, settings) = match command.kind {
            AccountKind::Organization => (
                Some(DEFAULT_ORGANIZATION_PLAN.to_string()),
                Some(serde_json::json!({})),
            ),
            AccountKind::User => (None, None),
        };

        let account = Account {
            profile: AccountProfile {
                id: AccountId::new(),
                name: command.name,
                email: command.email,
                title: None,
                avatar_url: None,
                plan,
                settings,
                created_at: Utc::now(),
            },
            password_hash,
        };

        let created = self.repository.create(command.kind, account).await?;

        let claims = self.session_claims(created.profile.id, &created.profile.email);
        let token = self
            .authenticator
            .issue_token(&claims)
            .map_err(|e| AccountError::Internal(format!("Token generation failed: {}", e)))?;

        tracing::info!(kind = %command.kind, account_id = %created.profile.id, "Account registered");

        Ok(AuthSession {
            token,
            account: created,
        })
    }

    async fn verify(
        &self,
        kind: AccountKind,
        token: &str,
    ) -> Result<AccountProfile, AccountError> {
        let claims = self.authenticator.verify_session(token).map_err(|e| {
            tracing::warn!(%kind, "Session token rejected: {}", e);
            match e {
                JwtError::TokenExpired => AccountError::TokenExpired,
                _ => AccountError::InvalidToken,
            }
        })?;

        let id = AccountId::from_string(&claims.sub).map_err(|e| {
            tracing::warn!(%kind, "Session token subject unparseable: {}", e);
            AccountError::InvalidToken
        })?;

        // The subject must resolve to exactly one live account in the
        // collection, or verification fails.
        self.repository
            .find_profile_by_id(kind, &id)
            .await?
            .ok_or_else(|| {
                tracing::warn!(%kind, account_id = %id, "Session token names a missing account");
                AccountError::InvalidToken
            })
    }
}
