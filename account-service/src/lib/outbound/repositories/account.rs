use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::AccountKind;
use crate::domain::account::models::AccountName;
use crate::domain::account::models::AccountProfile;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::ports::AccountRepository;

/// Postgres adapter for the account collections.
///
/// Users and organizations live in separate tables with differing profile
/// columns; the SELECTs pad the other kind's columns with typed NULLs so
/// both decode into one row shape. Email uniqueness is a table constraint,
/// making the store the arbiter under concurrent registration.
pub struct PostgresAccountRepository {
    pool: PgPool,
}

impl PostgresAccountRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Full credential row, fetched only by the login path.
#[derive(sqlx::FromRow)]
struct AccountRow {
    id: Uuid,
    name: String,
    email: String,
    password_hash: String,
    title: Option<String>,
    avatar_url: Option<String>,
    plan: Option<String>,
    settings: Option<serde_json::Value>,
    created_at: DateTime<Utc>,
}

/// Profile row; the password hash is projected out in SQL, never fetched.
#[derive(sqlx::FromRow)]
struct AccountProfileRow {
    id: Uuid,
    name: String,
    email: String,
    title: Option<String>,
    avatar_url: Option<String>,
    plan: Option<String>,
    settings: Option<serde_json::Value>,
    created_at: DateTime<Utc>,
}

fn build_profile(
    id: Uuid,
    name: String,
    email: String,
    title: Option<String>,
    avatar_url: Option<String>,
    plan: Option<String>,
    settings: Option<serde_json::Value>,
    created_at: DateTime<Utc>,
) -> Result<AccountProfile, AccountError> {
    // A stored row failing domain validation is a store inconsistency, not
    // a caller error.
    Ok(AccountProfile {
        id: AccountId(id),
        name: AccountName::new(name)
            .map_err(|e| AccountError::Database(format!("Corrupt account row: {}", e)))?,
        email: EmailAddress::new(email)
            .map_err(|e| AccountError::Database(format!("Corrupt account row: {}", e)))?,
        title,
        avatar_url,
        plan,
        settings,
        created_at,
    })
}

impl TryFrom<AccountRow> for Account {
    type Error = AccountError;

    fn try_from(row: AccountRow) -> Result<Self, Self::Error> {
        Ok(Account {
            profile: build_profile(
                row.id,
                row.name,
                row.email,
                row.title,
                row.avatar_url,
                row.plan,
                row.settings,
                row.created_at,
            )?,
            password_hash: row.password_hash,
        })
    }
}

impl TryFrom<AccountProfileRow> for AccountProfile {
    type Error = AccountError;

    fn try_from(row: AccountProfileRow) -> Result<Self, Self::Error> {
        build_profile(
            row.id,
            row.name,
            row.email,
            row.title,
            row.avatar_url,
            row.plan,
            row.settings,
            row.created_at,
        )
    }
}

fn select_by_email(kind: AccountKind) -> &'static str {
    match kind {
        AccountKind::User => {
            r#"
            SELECT id, name, email, password_hash, title, avatar_url,
                   NULL::text AS plan, NULL::jsonb AS settings, created_at
            FROM users
            WHERE email = $1
            "#
        }
        AccountKind::Organization => {
            r#"
            SELECT id, name, email, password_hash, NULL::text AS title,
                   NULL::text AS avatar_url, plan, settings, created_at
            FROM organizations
            WHERE email = $1
            "#
        }
    }
}

fn select_profile_by_id(kind: AccountKind) -> &'static str {
    match kind {
        AccountKind::User => {
            r#"
            SELECT id, name, email, title, avatar_url,
                   NULL::text AS plan, NULL::jsonb AS settings, created_at
            FROM users
            WHERE id = $1
            "#
        }
        AccountKind::Organization => {
            r#"
            SELECT id, name, email, NULL::text AS title,
                   NULL::text AS avatar_url, plan, settings, created_at
            FROM organizations
            WHERE id = $1
            "#
        }
    }
}

fn email_unique_constraint(kind: AccountKind) -> &'static str {
    match kind {
        AccountKind::User => "users_email_key",
        AccountKind::Organization => "organizations_email_key",
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountRepository {
    async fn create(&self, kind: AccountKind, account: Account) -> Result<Account, AccountError> {
        let result = match kind {
            AccountKind::User => {
                sqlx::query(
                    r#"
                    INSERT INTO users (id, name, email, password_hash, created_at)
                    VALUES ($1, $2, $3, $4, $5)
                    "#,
                )
                .bind(account.profile.id.0)
                .bind(account.profile.name.as_str())
                .bind(account.profile.email.as_str())
                .bind(&account.password_hash)
                .bind(account.profile.created_at)
                .execute(&self.pool)
                .await
            }
            AccountKind::Organization => {
                sqlx::query(
                    r#"
                    INSERT INTO organizations (id, name, email, password_hash, plan, settings, created_at)
                    VALUES ($1, $2, $3, $4, $5, $6, $7)
                    "#,
                )
                .bind(account.profile.id.0)
                .bind(account.profile.name.as_str())
                .bind(account.profile.email.as_str())
                .bind(&account.password_hash)
                .bind(account.profile.plan.as_deref())
                .bind(account.profile.settings.as_ref())
                .bind(account.profile.created_at)
                .execute(&self.pool)
                .await
            }
        };

        result.map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some(email_unique_constraint(kind))
                {
                    return AccountError::AlreadyExists(
                        account.profile.email.as_str().to_string(),
                    );
                }
            }
            AccountError::Database(e.to_string())
        })?;

        Ok(account)
    }

    async fn find_by_email(
        &self,
        kind: AccountKind,
        email: &str,
    ) -> Result<Option<Account>, AccountError> {
        let row = sqlx::query_as::<_, AccountRow>(select_by_email(kind))
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AccountError::Database(e.to_string()))?;

        row.map(Account::try_from).transpose()
    }

    async fn find_profile_by_id(
        &self,
        kind: AccountKind,
        id: &AccountId,
    ) -> Result<Option<AccountProfile>, AccountError> {
        let row = sqlx::query_as::<_, AccountProfileRow>(select_profile_by_id(kind))
            .bind(id.0)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AccountError::Database(e.to_string()))?;

        row.map(AccountProfile::try_from).transpose()
    }
}
