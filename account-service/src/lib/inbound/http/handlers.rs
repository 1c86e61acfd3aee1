use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::account::errors::AccountError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountKind;
use crate::domain::account::models::AccountProfile;

pub mod health;
pub mod login;
pub mod register;
pub mod verify;

/// Sanitized account representation for response payloads.
///
/// There is no field for the password hash, so it cannot leak regardless of
/// how an `Account` was loaded. Kind-specific fields are omitted when unset.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountData {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub settings: Option<serde_json::Value>,
    pub created_at: DateTime<Utc>,
}

impl From<&AccountProfile> for AccountData {
    fn from(profile: &AccountProfile) -> Self {
        Self {
            id: profile.id.to_string(),
            name: profile.name.as_str().to_string(),
            email: profile.email.as_str().to_string(),
            title: profile.title.clone(),
            avatar_url: profile.avatar_url.clone(),
            plan: profile.plan.clone(),
            settings: profile.settings.clone(),
            created_at: profile.created_at,
        }
    }
}

impl From<&Account> for AccountData {
    fn from(account: &Account) -> Self {
        Self::from(&account.profile)
    }
}

/// Success body for login and register: the session token plus the account,
/// keyed `user` or `organization` per collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionResponseBody {
    pub success: bool,
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<AccountData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<AccountData>,
}

impl SessionResponseBody {
    pub fn new(kind: AccountKind, token: String, account: AccountData) -> Self {
        let (user, organization) = keyed(kind, account);
        Self {
            success: true,
            token,
            user,
            organization,
        }
    }
}

/// Success body for the verify endpoints: just the account.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerifyResponseBody {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<AccountData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization: Option<AccountData>,
}

impl VerifyResponseBody {
    pub fn new(kind: AccountKind, account: AccountData) -> Self {
        let (user, organization) = keyed(kind, account);
        Self {
            success: true,
            user,
            organization,
        }
    }
}

fn keyed(kind: AccountKind, account: AccountData) -> (Option<AccountData>, Option<AccountData>) {
    match kind {
        AccountKind::User => (Some(account), None),
        AccountKind::Organization => (None, Some(account)),
    }
}

/// Failure body: `{"success": false, "error": <message>}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Caller error; every kind in the taxonomy maps to the same status so
    /// responses carry no extra signal beyond the message.
    BadRequest(String),
    /// Wrapped infrastructure fault; detail stays in the logs.
    ServiceUnavailable,
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::InvalidCredentials => {
                ApiError::BadRequest("Invalid Credentials!".to_string())
            }
            AccountError::AlreadyExists(_) => {
                ApiError::BadRequest("User already exists!!".to_string())
            }
            AccountError::MissingFields => ApiError::BadRequest("Remember all fields!".to_string()),
            AccountError::InvalidToken => ApiError::BadRequest("Invalid token!".to_string()),
            AccountError::TokenExpired => ApiError::BadRequest("Token expired!".to_string()),
            AccountError::Database(msg) | AccountError::Internal(msg) => {
                tracing::error!(error = %msg, "Request failed on an infrastructure error");
                ApiError::ServiceUnavailable
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::ServiceUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Service temporarily unavailable!".to_string(),
            ),
        };

        (
            status,
            Json(ErrorBody {
                success: false,
                error,
            }),
        )
            .into_response()
    }
}
