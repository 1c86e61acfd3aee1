use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use super::AccountData;
use super::ApiError;
use super::SessionResponseBody;
use crate::domain::account::errors::AccountError;
use crate::domain::account::models::AccountKind;
use crate::domain::account::models::AccountName;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::RegisterCommand;
use crate::inbound::http::router::AppState;

/// HTTP request body for registration (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequestBody {
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
}

impl RegisterRequestBody {
    /// All required fields must be present and usable; this runs before any
    /// store access. An unparseable email is treated like a missing one.
    fn try_into_command(self, kind: AccountKind) -> Result<RegisterCommand, AccountError> {
        let name = AccountName::new(self.name.unwrap_or_default())
            .map_err(|_| AccountError::MissingFields)?;

        let password = self.password.unwrap_or_default();
        if password.is_empty() {
            return Err(AccountError::MissingFields);
        }

        let email = EmailAddress::new(self.email.unwrap_or_default())
            .map_err(|_| AccountError::MissingFields)?;

        Ok(RegisterCommand::new(kind, name, email, password))
    }
}

pub async fn register_user(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequestBody>,
) -> Result<Json<SessionResponseBody>, ApiError> {
    register(state, AccountKind::User, body).await
}

pub async fn register_organization(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequestBody>,
) -> Result<Json<SessionResponseBody>, ApiError> {
    register(state, AccountKind::Organization, body).await
}

async fn register(
    state: AppState,
    kind: AccountKind,
    body: RegisterRequestBody,
) -> Result<Json<SessionResponseBody>, ApiError> {
    let command = body.try_into_command(kind)?;

    let session = state.account_service.register(command).await?;

    Ok(Json(SessionResponseBody::new(
        kind,
        session.token,
        AccountData::from(&session.account),
    )))
}
