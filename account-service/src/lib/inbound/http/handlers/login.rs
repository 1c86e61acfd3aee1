use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use super::AccountData;
use super::ApiError;
use super::SessionResponseBody;
use crate::domain::account::errors::AccountError;
use crate::domain::account::models::AccountKind;
use crate::domain::account::models::EmailAddress;
use crate::inbound::http::router::AppState;

/// HTTP request body for login (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginRequestBody {
    email: Option<String>,
    password: Option<String>,
}

pub async fn login_user(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<Json<SessionResponseBody>, ApiError> {
    login(state, AccountKind::User, body).await
}

pub async fn login_organization(
    State(state): State<AppState>,
    Json(body): Json<LoginRequestBody>,
) -> Result<Json<SessionResponseBody>, ApiError> {
    login(state, AccountKind::Organization, body).await
}

async fn login(
    state: AppState,
    kind: AccountKind,
    body: LoginRequestBody,
) -> Result<Json<SessionResponseBody>, ApiError> {
    // An absent or unparseable email cannot belong to any account; reject it
    // with the same error a wrong password gets.
    let email = EmailAddress::new(body.email.unwrap_or_default())
        .map_err(|_| ApiError::from(AccountError::InvalidCredentials))?;
    let password = body.password.unwrap_or_default();

    let session = state.account_service.login(kind, &email, &password).await?;

    Ok(Json(SessionResponseBody::new(
        kind,
        session.token,
        AccountData::from(&session.account),
    )))
}
