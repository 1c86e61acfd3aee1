use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use super::AccountData;
use super::ApiError;
use super::VerifyResponseBody;
use crate::domain::account::models::AccountKind;
use crate::inbound::http::router::AppState;

/// HTTP request body for session verification (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VerifyRequestBody {
    token: Option<String>,
}

pub async fn verify_user(
    State(state): State<AppState>,
    Json(body): Json<VerifyRequestBody>,
) -> Result<Json<VerifyResponseBody>, ApiError> {
    verify(state, AccountKind::User, body).await
}

pub async fn verify_organization(
    State(state): State<AppState>,
    Json(body): Json<VerifyRequestBody>,
) -> Result<Json<VerifyResponseBody>, ApiError> {
    verify(state, AccountKind::Organization, body).await
}

async fn verify(
    state: AppState,
    kind: AccountKind,
    body: VerifyRequestBody,
) -> Result<Json<VerifyResponseBody>, ApiError> {
    // An absent token decodes like any other garbage string.
    let token = body.token.unwrap_or_default();

    let profile = state.account_service.verify(kind, &token).await?;

    Ok(Json(VerifyResponseBody::new(
        kind,
        AccountData::from(&profile),
    )))
}
