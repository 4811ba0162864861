use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequestParts, Path, State},
    http::{header, request::Parts, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::info;

use crate::{errors::JsonApiError, state::AppState};

pub const JSON_MEDIA_TYPE: &str = "application/json";

/// `{id}` path segment. Any run of digits matches the route; ids beyond the
/// store's integer range can never exist and are kept as `None`.
#[derive(Debug)]
pub struct AccountId {
    raw: String,
    id: Option<i32>,
}

impl AccountId {
    fn parse(raw: String) -> Result<Self, JsonApiError> {
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(url_not_found());
        }
        let id = raw.parse::<i32>().ok();
        Ok(Self { raw, id })
    }

    /// The id if it can name a stored account.
    pub fn value(&self) -> Option<i32> {
        self.id
    }

    /// The id, or the 404 body for an account that cannot exist.
    pub fn require(&self) -> Result<i32, JsonApiError> {
        self.id.ok_or_else(|| {
            JsonApiError::not_found(format!("Account with id [{}] was not found", self.raw))
        })
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for AccountId {
    type Rejection = JsonApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| JsonApiError::from_status(e.status(), e.body_text()))?;
        Self::parse(raw)
    }
}

pub fn url_not_found() -> JsonApiError {
    JsonApiError::not_found("The requested URL was not found on the server")
}

pub async fn method_not_allowed() -> JsonApiError {
    JsonApiError::from_status(
        StatusCode::METHOD_NOT_ALLOWED,
        "The method is not allowed for the requested URL",
    )
}

/// Exact match on the Content-Type header; parameters such as charset are not accepted.
pub fn check_content_type(headers: &HeaderMap, media_type: &str) -> Result<(), JsonApiError> {
    match headers.get(header::CONTENT_TYPE).map(|v| v.to_str()) {
        Some(Ok(ct)) if ct == media_type => Ok(()),
        _ => Err(JsonApiError::unsupported_media_type(media_type)),
    }
}

fn parse_body(body: &Bytes) -> Result<Value, JsonApiError> {
    serde_json::from_slice(body).map_err(|e| {
        JsonApiError::bad_request(format!("Invalid Account: body of request contained bad or no data {e}"))
    })
}

/// Absolute URL of the account when the request names its host, else the path alone.
fn location_url(headers: &HeaderMap, id: i32) -> String {
    let path = format!("/accounts/{id}");
    match headers.get(header::HOST).and_then(|h| h.to_str().ok()) {
        Some(host) if !host.is_empty() => format!("http://{host}{path}"),
        _ => path,
    }
}

#[utoipa::path(
    post, path = "/accounts", tag = "accounts",
    request_body(content = crate::openapi::AccountInputDoc, content_type = "application/json"),
    responses(
        (status = 201, description = "Created", body = crate::openapi::AccountDoc),
        (status = 400, description = "Invalid account data"),
        (status = 415, description = "Content-Type must be application/json")
    )
)]
pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, JsonApiError> {
    info!("Request to create an Account");
    check_content_type(&headers, JSON_MEDIA_TYPE)?;
    let payload = parse_body(&body)?;

    let account = state.accounts.create(&payload).await?;
    let location = location_url(&headers, account.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(account.serialize()),
    )
        .into_response())
}

#[utoipa::path(
    get, path = "/accounts/{id}", tag = "accounts",
    params(("id" = i32, Path, description = "Account ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::AccountDoc),
        (status = 404, description = "Not Found")
    )
)]
pub async fn read(
    State(state): State<AppState>,
    id: AccountId,
) -> Result<Json<Value>, JsonApiError> {
    info!(id = %id.raw, "Request to read an Account");
    let id = id.require()?;
    let account = state.accounts.get(id).await?;
    Ok(Json(account.serialize()))
}

#[utoipa::path(
    put, path = "/accounts/{id}", tag = "accounts",
    params(("id" = i32, Path, description = "Account ID")),
    request_body(content = crate::openapi::AccountInputDoc, content_type = "application/json"),
    responses(
        (status = 200, description = "Updated", body = crate::openapi::AccountDoc),
        (status = 400, description = "Invalid account data"),
        (status = 404, description = "Not Found"),
        (status = 415, description = "Content-Type must be application/json")
    )
)]
pub async fn update(
    State(state): State<AppState>,
    id: AccountId,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, JsonApiError> {
    info!(id = %id.raw, "Request to update an Account");
    check_content_type(&headers, JSON_MEDIA_TYPE)?;

    // Unknown ids report 404 even when the body is unusable.
    let id = id.require()?;
    state.accounts.get(id).await?;
    let payload = parse_body(&body)?;

    let account = state.accounts.update(id, &payload).await?;
    Ok(Json(account.serialize()))
}

#[utoipa::path(
    delete, path = "/accounts/{id}", tag = "accounts",
    params(("id" = i32, Path, description = "Account ID")),
    responses((status = 204, description = "Deleted or never existed"))
)]
pub async fn delete(
    State(state): State<AppState>,
    id: AccountId,
) -> Result<StatusCode, JsonApiError> {
    info!(id = %id.raw, "Request to delete an Account");
    if let Some(id) = id.value() {
        state.accounts.delete(id).await?;
    }
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get, path = "/accounts", tag = "accounts",
    responses((status = 200, description = "All accounts", body = [crate::openapi::AccountDoc]))
)]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Value>>, JsonApiError> {
    info!("Request to list Accounts");
    let accounts = state.accounts.list().await?;
    Ok(Json(accounts.iter().map(|a| a.serialize()).collect()))
}
