/// User account API routes
use crate::{
    api::{ApiResult, LimitQuery},
    error::{Endpoint, ServerError},
    services::{identity::Registration, LoginGrant},
    state::AppState,
};
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use warden_core::{ProfileFields, PublicUser};

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub msg: String,
}

impl MessageResponse {
    fn new(msg: impl Into<String>) -> Json<Self> {
        Json(Self { msg: msg.into() })
    }
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub msg: String,
    #[serde(rename = "User")]
    pub user: PublicUser,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    #[serde(default)]
    pub username: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    #[serde(flatten)]
    pub changes: ProfileFields,
}

/// Unwrap a JSON body, reporting a malformed one as a bad request
fn body<T>(payload: Result<Json<T>, JsonRejection>, endpoint: Endpoint) -> ApiResult<T> {
    payload
        .map(|Json(value)| value)
        .map_err(|rejection| ServerError::BadRequest(rejection.body_text()).at(endpoint))
}

/// POST /api/users/register
pub async fn register(
    State(app_state): State<AppState>,
    payload: Result<Json<Registration>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let registration = body(payload, Endpoint::Register)?;

    let user_id = app_state
        .identity
        .register(registration)
        .await
        .map_err(|e| e.at(Endpoint::Register))?;

    Ok((
        StatusCode::CREATED,
        MessageResponse::new(format!("User Register Successfully, userId is {user_id}")),
    ))
}

/// POST /api/users/login
pub async fn login(
    State(app_state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginGrant>> {
    let req = body(payload, Endpoint::Login)?;

    let grant = app_state
        .identity
        .login(&req.username, &req.password)
        .await
        .map_err(|e| e.at(Endpoint::Login))?;

    Ok(Json(grant))
}

/// POST /api/users/verify
pub async fn verify(
    State(app_state): State<AppState>,
    payload: Result<Json<VerifyRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<VerifyResponse>)> {
    let req = body(payload, Endpoint::Verify)?;

    let user = app_state
        .identity
        .verify(&req.username)
        .await
        .map_err(|e| e.at(Endpoint::Verify))?;

    Ok((
        StatusCode::CREATED,
        Json(VerifyResponse {
            msg: "User Verified Successfully".to_string(),
            user,
        }),
    ))
}

/// GET /api/users?limit=
pub async fn list_users(
    State(app_state): State<AppState>,
    Query(query): Query<LimitQuery>,
) -> ApiResult<(StatusCode, Json<Vec<PublicUser>>)> {
    let users = app_state
        .identity
        .list_users(query.limit())
        .await
        .map_err(|e| e.at(Endpoint::ListUsers))?;

    Ok((StatusCode::CREATED, Json(users)))
}

/// GET /api/users/:username
pub async fn get_user(
    State(app_state): State<AppState>,
    Path(username): Path<String>,
) -> ApiResult<Json<PublicUser>> {
    fetch_user(&app_state, &username).await
}

/// GET on a static route such as `/api/users/login`, read as a username
pub async fn get_user_named(
    State(app_state): State<AppState>,
    username: &'static str,
) -> ApiResult<Json<PublicUser>> {
    fetch_user(&app_state, username).await
}

async fn fetch_user(app_state: &AppState, username: &str) -> ApiResult<Json<PublicUser>> {
    let user = app_state
        .identity
        .get_user(username)
        .await
        .map_err(|e| e.at(Endpoint::GetUser))?;

    Ok(Json(user))
}

/// PUT /api/users/update
pub async fn update_user(
    State(app_state): State<AppState>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let req = body(payload, Endpoint::UpdateUser)?;

    app_state
        .identity
        .update_user(req.user_id.as_deref(), req.changes)
        .await
        .map_err(|e| e.at(Endpoint::UpdateUser))?;

    Ok(MessageResponse::new("Record Updated...!"))
}

/// DELETE /api/users/:userId
///
/// Also mounted without the path segment so a missing id reaches the
/// service and is reported as such.
pub async fn delete_user(
    State(app_state): State<AppState>,
    user_id: Option<Path<String>>,
) -> ApiResult<Json<MessageResponse>> {
    let user_id = user_id.map(|Path(id)| id);

    app_state
        .identity
        .delete_user(user_id.as_deref())
        .await
        .map_err(|e| e.at(Endpoint::DeleteUser))?;

    Ok(MessageResponse::new("Record Deleted...!"))
}
