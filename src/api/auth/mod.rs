//! Authentication API endpoints
//!
//! Login and registration issue bearer tokens; profile requires one; validate
//! decodes a token passed in the body.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use validator::{Validate, ValidationError};

use crate::api::middleware::RequireClaims;
use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, ValidatedJson};
use crate::domain::user::User;
use crate::domain::DomainError;
use crate::infrastructure::auth::JwtClaims;
use crate::infrastructure::observability::{
    record_auth_event, record_token_validation, AuthEvent,
};
use crate::infrastructure::user::RegisterUserRequest;

const DUPLICATE_USER_MESSAGE: &str = "Username or email already exists.";

/// Create the authentication router
pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/register", post(register))
        .route("/profile", get(get_profile))
        .route("/validate", post(validate_token))
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(custom(function = "not_blank", message = "The Username field is required."))]
    pub username: String,
    #[validate(custom(function = "not_blank", message = "The Password field is required."))]
    pub password: String,
}

/// Empty and whitespace-only values count as missing
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// Registration request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(
        min = 3,
        max = 50,
        message = "Username must be between 3 and 50 characters."
    ))]
    pub username: String,
    #[validate(email(message = "The Email field is not a valid e-mail address."))]
    pub email: String,
    #[validate(length(
        min = 6,
        max = 100,
        message = "Password must be between 6 and 100 characters."
    ))]
    pub password: String,
}

/// Token issued on login or registration
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub expires_at: String,
}

/// Profile of the authenticated user (no password verifier)
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: String,
    pub created_at: String,
    pub is_active: bool,
}

impl ProfileResponse {
    fn from_user(user: &User) -> Self {
        Self {
            id: user.id().value(),
            username: user.username().to_string(),
            email: user.email().to_string(),
            role: user.role().to_string(),
            created_at: user.created_at().to_rfc3339(),
            is_active: user.is_active(),
        }
    }
}

/// Result of an explicit token check
#[derive(Debug, Serialize)]
pub struct ValidateTokenResponse {
    pub message: String,
    pub username: String,
    pub role: String,
    pub claims: Vec<ClaimEntry>,
}

#[derive(Debug, Serialize)]
pub struct ClaimEntry {
    #[serde(rename = "type")]
    pub claim_type: String,
    pub value: String,
}

impl ClaimEntry {
    fn new(claim_type: &str, value: impl ToString) -> Self {
        Self {
            claim_type: claim_type.to_string(),
            value: value.to_string(),
        }
    }
}

fn claim_entries(claims: &JwtClaims) -> Vec<ClaimEntry> {
    vec![
        ClaimEntry::new("sub", &claims.sub),
        ClaimEntry::new("username", &claims.username),
        ClaimEntry::new("email", &claims.email),
        ClaimEntry::new("role", &claims.role),
        ClaimEntry::new("iat", claims.iat),
        ClaimEntry::new("nbf", claims.nbf),
        ClaimEntry::new("exp", claims.exp),
        ClaimEntry::new("iss", &claims.iss),
        ClaimEntry::new("aud", &claims.aud),
    ]
}

fn issue_token(state: &AppState, user: &User) -> Result<AuthResponse, ApiError> {
    let issued = state.token_authority.mint(user)?;

    Ok(AuthResponse {
        token: issued.token.clone(),
        username: user.username().to_string(),
        email: user.email().to_string(),
        role: user.role().to_string(),
        expires_at: issued.expires_at().to_rfc3339(),
    })
}

/// Login with username and password
///
/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let user = match state
        .user_service
        .authenticate(&request.username, &request.password)
        .await
    {
        Ok(user) => user,
        Err(e) => {
            record_auth_event(AuthEvent::Login, false);
            warn!(username = %request.username, "Login failed");
            return Err(e.into());
        }
    };

    let response = issue_token(&state, &user)?;

    record_auth_event(AuthEvent::Login, true);
    info!(user_id = %user.id(), "User logged in");

    Ok(Json(response))
}

/// Register a new user and log them in
///
/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    if state
        .user_service
        .exists(&request.username, &request.email)
        .await?
    {
        record_auth_event(AuthEvent::Register, false);
        return Err(ApiError::bad_request(DUPLICATE_USER_MESSAGE).with_code("conflict"));
    }

    // A concurrent registration can still win between the check and the insert
    let user = state
        .user_service
        .register(RegisterUserRequest::new(
            request.username,
            request.email,
            request.password,
        ))
        .await
        .inspect_err(|_| record_auth_event(AuthEvent::Register, false))?;

    let response = issue_token(&state, &user)?;
    record_auth_event(AuthEvent::Register, true);

    Ok((StatusCode::CREATED, Json(response)))
}

/// Get the profile of the token's subject
///
/// GET /api/auth/profile
pub async fn get_profile(
    State(state): State<AppState>,
    RequireClaims(claims): RequireClaims,
) -> Result<Json<ProfileResponse>, ApiError> {
    let Some(user_id) = claims.subject_id() else {
        debug!(sub = %claims.sub, "Token subject is not a user id");
        return Err(DomainError::InvalidToken.into());
    };

    let user = state
        .user_service
        .get_by_id(user_id)
        .await
        .map_err(|e| match e {
            DomainError::NotFound { .. } => ApiError::not_found("User not found."),
            other => other.into(),
        })?;

    Ok(Json(ProfileResponse::from_user(&user)))
}

/// Validate a token passed as a JSON string body
///
/// POST /api/auth/validate
pub async fn validate_token(
    State(state): State<AppState>,
    Json(token): Json<Option<String>>,
) -> Result<Json<ValidateTokenResponse>, ApiError> {
    let Some(token) = token.filter(|t| !t.is_empty()) else {
        return Err(ApiError::bad_request("Token is required.").with_param("token"));
    };

    let claims = state.token_authority.validate(&token).map_err(|e| {
        record_token_validation(false);
        ApiError::from(e)
    })?;
    record_token_validation(true);

    Ok(Json(ValidateTokenResponse {
        message: "Token is valid.".to_string(),
        username: claims.username.clone(),
        role: claims.role.clone(),
        claims: claim_entries(&claims),
    }))
}
