//! Account handlers: registration, login and the current user.

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use filmme_core::domain::User;
use filmme_core::ports::{PasswordService, TokenService};
use filmme_shared::dto::{AuthResponse, LoginRequest, RegisterUserRequest, UserResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const PASSWORD_MIN_CHARS: usize = 8;
const NICKNAME_MAX_CHARS: usize = 30;

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let email = req.email.trim().to_lowercase();
    let nickname = req.nickname.trim().to_string();

    // Validate input
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::BadRequest("Invalid email address".to_string()));
    }
    if req.password.chars().count() < PASSWORD_MIN_CHARS {
        return Err(AppError::BadRequest(format!(
            "Password must be at least {PASSWORD_MIN_CHARS} characters"
        )));
    }
    if nickname.is_empty() || nickname.chars().count() > NICKNAME_MAX_CHARS {
        return Err(AppError::BadRequest(format!(
            "Nickname must be 1 to {NICKNAME_MAX_CHARS} characters"
        )));
    }

    if state.users.find_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict("Email already registered".to_string()));
    }

    let password_hash = password_service
        .hash(&req.password)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    // A concurrent registration surfaces as a unique violation -> 409.
    let user = state
        .users
        .create(User::new(email, nickname, password_hash))
        .await?;

    tracing::info!(user_id = %user.id, "User registered");

    Ok(HttpResponse::Created().json(issue_token(&token_service, &user)?))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    password_service: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state
        .users
        .find_by_email(&req.email.trim().to_lowercase())
        .await?
        .ok_or(AppError::Unauthorized)?;

    let valid = password_service
        .verify(&req.password, &user.password_hash)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    if !valid {
        return Err(AppError::Unauthorized);
    }

    Ok(HttpResponse::Ok().json(issue_token(&token_service, &user)?))
}

/// GET /api/auth/me - Protected route
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state
        .users
        .find_by_id(identity.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User no longer exists".to_string()))?;

    Ok(HttpResponse::Ok().json(UserResponse {
        id: user.id,
        email: user.email,
        nickname: user.nickname,
        created_at: user.created_at,
    }))
}

fn issue_token(token_service: &Arc<dyn TokenService>, user: &User) -> AppResult<AuthResponse> {
    let access_token = token_service
        .generate_token(user.id, &user.email, vec!["user".to_string()])
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(AuthResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: token_service.expiration_seconds().max(0) as u64,
    })
}
