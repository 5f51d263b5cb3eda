//! Fixtures shared by handler tests.

use std::sync::Arc;

use filmme_core::domain::PaginationPolicy;
use filmme_core::ports::{PasswordService, TokenService};
use filmme_infra::{Argon2PasswordService, JwtConfig, JwtTokenService};
use uuid::Uuid;

use crate::state::AppState;

/// Build a test service over `$state` with the production route table.
macro_rules! test_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(actix_web::middleware::NormalizePath::trim())
                .app_data(actix_web::web::Data::new($state.clone()))
                .app_data(actix_web::web::Data::new($crate::handlers::testing::tokens()))
                .app_data(actix_web::web::Data::new($crate::handlers::testing::passwords()))
                .configure($crate::handlers::configure_routes),
        )
        .await
    };
}

pub fn state() -> AppState {
    AppState::in_memory(PaginationPolicy::POSTS, PaginationPolicy::COMMENTS)
}

pub fn tokens() -> Arc<dyn TokenService> {
    Arc::new(JwtTokenService::new(JwtConfig {
        secret: "handler-test-secret".to_string(),
        ..JwtConfig::default()
    }))
}

pub fn passwords() -> Arc<dyn PasswordService> {
    Arc::new(Argon2PasswordService::new())
}

/// `Authorization` header for `user_id`.
pub fn bearer(user_id: Uuid) -> (&'static str, String) {
    let token = tokens()
        .generate_token(user_id, "member@filmme.test", vec!["user".to_string()])
        .expect("token");
    ("Authorization", format!("Bearer {token}"))
}
