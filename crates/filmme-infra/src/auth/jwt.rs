//! JWT token service implementation.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use filmme_core::ports::{AuthError, TokenClaims, TokenService};

const DEFAULT_SECRET: &str = "change-me-in-production";
const DEFAULT_ISSUER: &str = "filmme-community";

/// JWT token service configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
    pub issuer: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: DEFAULT_SECRET.to_string(),
            expiration_hours: 24,
            issuer: DEFAULT_ISSUER.to_string(),
        }
    }
}

impl JwtConfig {
    /// Read `JWT_SECRET`, `JWT_EXPIRATION_HOURS` and `JWT_ISSUER`.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let secret = std::env::var("JWT_SECRET").unwrap_or(defaults.secret);
        if secret == DEFAULT_SECRET {
            let is_production = std::env::var("RUST_ENV")
                .map(|v| v == "production" || v == "prod")
                .unwrap_or(false);

            if is_production {
                tracing::error!(
                    "SECURITY: Using default JWT secret in production! Set JWT_SECRET environment variable."
                );
            } else {
                tracing::warn!("Using default JWT secret. Set JWT_SECRET for production use.");
            }
        }

        Self {
            secret,
            expiration_hours: std::env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.expiration_hours),
            issuer: std::env::var("JWT_ISSUER").unwrap_or(defaults.issuer),
        }
    }
}

/// Wire format of the token payload.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// User id.
    sub: String,
    email: String,
    roles: Vec<String>,
    exp: i64,
    iat: i64,
    iss: String,
}

impl Claims {
    fn issue(user_id: Uuid, email: &str, roles: Vec<String>, ttl: TimeDelta, iss: &str) -> Self {
        let issued_at = Utc::now();
        Self {
            sub: user_id.to_string(),
            email: email.to_owned(),
            roles,
            exp: (issued_at + ttl).timestamp(),
            iat: issued_at.timestamp(),
            iss: iss.to_owned(),
        }
    }
}

impl TryFrom<Claims> for TokenClaims {
    type Error = AuthError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        let user_id = claims
            .sub
            .parse()
            .map_err(|_| AuthError::InvalidToken("subject is not a user id".to_string()))?;

        Ok(TokenClaims {
            user_id,
            email: claims.email,
            roles: claims.roles,
            exp: claims.exp,
        })
    }
}

fn decode_error(err: jsonwebtoken::errors::Error) -> AuthError {
    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        ErrorKind::InvalidIssuer => {
            AuthError::InvalidToken("token was issued by another service".to_string())
        }
        _ => AuthError::InvalidToken(err.to_string()),
    }
}

/// HS256 JWT token service.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    ttl: TimeDelta,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let secret = config.secret.as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_issuer(&[&config.issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            issuer: config.issuer,
            ttl: TimeDelta::hours(config.expiration_hours),
        }
    }

    pub fn from_env() -> Self {
        Self::new(JwtConfig::from_env())
    }
}

impl TokenService for JwtTokenService {
    fn generate_token(
        &self,
        user_id: Uuid,
        email: &str,
        roles: Vec<String>,
    ) -> Result<String, AuthError> {
        let claims = Claims::issue(user_id, email, roles, self.ttl, &self.issuer);

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidToken(format!("cannot sign token: {e}")))
    }

    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(decode_error)?
            .claims
            .try_into()
    }

    fn expiration_seconds(&self) -> i64 {
        self.ttl.num_seconds()
    }
}
