//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;

use filmme_core::domain::PaginationPolicy;
use filmme_infra::database::DatabaseConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs the board on the in-memory store.
    pub database: Option<DatabaseConfig>,
    pub post_pages: PaginationPolicy,
    pub comment_pages: PaginationPolicy,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| {
            let defaults = DatabaseConfig::new(url);
            DatabaseConfig {
                max_connections: parse_var("DB_MAX_CONNECTIONS", defaults.max_connections),
                min_connections: parse_var("DB_MIN_CONNECTIONS", defaults.min_connections),
                ..defaults
            }
        });

        let post_pages = PaginationPolicy {
            default_page_size: parse_var(
                "COMMUNITY_PAGE_SIZE",
                PaginationPolicy::POSTS.default_page_size,
            ),
            max_page_size: parse_var(
                "COMMUNITY_MAX_PAGE_SIZE",
                PaginationPolicy::POSTS.max_page_size,
            ),
        };

        let comment_pages = PaginationPolicy {
            default_page_size: parse_var(
                "COMMENT_PAGE_SIZE",
                PaginationPolicy::COMMENTS.default_page_size,
            ),
            ..PaginationPolicy::COMMENTS
        };

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parse_var("PORT", 8080),
            database,
            post_pages: or_default(post_pages, PaginationPolicy::POSTS),
            comment_pages: or_default(comment_pages, PaginationPolicy::COMMENTS),
        }
    }
}

/// Unset or unparsable variables fall back to `default`.
fn parse_var<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, "Ignoring unparsable setting");
            default
        }),
        Err(_) => default,
    }
}

/// A policy with a zero size or a default above its maximum is unusable.
fn or_default(policy: PaginationPolicy, default: PaginationPolicy) -> PaginationPolicy {
    if policy.default_page_size == 0 || policy.default_page_size > policy.max_page_size {
        tracing::warn!(?policy, "Ignoring inconsistent page sizes");
        return default;
    }
    policy
}
