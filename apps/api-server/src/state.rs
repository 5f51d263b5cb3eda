//! Application state - shared across all handlers.

use std::sync::Arc;

use filmme_core::CommunityService;
use filmme_core::domain::PaginationPolicy;
use filmme_core::ports::UserRepository;
use filmme_infra::database::{DatabaseConnections, InMemoryStore};

use crate::config::AppConfig;

#[cfg(feature = "postgres")]
use filmme_infra::database::{
    PostgresCommentRepository, PostgresLikeRepository, PostgresPostRepository,
    PostgresUserRepository,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub community: Arc<CommunityService>,
    /// Set when the board runs on PostgreSQL.
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the application state, falling back to the in-memory store
    /// when no database is configured or reachable.
    pub async fn new(config: &AppConfig) -> Self {
        #[cfg(feature = "postgres")]
        {
            if let Some(db_config) = &config.database {
                match DatabaseConnections::init(db_config).await {
                    Ok(connections) => {
                        tracing::info!("Application state initialized (postgres)");
                        return Self::postgres(Arc::new(connections), config);
                    }
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            }
        }

        #[cfg(not(feature = "postgres"))]
        tracing::info!("Running without postgres feature - using in-memory store");

        tracing::info!("Application state initialized (in-memory)");
        Self::in_memory(config.post_pages, config.comment_pages)
    }

    /// State backed by a fresh in-memory store.
    pub fn in_memory(post_pages: PaginationPolicy, comment_pages: PaginationPolicy) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let community = CommunityService::new(store.clone(), store.clone(), store.clone())
            .with_pagination(post_pages, comment_pages);

        Self {
            users: store,
            community: Arc::new(community),
            db: None,
        }
    }

    #[cfg(feature = "postgres")]
    fn postgres(connections: Arc<DatabaseConnections>, config: &AppConfig) -> Self {
        let conn = &connections.main;
        let community = CommunityService::new(
            Arc::new(PostgresPostRepository::new(conn.clone())),
            Arc::new(PostgresCommentRepository::new(conn.clone())),
            Arc::new(PostgresLikeRepository::new(conn.clone())),
        )
        .with_pagination(config.post_pages, config.comment_pages);

        Self {
            users: Arc::new(PostgresUserRepository::new(conn.clone())),
            community: Arc::new(community),
            db: Some(connections),
        }
    }
}
