//! Database gateway interface used by repositories and the diagnostic endpoint.
use std::sync::Arc;

use async_trait::async_trait;
use bson::Document;
use thiserror::Error;

/// Result type for gateway operations.
pub type DbResult<T> = Result<T, DbError>;

/// Gateway-layer errors.
///
/// Kept independent from `AppError`; the HTTP layer decides the status code.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("database is not configured")]
    Unavailable,
    #[error("database client could not be created: {0}")]
    ClientInit(String),
    #[error("document serialization failed: {0}")]
    Serialization(String),
    #[error("{0}")]
    Backend(String),
}

impl From<bson::ser::Error> for DbError {
    fn from(e: bson::ser::Error) -> Self {
        DbError::Serialization(e.to_string())
    }
}

/// The two operations this service needs from a document database.
///
/// Implementations must be shareable across request tasks.
#[async_trait]
pub trait DatabaseGateway: Send + Sync + 'static {
    // Returns the backend name (for logging).
    fn backend_name(&self) -> &'static str;

    // Insert one document and return the identifier the backend assigned.
    async fn insert(&self, collection: &str, document: Document) -> DbResult<String>;

    // Names of the collections in the configured database, in backend order.
    async fn list_collection_names(&self) -> DbResult<Vec<String>>;
}

/// Database handle carried in `AppState`.
///
/// `Unconfigured` replaces a null connection: handlers match on it instead of
/// checking for a missing client. `Unusable` means settings were given but no
/// client could be built from them.
#[derive(Clone, Default)]
pub enum Database {
    #[default]
    Unconfigured,
    Unusable { reason: String },
    Configured(Arc<dyn DatabaseGateway>),
}

impl Database {
    pub fn configured(gateway: impl DatabaseGateway) -> Self {
        Self::Configured(Arc::new(gateway))
    }

    pub fn is_configured(&self) -> bool {
        matches!(self, Self::Configured(_))
    }

    /// The gateway, or the error explaining why there is none.
    pub fn gateway(&self) -> DbResult<&dyn DatabaseGateway> {
        match self {
            Self::Configured(gateway) => Ok(gateway.as_ref()),
            Self::Unusable { reason } => Err(DbError::ClientInit(reason.clone())),
            Self::Unconfigured => Err(DbError::Unavailable),
        }
    }
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unconfigured => f.write_str("Unconfigured"),
            Self::Unusable { reason } => f.debug_struct("Unusable").field("reason", reason).finish(),
            Self::Configured(gateway) => f
                .debug_tuple("Configured")
                .field(&gateway.backend_name())
                .finish(),
        }
    }
}
