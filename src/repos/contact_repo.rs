/*
 * Responsibility
 * - contact コレクション向けのドキュメント定義と insert
 * - source / status / timestamps はここで固定する (呼び出し側からは渡せない)
 */
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info};

use crate::repos::error::RepoError;
use crate::services::database::{Database, DbError};

pub const CONTACT_COLLECTION: &str = "contact";

const SOURCE_WEBSITE: &str = "website";
const STATUS_NEW: &str = "new";

#[derive(Debug, Clone, Serialize)]
pub struct ContactRecord {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub source: &'static str,
    pub status: &'static str,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl ContactRecord {
    fn new(name: &str, email: &str, phone: Option<&str>, message: &str) -> Self {
        let now = Utc::now();
        Self {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.map(str::to_string),
            message: message.to_string(),
            source: SOURCE_WEBSITE,
            status: STATUS_NEW,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Insert one contact submission and return the id the database assigned.
pub async fn create(
    db: &Database,
    name: &str,
    email: &str,
    phone: Option<&str>,
    message: &str,
) -> Result<String, RepoError> {
    let gateway = db.gateway()?;

    let record = ContactRecord::new(name, email, phone, message);
    let document = bson::to_document(&record).map_err(DbError::from)?;

    match gateway.insert(CONTACT_COLLECTION, document).await {
        Ok(id) => {
            info!(%id, backend = gateway.backend_name(), "contact stored");
            Ok(id)
        }
        Err(e) => {
            error!(error = %e, backend = gateway.backend_name(), "contact insert failed");
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use bson::Bson;

    use super::*;
    use crate::services::database::memory::MemoryGateway;

    #[tokio::test]
    async fn stores_one_document_with_fixed_fields() {
        let gateway = MemoryGateway::new();
        let db = Database::configured(gateway.clone());

        let id = create(
            &db,
            "Ada Lovelace",
            "ada@example.com",
            None,
            "Interested in your services.",
        )
        .await
        .unwrap();

        let docs = gateway.documents(CONTACT_COLLECTION);
        assert_eq!(docs.len(), 1);
        let doc = &docs[0];
        assert_eq!(doc.get_object_id("_id").unwrap().to_hex(), id);
        assert_eq!(doc.get_str("name").unwrap(), "Ada Lovelace");
        assert_eq!(doc.get_str("email").unwrap(), "ada@example.com");
        assert_eq!(doc.get("phone"), Some(&Bson::Null));
        assert_eq!(doc.get_str("source").unwrap(), "website");
        assert_eq!(doc.get_str("status").unwrap(), "new");
        let created_at = doc.get_datetime("created_at").unwrap();
        let updated_at = doc.get_datetime("updated_at").unwrap();
        assert_eq!(created_at, updated_at);
    }

    #[tokio::test]
    async fn keeps_phone_when_given() {
        let gateway = MemoryGateway::new();
        let db = Database::configured(gateway.clone());

        create(&db, "Bo", "bo@example.org", Some("+49 30 1234"), "Hello there")
            .await
            .unwrap();

        let docs = gateway.documents(CONTACT_COLLECTION);
        assert_eq!(docs[0].get_str("phone").unwrap(), "+49 30 1234");
    }

    #[tokio::test]
    async fn unconfigured_database_is_unavailable() {
        let result = create(
            &Database::Unconfigured,
            "Ada",
            "ada@example.com",
            None,
            "Hello there",
        )
        .await;

        assert!(matches!(result, Err(RepoError::Db(DbError::Unavailable))));
    }

    #[tokio::test]
    async fn backend_failure_stores_nothing() {
        let gateway = MemoryGateway::failing("connection refused");
        let db = Database::configured(gateway.clone());

        let result = create(&db, "Ada", "ada@example.com", None, "Hello there").await;

        match result {
            Err(RepoError::Db(DbError::Backend(message))) => {
                assert_eq!(message, "connection refused")
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(gateway.documents(CONTACT_COLLECTION).is_empty());
    }
}
