use std::time::Duration;

use async_trait::async_trait;
use bson::{Bson, Document};
use mongodb::{Client, options::ClientOptions};

use crate::services::database::client::{DatabaseGateway, DbError, DbResult};

impl From<mongodb::error::Error> for DbError {
    fn from(e: mongodb::error::Error) -> Self {
        DbError::Backend(e.to_string())
    }
}

/// MongoDB-backed gateway.
///
/// The driver connects lazily: building the client only parses the URL, so a
/// server that is down shows up on the first operation, not here.
#[derive(Clone, Debug)]
pub struct MongoGateway {
    client: Client,
    db_name: String,
}

impl MongoGateway {
    // Create a gateway from a URL like `mongodb://localhost:27017`
    pub async fn new(
        url: &str,
        db_name: &str,
        server_selection_timeout: Duration,
    ) -> Result<Self, DbError> {
        let mut options = ClientOptions::parse(url).await?;
        options
            .server_selection_timeout
            .get_or_insert(server_selection_timeout);
        options
            .app_name
            .get_or_insert_with(|| env!("CARGO_PKG_NAME").to_string());

        let client = Client::with_options(options)?;

        Ok(Self {
            client,
            db_name: db_name.to_string(),
        })
    }
}

#[async_trait]
impl DatabaseGateway for MongoGateway {
    fn backend_name(&self) -> &'static str {
        "mongodb"
    }

    async fn insert(&self, collection: &str, document: Document) -> DbResult<String> {
        let result = self
            .client
            .database(&self.db_name)
            .collection::<Document>(collection)
            .insert_one(document)
            .await?;

        Ok(inserted_id_to_string(result.inserted_id))
    }

    async fn list_collection_names(&self) -> DbResult<Vec<String>> {
        let names = self
            .client
            .database(&self.db_name)
            .list_collection_names()
            .await?;

        Ok(names)
    }
}

// ObjectIds are reported as plain hex; other id types fall back to their string form.
fn inserted_id_to_string(id: Bson) -> String {
    match id {
        Bson::ObjectId(oid) => oid.to_hex(),
        Bson::String(s) => s,
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use bson::oid::ObjectId;

    use super::*;

    #[test]
    fn object_id_is_hex() {
        let oid = ObjectId::new();
        assert_eq!(inserted_id_to_string(Bson::ObjectId(oid)), oid.to_hex());
    }

    #[test]
    fn string_id_is_unquoted() {
        assert_eq!(inserted_id_to_string(Bson::String("abc".into())), "abc");
    }

    #[test]
    fn other_ids_use_display() {
        assert_eq!(inserted_id_to_string(Bson::Int32(7)), "7");
    }

    #[tokio::test]
    async fn unparseable_url_is_an_error() {
        let result = MongoGateway::new("not-a-url", "comphilfe", Duration::from_secs(1)).await;
        assert!(matches!(result, Err(DbError::Backend(_))));
    }

    #[tokio::test]
    async fn client_is_built_without_a_server() {
        let gateway = MongoGateway::new(
            "mongodb://127.0.0.1:1",
            "comphilfe",
            Duration::from_millis(50),
        )
        .await
        .unwrap();

        assert_eq!(gateway.backend_name(), "mongodb");
        assert_eq!(gateway.db_name, "comphilfe");
    }
}
