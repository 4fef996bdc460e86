use crate::domain::documents::{Document, DocumentStore, StoreError, Subscription};
use crate::infrastructure::db::DbPool;
use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::FromRow;
use sqlx::postgres::PgListener;
use sqlx::types::Json;
use tokio::sync::watch;
use uuid::Uuid;

/// Channel the `documents` trigger notifies with the changed collection name.
pub const CHANGE_CHANNEL: &str = "document_changes";

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Unavailable(e.to_string())
    }
}

#[derive(Debug, FromRow)]
struct DocumentRow {
    id: Uuid,
    data: Json<Map<String, Value>>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Document::new(row.id.to_string(), row.data.0)
    }
}

/// Document store backed by a JSONB table.
#[derive(Clone)]
pub struct PostgresDocumentStore {
    pool: DbPool,
}

impl PostgresDocumentStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    async fn ordered(&self, collection: &str, field: &str) -> Result<Vec<Document>, StoreError> {
        // COLLATE "C" keeps text order byte-wise so ISO-8601 timestamps sort chronologically
        let rows = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, data
            FROM documents
            WHERE collection = $1 AND data ? $2::text
            ORDER BY data->>$2::text COLLATE "C" DESC, inserted_at DESC
            "#,
        )
        .bind(collection)
        .bind(field)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Document::from).collect())
    }
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    #[tracing::instrument(skip(self, data))]
    async fn insert(
        &self,
        collection: &str,
        data: Map<String, Value>,
    ) -> Result<String, StoreError> {
        let id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO documents (collection, data)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(collection)
        .bind(Json(data))
        .fetch_one(&self.pool)
        .await?;

        Ok(id.to_string())
    }

    #[tracing::instrument(skip(self))]
    async fn query_equals(
        &self,
        collection: &str,
        field: &str,
        value: &str,
    ) -> Result<Vec<Document>, StoreError> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, data
            FROM documents
            WHERE collection = $1 AND data->>$2::text = $3
            ORDER BY inserted_at
            "#,
        )
        .bind(collection)
        .bind(field)
        .bind(value)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Document::from).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn subscribe_ordered_desc(
        &self,
        collection: &str,
        field: &str,
    ) -> Result<Subscription, StoreError> {
        // Listen before the first read so no insert falls in between
        let mut listener = PgListener::connect_with(&self.pool).await?;
        listener.listen(CHANGE_CHANNEL).await?;

        let initial = self.ordered(collection, field).await?;
        let (tx, rx) = watch::channel(initial);

        let store = self.clone();
        let collection = collection.to_string();
        let field = field.to_string();

        let worker = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = tx.closed() => break,
                    notification = listener.recv() => match notification {
                        Ok(n) if n.payload() != collection => continue,
                        Ok(_) => match store.ordered(&collection, &field).await {
                            Ok(snapshot) => {
                                if tx.send(snapshot).is_err() {
                                    break;
                                }
                            }
                            Err(e) => {
                                tracing::error!(collection = %collection, error = %e, "Failed to refresh live query");
                            }
                        },
                        Err(e) => {
                            tracing::error!(collection = %collection, error = %e, "Live query listener failed");
                            break;
                        }
                    },
                }
            }
            tracing::debug!(collection = %collection, "Live query closed");
        });

        Ok(Subscription::new(rx, worker))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
