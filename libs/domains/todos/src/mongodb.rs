//! MongoDB implementation of TodoRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    bson::{self, Bson, Document, doc},
    options::{FindOptions, IndexOptions},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{TodoError, TodoResult};
use crate::models::{Todo, TodoFilter, TodoPriority, TodoQuery, TodoStats};
use crate::repository::TodoRepository;

pub const COLLECTION_NAME: &str = "todos";

/// Stored shape of a todo.
///
/// `_id` holds the UUID as a string and timestamps are BSON dates, so the
/// collection stays readable from the shell and sorts like the API does.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoDocument {
    #[serde(rename = "_id")]
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    completed: bool,
    #[serde(default)]
    priority: TodoPriority,
    category: String,
    #[serde(default)]
    due_date: Option<bson::DateTime>,
    created_at: bson::DateTime,
    updated_at: bson::DateTime,
}

fn to_bson_date(dt: DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(dt.timestamp_millis())
}

fn from_bson_date(dt: bson::DateTime) -> TodoResult<DateTime<Utc>> {
    DateTime::from_timestamp_millis(dt.timestamp_millis())
        .ok_or_else(|| TodoError::Database(format!("date out of range: {}", dt)))
}

impl From<&Todo> for TodoDocument {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id.to_string(),
            title: todo.title.clone(),
            description: todo.description.clone(),
            completed: todo.completed,
            priority: todo.priority,
            category: todo.category.clone(),
            due_date: todo.due_date.map(to_bson_date),
            created_at: to_bson_date(todo.created_at),
            updated_at: to_bson_date(todo.updated_at),
        }
    }
}

impl TryFrom<TodoDocument> for Todo {
    type Error = TodoError;

    fn try_from(doc: TodoDocument) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&doc.id)
            .map_err(|_| TodoError::Database(format!("stored todo has malformed _id: {}", doc.id)))?;

        Ok(Todo {
            id,
            title: doc.title,
            description: doc.description,
            completed: doc.completed,
            priority: doc.priority,
            category: doc.category,
            due_date: doc.due_date.map(from_bson_date).transpose()?,
            created_at: from_bson_date(doc.created_at)?,
            updated_at: from_bson_date(doc.updated_at)?,
        })
    }
}

fn id_filter(id: Uuid) -> Document {
    doc! { "_id": id.to_string() }
}

/// Reads an aggregation count regardless of the numeric width the server chose.
fn count_field(doc: &Document, key: &str) -> u64 {
    match doc.get(key) {
        Some(Bson::Int32(n)) => (*n).max(0) as u64,
        Some(Bson::Int64(n)) => (*n).max(0) as u64,
        Some(Bson::Double(n)) => n.max(0.0) as u64,
        _ => 0,
    }
}

/// MongoDB implementation of the TodoRepository
pub struct MongoTodoRepository {
    collection: Collection<TodoDocument>,
}

impl MongoTodoRepository {
    /// # Example
    /// ```ignore
    /// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
    /// let repo = MongoTodoRepository::new(client.database("stickytasks"));
    /// ```
    pub fn new(db: Database) -> Self {
        Self::with_collection(db, COLLECTION_NAME)
    }

    /// Create a new MongoTodoRepository with a custom collection name
    pub fn with_collection(db: Database, collection_name: &str) -> Self {
        let collection = db.collection::<TodoDocument>(collection_name);
        Self { collection }
    }

    /// Create the compound indexes backing the common list queries.
    ///
    /// Idempotent; safe to call on every startup.
    pub async fn init_indexes(&self) -> TodoResult<()> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "completed": 1, "createdAt": -1 })
                .options(
                    IndexOptions::builder()
                        .name("completed_createdAt".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "priority": 1, "createdAt": -1 })
                .options(
                    IndexOptions::builder()
                        .name("priority_createdAt".to_string())
                        .build(),
                )
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!(collection = %self.collection.name(), "Todo indexes ensured");
        Ok(())
    }

    /// Build a MongoDB filter document from TodoFilter
    fn build_filter(filter: &TodoFilter) -> Document {
        let mut doc = doc! {};

        if let Some(completed) = filter.completed {
            doc.insert("completed", completed);
        }

        if let Some(priority) = filter.priority {
            doc.insert("priority", priority.to_string());
        }

        if let Some(ref category) = filter.category {
            // Substring match; user input never acts as a pattern
            doc.insert(
                "category",
                doc! { "$regex": regex::escape(category), "$options": "i" },
            );
        }

        doc
    }

    fn build_sort(query: &TodoQuery) -> Document {
        let direction = query.sort.order.direction();
        let mut sort = Document::new();
        sort.insert(query.sort.field.as_str(), direction);
        sort.insert("_id", direction);
        sort
    }

    fn stats_pipeline() -> Vec<Document> {
        let count_if = |cond: Document| doc! { "$sum": { "$cond": [cond, 1, 0] } };

        vec![doc! {
            "$group": {
                "_id": Bson::Null,
                "total": { "$sum": 1 },
                "completed": count_if(doc! { "$eq": ["$completed", true] }),
                "highPriority": count_if(doc! { "$eq": ["$priority", "high"] }),
                "mediumPriority": count_if(doc! { "$eq": ["$priority", "medium"] }),
                "lowPriority": count_if(doc! { "$eq": ["$priority", "low"] }),
            }
        }]
    }
}

#[async_trait]
impl TodoRepository for MongoTodoRepository {
    #[instrument(skip(self, todo), fields(todo_id = %todo.id))]
    async fn insert(&self, todo: Todo) -> TodoResult<Todo> {
        self.collection.insert_one(TodoDocument::from(&todo)).await?;

        tracing::info!(todo_id = %todo.id, "Todo created");
        Ok(todo)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> TodoResult<Option<Todo>> {
        self.collection
            .find_one(id_filter(id))
            .await?
            .map(Todo::try_from)
            .transpose()
    }

    #[instrument(skip(self))]
    async fn list(&self, query: TodoQuery) -> TodoResult<Vec<Todo>> {
        let options = FindOptions::builder()
            .limit(query.limit as i64)
            .skip(query.skip)
            .sort(Self::build_sort(&query))
            .build();

        let cursor = self
            .collection
            .find(Self::build_filter(&query.filter))
            .with_options(options)
            .await?;
        let docs: Vec<TodoDocument> = cursor.try_collect().await?;

        docs.into_iter().map(Todo::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn count(&self, filter: TodoFilter) -> TodoResult<u64> {
        let count = self
            .collection
            .count_documents(Self::build_filter(&filter))
            .await?;
        Ok(count)
    }

    #[instrument(skip(self, todo), fields(todo_id = %todo.id))]
    async fn replace(&self, todo: Todo) -> TodoResult<bool> {
        let result = self
            .collection
            .replace_one(id_filter(todo.id), TodoDocument::from(&todo))
            .await?;

        if result.matched_count == 0 {
            return Ok(false);
        }

        tracing::info!(todo_id = %todo.id, "Todo updated");
        Ok(true)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> TodoResult<Option<Todo>> {
        let removed = self.collection.find_one_and_delete(id_filter(id)).await?;

        if removed.is_some() {
            tracing::info!(todo_id = %id, "Todo deleted");
        }
        removed.map(Todo::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn delete_many(&self, filter: TodoFilter) -> TodoResult<u64> {
        let result = self
            .collection
            .delete_many(Self::build_filter(&filter))
            .await?;

        tracing::info!(deleted_count = result.deleted_count, "Todos deleted");
        Ok(result.deleted_count)
    }

    #[instrument(skip(self))]
    async fn stats(&self) -> TodoResult<TodoStats> {
        let mut cursor = self.collection.aggregate(Self::stats_pipeline()).await?;

        // No documents means no group
        let Some(group) = cursor.try_next().await? else {
            return Ok(TodoStats::default());
        };

        let total = count_field(&group, "total");
        let completed = count_field(&group, "completed");
        Ok(TodoStats {
            total,
            completed,
            pending: total.saturating_sub(completed),
            high_priority: count_field(&group, "highPriority"),
            medium_priority: count_field(&group, "mediumPriority"),
            low_priority: count_field(&group, "lowPriority"),
        })
    }
}
