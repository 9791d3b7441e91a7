use std::path::Path;

use log::{debug, info};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DatabaseTransaction, DbBackend, DbErr, Schema,
    Statement, TransactionTrait,
};

use crate::entities::{collaborator, task};

/// Columns added after the first released schema, in the order they appeared.
const TASK_MIGRATIONS: &[(&str, &str)] = &[
    ("assignee_firstname", "TEXT"),
    ("assignee_hex_color", "TEXT"),
    ("miro_card_id", "TEXT"),
    ("synced_title", "TEXT"),
    ("synced_description", "TEXT"),
    ("synced_due_date", "TEXT"),
    ("synced_theme", "TEXT"),
];

const COLLABORATOR_MIGRATIONS: &[(&str, &str)] = &[("hex_color", "TEXT"), ("tag_id", "TEXT")];

/// Single-writer SQLite cache.
pub struct LocalStorage {
    pub conn: DatabaseConnection,
}

impl LocalStorage {
    /// Open (creating if needed) the cache file at `path` and bring its schema up to date.
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self, DbErr> {
        let url = format!("sqlite://{}?mode=rwc", path.as_ref().display());
        Self::connect(&url).await
    }

    /// Private in-memory cache, used by tests.
    pub async fn in_memory() -> Result<Self, DbErr> {
        Self::connect("sqlite::memory:").await
    }

    async fn connect(url: &str) -> Result<Self, DbErr> {
        let mut options = ConnectOptions::new(url.to_string());
        // One connection: the process is the only writer, and an in-memory
        // database exists per connection.
        options.max_connections(1).min_connections(1).sqlx_logging(false);

        let conn = Database::connect(options).await?;
        let storage = LocalStorage { conn };
        storage.init_schema().await?;
        storage.run_migrations().await?;
        info!("💾 Cache ready at {url}");
        Ok(storage)
    }

    /// Create missing tables from the entity definitions.
    async fn init_schema(&self) -> Result<(), DbErr> {
        let backend = self.conn.get_database_backend();
        let schema = Schema::new(backend);

        let mut tasks = schema.create_table_from_entity(task::Entity);
        tasks.if_not_exists();
        self.conn.execute(backend.build(&tasks)).await?;

        let mut collaborators = schema.create_table_from_entity(collaborator::Entity);
        collaborators.if_not_exists();
        self.conn.execute(backend.build(&collaborators)).await?;

        Ok(())
    }

    /// Add columns that caches written by older versions lack.
    async fn run_migrations(&self) -> Result<(), DbErr> {
        for (column, column_type) in TASK_MIGRATIONS {
            self.add_column_if_not_exists("tasks", column, column_type).await?;
        }
        for (column, column_type) in COLLABORATOR_MIGRATIONS {
            self.add_column_if_not_exists("collaborators", column, column_type).await?;
        }
        Ok(())
    }

    /// Names of the columns currently present on `table`.
    pub async fn column_names(&self, table: &str) -> Result<Vec<String>, DbErr> {
        let rows = self
            .conn
            .query_all(Statement::from_string(
                DbBackend::Sqlite,
                format!("PRAGMA table_info({table})"),
            ))
            .await?;

        rows.iter().map(|row| row.try_get::<String>("", "name")).collect()
    }

    /// Add `column` to `table` unless it is already there.
    ///
    /// Returns whether the column was added.
    pub async fn add_column_if_not_exists(&self, table: &str, column: &str, column_type: &str) -> Result<bool, DbErr> {
        if self.column_names(table).await?.iter().any(|c| c == column) {
            return Ok(false);
        }

        debug!("Adding column {table}.{column}");
        self.conn
            .execute(Statement::from_string(
                DbBackend::Sqlite,
                format!("ALTER TABLE {table} ADD COLUMN \"{column}\" {column_type}"),
            ))
            .await?;
        Ok(true)
    }

    /// Start a unit of work; dropping the transaction without committing rolls it back.
    pub async fn begin(&self) -> Result<DatabaseTransaction, DbErr> {
        self.conn.begin().await
    }

    /// Release the connection.
    pub async fn close(self) -> Result<(), DbErr> {
        self.conn.close().await
    }
}
