use anyhow::Result;
use sqlx::{
    migrate::MigrateDatabase,
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    Sqlite, SqlitePool,
};
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;

use crate::storage::sqlite::repositories::{BookRepository, CustomerRepository, LoanRepository};
use crate::storage::traits::Connection;

/// DbConnection manages the SQLite pool and schema
#[derive(Clone)]
pub struct DbConnection {
    pool: Arc<SqlitePool>,
}

impl DbConnection {
    /// Create a new database connection
    pub async fn new(url: &str) -> Result<Self> {
        // Create database if it doesn't exist
        if !Sqlite::database_exists(url).await.unwrap_or(false) {
            info!("Creating database at {}", url);
            Sqlite::create_database(url).await?
        }

        // Foreign keys are declared in the schema but not enforced, so books and
        // customers can be removed while loans still reference them.
        let options = SqliteConnectOptions::from_str(url)?.foreign_keys(false);
        let pool = SqlitePoolOptions::new().connect_with(options).await?;

        Self::setup_schema(&pool).await?;

        Ok(Self { pool: Arc::new(pool) })
    }

    /// Initialize a test database with a unique name
    #[cfg(test)]
    pub async fn init_test() -> Result<Self> {
        let test_id = uuid::Uuid::new_v4().to_string();
        let db_url = format!("file:memdb_{}?mode=memory&cache=shared", test_id);

        Self::new(&db_url).await
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Set up the required database schema
    async fn setup_schema(pool: &SqlitePool) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS book (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                author TEXT NOT NULL,
                year_published INTEGER NOT NULL,
                type INTEGER,
                is_loaned BOOLEAN NOT NULL DEFAULT FALSE
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS customer (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                city TEXT NOT NULL,
                age INTEGER NOT NULL
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS loan (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                customer_id INTEGER NOT NULL,
                book_id INTEGER NOT NULL,
                loan_date TEXT NOT NULL,
                return_date TEXT,
                FOREIGN KEY (customer_id) REFERENCES customer (id),
                FOREIGN KEY (book_id) REFERENCES book (id)
            );
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_loan_book_id
            ON loan(book_id);
            "#,
        )
        .execute(pool)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_loan_customer_id
            ON loan(customer_id);
            "#,
        )
        .execute(pool)
        .await?;

        Ok(())
    }
}

impl Connection for DbConnection {
    type BookRepository = BookRepository;
    type CustomerRepository = CustomerRepository;
    type LoanRepository = LoanRepository;

    fn create_book_repository(&self) -> Self::BookRepository {
        BookRepository::new(self.clone())
    }

    fn create_customer_repository(&self) -> Self::CustomerRepository {
        CustomerRepository::new(self.clone())
    }

    fn create_loan_repository(&self) -> Self::LoanRepository {
        LoanRepository::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::Row;

    #[tokio::test]
    async fn test_schema_creates_all_tables() {
        let db = DbConnection::init_test().await.expect("Failed to create test database");

        let rows = sqlx::query("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .fetch_all(db.pool())
            .await
            .expect("Failed to list tables");
        let tables: Vec<String> = rows.iter().map(|r| r.get("name")).collect();

        for expected in ["book", "customer", "loan"] {
            assert!(tables.contains(&expected.to_string()), "missing table {}", expected);
        }
    }

    #[tokio::test]
    async fn test_file_database_is_created_and_reopened() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("library.db");
        let url = format!("sqlite:{}", path.display());

        let db = DbConnection::new(&url).await.expect("Failed to create database");
        assert!(path.exists());
        db.pool().close().await;

        // Schema setup is idempotent
        let reopened = DbConnection::new(&url).await.expect("Failed to reopen database");
        let count: i64 = sqlx::query("SELECT COUNT(*) AS n FROM book")
            .fetch_one(reopened.pool())
            .await
            .expect("Failed to count books")
            .get("n");
        assert_eq!(count, 0);
    }
}
