use anyhow::Result;
use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row};

use crate::domain::models::book::{Availability, Book, BookDraft};
use crate::storage::sqlite::connection::DbConnection;
use crate::storage::traits::BookStorage;

/// Repository for book operations
#[derive(Clone)]
pub struct BookRepository {
    db: DbConnection,
}

impl BookRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_book(row: &SqliteRow) -> Book {
        Book {
            id: row.get("id"),
            name: row.get("name"),
            author: row.get("author"),
            year_published: row.get("year_published"),
            book_type: row.get("type"),
            is_loaned: row.get("is_loaned"),
        }
    }
}

#[async_trait]
impl BookStorage for BookRepository {
    async fn store_book(&self, draft: &BookDraft) -> Result<Book> {
        let result = sqlx::query(
            r#"
            INSERT INTO book (name, author, year_published, type, is_loaned)
            VALUES (?, ?, ?, ?, FALSE)
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.author)
        .bind(draft.year_published)
        .bind(draft.book_type)
        .execute(self.db.pool())
        .await?;

        Ok(Book {
            id: result.last_insert_rowid(),
            name: draft.name.clone(),
            author: draft.author.clone(),
            year_published: draft.year_published,
            book_type: draft.book_type,
            is_loaned: false,
        })
    }

    async fn get_book(&self, book_id: i64) -> Result<Option<Book>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, author, year_published, type, is_loaned
            FROM book
            WHERE id = ?
            "#,
        )
        .bind(book_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(Self::row_to_book))
    }

    async fn list_books(&self) -> Result<Vec<Book>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, author, year_published, type, is_loaned
            FROM book
            ORDER BY id ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(Self::row_to_book).collect())
    }

    async fn list_books_by_availability(&self, availability: Availability) -> Result<Vec<Book>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, author, year_published, type, is_loaned
            FROM book
            WHERE is_loaned = ?
            ORDER BY id ASC
            "#,
        )
        .bind(availability.is_loaned())
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(Self::row_to_book).collect())
    }

    async fn update_book(&self, book_id: i64, draft: &BookDraft) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE book
            SET name = ?, author = ?, year_published = ?, type = ?
            WHERE id = ?
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.author)
        .bind(draft.year_published)
        .bind(draft.book_type)
        .bind(book_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_book(&self, book_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM book WHERE id = ?")
            .bind(book_id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
