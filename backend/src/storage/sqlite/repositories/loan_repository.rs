use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::{sqlite::SqliteRow, Row};

use crate::domain::models::loan::{format_date, Loan, LoanDraft, DATE_FORMAT};
use crate::storage::sqlite::connection::DbConnection;
use crate::storage::traits::LoanStorage;

/// Repository for loan operations
///
/// Opening and closing a loan also flips the referenced book's `is_loaned`
/// flag. Both writes happen inside one SQL transaction, which is rolled back
/// when the book row is missing.
#[derive(Clone)]
pub struct LoanRepository {
    db: DbConnection,
}

impl LoanRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn parse_stored_date(value: &str) -> Result<NaiveDate> {
        NaiveDate::parse_from_str(value, DATE_FORMAT)
            .with_context(|| format!("Stored loan date '{}' is not YYYY-MM-DD", value))
    }

    fn row_to_loan(row: &SqliteRow) -> Result<Loan> {
        let loan_date: String = row.get("loan_date");
        let return_date: Option<String> = row.get("return_date");

        Ok(Loan {
            id: row.get("id"),
            customer_id: row.get("customer_id"),
            book_id: row.get("book_id"),
            loan_date: Self::parse_stored_date(&loan_date)?,
            return_date: return_date
                .as_deref()
                .map(Self::parse_stored_date)
                .transpose()?,
        })
    }

    fn rows_to_loans(rows: &[SqliteRow]) -> Result<Vec<Loan>> {
        rows.iter().map(Self::row_to_loan).collect()
    }
}

#[async_trait]
impl LoanStorage for LoanRepository {
    async fn open_loan(&self, draft: &LoanDraft) -> Result<Option<Loan>> {
        let mut tx = self.db.pool().begin().await?;

        let marked = sqlx::query("UPDATE book SET is_loaned = TRUE WHERE id = ?")
            .bind(draft.book_id)
            .execute(&mut *tx)
            .await?;
        if marked.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(None);
        }

        let result = sqlx::query(
            r#"
            INSERT INTO loan (customer_id, book_id, loan_date, return_date)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(draft.customer_id)
        .bind(draft.book_id)
        .bind(format_date(draft.loan_date))
        .bind(draft.return_date.map(format_date))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(Loan {
            id: result.last_insert_rowid(),
            customer_id: draft.customer_id,
            book_id: draft.book_id,
            loan_date: draft.loan_date,
            return_date: draft.return_date,
        }))
    }

    async fn get_loan(&self, loan_id: i64) -> Result<Option<Loan>> {
        let row = sqlx::query(
            r#"
            SELECT id, customer_id, book_id, loan_date, return_date
            FROM loan
            WHERE id = ?
            "#,
        )
        .bind(loan_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::row_to_loan).transpose()
    }

    async fn list_loans(&self) -> Result<Vec<Loan>> {
        let rows = sqlx::query(
            r#"
            SELECT id, customer_id, book_id, loan_date, return_date
            FROM loan
            ORDER BY id ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        Self::rows_to_loans(&rows)
    }

    async fn list_loans_by_book(&self, book_id: i64) -> Result<Vec<Loan>> {
        let rows = sqlx::query(
            r#"
            SELECT id, customer_id, book_id, loan_date, return_date
            FROM loan
            WHERE book_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(book_id)
        .fetch_all(self.db.pool())
        .await?;

        Self::rows_to_loans(&rows)
    }

    async fn list_loans_by_customer(&self, customer_id: i64) -> Result<Vec<Loan>> {
        let rows = sqlx::query(
            r#"
            SELECT id, customer_id, book_id, loan_date, return_date
            FROM loan
            WHERE customer_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(customer_id)
        .fetch_all(self.db.pool())
        .await?;

        Self::rows_to_loans(&rows)
    }

    async fn count_returned_loans_for_customer(&self, customer_id: i64) -> Result<i64> {
        let row = sqlx::query(
            r#"
            SELECT COUNT(*) AS loan_count
            FROM loan
            WHERE customer_id = ? AND return_date IS NOT NULL
            "#,
        )
        .bind(customer_id)
        .fetch_one(self.db.pool())
        .await?;

        Ok(row.get("loan_count"))
    }

    async fn update_loan(&self, loan_id: i64, draft: &LoanDraft) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE loan
            SET customer_id = ?, book_id = ?, loan_date = ?, return_date = ?
            WHERE id = ?
            "#,
        )
        .bind(draft.customer_id)
        .bind(draft.book_id)
        .bind(format_date(draft.loan_date))
        .bind(draft.return_date.map(format_date))
        .bind(loan_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn close_loan(&self, loan_id: i64, book_id: i64) -> Result<bool> {
        let mut tx = self.db.pool().begin().await?;

        let released = sqlx::query("UPDATE book SET is_loaned = FALSE WHERE id = ?")
            .bind(book_id)
            .execute(&mut *tx)
            .await?;
        if released.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        let deleted = sqlx::query("DELETE FROM loan WHERE id = ?")
            .bind(loan_id)
            .execute(&mut *tx)
            .await?;
        if deleted.rows_affected() == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        tx.commit().await?;
        Ok(true)
    }
}
