use anyhow::Result;
use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row};

use crate::domain::models::customer::{Customer, CustomerDraft};
use crate::storage::sqlite::connection::DbConnection;
use crate::storage::traits::CustomerStorage;

/// Repository for customer operations
#[derive(Clone)]
pub struct CustomerRepository {
    db: DbConnection,
}

impl CustomerRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn row_to_customer(row: &SqliteRow) -> Customer {
        Customer {
            id: row.get("id"),
            name: row.get("name"),
            city: row.get("city"),
            age: row.get("age"),
        }
    }

    /// Build a LIKE pattern that matches `fragment` literally anywhere in the value
    fn contains_pattern(fragment: &str) -> String {
        let mut escaped = String::with_capacity(fragment.len() + 2);
        escaped.push('%');
        for c in fragment.chars() {
            if matches!(c, '\\' | '%' | '_') {
                escaped.push('\\');
            }
            escaped.push(c);
        }
        escaped.push('%');
        escaped
    }
}

#[async_trait]
impl CustomerStorage for CustomerRepository {
    async fn store_customer(&self, draft: &CustomerDraft) -> Result<Customer> {
        let result = sqlx::query(
            r#"
            INSERT INTO customer (name, city, age)
            VALUES (?, ?, ?)
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.city)
        .bind(draft.age)
        .execute(self.db.pool())
        .await?;

        Ok(Customer {
            id: result.last_insert_rowid(),
            name: draft.name.clone(),
            city: draft.city.clone(),
            age: draft.age,
        })
    }

    async fn get_customer(&self, customer_id: i64) -> Result<Option<Customer>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, city, age
            FROM customer
            WHERE id = ?
            "#,
        )
        .bind(customer_id)
        .fetch_optional(self.db.pool())
        .await?;

        Ok(row.as_ref().map(Self::row_to_customer))
    }

    async fn list_customers(&self) -> Result<Vec<Customer>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, city, age
            FROM customer
            ORDER BY id ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(Self::row_to_customer).collect())
    }

    async fn search_customers_by_name(&self, fragment: &str) -> Result<Vec<Customer>> {
        // LIKE is case-insensitive for ASCII in SQLite
        let rows = sqlx::query(
            r#"
            SELECT id, name, city, age
            FROM customer
            WHERE name LIKE ? ESCAPE '\'
            ORDER BY id ASC
            "#,
        )
        .bind(Self::contains_pattern(fragment))
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(Self::row_to_customer).collect())
    }

    async fn list_customers_with_returned_loans(&self) -> Result<Vec<Customer>> {
        let rows = sqlx::query(
            r#"
            SELECT DISTINCT c.id, c.name, c.city, c.age
            FROM customer c
            INNER JOIN loan l ON l.customer_id = c.id
            WHERE l.return_date IS NOT NULL
            ORDER BY c.id ASC
            "#,
        )
        .fetch_all(self.db.pool())
        .await?;

        Ok(rows.iter().map(Self::row_to_customer).collect())
    }

    async fn update_customer(&self, customer_id: i64, draft: &CustomerDraft) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE customer
            SET name = ?, city = ?, age = ?
            WHERE id = ?
            "#,
        )
        .bind(&draft.name)
        .bind(&draft.city)
        .bind(draft.age)
        .bind(customer_id)
        .execute(self.db.pool())
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_customer(&self, customer_id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM customer WHERE id = ?")
            .bind(customer_id)
            .execute(self.db.pool())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
