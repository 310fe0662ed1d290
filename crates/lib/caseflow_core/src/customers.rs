//! Customer persistence.

use serde::Serialize;
use sqlx::PgPool;

/// Row returned by customer queries.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CustomerRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub notes: Option<String>,
}

/// Field-by-field patch; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct CustomerPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub notes: Option<String>,
}

const COLUMNS: &str = "id, name, email, phone, company, notes";

/// List customers, oldest first.
pub async fn list_customers(
    pool: &PgPool,
    limit: i64,
    offset: i64,
) -> Result<Vec<CustomerRow>, sqlx::Error> {
    sqlx::query_as::<_, CustomerRow>(&format!(
        "SELECT {COLUMNS} FROM customers ORDER BY id LIMIT $1 OFFSET $2"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(pool)
    .await
}

/// Create a new customer.
pub async fn create_customer(
    pool: &PgPool,
    name: &str,
    email: &str,
    phone: Option<&str>,
    company: Option<&str>,
    notes: Option<&str>,
) -> Result<CustomerRow, sqlx::Error> {
    sqlx::query_as::<_, CustomerRow>(&format!(
        "INSERT INTO customers (name, email, phone, company, notes) \
         VALUES ($1, $2, $3, $4, $5) RETURNING {COLUMNS}"
    ))
    .bind(name)
    .bind(email)
    .bind(phone)
    .bind(company)
    .bind(notes)
    .fetch_one(pool)
    .await
}

/// Get a customer by id.
pub async fn get_customer(pool: &PgPool, id: i64) -> Result<Option<CustomerRow>, sqlx::Error> {
    sqlx::query_as::<_, CustomerRow>(&format!(
        "SELECT {COLUMNS} FROM customers WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Check whether a customer id exists (for ticket validation).
pub async fn customer_exists(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM customers WHERE id = $1)")
        .bind(id)
        .fetch_one(pool)
        .await
}

/// Check whether a customer email is already taken.
pub async fn customer_email_exists(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM customers WHERE email = $1)")
        .bind(email)
        .fetch_one(pool)
        .await
}

/// Apply a patch to a customer; absent fields keep their current value.
pub async fn update_customer(
    pool: &PgPool,
    id: i64,
    patch: &CustomerPatch,
) -> Result<Option<CustomerRow>, sqlx::Error> {
    sqlx::query_as::<_, CustomerRow>(&format!(
        "UPDATE customers SET \
           name = COALESCE($2, name), \
           email = COALESCE($3, email), \
           phone = COALESCE($4, phone), \
           company = COALESCE($5, company), \
           notes = COALESCE($6, notes) \
         WHERE id = $1 RETURNING {COLUMNS}"
    ))
    .bind(id)
    .bind(patch.name.as_deref())
    .bind(patch.email.as_deref())
    .bind(patch.phone.as_deref())
    .bind(patch.company.as_deref())
    .bind(patch.notes.as_deref())
    .fetch_optional(pool)
    .await
}

/// Delete a customer. Returns whether a row was removed.
pub async fn delete_customer(pool: &PgPool, id: i64) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM customers WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
