//! Customer request handlers.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use caseflow_core::customers::{self, CustomerPatch, CustomerRow};

use crate::AppState;
use crate::error::{AppError, AppResult};
use crate::handlers::ListParams;

/// `POST /customers` body.
#[derive(Debug, Deserialize)]
pub struct CreateCustomer {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub notes: Option<String>,
}

/// `PATCH /customers/{id}` body — one optional field per mutable attribute.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateCustomer {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub notes: Option<String>,
}

/// `GET /customers` — paginated list.
pub async fn list_customers_handler(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<CustomerRow>>> {
    let rows = customers::list_customers(&state.pool, params.limit(), params.offset()).await?;
    Ok(Json(rows))
}

/// `POST /customers` — create a customer profile.
pub async fn create_customer_handler(
    State(state): State<AppState>,
    Json(body): Json<CreateCustomer>,
) -> AppResult<(StatusCode, Json<CustomerRow>)> {
    if customers::customer_email_exists(&state.pool, &body.email).await? {
        return Err(AppError::Conflict("Email already registered".into()));
    }
    let row = customers::create_customer(
        &state.pool,
        &body.name,
        &body.email,
        body.phone.as_deref(),
        body.company.as_deref(),
        body.notes.as_deref(),
    )
    .await?;
    Ok((StatusCode::CREATED, Json(row)))
}

/// `GET /customers/{id}` — fetch one customer.
pub async fn get_customer_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<CustomerRow>> {
    let row = customers::get_customer(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Customer not found".into()))?;
    Ok(Json(row))
}

/// `PATCH /customers/{id}` — partial update, applied field-by-field.
pub async fn update_customer_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<UpdateCustomer>,
) -> AppResult<Json<CustomerRow>> {
    let patch = CustomerPatch {
        name: body.name,
        email: body.email,
        phone: body.phone,
        company: body.company,
        notes: body.notes,
    };
    let row = customers::update_customer(&state.pool, id, &patch)
        .await?
        .ok_or_else(|| AppError::NotFound("Customer not found".into()))?;
    Ok(Json(row))
}

/// `DELETE /customers/{id}`.
pub async fn delete_customer_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<StatusCode> {
    if !customers::delete_customer(&state.pool, id).await? {
        return Err(AppError::NotFound("Customer not found".into()));
    }
    Ok(StatusCode::NO_CONTENT)
}
