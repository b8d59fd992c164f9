//! Supplier repository implementation

use async_trait::async_trait;
use sqlx::PgPool;
use crate::models::{Supplier, SupplierRequest};
use crate::utils::errors::Result;
use super::SupplierStore;

const SUPPLIER_COLUMNS: &str = "id, service_name, cnpj, base_price_cents";

#[derive(Clone, Debug)]
pub struct SupplierRepository {
    pool: PgPool,
}

impl SupplierRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SupplierStore for SupplierRepository {
    async fn create(&self, request: &SupplierRequest) -> Result<Supplier> {
        let supplier = sqlx::query_as::<_, Supplier>(&format!(
            "INSERT INTO suppliers (service_name, cnpj, base_price_cents) VALUES ($1, $2, $3) RETURNING {}",
            SUPPLIER_COLUMNS
        ))
        .bind(&request.service_name)
        .bind(&request.cnpj)
        .bind(request.base_price_cents)
        .fetch_one(&self.pool)
        .await?;

        Ok(supplier)
    }

    async fn update(&self, id: i64, request: &SupplierRequest) -> Result<Option<Supplier>> {
        let supplier = sqlx::query_as::<_, Supplier>(&format!(
            r#"
            UPDATE suppliers
            SET service_name = $2, cnpj = $3, base_price_cents = $4
            WHERE id = $1
            RETURNING {}
            "#,
            SUPPLIER_COLUMNS
        ))
        .bind(id)
        .bind(&request.service_name)
        .bind(&request.cnpj)
        .bind(request.base_price_cents)
        .fetch_optional(&self.pool)
        .await?;

        Ok(supplier)
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM suppliers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Supplier>> {
        let supplier = sqlx::query_as::<_, Supplier>(&format!(
            "SELECT {} FROM suppliers WHERE id = $1",
            SUPPLIER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(supplier)
    }

    async fn find_by_cnpj(&self, cnpj: &str) -> Result<Option<Supplier>> {
        let supplier = sqlx::query_as::<_, Supplier>(&format!(
            "SELECT {} FROM suppliers WHERE cnpj = $1",
            SUPPLIER_COLUMNS
        ))
        .bind(cnpj)
        .fetch_optional(&self.pool)
        .await?;

        Ok(supplier)
    }

    async fn list(&self) -> Result<Vec<Supplier>> {
        let suppliers = sqlx::query_as::<_, Supplier>(&format!(
            "SELECT {} FROM suppliers ORDER BY service_name, id",
            SUPPLIER_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(suppliers)
    }
}
