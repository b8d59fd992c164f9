//! Supplier model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct Supplier {
    pub id: i64,
    pub service_name: String,
    pub cnpj: String,
    pub base_price_cents: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierRequest {
    pub service_name: String,
    pub cnpj: String,
    pub base_price_cents: i64,
}
