//! Supplier service implementation

use tracing::info;
use crate::database::DatabaseService;
use crate::models::{Supplier, SupplierRequest};
use crate::utils::errors::{EventDeskError, OperationResultExt, Result};
use crate::utils::helpers::{normalize_cnpj, normalize_whitespace};
use crate::utils::logging::log_rule_rejection;

pub const MAX_SERVICE_NAME_LEN: usize = 150;

#[derive(Clone)]
pub struct SupplierService {
    db: DatabaseService,
}

impl SupplierService {
    pub fn new(db: DatabaseService) -> Self {
        Self { db }
    }

    pub async fn create(&self, request: SupplierRequest) -> Result<Supplier> {
        async {
            let request = validate_supplier(request)?;
            if self.db.suppliers.find_by_cnpj(&request.cnpj).await?.is_some() {
                return Err(duplicate_cnpj(&request.cnpj));
            }

            let supplier = self.db.suppliers.create(&request).await?;
            info!(supplier_id = supplier.id, "Supplier created");
            Ok(supplier)
        }
        .await
        .or_operation_failed("failed to create supplier")
    }

    pub async fn update(&self, id: i64, request: SupplierRequest) -> Result<Supplier> {
        async {
            let request = validate_supplier(request)?;
            let existing = self.db.suppliers.find_by_id(id).await?.ok_or_else(supplier_not_found)?;
            if existing.cnpj != request.cnpj {
                if let Some(holder) = self.db.suppliers.find_by_cnpj(&request.cnpj).await? {
                    if holder.id != id {
                        return Err(duplicate_cnpj(&request.cnpj));
                    }
                }
            }

            let supplier = self
                .db
                .suppliers
                .update(id, &request)
                .await?
                .ok_or_else(supplier_not_found)?;
            info!(supplier_id = id, "Supplier updated");
            Ok(supplier)
        }
        .await
        .or_operation_failed("failed to update supplier")
    }

    pub async fn delete(&self, id: i64) -> Result<()> {
        async {
            if !self.db.suppliers.delete(id).await? {
                return Err(supplier_not_found());
            }
            info!(supplier_id = id, "Supplier deleted");
            Ok(())
        }
        .await
        .or_operation_failed("failed to delete supplier")
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Supplier> {
        async { self.db.suppliers.find_by_id(id).await?.ok_or_else(supplier_not_found) }
            .await
            .or_operation_failed("failed to load supplier")
    }

    pub async fn list(&self) -> Result<Vec<Supplier>> {
        self.db.suppliers.list().await.or_operation_failed("failed to list suppliers")
    }
}

fn supplier_not_found() -> EventDeskError {
    EventDeskError::not_found("Supplier not found.")
}

fn duplicate_cnpj(cnpj: &str) -> EventDeskError {
    EventDeskError::already_exists(format!("A supplier with CNPJ {} already exists.", cnpj))
}

fn reject(message: &str) -> EventDeskError {
    log_rule_rejection("supplier", "validation", message);
    EventDeskError::validation(message)
}

fn validate_supplier(mut request: SupplierRequest) -> Result<SupplierRequest> {
    request.service_name = normalize_whitespace(&request.service_name);
    if request.service_name.is_empty() {
        return Err(reject("Service name is required."));
    }
    if request.service_name.chars().count() > MAX_SERVICE_NAME_LEN {
        return Err(reject(&format!(
            "Service name must be at most {} characters.",
            MAX_SERVICE_NAME_LEN
        )));
    }
    if request.cnpj.trim().is_empty() {
        return Err(reject("CNPJ is required."));
    }
    request.cnpj = normalize_cnpj(&request.cnpj).ok_or_else(|| reject("CNPJ must have 14 digits."))?;
    if request.base_price_cents <= 0 {
        return Err(reject("Base price must be greater than zero."));
    }
    Ok(request)
}
