//! Flash sales are `ServicePromotion` records: a time-boxed discount on one service.

use models::{FlashSale, FlashSaleForm};
use tracing::{info, instrument};
use uuid::Uuid;

use super::Resource;
use crate::client::ApiClient;
use crate::errors::ServiceError;

pub const FLASH_SALES: Resource = Resource::new("/api/ServicePromotion", "flash sale");

#[instrument(skip_all)]
pub async fn list_flash_sales(client: &ApiClient, token: &str) -> Result<Vec<FlashSale>, ServiceError> {
    FLASH_SALES.list(client, token).await
}

pub async fn get_flash_sale(client: &ApiClient, token: &str, id: Uuid) -> Result<FlashSale, ServiceError> {
    FLASH_SALES.get(client, token, id).await
}

#[instrument(skip_all, fields(service_id = %form.service_id))]
pub async fn create_flash_sale(client: &ApiClient, token: &str, form: &FlashSaleForm) -> Result<(), ServiceError> {
    form.validate()?;
    FLASH_SALES.create(client, token, form).await?;
    info!(service_id = %form.service_id, percent = form.discount_percent, "flash_sale_created");
    Ok(())
}

#[instrument(skip_all, fields(%id))]
pub async fn update_flash_sale(client: &ApiClient, token: &str, id: Uuid, form: &FlashSaleForm) -> Result<(), ServiceError> {
    form.validate()?;
    FLASH_SALES.update(client, token, id, form).await?;
    info!(%id, "flash_sale_updated");
    Ok(())
}

#[instrument(skip_all, fields(%id))]
pub async fn delete_flash_sale(client: &ApiClient, token: &str, id: Uuid) -> Result<(), ServiceError> {
    FLASH_SALES.delete(client, token, id).await?;
    info!(%id, "flash_sale_deleted");
    Ok(())
}
