use models::{Promotion, PromotionForm};
use tracing::{info, instrument};
use uuid::Uuid;

use super::Resource;
use crate::client::ApiClient;
use crate::errors::ServiceError;

pub const PROMOTIONS: Resource = Resource::new("/api/Promotion", "promotion");

#[instrument(skip_all)]
pub async fn list_promotions(client: &ApiClient, token: &str) -> Result<Vec<Promotion>, ServiceError> {
    PROMOTIONS.list(client, token).await
}

pub async fn get_promotion(client: &ApiClient, token: &str, id: Uuid) -> Result<Promotion, ServiceError> {
    PROMOTIONS.get(client, token, id).await
}

#[instrument(skip_all, fields(name = %form.promotion_name))]
pub async fn create_promotion(client: &ApiClient, token: &str, form: &PromotionForm) -> Result<(), ServiceError> {
    form.validate()?;
    PROMOTIONS.create(client, token, form).await?;
    info!(name = %form.promotion_name, "promotion_created");
    Ok(())
}

#[instrument(skip_all, fields(%id))]
pub async fn update_promotion(client: &ApiClient, token: &str, id: Uuid, form: &PromotionForm) -> Result<(), ServiceError> {
    form.validate()?;
    PROMOTIONS.update(client, token, id, form).await?;
    info!(%id, "promotion_updated");
    Ok(())
}

#[instrument(skip_all, fields(%id))]
pub async fn delete_promotion(client: &ApiClient, token: &str, id: Uuid) -> Result<(), ServiceError> {
    PROMOTIONS.delete(client, token, id).await?;
    info!(%id, "promotion_deleted");
    Ok(())
}
