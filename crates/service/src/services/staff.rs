use models::{Staff, StaffForm};
use tracing::{info, instrument};
use uuid::Uuid;

use super::Resource;
use crate::client::ApiClient;
use crate::errors::ServiceError;

pub const STAFF: Resource = Resource::new("/api/Staff", "staff");

#[instrument(skip_all)]
pub async fn list_staff(client: &ApiClient, token: &str) -> Result<Vec<Staff>, ServiceError> {
    STAFF.list(client, token).await
}

pub async fn get_staff(client: &ApiClient, token: &str, id: Uuid) -> Result<Staff, ServiceError> {
    STAFF.get(client, token, id).await
}

#[instrument(skip_all, fields(email = %form.email))]
pub async fn create_staff(client: &ApiClient, token: &str, form: &StaffForm) -> Result<(), ServiceError> {
    form.validate()?;
    STAFF.create(client, token, form).await?;
    info!(email = %form.email, "staff_created");
    Ok(())
}

#[instrument(skip_all, fields(%id))]
pub async fn update_staff(client: &ApiClient, token: &str, id: Uuid, form: &StaffForm) -> Result<(), ServiceError> {
    form.validate()?;
    STAFF.update(client, token, id, form).await?;
    info!(%id, "staff_updated");
    Ok(())
}

#[instrument(skip_all, fields(%id))]
pub async fn delete_staff(client: &ApiClient, token: &str, id: Uuid) -> Result<(), ServiceError> {
    STAFF.delete(client, token, id).await?;
    info!(%id, "staff_deleted");
    Ok(())
}
