use models::{Service, ServiceCategory, ServiceForm};
use tracing::{info, instrument};
use uuid::Uuid;

use super::Resource;
use crate::client::ApiClient;
use crate::errors::ServiceError;

pub const SERVICES: Resource = Resource::new("/api/Service", "service");
pub const CATEGORIES: Resource = Resource::new("/api/ServiceCategory", "service category");

/// List the provider's services.
#[instrument(skip_all)]
pub async fn list_services(client: &ApiClient, token: &str) -> Result<Vec<Service>, ServiceError> {
    SERVICES.list(client, token).await
}

/// Get one service by id.
pub async fn get_service(client: &ApiClient, token: &str, id: Uuid) -> Result<Service, ServiceError> {
    SERVICES.get(client, token, id).await
}

/// Create a service.
#[instrument(skip_all, fields(name = %form.name))]
pub async fn create_service(client: &ApiClient, token: &str, form: &ServiceForm) -> Result<(), ServiceError> {
    form.validate()?;
    SERVICES.create(client, token, form).await?;
    info!(name = %form.name, "service_created");
    Ok(())
}

/// Update a service.
#[instrument(skip_all, fields(%id))]
pub async fn update_service(client: &ApiClient, token: &str, id: Uuid, form: &ServiceForm) -> Result<(), ServiceError> {
    form.validate()?;
    SERVICES.update(client, token, id, form).await?;
    info!(%id, "service_updated");
    Ok(())
}

/// Delete a service.
#[instrument(skip_all, fields(%id))]
pub async fn delete_service(client: &ApiClient, token: &str, id: Uuid) -> Result<(), ServiceError> {
    SERVICES.delete(client, token, id).await?;
    info!(%id, "service_deleted");
    Ok(())
}

/// Categories feed the service form's select box.
pub async fn list_categories(client: &ApiClient, token: &str) -> Result<Vec<ServiceCategory>, ServiceError> {
    CATEGORIES.list(client, token).await
}
