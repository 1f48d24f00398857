use models::{Branch, BranchForm};
use tracing::{info, instrument};
use uuid::Uuid;

use super::Resource;
use crate::client::ApiClient;
use crate::errors::ServiceError;

pub const BRANCHES: Resource = Resource::new("/api/SpaBranchLocation", "branch");

#[instrument(skip_all)]
pub async fn list_branches(client: &ApiClient, token: &str) -> Result<Vec<Branch>, ServiceError> {
    BRANCHES.list(client, token).await
}

pub async fn get_branch(client: &ApiClient, token: &str, id: Uuid) -> Result<Branch, ServiceError> {
    BRANCHES.get(client, token, id).await
}

#[instrument(skip_all, fields(name = %form.branch_name))]
pub async fn create_branch(client: &ApiClient, token: &str, form: &BranchForm) -> Result<(), ServiceError> {
    form.validate()?;
    BRANCHES.create(client, token, form).await?;
    info!(name = %form.branch_name, "branch_created");
    Ok(())
}

#[instrument(skip_all, fields(%id))]
pub async fn update_branch(client: &ApiClient, token: &str, id: Uuid, form: &BranchForm) -> Result<(), ServiceError> {
    form.validate()?;
    BRANCHES.update(client, token, id, form).await?;
    info!(%id, "branch_updated");
    Ok(())
}

#[instrument(skip_all, fields(%id))]
pub async fn delete_branch(client: &ApiClient, token: &str, id: Uuid) -> Result<(), ServiceError> {
    BRANCHES.delete(client, token, id).await?;
    info!(%id, "branch_deleted");
    Ok(())
}
