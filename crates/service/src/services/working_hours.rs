use models::{WorkingHour, WorkingHourForm};
use tracing::{info, instrument};
use uuid::Uuid;

use super::Resource;
use crate::client::ApiClient;
use crate::errors::ServiceError;

pub const WORKING_HOURS: Resource = Resource::new("/api/WorkingHour", "working hour");

/// List schedule rows, optionally for one branch only, ordered by day.
#[instrument(skip_all, fields(branch_id = ?branch_id))]
pub async fn list_working_hours(
    client: &ApiClient,
    token: &str,
    branch_id: Option<Uuid>,
) -> Result<Vec<WorkingHour>, ServiceError> {
    let query: Vec<(&str, String)> = branch_id.map(|b| ("branchId", b.to_string())).into_iter().collect();
    let mut rows: Vec<WorkingHour> = client.get_list_with_query(WORKING_HOURS.path, Some(token), &query).await?;
    // the backend may ignore the filter
    if let Some(b) = branch_id {
        rows.retain(|r| r.branch_id == b);
    }
    rows.sort_by_key(|r| (r.branch_id, r.day_of_week));
    Ok(rows)
}

#[instrument(skip_all, fields(branch_id = %form.branch_id, day = form.day_of_week))]
pub async fn create_working_hour(client: &ApiClient, token: &str, form: &WorkingHourForm) -> Result<(), ServiceError> {
    form.validate()?;
    WORKING_HOURS.create(client, token, form).await?;
    info!(branch_id = %form.branch_id, day = form.day_of_week, "working_hour_created");
    Ok(())
}

#[instrument(skip_all, fields(%id))]
pub async fn update_working_hour(client: &ApiClient, token: &str, id: Uuid, form: &WorkingHourForm) -> Result<(), ServiceError> {
    form.validate()?;
    WORKING_HOURS.update(client, token, id, form).await?;
    info!(%id, "working_hour_updated");
    Ok(())
}

#[instrument(skip_all, fields(%id))]
pub async fn delete_working_hour(client: &ApiClient, token: &str, id: Uuid) -> Result<(), ServiceError> {
    WORKING_HOURS.delete(client, token, id).await?;
    info!(%id, "working_hour_deleted");
    Ok(())
}
