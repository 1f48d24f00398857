use models::{Appointment, AppointmentStatus, StatusUpdate};
use tracing::{info, instrument};
use uuid::Uuid;

use super::Resource;
use crate::client::ApiClient;
use crate::errors::ServiceError;

pub const APPOINTMENTS: Resource = Resource::new("/api/Appointment", "appointment");

/// List appointments, newest first, optionally narrowed to one status.
#[instrument(skip_all, fields(status = ?status))]
pub async fn list_appointments(
    client: &ApiClient,
    token: &str,
    status: Option<AppointmentStatus>,
) -> Result<Vec<Appointment>, ServiceError> {
    let query: Vec<(&str, String)> = status.map(|s| ("status", s.to_string())).into_iter().collect();
    let mut rows: Vec<Appointment> = client.get_list_with_query(APPOINTMENTS.path, Some(token), &query).await?;
    if let Some(s) = status {
        rows.retain(|a| a.status == s);
    }
    rows.sort_by(|a, b| (b.appointment_date, b.start_time).cmp(&(a.appointment_date, a.start_time)));
    Ok(rows)
}

pub async fn get_appointment(client: &ApiClient, token: &str, id: Uuid) -> Result<Appointment, ServiceError> {
    APPOINTMENTS.get(client, token, id).await
}

/// Load the appointment, check the move against its current status, then
/// `PUT /api/Appointment/{id}/status`.
#[instrument(skip_all, fields(%id, to = %update.status))]
pub async fn change_status(
    client: &ApiClient,
    token: &str,
    id: Uuid,
    update: &StatusUpdate,
) -> Result<(), ServiceError> {
    let current = get_appointment(client, token, id).await?;
    update.validate_from(current.status)?;
    let path = format!("{}/status", APPOINTMENTS.item_path(id));
    client.put(&path, Some(token), update).await?;
    info!(%id, from = %current.status, to = %update.status, "appointment_status_changed");
    Ok(())
}
