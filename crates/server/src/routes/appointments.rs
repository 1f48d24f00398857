use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use common::i18n::{Action, ErrorContext};
use common::types::Refetched;
use models::{Appointment, AppointmentStatus, StatusUpdate};
use serde::{Deserialize, Serialize};
use service::pagination::{paginate, Page, Pagination};
use service::services::appointments;
use uuid::Uuid;

use crate::errors::{JsonApiError, WithContext};
use crate::routes::auth::{ServerState, Session};

const CTX: ErrorContext = ErrorContext::Appointment;

#[derive(Debug, Default, Deserialize)]
pub struct AppointmentQuery {
    pub status: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl AppointmentQuery {
    /// Empty or `all` means no filter.
    fn status(&self) -> Result<Option<AppointmentStatus>, JsonApiError> {
        match self.status.as_deref().map(str::trim) {
            None | Some("") | Some("all") => Ok(None),
            Some(raw) => AppointmentStatus::parse(raw)
                .map(Some)
                .ok_or_else(|| JsonApiError::validation("Trạng thái lịch hẹn không hợp lệ.")),
        }
    }

    fn pagination(&self) -> Pagination {
        let d = Pagination::default();
        Pagination { page: self.page.unwrap_or(d.page), per_page: self.per_page.unwrap_or(d.per_page) }
    }
}

/// One entry of the status filter select.
#[derive(Debug, Serialize)]
pub struct StatusOption {
    pub value: AppointmentStatus,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct AppointmentsPage {
    #[serde(flatten)]
    pub page: Page<Appointment>,
    pub statuses: Vec<StatusOption>,
}

fn status_options() -> Vec<StatusOption> {
    AppointmentStatus::ALL.into_iter().map(|value| StatusOption { value, label: value.label_vi() }).collect()
}

#[utoipa::path(get, path = "/admin/appointments", tag = "appointments", params(("status" = Option<String>, Query, description = "Pending, Confirmed, InProgress, Completed, Cancelled or NoShow"), ("page" = Option<u32>, Query, description = "1-based page"), ("per_page" = Option<u32>, Query, description = "Rows per page, at most 100")), responses((status = 200, description = "One page of appointments, newest first, with the status filter options"), (status = 400, description = "Unknown status")))]
pub async fn page(
    State(state): State<ServerState>,
    Extension(s): Extension<Session>,
    Query(q): Query<AppointmentQuery>,
) -> Result<Json<AppointmentsPage>, JsonApiError> {
    let status = q.status()?;
    let rows = appointments::list_appointments(&state.client, &s.token, status).await.ctx(CTX)?;
    Ok(Json(AppointmentsPage { page: paginate(rows, q.pagination()), statuses: status_options() }))
}

#[utoipa::path(get, path = "/admin/appointments/{id}", tag = "appointments", params(("id" = Uuid, Path, description = "Appointment id")), responses((status = 200, description = "Appointment"), (status = 404, description = "Not Found")))]
pub async fn get_one(
    State(state): State<ServerState>,
    Extension(s): Extension<Session>,
    Path(id): Path<Uuid>,
) -> Result<Json<Appointment>, JsonApiError> {
    Ok(Json(appointments::get_appointment(&state.client, &s.token, id).await.ctx(CTX)?))
}

#[utoipa::path(put, path = "/admin/appointments/{id}/status", tag = "appointments", params(("id" = Uuid, Path, description = "Appointment id")), request_body = crate::openapi::StatusUpdateDoc, responses((status = 200, description = "Status changed; refetched list"), (status = 400, description = "Transition not allowed from the current status")))]
pub async fn change_status(
    State(state): State<ServerState>,
    Extension(s): Extension<Session>,
    Path(id): Path<Uuid>,
    Json(update): Json<StatusUpdate>,
) -> Result<Json<Refetched<Appointment>>, JsonApiError> {
    appointments::change_status(&state.client, &s.token, id, &update).await.ctx(CTX)?;
    let rows = appointments::list_appointments(&state.client, &s.token, None).await.ctx(CTX)?;
    Ok(Json(Refetched::new(CTX.success(Action::StatusChanged), rows)))
}
