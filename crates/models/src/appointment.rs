//! Customer appointments. Providers only move them through their status lifecycle.

use std::fmt;

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::time::{clock, date};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppointmentStatus {
    #[serde(alias = "pending", alias = "PENDING")]
    Pending,
    #[serde(alias = "confirmed", alias = "CONFIRMED")]
    Confirmed,
    #[serde(alias = "inProgress", alias = "in_progress", alias = "IN_PROGRESS")]
    InProgress,
    #[serde(alias = "completed", alias = "COMPLETED")]
    Completed,
    #[serde(alias = "cancelled", alias = "Canceled", alias = "CANCELLED")]
    Cancelled,
    #[serde(alias = "noShow", alias = "no_show", alias = "NO_SHOW")]
    NoShow,
}

impl AppointmentStatus {
    pub const ALL: [AppointmentStatus; 6] = [
        AppointmentStatus::Pending,
        AppointmentStatus::Confirmed,
        AppointmentStatus::InProgress,
        AppointmentStatus::Completed,
        AppointmentStatus::Cancelled,
        AppointmentStatus::NoShow,
    ];

    /// Statuses a provider may move an appointment to from here.
    pub fn allowed_next(self) -> &'static [AppointmentStatus] {
        use AppointmentStatus::*;
        match self {
            Pending => &[Confirmed, Cancelled],
            Confirmed => &[InProgress, Completed, Cancelled, NoShow],
            InProgress => &[Completed],
            Completed | Cancelled | NoShow => &[],
        }
    }

    pub fn can_transition_to(self, next: AppointmentStatus) -> bool {
        self.allowed_next().contains(&next)
    }

    pub fn is_terminal(self) -> bool {
        self.allowed_next().is_empty()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "Pending",
            AppointmentStatus::Confirmed => "Confirmed",
            AppointmentStatus::InProgress => "InProgress",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
            AppointmentStatus::NoShow => "NoShow",
        }
    }

    pub fn label_vi(self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "Chờ xác nhận",
            AppointmentStatus::Confirmed => "Đã xác nhận",
            AppointmentStatus::InProgress => "Đang thực hiện",
            AppointmentStatus::Completed => "Hoàn thành",
            AppointmentStatus::Cancelled => "Đã hủy",
            AppointmentStatus::NoShow => "Khách không đến",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let key: String = s.chars().filter(|c| c.is_ascii_alphanumeric()).collect::<String>().to_ascii_lowercase();
        Self::ALL.into_iter().find(|st| st.as_str().to_ascii_lowercase() == key)
            .or_else(|| (key == "canceled").then_some(AppointmentStatus::Cancelled))
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(alias = "appointmentId")]
    pub id: Uuid,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default, alias = "customerPhoneNumber")]
    pub customer_phone: Option<String>,
    pub service_id: Uuid,
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default)]
    pub staff_id: Option<Uuid>,
    #[serde(default)]
    pub staff_name: Option<String>,
    #[serde(default, alias = "locationId")]
    pub branch_id: Option<Uuid>,
    #[serde(with = "date")]
    pub appointment_date: NaiveDate,
    #[serde(default, with = "clock::option")]
    pub start_time: Option<NaiveTime>,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub total_price: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Body for `PUT /api/Appointment/{id}/status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdate {
    pub status: AppointmentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl StatusUpdate {
    /// Checks the move against the appointment's current status.
    pub fn validate_from(&self, current: AppointmentStatus) -> Result<(), ModelError> {
        if current.can_transition_to(self.status) {
            return Ok(());
        }
        Err(ModelError::Transition { from: current.to_string(), to: self.status.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use AppointmentStatus::*;

    #[test]
    fn every_status_has_a_label() {
        for st in AppointmentStatus::ALL {
            assert!(!st.label_vi().is_empty());
        }
        assert_eq!(NoShow.label_vi(), "Khách không đến");
    }

    #[test]
    fn terminal_states_accept_nothing() {
        for st in [Completed, Cancelled, NoShow] {
            assert!(st.is_terminal());
            for next in AppointmentStatus::ALL {
                assert!(!st.can_transition_to(next));
            }
        }
    }

    #[test]
    fn pending_flows() {
        assert!(Pending.can_transition_to(Confirmed));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(!Pending.can_transition_to(Completed));
        assert!(Confirmed.can_transition_to(NoShow));
        assert!(InProgress.can_transition_to(Completed));
        assert!(!InProgress.can_transition_to(Cancelled));
    }

    #[test]
    fn status_update_checks_current() {
        let upd = StatusUpdate { status: Completed, note: None };
        assert!(upd.validate_from(Confirmed).is_ok());
        assert_eq!(
            upd.validate_from(Pending),
            Err(ModelError::Transition { from: "Pending".into(), to: "Completed".into() })
        );
    }

    #[test]
    fn parse_is_lenient() {
        assert_eq!(AppointmentStatus::parse("in_progress"), Some(InProgress));
        assert_eq!(AppointmentStatus::parse("CANCELED"), Some(Cancelled));
        assert_eq!(AppointmentStatus::parse("no-show"), Some(NoShow));
        assert_eq!(AppointmentStatus::parse("later"), None);
    }

    #[test]
    fn decodes_backend_row() {
        let a: Appointment = serde_json::from_value(serde_json::json!({
            "appointmentId": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "customerName": "Trần Minh",
            "serviceId": "3fa85f64-5717-4562-b3fc-2c963f66afa7",
            "appointmentDate": "2025-04-02T00:00:00",
            "startTime": "14:00:00",
            "status": "pending"
        }))
        .unwrap();
        assert_eq!(a.status, Pending);
        assert_eq!(a.appointment_date, NaiveDate::from_ymd_opt(2025, 4, 2).unwrap());
    }
}
