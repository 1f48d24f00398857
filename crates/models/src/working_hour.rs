use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::time::clock;
use crate::validation::{require_ordered, require_uuid};

const DAY_NAMES: [&str; 7] = ["Chủ nhật", "Thứ hai", "Thứ ba", "Thứ tư", "Thứ năm", "Thứ sáu", "Thứ bảy"];

/// Vietnamese label for a backend day index (0 = Sunday).
pub fn day_name(day_of_week: u8) -> Option<&'static str> {
    DAY_NAMES.get(day_of_week as usize).copied()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingHour {
    #[serde(alias = "workingHourId")]
    pub id: Uuid,
    #[serde(alias = "locationId")]
    pub branch_id: Uuid,
    pub day_of_week: u8,
    #[serde(default, with = "clock::option", alias = "openTime")]
    pub opening_time: Option<NaiveTime>,
    #[serde(default, with = "clock::option", alias = "closeTime")]
    pub closing_time: Option<NaiveTime>,
    #[serde(default = "crate::default_true")]
    pub is_working: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkingHourForm {
    #[serde(default)]
    pub branch_id: String,
    #[serde(default)]
    pub day_of_week: u8,
    #[serde(default, with = "clock::option")]
    pub opening_time: Option<NaiveTime>,
    #[serde(default, with = "clock::option")]
    pub closing_time: Option<NaiveTime>,
    #[serde(default = "crate::default_true")]
    pub is_working: bool,
}

impl WorkingHourForm {
    pub fn validate(&self) -> Result<(), ModelError> {
        require_uuid(&self.branch_id, "chi nhánh")?;
        if day_name(self.day_of_week).is_none() {
            return Err(ModelError::validation("Ngày trong tuần không hợp lệ."));
        }
        // closed days carry no times
        if !self.is_working {
            return Ok(());
        }
        let open = self.opening_time.ok_or_else(|| ModelError::validation("Vui lòng chọn giờ mở cửa."))?;
        let close = self.closing_time.ok_or_else(|| ModelError::validation("Vui lòng chọn giờ đóng cửa."))?;
        require_ordered(&open, &close, "Giờ đóng cửa phải sau giờ mở cửa.")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32) -> Option<NaiveTime> {
        NaiveTime::from_hms_opt(h, 0, 0)
    }

    fn form() -> WorkingHourForm {
        WorkingHourForm {
            branch_id: "3fa85f64-5717-4562-b3fc-2c963f66afa6".into(),
            day_of_week: 1,
            opening_time: t(8),
            closing_time: t(20),
            is_working: true,
        }
    }

    #[test]
    fn open_before_close() {
        assert!(form().validate().is_ok());
        assert!(WorkingHourForm { closing_time: t(8), ..form() }.validate().is_err());
    }

    #[test]
    fn closed_day_skips_times() {
        let f = WorkingHourForm { opening_time: None, closing_time: None, is_working: false, ..form() };
        assert!(f.validate().is_ok());
    }

    #[test]
    fn day_index_bounds() {
        assert!(WorkingHourForm { day_of_week: 7, ..form() }.validate().is_err());
        assert_eq!(day_name(0), Some("Chủ nhật"));
    }

    #[test]
    fn decodes_short_times() {
        let w: WorkingHour = serde_json::from_value(serde_json::json!({
            "id": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "branchId": "3fa85f64-5717-4562-b3fc-2c963f66afa7",
            "dayOfWeek": 6,
            "openingTime": "09:00",
            "closingTime": "21:30:00"
        }))
        .unwrap();
        assert_eq!(w.opening_time, t(9));
        assert_eq!(w.closing_time, NaiveTime::from_hms_opt(21, 30, 0));
    }
}
