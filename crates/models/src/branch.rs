//! Spa branch locations (`SpaBranchLocation` on the backend).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::validation::{require_phone, require_range, require_text};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Branch {
    #[serde(alias = "locationId", alias = "branchId")]
    pub id: Uuid,
    #[serde(alias = "name")]
    pub branch_name: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub district: String,
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default = "crate::default_true")]
    pub is_active: bool,
}

impl Branch {
    pub fn full_address(&self) -> String {
        [self.street.as_str(), self.district.as_str(), self.province.as_str()]
            .iter()
            .filter(|p| !p.trim().is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchForm {
    #[serde(default)]
    pub branch_name: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub district: String,
    #[serde(default)]
    pub province: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(default = "crate::default_true")]
    pub is_active: bool,
}

impl BranchForm {
    pub fn validate(&self) -> Result<(), ModelError> {
        require_text(&self.branch_name, "tên chi nhánh")?;
        require_text(&self.province, "tỉnh/thành phố")?;
        require_text(&self.district, "quận/huyện")?;
        require_text(&self.street, "địa chỉ")?;
        if let Some(phone) = self.phone.as_deref().filter(|p| !p.trim().is_empty()) {
            require_phone(phone)?;
        }
        if let Some(lat) = self.latitude {
            require_range(lat, -90.0, 90.0, "Vĩ độ phải nằm trong khoảng -90 đến 90.")?;
        }
        if let Some(lng) = self.longitude {
            require_range(lng, -180.0, 180.0, "Kinh độ phải nằm trong khoảng -180 đến 180.")?;
        }
        Ok(())
    }
}
