//! Services offered by a provider and the categories they are filed under.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::validation::{require_range, require_text, require_uuid};

pub const MAX_DURATION_MINUTES: u32 = 24 * 60;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCategory {
    #[serde(alias = "categoryId")]
    pub id: Uuid,
    #[serde(alias = "categoryName")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(alias = "serviceId")]
    pub id: Uuid,
    #[serde(alias = "serviceName")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: f64,
    /// Minutes.
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub category_id: Option<Uuid>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default, alias = "imageURL", alias = "image")]
    pub image_url: Option<String>,
    #[serde(default = "crate::default_true")]
    pub is_active: bool,
}

/// Create/edit form for a service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub category_id: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "crate::default_true")]
    pub is_active: bool,
}

impl ServiceForm {
    pub fn validate(&self) -> Result<(), ModelError> {
        require_text(&self.name, "tên dịch vụ")?;
        require_uuid(&self.category_id, "danh mục dịch vụ")?;
        if !self.price.is_finite() || self.price <= 0.0 {
            return Err(ModelError::validation("Giá dịch vụ phải lớn hơn 0."));
        }
        require_range(
            self.duration as f64,
            1.0,
            MAX_DURATION_MINUTES as f64,
            "Thời lượng dịch vụ phải từ 1 đến 1440 phút.",
        )?;
        Ok(())
    }
}

impl From<&Service> for ServiceForm {
    fn from(s: &Service) -> Self {
        Self {
            name: s.name.clone(),
            description: s.description.clone(),
            price: s.price,
            duration: s.duration,
            category_id: s.category_id.map(|c| c.to_string()).unwrap_or_default(),
            image_url: s.image_url.clone(),
            is_active: s.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ServiceForm {
        ServiceForm {
            name: "Massage đá nóng".into(),
            price: 350_000.0,
            duration: 60,
            category_id: "3fa85f64-5717-4562-b3fc-2c963f66afa6".into(),
            ..Default::default()
        }
    }

    #[test]
    fn valid_form_passes() {
        assert!(form().validate().is_ok());
    }

    #[test]
    fn zero_price_rejected() {
        let f = ServiceForm { price: 0.0, ..form() };
        assert_eq!(f.validate(), Err(ModelError::validation("Giá dịch vụ phải lớn hơn 0.")));
    }

    #[test]
    fn duration_bounds() {
        assert!(ServiceForm { duration: 0, ..form() }.validate().is_err());
        assert!(ServiceForm { duration: 1441, ..form() }.validate().is_err());
        assert!(ServiceForm { duration: 1440, ..form() }.validate().is_ok());
    }

    #[test]
    fn category_must_be_uuid() {
        assert!(ServiceForm { category_id: "spa".into(), ..form() }.validate().is_err());
    }

    #[test]
    fn backend_aliases_decode() {
        let s: Service = serde_json::from_value(serde_json::json!({
            "serviceId": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "serviceName": "Gội đầu dưỡng sinh",
            "price": 120000,
            "duration": 45
        }))
        .unwrap();
        assert_eq!(s.name, "Gội đầu dưỡng sinh");
        assert!(s.is_active);
        assert_eq!(ServiceForm::from(&s).duration, 45);
    }
}
