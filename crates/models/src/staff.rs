use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::validation::{require_email, require_phone, require_text, require_uuid};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    #[serde(alias = "staffId")]
    pub id: Uuid,
    #[serde(alias = "name", alias = "staffName")]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default, alias = "phoneNumber")]
    pub phone: String,
    #[serde(default, alias = "locationId")]
    pub branch_id: Option<Uuid>,
    #[serde(default)]
    pub branch_name: Option<String>,
    #[serde(default, alias = "specialty")]
    pub position: Option<String>,
    #[serde(default, alias = "imageURL", alias = "avatar")]
    pub image_url: Option<String>,
    #[serde(default = "crate::default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffForm {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub branch_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default = "crate::default_true")]
    pub is_active: bool,
}

impl StaffForm {
    pub fn validate(&self) -> Result<(), ModelError> {
        require_text(&self.full_name, "họ tên nhân viên")?;
        require_email(&self.email)?;
        require_phone(&self.phone)?;
        require_uuid(&self.branch_id, "chi nhánh")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> StaffForm {
        StaffForm {
            full_name: "Nguyễn Thị Lan".into(),
            email: "lan@spa.vn".into(),
            phone: "0987654321".into(),
            branch_id: "3fa85f64-5717-4562-b3fc-2c963f66afa6".into(),
            is_active: true,
            ..Default::default()
        }
    }

    #[test]
    fn valid_staff() {
        assert!(form().validate().is_ok());
    }

    #[test]
    fn phone_with_spaces_rejected() {
        let err = StaffForm { phone: "0987 654 321".into(), ..form() }.validate().unwrap_err();
        assert_eq!(err.to_string(), "Số điện thoại phải gồm đúng 10 chữ số.");
    }

    #[test]
    fn branch_required() {
        let err = StaffForm { branch_id: String::new(), ..form() }.validate().unwrap_err();
        assert_eq!(err.to_string(), "Vui lòng chọn chi nhánh.");
    }

    #[test]
    fn form_serializes_camel_case() {
        let v = serde_json::to_value(form()).unwrap();
        assert!(v.get("fullName").is_some());
        assert!(v.get("position").is_none());
    }
}
