//! Provider-wide promotions and per-service flash sales (`ServicePromotion`).

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ModelError;
use crate::time::datetime;
use crate::validation::{discounts_are_valid, require_ordered, require_range, require_text, require_uuid};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    #[serde(alias = "promotionId")]
    pub id: Uuid,
    #[serde(alias = "name", alias = "title")]
    pub promotion_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub discount_percent: f64,
    #[serde(default)]
    pub discount_amount: f64,
    #[serde(with = "datetime")]
    pub start_date: NaiveDateTime,
    #[serde(with = "datetime")]
    pub end_date: NaiveDateTime,
    #[serde(default = "crate::default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionForm {
    #[serde(default)]
    pub promotion_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub discount_percent: f64,
    #[serde(default)]
    pub discount_amount: f64,
    #[serde(default, with = "datetime::option")]
    pub start_date: Option<NaiveDateTime>,
    #[serde(default, with = "datetime::option")]
    pub end_date: Option<NaiveDateTime>,
    #[serde(default = "crate::default_true")]
    pub is_active: bool,
}

impl PromotionForm {
    pub fn validate(&self) -> Result<(), ModelError> {
        require_text(&self.promotion_name, "tên khuyến mãi")?;
        if !discounts_are_valid(self.discount_percent, self.discount_amount) {
            return Err(ModelError::validation(
                "Chỉ được nhập một loại giảm giá: phần trăm (0-100) hoặc số tiền, không âm.",
            ));
        }
        let (start, end) = required_window(self.start_date, self.end_date)?;
        require_ordered(&start, &end, "Ngày kết thúc phải sau ngày bắt đầu.")?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashSale {
    #[serde(alias = "servicePromotionId", alias = "flashSaleId")]
    pub id: Uuid,
    pub service_id: Uuid,
    #[serde(default)]
    pub service_name: Option<String>,
    #[serde(default)]
    pub discount_percent: f64,
    #[serde(with = "datetime")]
    pub start_date: NaiveDateTime,
    #[serde(with = "datetime")]
    pub end_date: NaiveDateTime,
    #[serde(default = "crate::default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlashSaleForm {
    #[serde(default)]
    pub service_id: String,
    #[serde(default)]
    pub discount_percent: f64,
    #[serde(default, with = "datetime::option")]
    pub start_date: Option<NaiveDateTime>,
    #[serde(default, with = "datetime::option")]
    pub end_date: Option<NaiveDateTime>,
    #[serde(default = "crate::default_true")]
    pub is_active: bool,
}

impl FlashSaleForm {
    pub fn validate(&self) -> Result<(), ModelError> {
        require_uuid(&self.service_id, "dịch vụ")?;
        if self.discount_percent <= 0.0 {
            return Err(ModelError::validation("Phần trăm giảm giá phải lớn hơn 0."));
        }
        require_range(self.discount_percent, 0.0, 100.0, "Phần trăm giảm giá không được vượt quá 100.")?;
        let (start, end) = required_window(self.start_date, self.end_date)?;
        require_ordered(&start, &end, "Thời gian kết thúc phải sau thời gian bắt đầu.")?;
        Ok(())
    }
}

fn required_window(
    start: Option<NaiveDateTime>,
    end: Option<NaiveDateTime>,
) -> Result<(NaiveDateTime, NaiveDateTime), ModelError> {
    let start = start.ok_or_else(|| ModelError::validation("Vui lòng chọn ngày bắt đầu."))?;
    let end = end.ok_or_else(|| ModelError::validation("Vui lòng chọn ngày kết thúc."))?;
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(d: u32) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(2025, 3, d).and_then(|x| x.and_hms_opt(0, 0, 0))
    }

    fn promo() -> PromotionForm {
        PromotionForm {
            promotion_name: "Mừng 8/3".into(),
            discount_percent: 20.0,
            start_date: at(1),
            end_date: at(9),
            is_active: true,
            ..Default::default()
        }
    }

    #[test]
    fn both_discounts_rejected() {
        assert!(promo().validate().is_ok());
        assert!(PromotionForm { discount_amount: 10_000.0, ..promo() }.validate().is_err());
        assert!(PromotionForm { discount_percent: 0.0, ..promo() }.validate().is_ok());
    }

    #[test]
    fn end_must_follow_start() {
        let err = PromotionForm { end_date: at(1), ..promo() }.validate().unwrap_err();
        assert_eq!(err.to_string(), "Ngày kết thúc phải sau ngày bắt đầu.");
    }

    #[test]
    fn missing_dates() {
        let err = PromotionForm { start_date: None, ..promo() }.validate().unwrap_err();
        assert_eq!(err.to_string(), "Vui lòng chọn ngày bắt đầu.");
    }

    #[test]
    fn flash_sale_percent_bounds() {
        let base = FlashSaleForm {
            service_id: "3fa85f64-5717-4562-b3fc-2c963f66afa6".into(),
            discount_percent: 30.0,
            start_date: at(1),
            end_date: at(2),
            is_active: true,
        };
        assert!(base.validate().is_ok());
        assert!(FlashSaleForm { discount_percent: 0.0, ..base.clone() }.validate().is_err());
        assert!(FlashSaleForm { discount_percent: 101.0, ..base.clone() }.validate().is_err());
        assert!(FlashSaleForm { discount_percent: 100.0, ..base }.validate().is_ok());
    }

    #[test]
    fn flash_sale_decodes_backend_shape() {
        let f: FlashSale = serde_json::from_value(serde_json::json!({
            "servicePromotionId": "3fa85f64-5717-4562-b3fc-2c963f66afa6",
            "serviceId": "3fa85f64-5717-4562-b3fc-2c963f66afa7",
            "discountPercent": 15,
            "startDate": "2025-03-01T08:00:00",
            "endDate": "2025-03-01T20:00:00Z"
        }))
        .unwrap();
        assert_eq!(f.discount_percent, 15.0);
        assert!(f.start_date < f.end_date);
    }
}
