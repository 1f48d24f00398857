use chrono::{DateTime, Duration, Utc};
use models::auth::{AccountForm, BusinessForm, RegisterRequest};
use models::geo::{District, Province};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStep {
    Account,
    Business,
    VerifyOtp,
    Completed,
}

impl RegistrationStep {
    pub fn as_str(self) -> &'static str {
        match self {
            RegistrationStep::Account => "account",
            RegistrationStep::Business => "business",
            RegistrationStep::VerifyOtp => "verify_otp",
            RegistrationStep::Completed => "completed",
        }
    }
}

pub const PROVIDER_ROLE: &str = "Provider";

#[derive(Debug, Clone)]
pub struct RegistrationDraft {
    pub id: Uuid,
    pub step: RegistrationStep,
    pub account: AccountForm,
    pub province: Option<Province>,
    pub district: Option<District>,
    pub business: Option<BusinessForm>,
    pub created_at: DateTime<Utc>,
    /// Expiry counts from here; the store bumps it on every accepted change.
    pub last_active_at: DateTime<Utc>,
    /// Set while a backend call for this draft is outstanding.
    pub in_flight_since: Option<DateTime<Utc>>,
    pub otp_sent_at: Option<DateTime<Utc>>,
    pub otp_resends: u32,
}

impl RegistrationDraft {
    pub fn new(account: AccountForm, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            step: RegistrationStep::Account,
            account,
            province: None,
            district: None,
            business: None,
            created_at: now,
            last_active_at: now,
            in_flight_since: None,
            otp_sent_at: None,
            otp_resends: 0,
        }
    }

    /// A new province invalidates whatever district was picked under the old one.
    pub fn set_province(&mut self, province: Province) {
        if self.province.as_ref().map(|p| &p.code) != Some(&province.code) {
            self.district = None;
        }
        self.province = Some(province);
    }

    /// A claim older than `lease` belongs to a request that never finished.
    pub fn is_busy(&self, now: DateTime<Utc>, lease: Duration) -> bool {
        self.in_flight_since.is_some_and(|since| since + lease > now)
    }

    /// Everything the backend needs, once the business step is filled in.
    pub fn to_register_request(&self, business: &BusinessForm) -> Option<RegisterRequest> {
        let province = self.province.as_ref()?;
        let district = self.district.as_ref()?;
        Some(RegisterRequest {
            full_name: self.account.full_name.trim().to_string(),
            email: self.account.email.trim().to_string(),
            phone_number: self.account.phone.trim().to_string(),
            password: self.account.password.clone(),
            confirm_password: self.account.confirm_password.clone(),
            business_name: business.business_name.trim().to_string(),
            province: province.name.clone(),
            district: district.name.clone(),
            address: business.address.trim().to_string(),
            role: PROVIDER_ROLE.to_string(),
        })
    }

    pub fn view(&self) -> DraftView {
        DraftView {
            id: self.id,
            step: self.step,
            full_name: self.account.full_name.clone(),
            email: self.account.email.clone(),
            phone: self.account.phone.clone(),
            province: self.province.clone(),
            district: self.district.clone(),
            business_name: self.business.as_ref().map(|b| b.business_name.clone()),
            address: self.business.as_ref().map(|b| b.address.clone()),
            otp_resends: self.otp_resends,
        }
    }
}

/// What the frontend sees of a draft; never includes the password.
#[derive(Debug, Clone, Serialize)]
pub struct DraftView {
    pub id: Uuid,
    pub step: RegistrationStep,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub province: Option<Province>,
    pub district: Option<District>,
    pub business_name: Option<String>,
    pub address: Option<String>,
    pub otp_resends: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn province(code: &str) -> Province {
        Province { code: code.into(), name: format!("P{code}") }
    }

    #[test]
    fn changing_province_clears_district() {
        let mut d = RegistrationDraft::new(AccountForm::default(), Utc::now());
        d.set_province(province("79"));
        d.district = Some(District { code: "760".into(), name: "Q1".into(), province_code: "79".into() });
        d.set_province(province("79"));
        assert!(d.district.is_some());
        d.set_province(province("01"));
        assert!(d.district.is_none());
    }

    #[test]
    fn view_hides_password() {
        let account = AccountForm { password: "secret1".into(), confirm_password: "secret1".into(), ..Default::default() };
        let v = serde_json::to_value(RegistrationDraft::new(account, Utc::now()).view()).unwrap();
        assert!(!v.to_string().contains("secret1"));
        assert_eq!(v["step"], "account");
    }

    #[test]
    fn stale_claims_do_not_block() {
        let now = Utc::now();
        let mut d = RegistrationDraft::new(AccountForm::default(), now);
        assert!(!d.is_busy(now, Duration::seconds(30)));
        d.in_flight_since = Some(now);
        assert!(d.is_busy(now + Duration::seconds(29), Duration::seconds(30)));
        assert!(!d.is_busy(now + Duration::seconds(30), Duration::seconds(30)));
    }

    #[test]
    fn request_needs_both_selects() {
        let mut d = RegistrationDraft::new(AccountForm::default(), Utc::now());
        let b = BusinessForm { business_name: "Lotus Spa".into(), address: "1 Hai Bà Trưng".into() };
        assert!(d.to_register_request(&b).is_none());
        d.set_province(province("79"));
        d.district = Some(District { code: "760".into(), name: "Quận 1".into(), province_code: "79".into() });
        let req = d.to_register_request(&b).unwrap();
        assert_eq!(req.district, "Quận 1");
        assert_eq!(req.role, PROVIDER_ROLE);
    }
}
