use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use models::auth::{AccountForm, BusinessForm, ResendOtpRequest, VerifyOtpRequest};
use models::errors::ModelError;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::draft::{RegistrationDraft, RegistrationStep};
use super::store::DraftStore;
use crate::auth::AuthService;
use crate::errors::{ServiceError, DRAFT_GONE_MESSAGE};
use crate::geo::GeoProvider;
use crate::observability::REGISTRATIONS_TOTAL;

#[derive(Debug, Clone, Copy)]
pub struct FlowOptions {
    /// Minimum gap between two OTP sends for the same draft.
    pub resend_cooldown: Duration,
    pub max_resends: u32,
    /// How long a pending backend call keeps other steps of the same draft out.
    pub request_lease: Duration,
}

impl Default for FlowOptions {
    fn default() -> Self {
        Self { resend_cooldown: Duration::seconds(60), max_resends: 5, request_lease: Duration::seconds(120) }
    }
}

const BUSY_MESSAGE: &str = "Yêu cầu trước đó đang được xử lý. Vui lòng thử lại sau giây lát.";

/// Drives one provider through sign-up, one step per call.
///
/// Every change goes through [`DraftStore::update`]. Steps that call the
/// backend claim the draft first and release it afterwards, so two requests
/// for the same draft cannot both pass a check and both act on it.
#[derive(Clone)]
pub struct RegistrationFlow {
    store: Arc<dyn DraftStore>,
    geo: Arc<dyn GeoProvider>,
    auth: AuthService,
    opts: FlowOptions,
}

impl RegistrationFlow {
    pub fn new(store: Arc<dyn DraftStore>, geo: Arc<dyn GeoProvider>, auth: AuthService, opts: FlowOptions) -> Self {
        Self { store, geo, auth, opts }
    }

    async fn load(&self, id: Uuid) -> Result<RegistrationDraft, ServiceError> {
        self.store.get(id, Utc::now()).await.ok_or_else(|| ServiceError::Gone(DRAFT_GONE_MESSAGE.into()))
    }

    async fn edit<'a, F>(&'a self, id: Uuid, now: DateTime<Utc>, f: F) -> Result<RegistrationDraft, ServiceError>
    where
        F: FnOnce(&mut RegistrationDraft) -> Result<(), ServiceError> + Send + 'a,
    {
        self.store.update(id, now, Box::new(f)).await
    }

    /// Drop the claim taken before a backend call that failed.
    async fn release(&self, id: Uuid) {
        let released = self
            .edit(id, Utc::now(), |d| {
                d.in_flight_since = None;
                Ok(())
            })
            .await;
        if let Err(err) = released {
            warn!(draft_id = %id, error = %err, "registration_release_failed");
        }
    }

    fn expect_step(draft: &RegistrationDraft, step: RegistrationStep) -> Result<(), ServiceError> {
        if draft.step != step {
            return Err(ServiceError::Validation(format!(
                "Thao tác không hợp lệ ở bước đăng ký hiện tại ({}).",
                draft.step.as_str()
            )));
        }
        Ok(())
    }

    fn ready(&self, draft: &RegistrationDraft, step: RegistrationStep, now: DateTime<Utc>) -> Result<(), ServiceError> {
        Self::expect_step(draft, step)?;
        if draft.is_busy(now, self.opts.request_lease) {
            return Err(ServiceError::Validation(BUSY_MESSAGE.into()));
        }
        Ok(())
    }

    /// Validate the account step and open a draft positioned at the business step.
    #[instrument(skip_all, fields(email = %account.email))]
    pub async fn start(&self, account: AccountForm) -> Result<RegistrationDraft, ServiceError> {
        account.validate()?;
        let mut draft = RegistrationDraft::new(account, Utc::now());
        draft.step = RegistrationStep::Business;
        self.store.put(draft.clone()).await;
        REGISTRATIONS_TOTAL.with_label_values(&["started"]).inc();
        info!(draft_id = %draft.id, "registration_started");
        Ok(draft)
    }

    pub async fn get(&self, id: Uuid) -> Result<RegistrationDraft, ServiceError> {
        self.load(id).await
    }

    /// Go back from the business step to edit the account details.
    pub async fn back(&self, id: Uuid) -> Result<RegistrationDraft, ServiceError> {
        let now = Utc::now();
        self.edit(id, now, |d| {
            self.ready(d, RegistrationStep::Business, now)?;
            d.step = RegistrationStep::Account;
            Ok(())
        })
        .await
    }

    pub async fn submit_account(&self, id: Uuid, account: AccountForm) -> Result<RegistrationDraft, ServiceError> {
        let now = Utc::now();
        self.edit(id, now, |d| {
            self.ready(d, RegistrationStep::Account, now)?;
            account.validate()?;
            d.account = account;
            d.step = RegistrationStep::Business;
            Ok(())
        })
        .await
    }

    /// First cascading select. Resets the district when the province changes.
    #[instrument(skip(self))]
    pub async fn select_province(&self, id: Uuid, code: &str) -> Result<RegistrationDraft, ServiceError> {
        Self::expect_step(&self.load(id).await?, RegistrationStep::Business)?;
        let province = self
            .geo
            .find_province(code.trim())
            .await?
            .ok_or_else(|| ModelError::validation("Tỉnh/thành phố không hợp lệ."))?;
        let now = Utc::now();
        self.edit(id, now, |d| {
            self.ready(d, RegistrationStep::Business, now)?;
            d.set_province(province);
            Ok(())
        })
        .await
    }

    /// Second cascading select; only districts of the chosen province are accepted.
    #[instrument(skip(self))]
    pub async fn select_district(&self, id: Uuid, code: &str) -> Result<RegistrationDraft, ServiceError> {
        let current = self.load(id).await?;
        Self::expect_step(&current, RegistrationStep::Business)?;
        let province_code = current
            .province
            .as_ref()
            .map(|p| p.code.clone())
            .ok_or_else(|| ModelError::validation("Vui lòng chọn tỉnh/thành phố trước."))?;
        let district = self
            .geo
            .find_district(&province_code, code.trim())
            .await?
            .ok_or_else(|| ModelError::validation("Quận/huyện không hợp lệ."))?;
        let now = Utc::now();
        self.edit(id, now, |d| {
            self.ready(d, RegistrationStep::Business, now)?;
            // the province may have changed while the lookup ran
            if d.province.as_ref().map(|p| &p.code) != Some(&province_code) {
                return Err(ModelError::validation("Tỉnh/thành phố đã thay đổi, vui lòng chọn lại quận/huyện.").into());
            }
            d.district = Some(district);
            Ok(())
        })
        .await
    }

    /// Send the whole registration to the backend, which emails the OTP.
    #[instrument(skip_all, fields(%id))]
    pub async fn submit_business(&self, id: Uuid, business: BusinessForm) -> Result<RegistrationDraft, ServiceError> {
        let now = Utc::now();
        let claimed = self
            .edit(id, now, |d| {
                self.ready(d, RegistrationStep::Business, now)?;
                business.validate()?;
                if d.province.is_none() {
                    return Err(ModelError::validation("Vui lòng chọn tỉnh/thành phố.").into());
                }
                if d.district.is_none() {
                    return Err(ModelError::validation("Vui lòng chọn quận/huyện.").into());
                }
                d.in_flight_since = Some(now);
                Ok(())
            })
            .await?;
        let request = match claimed.to_register_request(&business) {
            Some(request) => request,
            None => {
                self.release(id).await;
                return Err(ModelError::validation("Vui lòng chọn quận/huyện.").into());
            }
        };

        if let Err(err) = self.auth.register(&request).await {
            self.release(id).await;
            return Err(err);
        }

        let draft = self
            .edit(id, Utc::now(), |d| {
                d.in_flight_since = None;
                d.business = Some(business);
                d.step = RegistrationStep::VerifyOtp;
                d.otp_sent_at = Some(Utc::now());
                Ok(())
            })
            .await?;
        REGISTRATIONS_TOTAL.with_label_values(&["submitted"]).inc();
        Ok(draft)
    }

    /// Confirm the emailed code. The draft is discarded once the backend accepts it.
    #[instrument(skip_all, fields(%id))]
    pub async fn verify_otp(&self, id: Uuid, otp: &str) -> Result<RegistrationDraft, ServiceError> {
        let current = self.load(id).await?;
        Self::expect_step(&current, RegistrationStep::VerifyOtp)?;
        let req = VerifyOtpRequest { email: current.account.email.trim().to_string(), otp: otp.trim().to_string() };
        req.validate()?;

        let now = Utc::now();
        let mut draft = self
            .edit(id, now, |d| {
                self.ready(d, RegistrationStep::VerifyOtp, now)?;
                d.in_flight_since = Some(now);
                Ok(())
            })
            .await?;
        if let Err(err) = self.auth.verify_otp(&req).await {
            self.release(id).await;
            return Err(err);
        }

        draft.step = RegistrationStep::Completed;
        draft.in_flight_since = None;
        self.store.remove(id).await;
        REGISTRATIONS_TOTAL.with_label_values(&["completed"]).inc();
        info!(draft_id = %id, email = %req.email, "registration_completed");
        Ok(draft)
    }

    /// Ask the backend to email a new code. The resend slot is taken before the
    /// call and handed back if the backend refuses.
    #[instrument(skip_all, fields(%id))]
    pub async fn resend_otp(&self, id: Uuid) -> Result<RegistrationDraft, ServiceError> {
        let now = Utc::now();
        let opts = self.opts;
        let mut previous_sent_at = None;
        let claimed = self
            .edit(id, now, |d| {
                self.ready(d, RegistrationStep::VerifyOtp, now)?;
                if d.otp_resends >= opts.max_resends {
                    return Err(ServiceError::Validation("Bạn đã yêu cầu gửi lại mã quá nhiều lần.".into()));
                }
                if let Some(sent) = d.otp_sent_at {
                    let wait = (sent + opts.resend_cooldown) - now;
                    if wait > Duration::zero() {
                        let secs = wait.num_seconds().max(1);
                        return Err(ServiceError::Validation(format!("Vui lòng đợi {secs} giây trước khi gửi lại mã.")));
                    }
                }
                previous_sent_at = d.otp_sent_at;
                d.otp_resends += 1;
                d.otp_sent_at = Some(now);
                d.in_flight_since = Some(now);
                Ok(())
            })
            .await?;

        let req = ResendOtpRequest { email: claimed.account.email.trim().to_string() };
        if let Err(err) = self.auth.resend_otp(&req).await {
            let rollback = self
                .edit(id, Utc::now(), |d| {
                    d.in_flight_since = None;
                    if d.otp_sent_at == Some(now) {
                        d.otp_resends = d.otp_resends.saturating_sub(1);
                        d.otp_sent_at = previous_sent_at;
                    }
                    Ok(())
                })
                .await;
            if let Err(rb) = rollback {
                warn!(draft_id = %id, error = %rb, "registration_resend_rollback_failed");
            }
            return Err(err);
        }

        self.edit(id, Utc::now(), |d| {
            d.in_flight_since = None;
            Ok(())
        })
        .await
    }
}
