//! Form validation predicates shared by every admin screen.
//!
//! These are presence/format checks only; business rules stay on the backend.

use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

use crate::errors::ModelError;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("phone regex"));
static OTP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{6}$").expect("otp regex"));
static UUID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}$")
        .expect("uuid regex")
});

pub const MIN_PASSWORD_LEN: usize = 6;

/// Exactly ten ASCII digits, no separators.
pub fn is_valid_phone(s: &str) -> bool {
    PHONE_RE.is_match(s)
}

pub fn is_valid_email(s: &str) -> bool {
    EMAIL_RE.is_match(s)
}

pub fn is_valid_otp(s: &str) -> bool {
    OTP_RE.is_match(s)
}

/// Hyphenated UUID as the backend emits it.
pub fn is_valid_uuid(s: &str) -> bool {
    UUID_RE.is_match(s)
}

/// Either no discount at all, or exactly one of the two kinds; never negative.
pub fn discounts_are_valid(percent: f64, amount: f64) -> bool {
    if !percent.is_finite() || !amount.is_finite() || percent < 0.0 || amount < 0.0 {
        return false;
    }
    if percent > 100.0 {
        return false;
    }
    !(percent > 0.0 && amount > 0.0)
}

pub fn require_text(value: &str, label: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::validation(format!("Vui lòng nhập {label}.")));
    }
    Ok(())
}

pub fn require_email(value: &str) -> Result<(), ModelError> {
    require_text(value, "email")?;
    if !is_valid_email(value.trim()) {
        return Err(ModelError::validation("Email không hợp lệ."));
    }
    Ok(())
}

pub fn require_phone(value: &str) -> Result<(), ModelError> {
    require_text(value, "số điện thoại")?;
    if !is_valid_phone(value.trim()) {
        return Err(ModelError::validation("Số điện thoại phải gồm đúng 10 chữ số."));
    }
    Ok(())
}

/// Select boxes post the record id as text; it has to look like a UUID before we send it on.
pub fn require_uuid(value: &str, label: &str) -> Result<Uuid, ModelError> {
    let v = value.trim();
    if v.is_empty() {
        return Err(ModelError::validation(format!("Vui lòng chọn {label}.")));
    }
    if !is_valid_uuid(v) {
        return Err(ModelError::validation(format!("Mã {label} không hợp lệ.")));
    }
    Uuid::parse_str(v).map_err(|_| ModelError::validation(format!("Mã {label} không hợp lệ.")))
}

pub fn require_range(value: f64, min: f64, max: f64, message: &str) -> Result<(), ModelError> {
    if !value.is_finite() || value < min || value > max {
        return Err(ModelError::validation(message));
    }
    Ok(())
}

pub fn require_ordered<T: PartialOrd>(start: &T, end: &T, message: &str) -> Result<(), ModelError> {
    if start >= end {
        return Err(ModelError::validation(message));
    }
    Ok(())
}

pub fn require_password(password: &str, confirm: &str) -> Result<(), ModelError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ModelError::validation(format!(
            "Mật khẩu phải có ít nhất {MIN_PASSWORD_LEN} ký tự."
        )));
    }
    if password != confirm {
        return Err(ModelError::validation("Mật khẩu xác nhận không khớp."));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_is_exactly_ten_digits() {
        assert!(is_valid_phone("0912345678"));
        assert!(!is_valid_phone("091234567"));
        assert!(!is_valid_phone("09123456789"));
        assert!(!is_valid_phone("09123 45678"));
        assert!(!is_valid_phone("+849123456"));
        assert!(!is_valid_phone("０９１２３４５６７８"));
    }

    #[test]
    fn email_shape() {
        assert!(is_valid_email("spa@example.vn"));
        assert!(!is_valid_email("spa@example"));
        assert!(!is_valid_email("spa example@x.vn"));
        assert!(!is_valid_email("@x.vn"));
    }

    #[test]
    fn uuid_requires_hyphenated_form() {
        assert!(is_valid_uuid("3fa85f64-5717-4562-b3fc-2c963f66afa6"));
        assert!(!is_valid_uuid("3fa85f6457174562b3fc2c963f66afa6"));
        assert!(require_uuid("", "dịch vụ").is_err());
    }

    #[test]
    fn discount_rule() {
        assert!(discounts_are_valid(0.0, 0.0));
        assert!(discounts_are_valid(10.0, 0.0));
        assert!(discounts_are_valid(0.0, 50_000.0));
        assert!(!discounts_are_valid(10.0, 50_000.0));
        assert!(!discounts_are_valid(-1.0, 0.0));
        assert!(!discounts_are_valid(0.0, -5.0));
        assert!(!discounts_are_valid(120.0, 0.0));
        assert!(!discounts_are_valid(f64::NAN, 0.0));
    }

    #[test]
    fn otp_is_six_digits() {
        assert!(is_valid_otp("012345"));
        assert!(!is_valid_otp("12345"));
        assert!(!is_valid_otp("12a456"));
    }

    #[test]
    fn password_rules() {
        assert!(require_password("secret1", "secret1").is_ok());
        assert!(require_password("abc", "abc").is_err());
        assert_eq!(
            require_password("secret1", "secret2"),
            Err(ModelError::validation("Mật khẩu xác nhận không khớp."))
        );
    }

    #[test]
    fn ordering() {
        assert!(require_ordered(&1, &2, "x").is_ok());
        assert!(require_ordered(&2, &2, "x").is_err());
    }
}
