//! Localized (Vietnamese) user-facing messages.
//!
//! Backend failures are reported to providers by HTTP status, refined by the
//! screen the call came from. Messages are fixed strings; backend detail is
//! carried separately and never shown in place of these.

use serde::Serialize;

pub const NETWORK_MESSAGE: &str = "Không thể kết nối đến máy chủ. Vui lòng kiểm tra kết nối mạng.";
pub const DECODE_MESSAGE: &str = "Phản hồi từ máy chủ không hợp lệ.";
pub const SESSION_MESSAGE: &str = "Phiên đăng nhập đã hết hạn. Vui lòng đăng nhập lại.";

/// The screen or flow an error surfaced from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorContext {
    Login,
    Register,
    VerifyOtp,
    ResendOtp,
    Service,
    Category,
    Staff,
    Branch,
    Promotion,
    FlashSale,
    WorkingHour,
    Appointment,
    Geo,
    Upload,
    Generic,
}

/// Kind of successful mutation, used for the toast shown after refetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Created,
    Updated,
    Deleted,
    StatusChanged,
}

impl ErrorContext {
    /// Vietnamese noun for the record this screen manages.
    pub fn noun(self) -> &'static str {
        match self {
            ErrorContext::Service => "dịch vụ",
            ErrorContext::Category => "danh mục dịch vụ",
            ErrorContext::Staff => "nhân viên",
            ErrorContext::Branch => "chi nhánh",
            ErrorContext::Promotion => "khuyến mãi",
            ErrorContext::FlashSale => "flash sale",
            ErrorContext::WorkingHour => "giờ làm việc",
            ErrorContext::Appointment => "lịch hẹn",
            ErrorContext::Login | ErrorContext::Register | ErrorContext::VerifyOtp | ErrorContext::ResendOtp => "tài khoản",
            ErrorContext::Geo => "dữ liệu địa giới hành chính",
            ErrorContext::Upload => "dịch vụ tải ảnh",
            ErrorContext::Generic => "dữ liệu",
        }
    }

    /// Pick the message shown for a failed call with the given HTTP status.
    pub fn message_for(self, status: u16) -> String {
        match (status, self) {
            (400, ErrorContext::Login) => "Vui lòng nhập đúng email và mật khẩu.".into(),
            (400, ErrorContext::Register) => "Email hoặc số điện thoại đã được sử dụng.".into(),
            (400, ErrorContext::VerifyOtp) => "Mã OTP không hợp lệ hoặc đã hết hạn.".into(),
            (400, ErrorContext::ResendOtp) => "Không thể gửi lại mã OTP. Vui lòng thử lại sau.".into(),
            (400, ErrorContext::Upload) => "Ảnh không hợp lệ hoặc vượt quá dung lượng cho phép.".into(),
            (400, _) => "Dữ liệu không hợp lệ. Vui lòng kiểm tra lại.".into(),
            (401, ErrorContext::Login) => "Email hoặc mật khẩu không chính xác.".into(),
            (401, ErrorContext::VerifyOtp) => "Mã OTP không chính xác.".into(),
            (401, _) => SESSION_MESSAGE.into(),
            (403, _) => "Bạn không có quyền thực hiện thao tác này.".into(),
            (404, ctx) => format!("Không tìm thấy {}.", ctx.noun()),
            (409, ErrorContext::Register) => "Email đã được đăng ký.".into(),
            (409, ctx) => format!("{} đã tồn tại.", capitalize(ctx.noun())),
            (500..=599, _) => "Lỗi máy chủ. Vui lòng thử lại sau.".into(),
            (other, _) => format!("Đã xảy ra lỗi không xác định (mã {other})."),
        }
    }

    /// Whether the frontend should be sent back to the login page.
    pub fn redirects_to_login(self, status: u16) -> bool {
        status == 401 && !matches!(self, ErrorContext::Login | ErrorContext::VerifyOtp)
    }

    pub fn success(self, action: Action) -> String {
        let noun = self.noun();
        match action {
            Action::Created => format!("Thêm {noun} thành công."),
            Action::Updated => format!("Cập nhật {noun} thành công."),
            Action::Deleted => format!("Xóa {noun} thành công."),
            Action::StatusChanged => format!("Cập nhật trạng thái {noun} thành công."),
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_401_is_bad_credentials_not_expired_session() {
        assert_eq!(ErrorContext::Login.message_for(401), "Email hoặc mật khẩu không chính xác.");
        assert_eq!(ErrorContext::Staff.message_for(401), SESSION_MESSAGE);
    }

    #[test]
    fn not_found_names_the_record() {
        assert_eq!(ErrorContext::Branch.message_for(404), "Không tìm thấy chi nhánh.");
        assert_eq!(ErrorContext::Appointment.message_for(404), "Không tìm thấy lịch hẹn.");
    }

    #[test]
    fn server_errors_share_one_message() {
        assert_eq!(ErrorContext::Service.message_for(500), ErrorContext::Promotion.message_for(503));
    }

    #[test]
    fn conflict_is_capitalized() {
        assert_eq!(ErrorContext::Service.message_for(409), "Dịch vụ đã tồn tại.");
    }

    #[test]
    fn unknown_status_mentions_code() {
        assert!(ErrorContext::Generic.message_for(418).contains("418"));
    }

    #[test]
    fn only_session_screens_redirect() {
        assert!(ErrorContext::Service.redirects_to_login(401));
        assert!(!ErrorContext::Login.redirects_to_login(401));
        assert!(!ErrorContext::Service.redirects_to_login(404));
    }

    #[test]
    fn success_messages() {
        assert_eq!(ErrorContext::Staff.success(Action::Deleted), "Xóa nhân viên thành công.");
    }
}
