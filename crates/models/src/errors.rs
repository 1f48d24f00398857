use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    /// A form failed a presence/format check; the message is shown to the provider as-is.
    #[error("{0}")]
    Validation(String),
    #[error("Không thể chuyển trạng thái lịch hẹn từ {from} sang {to}.")]
    Transition { from: String, to: String },
}

impl ModelError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
