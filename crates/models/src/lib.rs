//! Data shapes mirrored from the spa marketplace backend, plus the form inputs
//! providers submit and the presence/format checks run before submission.

pub mod errors;
pub mod validation;
pub mod time;
pub mod auth;
pub mod catalog;
pub mod branch;
pub mod staff;
pub mod promotion;
pub mod working_hour;
pub mod appointment;
pub mod geo;

pub use appointment::{Appointment, AppointmentStatus, StatusUpdate};
pub use branch::{Branch, BranchForm};
pub use catalog::{Service, ServiceCategory, ServiceForm};
pub use promotion::{FlashSale, FlashSaleForm, Promotion, PromotionForm};
pub use staff::{Staff, StaffForm};
pub use working_hour::{WorkingHour, WorkingHourForm};

pub(crate) fn default_true() -> bool {
    true
}
