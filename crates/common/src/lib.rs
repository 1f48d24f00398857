//! Shared building blocks for the spa provider admin: logging setup,
//! startup checks, localized messages and small response types.

pub mod env;
pub mod i18n;
pub mod types;
pub mod utils;

pub use i18n::{Action, ErrorContext};
