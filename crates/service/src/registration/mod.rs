//! Multi-step provider sign-up.
//!
//! `Account → Business → VerifyOtp → Completed`. Each step is a separate
//! request from the frontend, so the in-progress state lives server-side in a
//! [`DraftStore`] keyed by draft id until the OTP is verified.

pub mod draft;
pub mod flow;
pub mod store;

pub use draft::{DraftView, RegistrationDraft, RegistrationStep};
pub use flow::{FlowOptions, RegistrationFlow};
pub use store::{DraftEdit, DraftStore, InMemoryDraftStore};
