//! Service layer for the spa provider admin.
//! - `client`: the REST backend client and response normalization.
//! - `services`: one function per backend endpoint, forms validated first.
//! - `auth`/`registration`: login, token inspection and the sign-up steps.
//! - `geo`/`upload`: third-party lookups used by forms.

pub mod errors;
pub mod client;
pub mod observability;
pub mod pagination;
pub mod auth;
pub mod registration;
pub mod geo;
pub mod upload;
pub mod services;

pub use client::ApiClient;
pub use errors::ServiceError;
