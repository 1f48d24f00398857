//! Provider authentication against `/api/Auth/*`, plus local inspection of
//! the issued bearer token.

pub mod service;
pub mod session;

pub use service::AuthService;
pub use session::{decode_claims, ProviderSession};
