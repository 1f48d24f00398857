use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct Health {
    pub status: String,
    pub version: String,
}

impl Health {
    pub fn ok() -> Self {
        Self { status: "ok".into(), version: env!("CARGO_PKG_VERSION").into() }
    }
}

/// Uniform envelope for successful mutations: a short localized notice plus the refetched rows.
#[derive(Serialize, Debug, Clone)]
pub struct Refetched<T> {
    pub message: String,
    pub items: Vec<T>,
}

impl<T> Refetched<T> {
    pub fn new(message: impl Into<String>, items: Vec<T>) -> Self {
        Self { message: message.into(), items }
    }
}
