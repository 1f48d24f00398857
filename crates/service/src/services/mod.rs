//! One function per REST endpoint the admin screens call.
//!
//! Mutations validate their form first and never reach the network with a
//! rejected form. Callers refetch the list afterwards; mutation responses are
//! not trusted as the new state.

pub mod appointments;
pub mod branches;
pub mod catalog;
pub mod flash_sales;
pub mod promotions;
pub mod staff;
pub mod working_hours;

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::client::ApiClient;
use crate::errors::ServiceError;

/// A backend collection exposing the usual `GET/POST /api/X` and `GET/PUT/DELETE /api/X/{id}`.
#[derive(Debug, Clone, Copy)]
pub struct Resource {
    pub path: &'static str,
    pub entity: &'static str,
}

impl Resource {
    pub const fn new(path: &'static str, entity: &'static str) -> Self {
        Self { path, entity }
    }

    pub fn item_path(&self, id: Uuid) -> String {
        format!("{}/{}", self.path, id)
    }

    pub async fn list<T: DeserializeOwned>(&self, client: &ApiClient, token: &str) -> Result<Vec<T>, ServiceError> {
        client.get_list(self.path, Some(token)).await
    }

    /// A 404 from the backend is reported as [`ServiceError::NotFound`].
    pub async fn get<T: DeserializeOwned>(&self, client: &ApiClient, token: &str, id: Uuid) -> Result<T, ServiceError> {
        client
            .get_item(&self.item_path(id), Some(token))
            .await
            .map_err(|e| self.not_found_on_404(e))
    }

    pub async fn create<B: Serialize>(&self, client: &ApiClient, token: &str, body: &B) -> Result<(), ServiceError> {
        client.post(self.path, Some(token), body).await?;
        Ok(())
    }

    pub async fn update<B: Serialize>(&self, client: &ApiClient, token: &str, id: Uuid, body: &B) -> Result<(), ServiceError> {
        client
            .put(&self.item_path(id), Some(token), body)
            .await
            .map_err(|e| self.not_found_on_404(e))?;
        Ok(())
    }

    pub async fn delete(&self, client: &ApiClient, token: &str, id: Uuid) -> Result<(), ServiceError> {
        client
            .delete(&self.item_path(id), Some(token))
            .await
            .map_err(|e| self.not_found_on_404(e))
    }

    fn not_found_on_404(&self, e: ServiceError) -> ServiceError {
        match e {
            ServiceError::Api { status: 404, .. } => ServiceError::not_found(self.entity),
            other => other,
        }
    }
}
