use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use super::draft::RegistrationDraft;
use crate::errors::{ServiceError, DRAFT_GONE_MESSAGE};

/// A change to one draft. Returning `Err` leaves the stored draft untouched.
pub type DraftEdit<'a> = Box<dyn FnOnce(&mut RegistrationDraft) -> Result<(), ServiceError> + Send + 'a>;

/// Storage for in-progress registrations.
/// Implementations can be in-process or shared (e.g. a KV service behind several instances).
#[async_trait]
pub trait DraftStore: Send + Sync {
    /// Returns `None` for unknown or expired drafts.
    async fn get(&self, id: Uuid, now: DateTime<Utc>) -> Option<RegistrationDraft>;
    async fn put(&self, draft: RegistrationDraft);
    /// Check-and-modify one draft atomically with respect to other updates of the same id.
    /// Unknown or expired drafts yield `ServiceError::Gone`. A committed edit refreshes the TTL.
    async fn update(&self, id: Uuid, now: DateTime<Utc>, edit: DraftEdit<'_>) -> Result<RegistrationDraft, ServiceError>;
    async fn remove(&self, id: Uuid) -> bool;
    /// Drop expired drafts; returns how many were removed.
    async fn purge_expired(&self, now: DateTime<Utc>) -> usize;
}

pub struct InMemoryDraftStore {
    drafts: DashMap<Uuid, RegistrationDraft>,
    ttl: Duration,
}

impl InMemoryDraftStore {
    pub fn new(ttl: std::time::Duration) -> Self {
        let ttl = Duration::from_std(ttl).unwrap_or_else(|_| Duration::minutes(30));
        Self { drafts: DashMap::new(), ttl }
    }

    fn expired(&self, draft: &RegistrationDraft, now: DateTime<Utc>) -> bool {
        draft.last_active_at + self.ttl <= now
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }
}

fn gone() -> ServiceError {
    ServiceError::Gone(DRAFT_GONE_MESSAGE.into())
}

#[async_trait]
impl DraftStore for InMemoryDraftStore {
    async fn get(&self, id: Uuid, now: DateTime<Utc>) -> Option<RegistrationDraft> {
        let draft = self.drafts.get(&id).map(|d| d.value().clone())?;
        if self.expired(&draft, now) {
            self.drafts.remove(&id);
            return None;
        }
        Some(draft)
    }

    async fn put(&self, draft: RegistrationDraft) {
        self.drafts.insert(draft.id, draft);
    }

    async fn update(&self, id: Uuid, now: DateTime<Utc>, edit: DraftEdit<'_>) -> Result<RegistrationDraft, ServiceError> {
        let Some(mut entry) = self.drafts.get_mut(&id) else {
            return Err(gone());
        };
        if self.expired(entry.value(), now) {
            drop(entry);
            self.drafts.remove(&id);
            return Err(gone());
        }
        // the shard lock is held until `entry` drops, so check and write cannot interleave
        let mut next = entry.value().clone();
        edit(&mut next)?;
        next.last_active_at = now;
        *entry.value_mut() = next.clone();
        Ok(next)
    }

    async fn remove(&self, id: Uuid) -> bool {
        self.drafts.remove(&id).is_some()
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> usize {
        let before = self.drafts.len();
        self.drafts.retain(|_, d| d.last_active_at + self.ttl > now);
        before - self.drafts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::auth::AccountForm;

    fn noop(_: &mut RegistrationDraft) -> Result<(), ServiceError> {
        Ok(())
    }

    fn bump_then_refuse(d: &mut RegistrationDraft) -> Result<(), ServiceError> {
        d.otp_resends = 9;
        Err(ServiceError::Validation("no".into()))
    }

    #[tokio::test]
    async fn expired_drafts_disappear() {
        let store = InMemoryDraftStore::new(std::time::Duration::from_secs(60));
        let now = Utc::now();
        let d = RegistrationDraft::new(AccountForm::default(), now);
        let id = d.id;
        store.put(d).await;
        assert!(store.get(id, now + Duration::seconds(59)).await.is_some());
        assert!(store.get(id, now + Duration::seconds(60)).await.is_none());
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn activity_extends_the_ttl() {
        let store = InMemoryDraftStore::new(std::time::Duration::from_secs(60));
        let now = Utc::now();
        let d = RegistrationDraft::new(AccountForm::default(), now);
        let id = d.id;
        store.put(d).await;

        store.update(id, now + Duration::seconds(50), Box::new(noop)).await.unwrap();
        let later = now + Duration::seconds(100);
        assert!(store.get(id, later).await.is_some());
        assert_eq!(store.purge_expired(later).await, 0);
        assert!(store.get(id, now + Duration::seconds(110)).await.is_none());
    }

    #[tokio::test]
    async fn rejected_edit_leaves_draft_unchanged() {
        let store = InMemoryDraftStore::new(std::time::Duration::from_secs(60));
        let now = Utc::now();
        let d = RegistrationDraft::new(AccountForm::default(), now);
        let id = d.id;
        store.put(d).await;

        let err = store.update(id, now + Duration::seconds(10), Box::new(bump_then_refuse)).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        let stored = store.get(id, now).await.unwrap();
        assert_eq!(stored.otp_resends, 0);
        assert_eq!(stored.last_active_at, now);
    }

    #[tokio::test]
    async fn update_of_unknown_or_expired_draft_is_gone() {
        let store = InMemoryDraftStore::new(std::time::Duration::from_secs(60));
        let now = Utc::now();
        assert!(matches!(store.update(Uuid::new_v4(), now, Box::new(noop)).await, Err(ServiceError::Gone(_))));

        let d = RegistrationDraft::new(AccountForm::default(), now);
        let id = d.id;
        store.put(d).await;
        let late = now + Duration::seconds(61);
        assert!(matches!(store.update(id, late, Box::new(noop)).await, Err(ServiceError::Gone(_))));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn purge_counts_removed() {
        let store = InMemoryDraftStore::new(std::time::Duration::from_secs(60));
        let now = Utc::now();
        store.put(RegistrationDraft::new(AccountForm::default(), now - Duration::minutes(5))).await;
        store.put(RegistrationDraft::new(AccountForm::default(), now)).await;
        assert_eq!(store.purge_expired(now).await, 1);
        assert_eq!(store.len(), 1);
    }
}
