use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use uuid::Uuid;

use crate::auth::policy::{authorize, AccessError, Principal, ROLE_ADMIN};
use crate::database::models::employment::EmploymentRecord;
use crate::database::repository::{EmploymentStore, OwnerDirectory};
use crate::database::DatabaseError;

#[derive(Debug, Error)]
pub enum TrashError {
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Store(#[from] DatabaseError),
}

/// Soft-delete workflow over employment records.
///
/// Every mutating operation authorizes first, then issues one filtered store
/// update and reports NotFound when nothing matched. A record moves
/// Active -> Trashed -> (Active | gone); purge never touches active records
/// and restore never touches active ones, so no transition skips a state.
pub struct TrashService {
    records: Arc<dyn EmploymentStore>,
    directory: Arc<dyn OwnerDirectory>,
}

impl TrashService {
    pub fn new(records: Arc<dyn EmploymentStore>, directory: Arc<dyn OwnerDirectory>) -> Self {
        Self { records, directory }
    }

    /// Move every active record of `owner_key` into the trash. Returns the
    /// number of records transitioned.
    pub async fn mark_deleted(
        &self,
        principal: &Principal,
        owner_key: &str,
    ) -> Result<u64, TrashError> {
        authorize(principal, owner_key)?;

        let transitioned = self
            .records
            .mark_deleted_by_owner(owner_key, Utc::now())
            .await?;

        if transitioned == 0 {
            return Err(TrashError::NotFound(format!(
                "No active employment record found for alumni number '{}'",
                owner_key
            )));
        }

        tracing::info!(
            "Trashed {} employment record(s) for alumni number '{}'",
            transitioned,
            owner_key
        );
        Ok(transitioned)
    }

    /// Bring every trashed record of `owner_key` back to the active state.
    pub async fn restore(
        &self,
        principal: &Principal,
        owner_key: &str,
    ) -> Result<u64, TrashError> {
        authorize(principal, owner_key)?;

        let transitioned = self.records.restore_by_owner(owner_key, Utc::now()).await?;

        if transitioned == 0 {
            return Err(TrashError::NotFound(format!(
                "No trashed employment record found for alumni number '{}'",
                owner_key
            )));
        }

        tracing::info!(
            "Restored {} employment record(s) for alumni number '{}'",
            transitioned,
            owner_key
        );
        Ok(transitioned)
    }

    /// List trashed records. Admins see everything (optionally narrowed by
    /// `owner_filter`); other callers only ever see their own trash, resolved
    /// through the owner directory rather than the token's identity string.
    pub async fn list_trash(
        &self,
        principal: &Principal,
        owner_filter: Option<&str>,
    ) -> Result<Vec<EmploymentRecord>, TrashError> {
        if principal.role == ROLE_ADMIN {
            let filter = owner_filter.filter(|f| !f.is_empty());
            return Ok(self.records.find_trashed(filter).await?);
        }

        let owner_key = self
            .directory
            .owner_key_for_user(principal.user_id)
            .await?
            .ok_or_else(|| {
                TrashError::NotFound("No alumni record is linked to this user".to_string())
            })?;

        Ok(self.records.find_trashed(Some(&owner_key)).await?)
    }

    /// Permanently remove one trashed record. Irreversible; records that are
    /// still active are not eligible.
    pub async fn purge(
        &self,
        principal: &Principal,
        id: Uuid,
        owner_key: &str,
    ) -> Result<(), TrashError> {
        authorize(principal, owner_key)?;

        let removed = self.records.purge_trashed(id).await?;

        if removed == 0 {
            return Err(TrashError::NotFound(format!(
                "No trashed employment record found with id '{}'",
                id
            )));
        }

        tracing::info!("Purged employment record '{}'", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};
    use std::collections::HashMap;
    use std::sync::Mutex;

    use crate::auth::policy::ROLE_USER;

    struct MemoryStore {
        records: Mutex<Vec<EmploymentRecord>>,
    }

    impl MemoryStore {
        fn new(records: Vec<EmploymentRecord>) -> Arc<Self> {
            Arc::new(Self {
                records: Mutex::new(records),
            })
        }

        fn snapshot(&self) -> Vec<EmploymentRecord> {
            self.records.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl EmploymentStore for MemoryStore {
        async fn find_active_by_owner(
            &self,
            owner_key: &str,
        ) -> Result<Vec<EmploymentRecord>, DatabaseError> {
            Ok(self
                .snapshot()
                .into_iter()
                .filter(|r| r.alumni_number == owner_key && r.deleted_at.is_none())
                .collect())
        }

        async fn find_trashed(
            &self,
            owner_key: Option<&str>,
        ) -> Result<Vec<EmploymentRecord>, DatabaseError> {
            Ok(self
                .snapshot()
                .into_iter()
                .filter(|r| r.deleted_at.is_some())
                .filter(|r| owner_key.map_or(true, |k| r.alumni_number == k))
                .collect())
        }

        async fn mark_deleted_by_owner(
            &self,
            owner_key: &str,
            at: DateTime<Utc>,
        ) -> Result<u64, DatabaseError> {
            let mut records = self.records.lock().unwrap();
            let mut count = 0;
            for r in records
                .iter_mut()
                .filter(|r| r.alumni_number == owner_key && r.deleted_at.is_none())
            {
                r.deleted_at = Some(at);
                r.updated_at = at;
                count += 1;
            }
            Ok(count)
        }

        async fn restore_by_owner(
            &self,
            owner_key: &str,
            at: DateTime<Utc>,
        ) -> Result<u64, DatabaseError> {
            let mut records = self.records.lock().unwrap();
            let mut count = 0;
            for r in records
                .iter_mut()
                .filter(|r| r.alumni_number == owner_key && r.deleted_at.is_some())
            {
                r.deleted_at = None;
                r.updated_at = at;
                count += 1;
            }
            Ok(count)
        }

        async fn purge_trashed(&self, id: Uuid) -> Result<u64, DatabaseError> {
            let mut records = self.records.lock().unwrap();
            let before = records.len();
            records.retain(|r| !(r.id == id && r.deleted_at.is_some()));
            Ok((before - records.len()) as u64)
        }
    }

    struct MemoryDirectory {
        links: HashMap<Uuid, String>,
    }

    #[async_trait]
    impl OwnerDirectory for MemoryDirectory {
        async fn owner_key_for_user(
            &self,
            user_id: Uuid,
        ) -> Result<Option<String>, DatabaseError> {
            Ok(self.links.get(&user_id).cloned())
        }
    }

    fn record(owner: &str) -> EmploymentRecord {
        let now = Utc::now();
        EmploymentRecord {
            id: Uuid::new_v4(),
            alumni_number: owner.to_string(),
            employment_status: "employed".to_string(),
            industry: "software".to_string(),
            job_title: "engineer".to_string(),
            employer: "Acme".to_string(),
            salary: 9_000_000,
            years_worked: 3,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    fn principal(role: &str, identity_key: &str) -> Principal {
        Principal {
            user_id: Uuid::new_v4(),
            username: "tester".to_string(),
            role: role.to_string(),
            identity_key: identity_key.to_string(),
        }
    }

    fn service(store: Arc<MemoryStore>) -> TrashService {
        TrashService::new(
            store,
            Arc::new(MemoryDirectory {
                links: HashMap::new(),
            }),
        )
    }

    #[tokio::test]
    async fn mark_then_restore_is_a_net_noop_on_fields() {
        let store = MemoryStore::new(vec![record("A100")]);
        let before = store.snapshot();
        let svc = service(store.clone());
        let p = principal(ROLE_USER, "A100");

        assert_eq!(svc.mark_deleted(&p, "A100").await.unwrap(), 1);
        assert!(store.snapshot()[0].deleted_at.is_some());

        assert_eq!(svc.restore(&p, "A100").await.unwrap(), 1);
        let after = store.snapshot();
        assert!(after[0].deleted_at.is_none());

        // Everything except the bookkeeping timestamps is untouched
        assert_eq!(after[0].id, before[0].id);
        assert_eq!(after[0].employment_status, before[0].employment_status);
        assert_eq!(after[0].employer, before[0].employer);
        assert_eq!(after[0].salary, before[0].salary);
        assert_eq!(after[0].created_at, before[0].created_at);
    }

    #[tokio::test]
    async fn mark_deleted_covers_every_active_record_of_the_owner() {
        let store = MemoryStore::new(vec![record("A100"), record("A100"), record("B200")]);
        let svc = service(store.clone());

        let count = svc
            .mark_deleted(&principal(ROLE_ADMIN, "staff"), "A100")
            .await
            .unwrap();
        assert_eq!(count, 2);

        let untouched: Vec<_> = store
            .snapshot()
            .into_iter()
            .filter(|r| r.alumni_number == "B200")
            .collect();
        assert!(untouched[0].deleted_at.is_none());
    }

    #[tokio::test]
    async fn mark_deleted_without_active_record_is_not_found() {
        let store = MemoryStore::new(vec![]);
        let svc = service(store);

        let err = svc
            .mark_deleted(&principal(ROLE_USER, "A100"), "A100")
            .await
            .unwrap_err();
        assert!(matches!(err, TrashError::NotFound(_)));
    }

    #[tokio::test]
    async fn restore_without_trashed_record_is_not_found() {
        // Record exists but is active, so restore has nothing to do
        let store = MemoryStore::new(vec![record("A100")]);
        let svc = service(store);

        let err = svc
            .restore(&principal(ROLE_USER, "A100"), "A100")
            .await
            .unwrap_err();
        assert!(matches!(err, TrashError::NotFound(_)));
    }

    #[tokio::test]
    async fn purge_requires_the_trash_stage() {
        let store = MemoryStore::new(vec![record("A100")]);
        let id = store.snapshot()[0].id;
        let svc = service(store.clone());
        let p = principal(ROLE_USER, "A100");

        // Still active: purge must not bypass the trash
        let err = svc.purge(&p, id, "A100").await.unwrap_err();
        assert!(matches!(err, TrashError::NotFound(_)));
        assert_eq!(store.snapshot().len(), 1);

        svc.mark_deleted(&p, "A100").await.unwrap();
        svc.purge(&p, id, "A100").await.unwrap();
        assert!(store.snapshot().is_empty());

        // Terminal: a second purge finds nothing
        let err = svc.purge(&p, id, "A100").await.unwrap_err();
        assert!(matches!(err, TrashError::NotFound(_)));
    }

    #[tokio::test]
    async fn identity_mismatch_is_forbidden_and_leaves_state_unchanged() {
        let store = MemoryStore::new(vec![record("B200")]);
        let svc = service(store.clone());

        let err = svc
            .mark_deleted(&principal(ROLE_USER, "Z999"), "B200")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            TrashError::Access(AccessError::Forbidden(_))
        ));
        assert!(store.snapshot()[0].deleted_at.is_none());
    }

    #[tokio::test]
    async fn empty_identity_is_unauthenticated() {
        let store = MemoryStore::new(vec![record("A100")]);
        let svc = service(store);

        let err = svc
            .mark_deleted(&principal(ROLE_USER, ""), "A100")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            TrashError::Access(AccessError::Unauthenticated)
        ));
    }

    #[tokio::test]
    async fn admin_lists_all_trash_or_narrows_by_owner() {
        let store = MemoryStore::new(vec![record("A100"), record("B200")]);
        let svc = service(store.clone());
        let admin = principal(ROLE_ADMIN, "staff");

        svc.mark_deleted(&admin, "A100").await.unwrap();
        svc.mark_deleted(&admin, "B200").await.unwrap();

        let all = svc.list_trash(&admin, None).await.unwrap();
        assert_eq!(all.len(), 2);

        // Empty filter means "everything" for admins
        let all = svc.list_trash(&admin, Some("")).await.unwrap();
        assert_eq!(all.len(), 2);

        let narrowed = svc.list_trash(&admin, Some("A100")).await.unwrap();
        assert_eq!(narrowed.len(), 1);
        assert_eq!(narrowed[0].alumni_number, "A100");
    }

    #[tokio::test]
    async fn non_admin_listing_resolves_owner_and_ignores_the_filter() {
        let store = MemoryStore::new(vec![record("A100"), record("B200")]);
        let admin = principal(ROLE_ADMIN, "staff");

        let caller = principal(ROLE_USER, "A100");
        let mut links = HashMap::new();
        links.insert(caller.user_id, "A100".to_string());
        let svc = TrashService::new(store.clone(), Arc::new(MemoryDirectory { links }));

        svc.mark_deleted(&admin, "A100").await.unwrap();
        svc.mark_deleted(&admin, "B200").await.unwrap();

        // Asking for someone else's trash still returns only their own
        let own = svc.list_trash(&caller, Some("B200")).await.unwrap();
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].alumni_number, "A100");
    }

    #[tokio::test]
    async fn non_admin_without_alumni_link_gets_not_found() {
        let store = MemoryStore::new(vec![]);
        let svc = service(store);

        let err = svc
            .list_trash(&principal(ROLE_USER, "A100"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, TrashError::NotFound(_)));
    }

    #[tokio::test]
    async fn full_owner_lifecycle() {
        // MarkDeleted -> ListTrash -> Restore -> purge of an active record fails
        let store = MemoryStore::new(vec![record("A100")]);
        let id = store.snapshot()[0].id;
        let caller = principal(ROLE_USER, "A100");
        let mut links = HashMap::new();
        links.insert(caller.user_id, "A100".to_string());
        let svc = TrashService::new(store.clone(), Arc::new(MemoryDirectory { links }));

        assert_eq!(svc.mark_deleted(&caller, "A100").await.unwrap(), 1);

        let trash = svc.list_trash(&caller, None).await.unwrap();
        assert_eq!(trash.len(), 1);
        assert_eq!(trash[0].id, id);
        assert!(trash[0].is_trashed());

        assert_eq!(svc.restore(&caller, "A100").await.unwrap(), 1);
        assert!(store.snapshot()[0].deleted_at.is_none());

        let err = svc.purge(&caller, id, "A100").await.unwrap_err();
        assert!(matches!(err, TrashError::NotFound(_)));
    }
}
