use crate::application::ports::repositories::Repository;
use crate::domain::entities::ConsentGrant;
use crate::domain::value_objects::{ConsentType, OwnerId};
use crate::shared::error::{Result, SyncError};
use std::sync::Arc;
use tracing::info;

/// The consent gate. Every repository operation that creates
/// patient-identifying data must pass through `require_consent` before the
/// write; the gate itself never touches the network.
pub struct ConsentService {
    store: Arc<dyn Repository>,
}

impl ConsentService {
    pub fn new(store: Arc<dyn Repository>) -> Self {
        Self { store }
    }

    /// The most recent grant of the type decides; no grant means no consent.
    pub async fn check_consent(&self, owner: &OwnerId, consent_type: ConsentType) -> Result<bool> {
        let latest = self.store.latest_grant(owner, consent_type).await?;
        Ok(latest.map(|grant| grant.granted).unwrap_or(false))
    }

    pub async fn require_consent(
        &self,
        owner: &OwnerId,
        consent_type: ConsentType,
    ) -> Result<ConsentGrant> {
        match self.store.latest_grant(owner, consent_type).await? {
            Some(grant) if grant.granted => Ok(grant),
            _ => Err(SyncError::ConsentRequired(consent_type)),
        }
    }

    pub async fn grant(
        &self,
        owner: OwnerId,
        consent_type: ConsentType,
        language: String,
    ) -> Result<ConsentGrant> {
        let grant = ConsentGrant::granted(owner, consent_type, language);
        self.store.append_grant(&grant).await?;
        info!(target: "consent", owner = %grant.owner_id, consent_type = %consent_type, "consent granted");
        Ok(grant)
    }

    /// A revocation is appended like any grant; earlier grants stay in the
    /// log untouched.
    pub async fn revoke(
        &self,
        owner: OwnerId,
        consent_type: ConsentType,
        language: String,
    ) -> Result<ConsentGrant> {
        let grant = ConsentGrant::revoked(owner, consent_type, language);
        self.store.append_grant(&grant).await?;
        info!(target: "consent", owner = %grant.owner_id, consent_type = %consent_type, "consent revoked");
        Ok(grant)
    }

    /// All types the owner currently consents to.
    pub async fn consent_scope(&self, owner: &OwnerId) -> Result<Vec<ConsentType>> {
        let mut scope = Vec::new();
        for consent_type in [
            ConsentType::Recording,
            ConsentType::Transcription,
            ConsentType::DoctorSharing,
        ] {
            if self.check_consent(owner, consent_type).await? {
                scope.push(consent_type);
            }
        }
        Ok(scope)
    }

    pub async fn consent_history(&self, owner: &OwnerId) -> Result<Vec<ConsentGrant>> {
        self.store.list_grants(owner).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::{Database, SqliteRepository};
    use sqlx::sqlite::SqlitePoolOptions;

    async fn setup() -> ConsentService {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        Database::run_migrations(&pool).await.unwrap();
        ConsentService::new(Arc::new(SqliteRepository::new(pool)))
    }

    fn owner(id: &str) -> OwnerId {
        OwnerId::new(id).unwrap()
    }

    #[tokio::test]
    async fn no_grant_means_no_consent() {
        let service = setup().await;
        let granted = service
            .check_consent(&owner("p1"), ConsentType::Recording)
            .await
            .unwrap();
        assert!(!granted);
    }

    #[tokio::test]
    async fn require_consent_rejects_without_grant() {
        let service = setup().await;
        let err = service
            .require_consent(&owner("p1"), ConsentType::Recording)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SyncError::ConsentRequired(ConsentType::Recording)
        ));
    }

    #[tokio::test]
    async fn revocation_supersedes_but_keeps_history() {
        let service = setup().await;
        let p1 = owner("p1");

        service
            .grant(p1.clone(), ConsentType::Recording, "ta".into())
            .await
            .unwrap();
        assert!(service
            .check_consent(&p1, ConsentType::Recording)
            .await
            .unwrap());

        service
            .revoke(p1.clone(), ConsentType::Recording, "ta".into())
            .await
            .unwrap();
        assert!(!service
            .check_consent(&p1, ConsentType::Recording)
            .await
            .unwrap());

        service
            .grant(p1.clone(), ConsentType::Recording, "ta".into())
            .await
            .unwrap();
        assert!(service
            .check_consent(&p1, ConsentType::Recording)
            .await
            .unwrap());

        let history = service.consent_history(&p1).await.unwrap();
        assert_eq!(history.len(), 3);
    }

    #[tokio::test]
    async fn scope_lists_only_granted_types() {
        let service = setup().await;
        let p1 = owner("p1");

        service
            .grant(p1.clone(), ConsentType::Recording, "en".into())
            .await
            .unwrap();
        service
            .grant(p1.clone(), ConsentType::DoctorSharing, "en".into())
            .await
            .unwrap();
        service
            .revoke(p1.clone(), ConsentType::DoctorSharing, "en".into())
            .await
            .unwrap();

        let scope = service.consent_scope(&p1).await.unwrap();
        assert_eq!(scope, vec![ConsentType::Recording]);
    }
}
