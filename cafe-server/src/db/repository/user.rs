//! User Profile Repository

use std::sync::Arc;

use shared::models::UserProfile;

use super::{RepoResult, from_value, to_value};
use crate::db::{Keys, KvStore};

#[derive(Clone, Debug)]
pub struct UserRepository {
    store: Arc<dyn KvStore>,
}

impl UserRepository {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<UserProfile>> {
        match self.store.get(&Keys::user(id)).await? {
            Some(value) => Ok(Some(from_value(value)?)),
            None => Ok(None),
        }
    }

    pub async fn save(&self, profile: &UserProfile) -> RepoResult<()> {
        self.store
            .set(&Keys::user(&profile.id), to_value(profile)?)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::RedbStore;
    use chrono::Utc;
    use shared::models::Role;

    #[tokio::test]
    async fn test_save_and_find() {
        let repo = UserRepository::new(Arc::new(RedbStore::open_in_memory().unwrap()));
        assert!(repo.find_by_id("u-1").await.unwrap().is_none());

        let profile = UserProfile {
            id: "u-1".into(),
            email: "sam@cafe.test".into(),
            name: "Sam".into(),
            role: Role::Admin,
            created_at: Utc::now(),
        };
        repo.save(&profile).await.unwrap();

        let found = repo.find_by_id("u-1").await.unwrap().unwrap();
        assert_eq!(found, profile);
    }
}
