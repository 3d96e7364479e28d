//! Menu Item Repository

use std::sync::Arc;

use shared::models::{MenuItem, MenuQuery};

use super::{RepoError, RepoResult, decode_all, from_value, to_value};
use crate::db::{Keys, KvStore};

#[derive(Clone, Debug)]
pub struct MenuRepository {
    store: Arc<dyn KvStore>,
}

impl MenuRepository {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// All menu items in key order
    pub async fn find_all(&self) -> RepoResult<Vec<MenuItem>> {
        let values = self.store.get_by_prefix(Keys::MENU).await?;
        decode_all(values, "menu")
    }

    /// Menu items matching the category/search filters
    pub async fn find_filtered(&self, query: &MenuQuery) -> RepoResult<Vec<MenuItem>> {
        let items = self.find_all().await?;
        Ok(items.into_iter().filter(|item| query.matches(item)).collect())
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<MenuItem>> {
        match self.store.get(&Keys::menu(id)).await? {
            Some(value) => Ok(Some(from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Insert or overwrite
    pub async fn save(&self, item: &MenuItem) -> RepoResult<()> {
        self.store.set(&Keys::menu(&item.id), to_value(item)?).await?;
        Ok(())
    }

    /// Remove `menu:<id>`. Orders referencing the item are untouched.
    pub async fn delete(&self, id: &str) -> RepoResult<()> {
        if self.store.delete(&Keys::menu(id)).await? {
            Ok(())
        } else {
            Err(RepoError::NotFound(format!("Menu item {id}")))
        }
    }

    pub async fn count(&self) -> RepoResult<usize> {
        Ok(self.store.get_by_prefix(Keys::MENU).await?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::RedbStore;
    use chrono::Utc;

    fn item(id: &str, name: &str, category: &str) -> MenuItem {
        let now = Utc::now();
        MenuItem {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            description: format!("Fresh {}", name.to_lowercase()),
            price: 3.0,
            available: true,
            image: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    async fn seeded() -> MenuRepository {
        let repo = MenuRepository::new(Arc::new(RedbStore::open_in_memory().unwrap()));
        repo.save(&item("1", "Espresso", "drinks")).await.unwrap();
        repo.save(&item("2", "Latte", "drinks")).await.unwrap();
        repo.save(&item("3", "Croissant", "food")).await.unwrap();
        repo
    }

    #[tokio::test]
    async fn test_find_filtered() {
        let repo = seeded().await;

        let drinks = MenuQuery {
            category: Some("drinks".into()),
            search: None,
        };
        assert_eq!(repo.find_filtered(&drinks).await.unwrap().len(), 2);

        let all = MenuQuery {
            category: Some("all".into()),
            search: Some("CROISS".into()),
        };
        let found = repo.find_filtered(&all).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "3");

        let none = MenuQuery {
            category: Some("food".into()),
            search: Some("latte".into()),
        };
        assert!(repo.find_filtered(&none).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_and_count() {
        let repo = seeded().await;
        assert_eq!(repo.count().await.unwrap(), 3);

        repo.delete("2").await.unwrap();
        assert_eq!(repo.count().await.unwrap(), 2);
        assert!(repo.find_by_id("2").await.unwrap().is_none());
        assert!(matches!(repo.delete("2").await, Err(RepoError::NotFound(_))));
    }
}
