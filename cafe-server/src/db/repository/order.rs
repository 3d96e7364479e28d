//! Order Repository

use std::cmp::Reverse;
use std::sync::Arc;

use shared::models::Order;

use super::{RepoResult, decode_all, from_value, to_value};
use crate::db::{Keys, KvStore};

#[derive(Clone, Debug)]
pub struct OrderRepository {
    store: Arc<dyn KvStore>,
}

impl OrderRepository {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// All orders, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Order>> {
        let values = self.store.get_by_prefix(Keys::ORDER).await?;
        let mut orders: Vec<Order> = decode_all(values, "order")?;
        orders.sort_by_key(|o| Reverse(o.created_at));
        Ok(orders)
    }

    /// Orders placed by one user, newest first
    pub async fn find_by_user(&self, user_id: &str) -> RepoResult<Vec<Order>> {
        let orders = self.find_all().await?;
        Ok(orders.into_iter().filter(|o| o.user_id == user_id).collect())
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        match self.store.get(&Keys::order(id)).await? {
            Some(value) => Ok(Some(from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Insert or overwrite
    pub async fn save(&self, order: &Order) -> RepoResult<()> {
        self.store
            .set(&Keys::order(&order.id), to_value(order)?)
            .await?;
        Ok(())
    }
}
