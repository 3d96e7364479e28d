//! Order creation and status transitions

use std::str::FromStr;

use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{Order, OrderCreate, OrderLine, OrderStatus};
use shared::util;

use crate::auth::CurrentUser;
use crate::db::repository::{MenuRepository, OrderRepository};
use crate::utils::validation::{
    MAX_NOTE_LEN, validate_optional_text, validate_price, validate_quantity,
};

/// Order workflow over the menu and order repositories
#[derive(Clone, Debug)]
pub struct OrderService {
    menu: MenuRepository,
    orders: OrderRepository,
    strict_transitions: bool,
}

impl OrderService {
    pub fn new(menu: MenuRepository, orders: OrderRepository, strict_transitions: bool) -> Self {
        Self {
            menu,
            orders,
            strict_transitions,
        }
    }

    /// Place an order for `user`
    ///
    /// Each line snapshots the menu item's name and price; later menu edits
    /// do not touch stored orders.
    pub async fn create(&self, user: &CurrentUser, payload: OrderCreate) -> AppResult<Order> {
        if payload.items.is_empty() {
            return Err(AppError::new(ErrorCode::OrderEmpty));
        }
        validate_optional_text(&payload.notes, "notes", MAX_NOTE_LEN)?;

        let mut lines = Vec::with_capacity(payload.items.len());
        for requested in &payload.items {
            validate_quantity(requested.quantity, &requested.menu_item_id)?;

            let item = self
                .menu
                .find_by_id(&requested.menu_item_id)
                .await?
                .ok_or_else(|| {
                    AppError::with_message(
                        ErrorCode::MenuItemNotFound,
                        format!("Menu item {} not found", requested.menu_item_id),
                    )
                })?;

            if !item.available {
                return Err(AppError::with_message(
                    ErrorCode::MenuItemUnavailable,
                    format!("{} is currently unavailable", item.name),
                )
                .with_detail("menuItemId", item.id));
            }

            // Stored prices are re-checked against the ceiling
            validate_price(item.price)?;
            lines.push(OrderLine::new(
                item.id,
                item.name,
                item.price,
                requested.quantity,
            )?);
        }

        let now = util::now();
        let order = Order {
            id: util::new_id(),
            user_id: user.id.clone(),
            user_email: user.email.clone(),
            total: Order::compute_total(&lines)?,
            items: lines,
            notes: payload.notes.unwrap_or_default(),
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        self.orders.save(&order).await?;

        tracing::info!(
            order_id = %order.id,
            user_id = %order.user_id,
            lines = order.items.len(),
            total = order.total,
            "Order placed"
        );
        Ok(order)
    }

    /// Orders visible to `user`: all for admins, own orders otherwise
    pub async fn list_for(&self, user: &CurrentUser) -> AppResult<Vec<Order>> {
        let orders = if user.is_admin() {
            self.orders.find_all().await?
        } else {
            self.orders.find_by_user(&user.id).await?
        };
        Ok(orders)
    }

    /// Single order, owner or admin only
    pub async fn get_for(&self, user: &CurrentUser, id: &str) -> AppResult<Order> {
        let order = self
            .orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;

        if !user.can_access(&order.user_id) {
            return Err(AppError::new(ErrorCode::OrderAccessDenied));
        }
        Ok(order)
    }

    /// Change an order's status (admin only)
    ///
    /// Any defined status is accepted unless strict transitions are enabled.
    /// Concurrent updates are last-write-wins.
    pub async fn update_status(
        &self,
        user: &CurrentUser,
        id: &str,
        status: &str,
    ) -> AppResult<Order> {
        user.ensure_admin()?;

        let next = OrderStatus::from_str(status).map_err(|_| {
            AppError::new(ErrorCode::InvalidOrderStatus).with_detail("status", status)
        })?;

        let mut order = self
            .orders
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;

        if self.strict_transitions && !order.status.can_transition_to(next) {
            return Err(AppError::with_message(
                ErrorCode::InvalidStatusTransition,
                format!("Cannot change order status from {} to {}", order.status, next),
            ));
        }

        let previous = order.status;
        order.status = next;
        order.updated_at = util::now();
        self.orders.save(&order).await?;

        tracing::info!(
            order_id = %order.id,
            from = %previous,
            to = %next,
            admin_id = %user.id,
            "Order status updated"
        );
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{KvStore, RedbStore};
    use chrono::Utc;
    use shared::models::{MenuItem, OrderLineRequest, Role};
    use std::sync::Arc;

    struct Fixture {
        service: OrderService,
        menu: MenuRepository,
    }

    async fn fixture(strict: bool) -> Fixture {
        let store: Arc<dyn KvStore> = Arc::new(RedbStore::open_in_memory().unwrap());
        let menu = MenuRepository::new(store.clone());
        let orders = OrderRepository::new(store);

        let now = Utc::now();
        for (id, name, price, available) in [
            ("espresso", "Espresso", 2.99, true),
            ("latte", "Latte", 4.99, true),
            ("toast", "Avocado Toast", 7.99, false),
            ("gold", "Gold Latte", 1e30, true),
        ] {
            menu.save(&MenuItem {
                id: id.into(),
                name: name.into(),
                category: "drinks".into(),
                description: String::new(),
                price,
                available,
                image: String::new(),
                created_at: now,
                updated_at: now,
            })
            .await
            .unwrap();
        }

        Fixture {
            service: OrderService::new(menu.clone(), orders, strict),
            menu,
        }
    }

    fn user(id: &str, role: Option<Role>) -> CurrentUser {
        CurrentUser {
            id: id.into(),
            email: format!("{id}@cafe.test"),
            name: id.into(),
            role,
        }
    }

    fn line(id: &str, quantity: u32) -> OrderLineRequest {
        OrderLineRequest {
            menu_item_id: id.into(),
            quantity,
        }
    }

    fn payload(items: Vec<OrderLineRequest>) -> OrderCreate {
        OrderCreate { items, notes: None }
    }

    #[tokio::test]
    async fn test_create_computes_totals() {
        let f = fixture(false).await;
        let emp = user("emp", Some(Role::Employee));

        let order = f
            .service
            .create(&emp, payload(vec![line("espresso", 2)]))
            .await
            .unwrap();
        assert_eq!(order.total, 5.98);
        assert_eq!(order.items[0].subtotal, 5.98);
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.user_id, "emp");
        assert_eq!(order.notes, "");

        let order = f
            .service
            .create(&emp, payload(vec![line("espresso", 1), line("latte", 3)]))
            .await
            .unwrap();
        let sum = shared::money::sum(order.items.iter().map(|l| l.subtotal)).unwrap();
        assert_eq!(order.total, sum);
        assert_eq!(order.total, 17.96);
    }

    #[tokio::test]
    async fn test_create_rejections() {
        let f = fixture(false).await;
        let emp = user("emp", Some(Role::Employee));

        let err = f.service.create(&emp, payload(vec![])).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderEmpty);

        let err = f
            .service
            .create(&emp, payload(vec![line("espresso", 0)]))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidQuantity);

        let err = f
            .service
            .create(&emp, payload(vec![line("ghost", 1)]))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::MenuItemNotFound);
        assert_eq!(err.message, "Menu item ghost not found");

        let err = f
            .service
            .create(&emp, payload(vec![line("espresso", 1), line("toast", 1)]))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::MenuItemUnavailable);
        assert_eq!(err.message, "Avocado Toast is currently unavailable");

        assert!(f.service.list_for(&emp).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_out_of_range_amounts() {
        let f = fixture(false).await;
        let emp = user("emp", Some(Role::Employee));

        // Would overflow Decimal if it reached the multiplication
        let err = f
            .service
            .create(&emp, payload(vec![line("latte", 1_000_000_000)]))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidQuantity);

        // Must not be stored with a zero total
        let err = f
            .service
            .create(&emp, payload(vec![line("gold", 1)]))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::MenuItemInvalidPrice);

        let order = f
            .service
            .create(&emp, payload(vec![line("espresso", shared::money::MAX_QUANTITY)]))
            .await
            .unwrap();
        assert_eq!(order.total, 29_897.01);
        assert_eq!(f.service.list_for(&emp).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_snapshot_survives_menu_delete() {
        let f = fixture(false).await;
        let emp = user("emp", Some(Role::Employee));
        let order = f
            .service
            .create(&emp, payload(vec![line("latte", 1)]))
            .await
            .unwrap();

        f.menu.delete("latte").await.unwrap();

        let stored = f.service.get_for(&emp, &order.id).await.unwrap();
        assert_eq!(stored.items[0].name, "Latte");
        assert_eq!(stored.items[0].price, 4.99);
        assert_eq!(stored.total, 4.99);
    }

    #[tokio::test]
    async fn test_visibility() {
        let f = fixture(false).await;
        let alice = user("alice", Some(Role::Employee));
        let bob = user("bob", None);
        let admin = user("admin", Some(Role::Admin));

        let order = f
            .service
            .create(&alice, payload(vec![line("espresso", 1)]))
            .await
            .unwrap();
        f.service
            .create(&bob, payload(vec![line("latte", 1)]))
            .await
            .unwrap();

        assert_eq!(f.service.list_for(&alice).await.unwrap().len(), 1);
        assert_eq!(f.service.list_for(&admin).await.unwrap().len(), 2);

        let err = f.service.get_for(&bob, &order.id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderAccessDenied);
        assert!(f.service.get_for(&admin, &order.id).await.is_ok());

        let err = f.service.get_for(&admin, "missing").await.unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderNotFound);
    }

    #[tokio::test]
    async fn test_update_status_permissive() {
        let f = fixture(false).await;
        let emp = user("emp", Some(Role::Employee));
        let admin = user("admin", Some(Role::Admin));
        let order = f
            .service
            .create(&emp, payload(vec![line("espresso", 1)]))
            .await
            .unwrap();

        let err = f
            .service
            .update_status(&emp, &order.id, "ready")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::AdminRequired);

        let err = f
            .service
            .update_status(&admin, &order.id, "shipped")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidOrderStatus);

        let err = f
            .service
            .update_status(&admin, "missing", "ready")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderNotFound);

        // Permissive mode accepts any edge, including back from completed
        let updated = f
            .service
            .update_status(&admin, &order.id, "completed")
            .await
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Completed);
        assert!(updated.updated_at >= order.updated_at);
        assert_eq!(updated.created_at, order.created_at);

        let reverted = f
            .service
            .update_status(&admin, &order.id, "pending")
            .await
            .unwrap();
        assert_eq!(reverted.status, OrderStatus::Pending);
    }

    #[tokio::test]
    async fn test_update_status_strict() {
        let f = fixture(true).await;
        let emp = user("emp", Some(Role::Employee));
        let admin = user("admin", Some(Role::Admin));
        let order = f
            .service
            .create(&emp, payload(vec![line("espresso", 1)]))
            .await
            .unwrap();

        let err = f
            .service
            .update_status(&admin, &order.id, "completed")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStatusTransition);

        for status in ["preparing", "ready", "completed"] {
            f.service
                .update_status(&admin, &order.id, status)
                .await
                .unwrap();
        }
        let err = f
            .service
            .update_status(&admin, &order.id, "cancelled")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidStatusTransition);
    }
}
