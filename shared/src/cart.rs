//! Client-side cart and session
//!
//! The cart is an owned value carried by [`ClientSession`] together with the
//! login result. Frontends hold one session per signed-in user and pass it
//! where it is needed.

use serde::{Deserialize, Serialize};

use crate::client::{LoginResponse, UserInfo};
use crate::models::{MenuItem, OrderCreate, OrderLineRequest};
use crate::money::{self, MAX_QUANTITY, MoneyResult};

/// Cart line: the menu item as shown when it was added plus a quantity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    pub item: MenuItem,
    pub quantity: u32,
}

impl CartLine {
    pub fn subtotal(&self) -> MoneyResult<f64> {
        money::line_subtotal(self.item.price, self.quantity)
    }
}

/// Shopping cart, insertion-ordered
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of `item`, merging with an existing line
    ///
    /// Quantities stop at [`MAX_QUANTITY`].
    pub fn add_item(&mut self, item: MenuItem) {
        match self.lines.iter_mut().find(|line| line.item.id == item.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1).min(MAX_QUANTITY),
            None => self.lines.push(CartLine { item, quantity: 1 }),
        }
    }

    /// Set the quantity of a line. Zero removes it; unknown ids are ignored.
    pub fn update_quantity(&mut self, item_id: &str, quantity: u32) {
        if quantity == 0 {
            self.remove_item(item_id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|line| line.item.id == item_id) {
            line.quantity = quantity.min(MAX_QUANTITY);
        }
    }

    pub fn remove_item(&mut self, item_id: &str) {
        self.lines.retain(|line| line.item.id != item_id);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn quantity_of(&self, item_id: &str) -> u32 {
        self.lines
            .iter()
            .find(|line| line.item.id == item_id)
            .map(|line| line.quantity)
            .unwrap_or(0)
    }

    /// Σ price × quantity
    pub fn total(&self) -> MoneyResult<f64> {
        let subtotals = self
            .lines
            .iter()
            .map(CartLine::subtotal)
            .collect::<MoneyResult<Vec<_>>>()?;
        money::sum(subtotals)
    }

    /// Σ quantity
    pub fn item_count(&self) -> u32 {
        self.lines
            .iter()
            .fold(0, |count, line| count.saturating_add(line.quantity))
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Build the order payload. `None` for an empty cart.
    pub fn to_order(&self, notes: Option<String>) -> Option<OrderCreate> {
        if self.is_empty() {
            return None;
        }
        Some(OrderCreate {
            items: self
                .lines
                .iter()
                .map(|line| OrderLineRequest {
                    menu_item_id: line.item.id.clone(),
                    quantity: line.quantity,
                })
                .collect(),
            notes: notes.filter(|n| !n.is_empty()),
        })
    }
}

/// Signed-in user state: token, user info and cart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSession {
    pub token: String,
    pub user: UserInfo,
    pub cart: Cart,
}

impl ClientSession {
    pub fn new(login: LoginResponse) -> Self {
        Self {
            token: login.access_token,
            user: login.user,
            cart: Cart::new(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.user.is_admin()
    }
}

impl From<LoginResponse> for ClientSession {
    fn from(login: LoginResponse) -> Self {
        Self::new(login)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use chrono::Utc;

    fn item(id: &str, name: &str, price: f64) -> MenuItem {
        let now = Utc::now();
        MenuItem {
            id: id.into(),
            name: name.into(),
            category: "drinks".into(),
            description: String::new(),
            price,
            available: true,
            image: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_add_item_merges_lines() {
        let mut cart = Cart::new();
        cart.add_item(item("m-1", "Espresso", 2.99));
        cart.add_item(item("m-1", "Espresso", 2.99));
        cart.add_item(item("m-2", "Latte", 4.99));

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.quantity_of("m-1"), 2);
        assert_eq!(cart.quantity_of("m-2"), 1);
        assert_eq!(cart.quantity_of("m-3"), 0);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.total(), Ok(10.97));
    }

    #[test]
    fn test_update_quantity_zero_removes() {
        let mut cart = Cart::new();
        cart.add_item(item("m-1", "Espresso", 2.99));
        cart.update_quantity("m-1", 4);
        assert_eq!(cart.quantity_of("m-1"), 4);

        cart.update_quantity("missing", 2);
        assert_eq!(cart.lines().len(), 1);

        cart.update_quantity("m-1", 0);
        assert!(cart.is_empty());
        assert_eq!(cart.total(), Ok(0.0));
    }

    #[test]
    fn test_quantity_is_capped() {
        let mut cart = Cart::new();
        cart.add_item(item("m-1", "Espresso", 2.99));
        cart.update_quantity("m-1", u32::MAX);
        assert_eq!(cart.quantity_of("m-1"), MAX_QUANTITY);

        cart.add_item(item("m-1", "Espresso", 2.99));
        assert_eq!(cart.quantity_of("m-1"), MAX_QUANTITY);
    }

    #[test]
    fn test_total_reports_unrepresentable_price() {
        let mut cart = Cart::new();
        cart.add_item(item("m-1", "Gold", 1e30));
        assert!(cart.total().is_err());
        assert!(cart.lines()[0].subtotal().is_err());
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = Cart::new();
        cart.add_item(item("m-1", "Espresso", 2.99));
        cart.add_item(item("m-2", "Latte", 4.99));
        cart.remove_item("m-1");
        assert_eq!(cart.lines().len(), 1);
        cart.clear();
        assert!(cart.is_empty());
    }

    #[test]
    fn test_to_order() {
        let mut cart = Cart::new();
        assert!(cart.to_order(None).is_none());

        cart.add_item(item("m-1", "Espresso", 2.99));
        cart.add_item(item("m-1", "Espresso", 2.99));
        let order = cart.to_order(Some("extra hot".into())).unwrap();
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].menu_item_id, "m-1");
        assert_eq!(order.items[0].quantity, 2);
        assert_eq!(order.notes.as_deref(), Some("extra hot"));

        let no_notes = cart.to_order(Some(String::new())).unwrap();
        assert!(no_notes.notes.is_none());
    }

    #[test]
    fn test_session_owns_cart() {
        let login = LoginResponse {
            access_token: "tok".into(),
            user: UserInfo {
                id: "u-1".into(),
                email: "a@b.c".into(),
                name: "Alex".into(),
                role: Role::Admin,
            },
        };
        let mut session = ClientSession::from(login);
        assert!(session.is_admin());
        assert!(session.cart.is_empty());

        session.cart.add_item(item("m-1", "Espresso", 2.99));
        assert_eq!(session.cart.item_count(), 1);
    }
}
