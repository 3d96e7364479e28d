//! Sales analytics
//!
//! Pure reduction over stored orders; nothing is cached.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::models::{AnalyticsReport, Order, PopularItem, StatusCounts};
use shared::money::{self, MoneyResult, to_f64};

/// Number of entries in `popularItems`
pub const POPULAR_ITEMS_LIMIT: usize = 5;

struct Tally<'a> {
    name: &'a str,
    named_at: DateTime<Utc>,
    count: u64,
    revenue: Decimal,
}

/// Build the dashboard report
///
/// Revenue counts every order regardless of status. Popular items are ranked
/// by quantity, then revenue, then id, and carry the name from the most
/// recently placed order containing them. Input order does not matter.
pub fn build_report(orders: &[Order], total_menu_items: usize) -> MoneyResult<AnalyticsReport> {
    let mut by_status = StatusCounts::default();
    let mut revenue = Decimal::ZERO;
    let mut tallies: HashMap<&str, Tally<'_>> = HashMap::new();

    for order in orders {
        by_status.increment(order.status);
        revenue = money::checked_add(revenue, order.total)?;

        for line in &order.items {
            let tally = tallies.entry(line.menu_item_id.as_str()).or_insert(Tally {
                name: line.name.as_str(),
                named_at: order.created_at,
                count: 0,
                revenue: Decimal::ZERO,
            });
            if order.created_at > tally.named_at {
                tally.name = line.name.as_str();
                tally.named_at = order.created_at;
            }
            tally.count = tally.count.saturating_add(u64::from(line.quantity));
            tally.revenue = money::checked_add(tally.revenue, line.subtotal)?;
        }
    }

    let mut ranked: Vec<(&str, Tally<'_>)> = tallies.into_iter().collect();
    ranked.sort_by(|(id_a, a), (id_b, b)| {
        b.count
            .cmp(&a.count)
            .then_with(|| b.revenue.cmp(&a.revenue))
            .then_with(|| id_a.cmp(id_b))
    });

    let popular_items = ranked
        .into_iter()
        .take(POPULAR_ITEMS_LIMIT)
        .map(|(id, tally)| PopularItem {
            id: id.to_string(),
            name: tally.name.to_string(),
            count: tally.count,
            revenue: to_f64(tally.revenue),
        })
        .collect();

    Ok(AnalyticsReport {
        total_orders: orders.len() as u64,
        total_revenue: to_f64(revenue),
        total_menu_items: total_menu_items as u64,
        orders_by_status: by_status,
        popular_items,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use shared::models::{OrderLine, OrderStatus};

    fn order(id: &str, status: OrderStatus, lines: &[(&str, &str, f64, u32)]) -> Order {
        let items: Vec<OrderLine> = lines
            .iter()
            .map(|(mid, name, price, qty)| {
                OrderLine::new((*mid).into(), (*name).into(), *price, *qty).unwrap()
            })
            .collect();
        let now = Utc::now();
        Order {
            id: id.into(),
            user_id: "u".into(),
            user_email: "u@cafe.test".into(),
            total: Order::compute_total(&items).unwrap(),
            items,
            notes: String::new(),
            status,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_empty_report() {
        let report = build_report(&[], 6).unwrap();
        assert_eq!(report.total_orders, 0);
        assert_eq!(report.total_revenue, 0.0);
        assert_eq!(report.total_menu_items, 6);
        assert_eq!(report.orders_by_status, StatusCounts::default());
        assert!(report.popular_items.is_empty());
    }

    #[test]
    fn test_revenue_and_partition() {
        let orders = vec![
            order("1", OrderStatus::Pending, &[("e", "Espresso", 2.99, 2)]),
            order("2", OrderStatus::Cancelled, &[("l", "Latte", 4.99, 1)]),
            order("3", OrderStatus::Completed, &[("e", "Espresso", 2.99, 1)]),
        ];
        let report = build_report(&orders, 3).unwrap();

        // Cancelled orders still count toward revenue
        assert_eq!(report.total_revenue, 13.96);
        assert_eq!(report.total_orders, 3);
        assert_eq!(report.orders_by_status.total(), 3);
        assert_eq!(report.orders_by_status.pending, 1);
        assert_eq!(report.orders_by_status.cancelled, 1);
        assert_eq!(report.orders_by_status.completed, 1);
    }

    #[test]
    fn test_popular_items_ranking() {
        let orders = vec![
            order(
                "1",
                OrderStatus::Pending,
                &[("e", "Espresso", 2.99, 3), ("l", "Latte", 4.99, 3)],
            ),
            order(
                "2",
                OrderStatus::Ready,
                &[("c", "Croissant", 3.49, 1), ("m", "Muffin", 3.99, 1)],
            ),
            order(
                "3",
                OrderStatus::Ready,
                &[("a", "Americano", 3.0, 1), ("t", "Tea", 2.0, 1), ("x", "Cookie", 1.0, 1)],
            ),
        ];
        let report = build_report(&orders, 7).unwrap();
        let ids: Vec<_> = report.popular_items.iter().map(|p| p.id.as_str()).collect();

        // Equal counts break on revenue, then id
        assert_eq!(ids, vec!["l", "e", "m", "c", "a"]);
        assert_eq!(report.popular_items.len(), POPULAR_ITEMS_LIMIT);
        assert_eq!(report.popular_items[0].count, 3);
        assert_eq!(report.popular_items[0].revenue, 14.97);
        assert_eq!(report.popular_items[1].revenue, 8.97);
    }

    #[test]
    fn test_name_comes_from_latest_order() {
        let mut older = order("1", OrderStatus::Pending, &[("e", "Espresso", 2.99, 1)]);
        older.created_at -= Duration::hours(1);
        let newer = order("2", OrderStatus::Pending, &[("e", "Double Espresso", 3.49, 1)]);

        for orders in [vec![older.clone(), newer.clone()], vec![newer, older]] {
            let report = build_report(&orders, 1).unwrap();
            assert_eq!(report.popular_items[0].name, "Double Espresso");
            assert_eq!(report.popular_items[0].count, 2);
            assert_eq!(report.popular_items[0].revenue, 6.48);
        }
    }

    #[test]
    fn test_unrepresentable_total_is_an_error() {
        let mut broken = order("1", OrderStatus::Completed, &[("e", "Espresso", 2.99, 1)]);
        broken.total = 1e30;
        assert!(build_report(&[broken], 1).is_err());
    }
}
