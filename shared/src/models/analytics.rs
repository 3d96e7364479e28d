//! Analytics Report Model

use serde::{Deserialize, Serialize};

use super::order::OrderStatus;

/// Order count per status
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusCounts {
    pub pending: u64,
    pub preparing: u64,
    pub ready: u64,
    pub completed: u64,
    pub cancelled: u64,
}

impl StatusCounts {
    pub fn increment(&mut self, status: OrderStatus) {
        match status {
            OrderStatus::Pending => self.pending += 1,
            OrderStatus::Preparing => self.preparing += 1,
            OrderStatus::Ready => self.ready += 1,
            OrderStatus::Completed => self.completed += 1,
            OrderStatus::Cancelled => self.cancelled += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.pending + self.preparing + self.ready + self.completed + self.cancelled
    }
}

/// Menu item ranked by ordered quantity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PopularItem {
    pub id: String,
    pub name: String,
    /// Total quantity ordered
    pub count: u64,
    pub revenue: f64,
}

/// Admin dashboard report
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub total_orders: u64,
    pub total_revenue: f64,
    pub total_menu_items: u64,
    pub orders_by_status: StatusCounts,
    pub popular_items: Vec<PopularItem>,
}
