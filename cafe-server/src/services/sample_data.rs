//! Sample menu seeding

use shared::error::AppResult;
use shared::models::MenuItem;
use shared::util;

use crate::db::repository::MenuRepository;

/// (name, category, description, price)
const SAMPLE_MENU: &[(&str, &str, &str, f64)] = &[
    ("Espresso", "drinks", "Rich and bold shot of espresso", 2.99),
    ("Cappuccino", "drinks", "Espresso with steamed milk and foam", 4.49),
    ("Latte", "drinks", "Smooth espresso with steamed milk", 4.99),
    ("Croissant", "food", "Buttery and flaky French pastry", 3.49),
    ("Blueberry Muffin", "food", "Fresh baked muffin with blueberries", 3.99),
    ("Avocado Toast", "food", "Toasted sourdough with mashed avocado", 7.99),
];

/// Seed outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// Menu already had items; nothing written
    AlreadySeeded,
    Seeded(usize),
}

/// Seed the sample menu unless any menu item exists
pub async fn seed_sample_menu(menu: &MenuRepository) -> AppResult<SeedOutcome> {
    if menu.count().await? > 0 {
        return Ok(SeedOutcome::AlreadySeeded);
    }

    let now = util::now();
    for (name, category, description, price) in SAMPLE_MENU {
        let item = MenuItem {
            id: util::new_id(),
            name: (*name).to_string(),
            category: (*category).to_string(),
            description: (*description).to_string(),
            price: *price,
            available: true,
            image: String::new(),
            created_at: now,
            updated_at: now,
        };
        menu.save(&item).await?;
    }

    tracing::info!(items = SAMPLE_MENU.len(), "Sample menu seeded");
    Ok(SeedOutcome::Seeded(SAMPLE_MENU.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::RedbStore;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_seed_once() {
        let menu = MenuRepository::new(Arc::new(RedbStore::open_in_memory().unwrap()));

        assert_eq!(seed_sample_menu(&menu).await.unwrap(), SeedOutcome::Seeded(6));
        assert_eq!(
            seed_sample_menu(&menu).await.unwrap(),
            SeedOutcome::AlreadySeeded
        );

        let items = menu.find_all().await.unwrap();
        assert_eq!(items.len(), 6);
        let espresso = items.iter().find(|i| i.name == "Espresso").unwrap();
        assert_eq!(espresso.price, 2.99);
        assert_eq!(espresso.category, "drinks");
        assert!(items.iter().all(|i| i.available));
        assert_eq!(items.iter().filter(|i| i.category == "food").count(), 3);
    }
}
