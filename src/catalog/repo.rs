use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use super::FoodItem;

/// The fixed menu for a session. Only `is_favorite` ever mutates.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    items: Vec<FoodItem>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::seeded()
    }
}

impl Catalog {
    /// The standard eight-dish menu.
    pub fn seeded() -> Self {
        let menu: [(u32, &str, Decimal); 8] = [
            (1, "Pizza", dec!(12.99)),
            (2, "Burger", dec!(8.99)),
            (3, "Sushi", dec!(15.99)),
            (4, "Pasta", dec!(10.99)),
            (5, "Salad", dec!(7.99)),
            (6, "Ice Cream", dec!(4.99)),
            (7, "Sandwich", dec!(6.99)),
            (8, "Taco", dec!(3.99)),
        ];
        Self::from_items(
            menu.into_iter()
                .map(|(id, name, price)| FoodItem::new(id, name, price))
                .collect(),
        )
    }

    /// Build from an explicit item list. Later entries with a repeated id
    /// are dropped so lookups stay unambiguous.
    pub fn from_items(items: Vec<FoodItem>) -> Self {
        let mut unique: Vec<FoodItem> = Vec::with_capacity(items.len());
        for item in items {
            if unique.iter().any(|i| i.id == item.id) {
                tracing::warn!(item_id = item.id, "duplicate catalog id ignored");
                continue;
            }
            unique.push(item);
        }
        Self { items: unique }
    }

    pub fn items(&self) -> &[FoodItem] {
        &self.items
    }

    pub fn get(&self, id: u32) -> Option<&FoodItem> {
        self.items.iter().find(|i| i.id == id)
    }

    /// Flip the favorite flag; returns the new value, or `None` for an
    /// unknown id.
    pub fn toggle_favorite(&mut self, id: u32) -> Option<bool> {
        let item = self.items.iter_mut().find(|i| i.id == id)?;
        item.is_favorite = !item.is_favorite;
        Some(item.is_favorite)
    }

    /// Favorited items in menu order.
    pub fn favorites(&self) -> Vec<FoodItem> {
        self.items.iter().filter(|i| i.is_favorite).cloned().collect()
    }
}
