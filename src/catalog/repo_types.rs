use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Menu entry.
///
/// Identity is the `id`; `name` and `price` never change once the catalog
/// is built. Groups hold copies, so quantity is expressed by repeating an
/// entry rather than by a count field.
///
/// `PartialEq` compares every field, including `is_favorite`, which a copy
/// keeps from the moment it was added to a group. Use [`FoodItem::same_item`]
/// when asking whether two entries are the same menu item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodItem {
    pub id: u32,
    pub name: String,
    pub price: Decimal,      // currency units, 2 decimal places
    pub is_favorite: bool,
}

impl FoodItem {
    pub fn new(id: u32, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            is_favorite: false,
        }
    }

    pub fn same_item(&self, other: &FoodItem) -> bool {
        self.id == other.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn same_item_ignores_favorite_flag() {
        let plain = FoodItem::new(1, "Pizza", dec!(12.99));
        let starred = FoodItem { is_favorite: true, ..plain.clone() };
        assert_ne!(plain, starred);
        assert!(plain.same_item(&starred));
        assert!(!plain.same_item(&FoodItem::new(2, "Burger", dec!(8.99))));
    }
}
