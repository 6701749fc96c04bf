use std::collections::BTreeMap;

use crate::groups::GroupMap;

use super::Order;

/// Order id to order, ascending.
pub type OrderHistory = BTreeMap<u64, Order>;

/// Append-only order log with gap-free ids starting at 1.
#[derive(Debug, Clone)]
pub struct OrderStore {
    history: OrderHistory,
    next_id: u64,
}

impl Default for OrderStore {
    fn default() -> Self {
        Self::new()
    }
}

impl OrderStore {
    pub fn new() -> Self {
        Self {
            history: OrderHistory::new(),
            next_id: 1,
        }
    }

    /// Id the next recorded order will receive.
    pub fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Record a snapshot. An empty snapshot is not stored and does not
    /// consume an id; the would-be id is returned either way.
    pub fn record(&mut self, snapshot: GroupMap) -> (u64, bool) {
        let id = self.next_id;
        if snapshot.is_empty() {
            return (id, false);
        }
        self.history.insert(id, Order::new(id, snapshot));
        self.next_id += 1;
        (id, true)
    }

    pub fn history(&self) -> &OrderHistory {
        &self.history
    }

    pub fn get(&self, id: u64) -> Option<&Order> {
        self.history.get(&id)
    }

    pub fn ids_newest_first(&self) -> Vec<u64> {
        self.history.keys().rev().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::FoodItem;
    use rust_decimal_macros::dec;

    fn lunch() -> GroupMap {
        let mut map = GroupMap::new();
        map.insert("Lunch".into(), vec![FoodItem::new(1, "Pizza", dec!(12.99))]);
        map
    }

    #[test]
    fn ids_are_sequential_from_one() {
        let mut store = OrderStore::new();
        assert_eq!(store.record(lunch()), (1, true));
        assert_eq!(store.record(lunch()), (2, true));
        assert_eq!(store.ids_newest_first(), vec![2, 1]);
    }

    #[test]
    fn empty_snapshot_returns_unused_id() {
        let mut store = OrderStore::new();
        assert_eq!(store.record(GroupMap::new()), (1, false));
        assert_eq!(store.record(GroupMap::new()), (1, false));
        assert!(store.history().is_empty());
        assert_eq!(store.record(lunch()), (1, true));
        assert_eq!(store.next_id(), 2);
    }

    #[test]
    fn get_returns_stored_snapshot() {
        let mut store = OrderStore::new();
        store.record(lunch());
        let order = store.get(1).expect("order 1 exists");
        assert_eq!(order.groups(), &lunch());
        assert!(store.get(2).is_none());
    }
}
