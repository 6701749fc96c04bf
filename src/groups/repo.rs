use indexmap::IndexMap;

use crate::catalog::FoodItem;
use crate::error::StoreError;

/// The reserved group. It always exists and can be neither removed nor
/// renamed; items move in and out of it like any other group.
pub const FAVORITES_GROUP: &str = "Favorites";

/// Group name to items, in insertion order. Names compare case-sensitively.
pub type GroupMap = IndexMap<String, Vec<FoodItem>>;

/// Named carts. Each mutator returns whether state actually changed so the
/// caller knows when to notify.
#[derive(Debug, Clone)]
pub struct GroupStore {
    groups: GroupMap,
}

impl Default for GroupStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GroupStore {
    pub fn new() -> Self {
        let mut groups = GroupMap::new();
        groups.insert(FAVORITES_GROUP.to_string(), Vec::new());
        Self { groups }
    }

    pub fn is_protected(name: &str) -> bool {
        name == FAVORITES_GROUP
    }

    pub fn as_map(&self) -> &GroupMap {
        &self.groups
    }

    pub fn names(&self) -> Vec<String> {
        self.groups.keys().cloned().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.groups.contains_key(name)
    }

    pub fn items(&self, name: &str) -> &[FoodItem] {
        self.groups.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn create_empty(&mut self, name: &str) -> Result<(), StoreError> {
        if name.is_empty() {
            return Err(StoreError::empty_name());
        }
        if self.groups.contains_key(name) {
            return Err(StoreError::duplicate(name));
        }
        self.groups.insert(name.to_string(), Vec::new());
        Ok(())
    }

    /// Append `quantity` copies, creating the group if needed.
    pub fn add(&mut self, item: &FoodItem, name: &str, quantity: usize) -> Result<bool, StoreError> {
        if name.is_empty() {
            return Err(StoreError::empty_name());
        }
        let created = !self.groups.contains_key(name);
        let group = self.groups.entry(name.to_string()).or_default();
        group.extend(std::iter::repeat(item).take(quantity).cloned());
        Ok(created || quantity > 0)
    }

    /// Drop every entry with the item's id. A non-protected group left
    /// empty is deleted outright.
    pub fn remove_item(&mut self, item_id: u32, name: &str) -> Result<bool, StoreError> {
        let group = self
            .groups
            .get_mut(name)
            .ok_or_else(|| StoreError::no_group(name))?;
        let before = group.len();
        group.retain(|i| i.id != item_id);
        let removed = group.len() != before;

        if group.is_empty() && !Self::is_protected(name) {
            self.groups.shift_remove(name);
            return Ok(true);
        }
        Ok(removed)
    }

    pub fn remove_group(&mut self, name: &str) -> Result<Vec<FoodItem>, StoreError> {
        if Self::is_protected(name) {
            return Err(StoreError::ProtectedGroup(name.to_string()));
        }
        self.groups
            .shift_remove(name)
            .ok_or_else(|| StoreError::no_group(name))
    }

    /// Move the contents to `new_name`, keeping the group's position.
    pub fn rename(&mut self, old_name: &str, new_name: &str) -> Result<(), StoreError> {
        if Self::is_protected(old_name) {
            return Err(StoreError::ProtectedGroup(old_name.to_string()));
        }
        if new_name.is_empty() {
            return Err(StoreError::empty_name());
        }
        if self.groups.contains_key(new_name) {
            return Err(StoreError::duplicate(new_name));
        }
        let (index, _, items) = self
            .groups
            .shift_remove_full(old_name)
            .ok_or_else(|| StoreError::no_group(old_name))?;
        self.groups.shift_insert(index, new_name.to_string(), items);
        Ok(())
    }

    /// Every non-empty, non-protected group, in order.
    pub fn orderable(&self) -> GroupMap {
        self.groups
            .iter()
            .filter(|(name, items)| !Self::is_protected(name) && !items.is_empty())
            .map(|(name, items)| (name.clone(), items.clone()))
            .collect()
    }

    /// Drop everything except Favorites, whose contents are kept.
    pub fn reset_to_favorites(&mut self) {
        self.groups.retain(|name, _| Self::is_protected(name));
        if !self.groups.contains_key(FAVORITES_GROUP) {
            self.groups.insert(FAVORITES_GROUP.to_string(), Vec::new());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Missing, NameRejection};
    use rust_decimal_macros::dec;

    fn pizza() -> FoodItem {
        FoodItem::new(1, "Pizza", dec!(12.99))
    }

    fn taco() -> FoodItem {
        FoodItem::new(8, "Taco", dec!(3.99))
    }

    #[test]
    fn starts_with_only_favorites() {
        let store = GroupStore::new();
        assert_eq!(store.names(), vec![FAVORITES_GROUP.to_string()]);
        assert!(store.items(FAVORITES_GROUP).is_empty());
    }

    #[test]
    fn create_rejects_empty_and_duplicate_names() {
        let mut store = GroupStore::new();
        store.create_empty("Lunch").expect("fresh name");
        assert_eq!(
            store.create_empty("Lunch").unwrap_err(),
            StoreError::InvalidName { name: "Lunch".into(), reason: NameRejection::Duplicate }
        );
        assert_eq!(store.create_empty("").unwrap_err(), StoreError::empty_name());
        // case-sensitive: a differently cased name is a different group
        store.create_empty("lunch").expect("distinct by case");
        assert_eq!(store.names().len(), 3);
    }

    #[test]
    fn add_creates_group_and_repeats_entries() {
        let mut store = GroupStore::new();
        assert!(store.add(&pizza(), "Lunch", 2).expect("add"));
        assert!(store.add(&taco(), "Lunch", 1).expect("add"));
        let ids: Vec<u32> = store.items("Lunch").iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 1, 8]);
    }

    #[test]
    fn zero_quantity_only_changes_state_when_creating() {
        let mut store = GroupStore::new();
        assert!(store.add(&pizza(), "Dinner", 0).expect("creates"));
        assert!(store.contains("Dinner"));
        assert!(!store.add(&pizza(), "Dinner", 0).expect("no-op"));
        assert!(store.items("Dinner").is_empty());
    }

    #[test]
    fn removing_last_item_deletes_group_but_not_favorites() {
        let mut store = GroupStore::new();
        store.add(&pizza(), "Lunch", 3).expect("add");
        store.add(&pizza(), FAVORITES_GROUP, 1).expect("add");

        assert!(store.remove_item(1, "Lunch").expect("remove"));
        assert!(!store.contains("Lunch"));

        assert!(store.remove_item(1, FAVORITES_GROUP).expect("remove"));
        assert!(store.contains(FAVORITES_GROUP));
        assert!(store.items(FAVORITES_GROUP).is_empty());
    }

    #[test]
    fn remove_item_is_idempotent_on_state() {
        let mut store = GroupStore::new();
        store.add(&pizza(), "Lunch", 1).expect("add");
        store.add(&taco(), "Lunch", 1).expect("add");
        assert!(store.remove_item(1, "Lunch").expect("first"));
        let after_first = store.as_map().clone();
        assert!(!store.remove_item(1, "Lunch").expect("second"));
        assert_eq!(store.as_map(), &after_first);
    }

    #[test]
    fn remove_item_from_unknown_group() {
        let mut store = GroupStore::new();
        assert_eq!(
            store.remove_item(1, "Nope").unwrap_err(),
            StoreError::NotFound(Missing::Group("Nope".into()))
        );
    }

    #[test]
    fn favorites_cannot_be_removed_or_renamed() {
        let mut store = GroupStore::new();
        assert!(matches!(
            store.remove_group(FAVORITES_GROUP),
            Err(StoreError::ProtectedGroup(_))
        ));
        assert!(matches!(
            store.rename(FAVORITES_GROUP, "Faves"),
            Err(StoreError::ProtectedGroup(_))
        ));
        assert!(store.contains(FAVORITES_GROUP));
        assert!(!store.contains("Faves"));
    }

    #[test]
    fn rename_keeps_position_and_order() {
        let mut store = GroupStore::new();
        store.add(&pizza(), "Lunch", 1).expect("add");
        store.add(&taco(), "Lunch", 1).expect("add");
        store.create_empty("Dinner").expect("create");

        store.rename("Lunch", "Brunch").expect("rename");
        assert_eq!(store.names(), vec!["Favorites", "Brunch", "Dinner"]);
        let ids: Vec<u32> = store.items("Brunch").iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 8]);
    }

    #[test]
    fn rename_onto_existing_name_changes_nothing() {
        let mut store = GroupStore::new();
        store.add(&pizza(), "Lunch", 1).expect("add");
        store.add(&taco(), "Dinner", 1).expect("add");
        let before = store.as_map().clone();

        assert!(store.rename("Lunch", "Dinner").is_err());
        assert!(store.rename("Lunch", FAVORITES_GROUP).is_err());
        assert!(store.rename("Lunch", "").is_err());
        assert!(store.rename("Missing", "Other").is_err());
        assert_eq!(store.as_map(), &before);
    }

    #[test]
    fn orderable_skips_favorites_and_empty_groups() {
        let mut store = GroupStore::new();
        store.add(&pizza(), FAVORITES_GROUP, 1).expect("add");
        store.create_empty("Empty").expect("create");
        store.add(&taco(), "Lunch", 2).expect("add");

        let snapshot = store.orderable();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot["Lunch"].len(), 2);

        store.reset_to_favorites();
        assert_eq!(store.names(), vec![FAVORITES_GROUP.to_string()]);
        assert_eq!(store.items(FAVORITES_GROUP).len(), 1);
    }
}
