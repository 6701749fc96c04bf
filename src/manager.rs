//! The state manager: catalog, groups and orders behind one owner, with a
//! notification channel per aggregate.
//!
//! All methods run to completion synchronously. Notifications are queued
//! after internal state is updated and before the mutating call returns.
//! A rejected call changes nothing and notifies nobody. For use from several
//! tasks, wrap the manager in a single-writer lock (see
//! [`AppState`](crate::state::AppState)); sequences of calls are not atomic.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::catalog::{Catalog, FoodItem};
use crate::config::AppConfig;
use crate::error::{Missing, StoreError};
use crate::groups::{GroupMap, GroupStore, FAVORITES_GROUP};
use crate::notify::{Channel, Snapshot, Subscription, Topic};
use crate::orders::{Order, OrderHistory, OrderStore, OrderSummary};
use crate::pricing::{self, TAX_RATE};

#[derive(Debug)]
pub struct DataManager {
    catalog: Catalog,
    groups: GroupStore,
    orders: OrderStore,
    tax_rate: Decimal,
    groups_topic: Topic<GroupMap>,
    favorites_topic: Topic<Vec<FoodItem>>,
    orders_topic: Topic<OrderHistory>,
}

impl Default for DataManager {
    fn default() -> Self {
        Self::new()
    }
}

impl DataManager {
    /// Seeded menu, only the Favorites group, no orders, 13% tax.
    pub fn new() -> Self {
        Self::with_catalog(Catalog::seeded(), TAX_RATE)
    }

    pub fn with_config(config: &AppConfig) -> Self {
        Self::with_catalog(Catalog::seeded(), config.tax_rate)
    }

    pub fn with_catalog(catalog: Catalog, tax_rate: Decimal) -> Self {
        let groups = GroupStore::new();
        let orders = OrderStore::new();
        Self {
            groups_topic: Topic::new(groups.as_map().clone()),
            favorites_topic: Topic::new(catalog.favorites()),
            orders_topic: Topic::new(orders.history().clone()),
            catalog,
            groups,
            orders,
            tax_rate,
        }
    }

    pub fn tax_rate(&self) -> Decimal {
        self.tax_rate
    }

    // ---- catalog ----

    pub fn food_items(&self) -> &[FoodItem] {
        self.catalog.items()
    }

    pub fn food_item(&self, id: u32) -> Option<&FoodItem> {
        self.catalog.get(id)
    }

    // ---- groups ----

    pub fn create_empty_group(&mut self, name: &str) -> Result<(), StoreError> {
        self.groups
            .create_empty(name)
            .inspect_err(|e| warn!(group = name, error = %e, "create group rejected"))?;
        debug!(group = name, "group created");
        self.publish_groups();
        Ok(())
    }

    /// Append `quantity` copies of `item` to `group`, creating it if absent.
    /// A quantity of 0 appends nothing.
    pub fn add_to_group(
        &mut self,
        item: &FoodItem,
        group: &str,
        quantity: usize,
    ) -> Result<(), StoreError> {
        let changed = self
            .groups
            .add(item, group, quantity)
            .inspect_err(|e| warn!(group, item_id = item.id, error = %e, "add rejected"))?;
        if changed {
            debug!(group, item_id = item.id, quantity, "items added");
            self.publish_groups();
        }
        Ok(())
    }

    /// Add one copy to the Favorites group.
    pub fn add_to_favorites(&mut self, item: &FoodItem) -> Result<(), StoreError> {
        self.add_to_group(item, FAVORITES_GROUP, 1)
    }

    /// Remove every entry with `item.id`; a non-Favorites group left empty
    /// disappears.
    pub fn remove_from_group(&mut self, item: &FoodItem, group: &str) -> Result<(), StoreError> {
        let changed = self
            .groups
            .remove_item(item.id, group)
            .inspect_err(|e| warn!(group, item_id = item.id, error = %e, "remove rejected"))?;
        if changed {
            debug!(group, item_id = item.id, "items removed");
            self.publish_groups();
        }
        Ok(())
    }

    pub fn remove_group(&mut self, name: &str) -> Result<(), StoreError> {
        let dropped = self
            .groups
            .remove_group(name)
            .inspect_err(|e| warn!(group = name, error = %e, "remove group rejected"))?;
        debug!(group = name, items = dropped.len(), "group removed");
        self.publish_groups();
        Ok(())
    }

    pub fn rename_group(&mut self, old_name: &str, new_name: &str) -> Result<(), StoreError> {
        self.groups.rename(old_name, new_name).inspect_err(|e| {
            warn!(group = old_name, new_name, error = %e, "rename rejected")
        })?;
        debug!(group = old_name, new_name, "group renamed");
        self.publish_groups();
        Ok(())
    }

    /// Group names in insertion order, Favorites first.
    pub fn groups(&self) -> Vec<String> {
        self.groups.names()
    }

    /// Items of `name`, empty when the group does not exist.
    pub fn items_in_group(&self, name: &str) -> Vec<FoodItem> {
        self.groups.items(name).to_vec()
    }

    /// Distinct items of a group with their quantities, in first-seen order.
    pub fn item_counts(&self, name: &str) -> Vec<(FoodItem, usize)> {
        let mut counts: Vec<(FoodItem, usize)> = Vec::new();
        for item in self.groups.items(name) {
            match counts.iter_mut().find(|(seen, _)| seen.same_item(item)) {
                Some((_, n)) => *n += 1,
                None => counts.push((item.clone(), 1)),
            }
        }
        counts
    }

    pub fn calculate_subtotal(&self, name: &str) -> Decimal {
        pricing::subtotal(self.groups.items(name))
    }

    pub fn calculate_total_with_tax(&self, name: &str) -> Decimal {
        pricing::total_with_tax(self.calculate_subtotal(name), self.tax_rate)
    }

    // ---- favorites ----

    /// Flip the catalog flag for `item_id`. Independent of the Favorites
    /// group's contents.
    pub fn toggle_favorite(&mut self, item_id: u32) -> Result<bool, StoreError> {
        let Some(now) = self.catalog.toggle_favorite(item_id) else {
            warn!(item_id, "toggle favorite on unknown item");
            return Err(StoreError::NotFound(Missing::Item(item_id)));
        };
        debug!(item_id, is_favorite = now, "favorite toggled");
        self.favorites_topic.publish(self.catalog.favorites());
        Ok(now)
    }

    pub fn favorite_items(&self) -> Vec<FoodItem> {
        self.catalog.favorites()
    }

    // ---- orders ----

    /// Move every non-empty, non-Favorites group into a new order and reset
    /// the groups to Favorites alone.
    ///
    /// With nothing to order the call changes nothing and returns the id the
    /// next real order will get; that id is not consumed.
    pub fn place_order(&mut self) -> u64 {
        let (order_id, recorded) = self.orders.record(self.groups.orderable());
        if !recorded {
            debug!(order_id, "nothing to order");
            return order_id;
        }
        info!(
            order_id,
            groups = self.orders.get(order_id).map_or(0, |o| o.groups().len()),
            "order placed"
        );
        self.orders_topic.publish(self.orders.history().clone());
        self.groups.reset_to_favorites();
        self.publish_groups();
        order_id
    }

    pub fn order_history(&self) -> &OrderHistory {
        self.orders.history()
    }

    pub fn order(&self, id: u64) -> Option<&Order> {
        self.orders.get(id)
    }

    pub fn find_order(&self, id: u64) -> Result<&Order, StoreError> {
        self.order(id).ok_or(StoreError::NotFound(Missing::Order(id)))
    }

    /// History view ordering.
    pub fn order_ids_newest_first(&self) -> Vec<u64> {
        self.orders.ids_newest_first()
    }

    pub fn order_summary(&self, id: u64) -> Result<OrderSummary, StoreError> {
        self.find_order(id)
            .map(|order| OrderSummary::from_order(order, self.tax_rate))
    }

    // ---- notifications ----

    pub fn subscribe(&mut self, channel: Channel) -> Subscription<Snapshot> {
        match channel {
            Channel::Groups => self.groups_topic.subscribe_with(Snapshot::Groups),
            Channel::Favorites => self.favorites_topic.subscribe_with(Snapshot::Favorites),
            Channel::Orders => self.orders_topic.subscribe_with(Snapshot::Orders),
        }
    }

    pub fn subscribe_groups(&mut self) -> Subscription<Arc<GroupMap>> {
        self.groups_topic.subscribe()
    }

    pub fn subscribe_favorites(&mut self) -> Subscription<Arc<Vec<FoodItem>>> {
        self.favorites_topic.subscribe()
    }

    pub fn subscribe_orders(&mut self) -> Subscription<Arc<OrderHistory>> {
        self.orders_topic.subscribe()
    }

    fn publish_groups(&mut self) {
        self.groups_topic.publish(self.groups.as_map().clone());
    }
}
