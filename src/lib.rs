//! In-memory ordering store: a fixed menu, named carts ("groups") with a
//! protected Favorites group, favorite flags, and an append-only order
//! history, each observable through its own replay-latest channel.

pub mod catalog;
pub mod config;
pub mod console;
pub mod error;
pub mod groups;
pub mod manager;
pub mod notify;
pub mod orders;
pub mod pricing;
pub mod state;

pub use catalog::{Catalog, FoodItem};
pub use error::{Missing, NameRejection, StoreError};
pub use groups::{GroupMap, FAVORITES_GROUP};
pub use manager::DataManager;
pub use notify::{Channel, Snapshot, Subscription};
pub use orders::{Order, OrderHistory, OrderSummary};
pub use pricing::TAX_RATE;
