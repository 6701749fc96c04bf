mod dto;
mod repo;
mod repo_types;

pub use dto::{GroupSummary, LineItem, OrderSummary};
pub use repo::{OrderHistory, OrderStore};
pub use repo_types::Order;
