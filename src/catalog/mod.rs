mod repo;
mod repo_types;

pub use repo::Catalog;
pub use repo_types::FoodItem;
