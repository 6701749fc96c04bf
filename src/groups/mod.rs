mod repo;

pub use repo::{GroupMap, GroupStore, FAVORITES_GROUP};
