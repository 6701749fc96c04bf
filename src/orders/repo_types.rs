use serde::Serialize;
use time::OffsetDateTime;

use crate::groups::GroupMap;

/// A placed order. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Order {
    pub id: u64,
    #[serde(with = "time::serde::rfc3339")]
    pub placed_at: OffsetDateTime,
    groups: GroupMap, // snapshot; no Favorites, no empty groups
}

impl Order {
    pub(crate) fn new(id: u64, groups: GroupMap) -> Self {
        Self {
            id,
            placed_at: OffsetDateTime::now_utc(),
            groups,
        }
    }

    pub fn groups(&self) -> &GroupMap {
        &self.groups
    }
}
