//! Error types returned by the store's mutators and lookups.
//!
//! A rejected operation never changes state and never publishes a
//! notification; the variant says which rule refused it.

use std::fmt;

/// Why a group name was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameRejection {
    /// The name was the empty string.
    Empty,
    /// Another group already uses the name (case-sensitive).
    Duplicate,
}

impl fmt::Display for NameRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NameRejection::Empty => f.write_str("name is empty"),
            NameRejection::Duplicate => f.write_str("name already exists"),
        }
    }
}

/// The thing a lookup failed to find.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Missing {
    Item(u32),
    Group(String),
    Order(u64),
}

impl fmt::Display for Missing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Missing::Item(id) => write!(f, "food item {id}"),
            Missing::Group(name) => write!(f, "group '{name}'"),
            Missing::Order(id) => write!(f, "order #{id}"),
        }
    }
}

/// Error returned when the store rejects an operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// Group name is empty or collides with an existing group.
    #[error("invalid group name '{name}': {reason}")]
    InvalidName { name: String, reason: NameRejection },

    /// Attempt to delete or rename the reserved Favorites group.
    #[error("group '{0}' is protected")]
    ProtectedGroup(String),

    /// Unknown item id, group name or order id.
    #[error("{0} not found")]
    NotFound(Missing),
}

impl StoreError {
    pub(crate) fn empty_name() -> Self {
        StoreError::InvalidName {
            name: String::new(),
            reason: NameRejection::Empty,
        }
    }

    pub(crate) fn duplicate(name: &str) -> Self {
        StoreError::InvalidName {
            name: name.to_string(),
            reason: NameRejection::Duplicate,
        }
    }

    pub(crate) fn no_group(name: &str) -> Self {
        StoreError::NotFound(Missing::Group(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_value() {
        assert_eq!(
            StoreError::duplicate("Lunch").to_string(),
            "invalid group name 'Lunch': name already exists"
        );
        assert_eq!(
            StoreError::ProtectedGroup("Favorites".into()).to_string(),
            "group 'Favorites' is protected"
        );
        assert_eq!(
            StoreError::NotFound(Missing::Order(7)).to_string(),
            "order #7 not found"
        );
        assert_eq!(
            StoreError::NotFound(Missing::Item(42)).to_string(),
            "food item 42 not found"
        );
    }
}
