//! Error types for tab bar operations and style loading.

use crate::item::{ItemId, UnsupportedReason};
use thiserror::Error;

/// Precondition failures of tab bar and controller operations.
///
/// Every operation returning this error leaves its receiver unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TabBarError {
    /// An item the bar cannot draw.
    #[error("item {index} ('{id}') cannot be displayed: {reason}")]
    UnsupportedItem {
        /// Position in the supplied list
        index: usize,
        /// Offending item
        id: ItemId,
        /// Why it was refused
        reason: UnsupportedReason,
    },

    /// The overflow item cannot be drawn.
    #[error("more item ('{id}') cannot be displayed: {reason}")]
    UnsupportedMoreItem {
        /// Offending item
        id: ItemId,
        /// Why it was refused
        reason: UnsupportedReason,
    },

    /// Two items share an identity.
    #[error("duplicate item id '{0}'")]
    DuplicateItem(ItemId),

    /// Selection refers to an item the bar does not hold.
    #[error("unknown item id '{0}'")]
    UnknownItem(ItemId),

    /// Page index past the end of the page list.
    #[error("index {index} out of range for {len} pages")]
    IndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of pages
        len: usize,
    },
}

/// Errors from loading a [`crate::TabBarStyle`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// A field holds a value the bar cannot use.
    #[error("invalid value for '{field}': {message}")]
    Invalid {
        /// Field name
        field: &'static str,
        /// What is wrong with it
        message: String,
    },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            message: message.into(),
        }
    }
}
