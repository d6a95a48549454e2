use std::path::PathBuf;

use thiserror::Error;

use crate::catalog::ItemId;
use crate::fit::{LoadoutId, SlotKind};

/// Convenient result alias for the fitsim library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when catalog data fails validation.
    #[error("invalid catalog data: {message}")]
    CatalogValidation { message: String },

    /// Raised when two catalog items share an id.
    #[error("duplicate item id encountered: {id}")]
    DuplicateItemId { id: ItemId },

    /// Raised when duplicate item names are encountered during catalog load.
    #[error("duplicate item name encountered: {name}")]
    DuplicateItemName { name: String },

    /// Raised when an item name could not be found in the catalog.
    #[error("unknown item name: {name}{}", format_suggestions(.suggestions))]
    UnknownItem {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when an item id is not present in the catalog.
    #[error("item {id} is not in the catalog")]
    MissingItem { id: ItemId },

    /// Raised when a loadout description cannot be turned into a loadout.
    #[error("invalid loadout: {message}")]
    LoadoutValidation { message: String },

    /// Raised when a loadout id is not known to the hangar.
    #[error("unknown loadout {id}")]
    UnknownLoadout { id: LoadoutId },

    /// Raised when a vault name is not known to the hangar.
    #[error("unknown vault: {name}")]
    UnknownVault { name: String },

    /// The item cannot be turned into a module for this loadout.
    #[error("item {name} cannot be fitted: {reason}")]
    IncompatibleItem { name: String, reason: String },

    /// No module occupies the requested slot index.
    #[error("no module fitted at slot index {index}")]
    SlotEmpty { index: usize },

    /// Every slot of the requested category is occupied.
    #[error("no free {slot} slot available")]
    NoFreeSlot { slot: SlotKind },

    /// Derived attributes were read after a mutation without a recompute.
    #[error("derived attributes of loadout {id} are stale; recompute first")]
    StaleAttributes { id: LoadoutId },

    /// The module cannot answer a charge query.
    #[error("module {name} does not use charges")]
    NoChargeCapacity { name: String },

    /// Wrapper for JSON parsing errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// Raised when a file could not be read.
    #[error("failed to read {path}: {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}
