//! Item catalog loading and lookup.
//!
//! The catalog is a JSON document with a single `items` array. Items are looked
//! up by id when resolving loadouts, and by case-insensitive name when building
//! loadouts from user input.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};

use super::item::{Item, ItemCategory, ItemId};

/// Minimum Jaro-Winkler similarity for a name to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;
const MAX_SUGGESTIONS: usize = 3;

#[derive(Debug, Deserialize)]
struct CatalogDocument {
    items: Vec<Item>,
}

/// Collection of item definitions loaded from a JSON file.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: BTreeMap<ItemId, Item>,
    names: HashMap<String, ItemId>,
    source: Option<PathBuf>,
}

impl Catalog {
    /// Load a catalog from a file path.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = fs::File::open(path).map_err(|source| Error::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        let mut catalog = Self::from_reader(file)?;
        catalog.source = Some(path.to_path_buf());
        Ok(catalog)
    }

    /// Load a catalog from a reader (e.g., file or in-memory buffer).
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let document: CatalogDocument = serde_json::from_reader(reader)?;
        Self::from_items(document.items)
    }

    /// Build a catalog from already-parsed items, validating each one.
    pub fn from_items(items: impl IntoIterator<Item = Item>) -> Result<Self> {
        let mut catalog = Self::default();

        for mut item in items {
            item.name = item.name.trim().to_string();
            item.validate()?;

            let key = normalize_name(&item.name);
            if catalog.names.contains_key(&key) {
                return Err(Error::DuplicateItemName { name: key });
            }
            if catalog.items.contains_key(&item.id) {
                return Err(Error::DuplicateItemId { id: item.id });
            }

            catalog.names.insert(key, item.id);
            catalog.items.insert(item.id, item);
        }

        Ok(catalog)
    }

    pub fn get(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    /// Like [`Catalog::get`], but a missing id is an error.
    pub fn item(&self, id: ItemId) -> Result<&Item> {
        self.get(id).ok_or(Error::MissingItem { id })
    }

    /// Display name of an item, falling back to its id.
    pub fn name_of(&self, id: ItemId) -> String {
        self.get(id)
            .map(|item| item.name.clone())
            .unwrap_or_else(|| format!("#{id}"))
    }

    /// Find an item by name (case-insensitive).
    pub fn find(&self, name: &str) -> Option<&Item> {
        self.names
            .get(&normalize_name(name))
            .and_then(|id| self.items.get(id))
    }

    /// Find an item by name, reporting close matches when it does not exist.
    pub fn by_name(&self, name: &str) -> Result<&Item> {
        self.find(name).ok_or_else(|| Error::UnknownItem {
            name: name.to_string(),
            suggestions: self.fuzzy_matches(name, MAX_SUGGESTIONS),
        })
    }

    /// Item names most similar to `name`, best match first.
    pub fn fuzzy_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = normalize_name(name);
        let mut scored: Vec<(f64, &str)> = self
            .items
            .values()
            .map(|item| {
                let score = strsim::jaro_winkler(&needle, &normalize_name(&item.name));
                (score, item.name.as_str())
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, name)| name.to_string())
            .collect()
    }

    /// All items sorted by name.
    pub fn items_sorted(&self) -> Vec<&Item> {
        let mut items: Vec<&Item> = self.items.values().collect();
        items.sort_by(|a, b| a.name.cmp(&b.name));
        items
    }

    /// Items of one category sorted by name.
    pub fn items_in(&self, category: ItemCategory) -> Vec<&Item> {
        self.items_sorted()
            .into_iter()
            .filter(|item| item.category == category)
            .collect()
    }

    /// Charges whose group is one of `groups`, in id order.
    pub fn charges_in_groups<'a>(
        &'a self,
        groups: &'a [String],
    ) -> impl Iterator<Item = &'a Item> + 'a {
        self.items
            .values()
            .filter(move |item| item.is_charge() && groups.iter().any(|g| *g == item.group))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Get the source path if the catalog was loaded from a file.
    pub fn source_path(&self) -> Option<&Path> {
        self.source.as_deref()
    }
}

/// Normalize an item name for case-insensitive lookup.
fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    const SAMPLE: &str = r#"{
        "items": [
            {"id": 1, "name": "EMP S", "category": "charge", "group": "Projectile Ammo"},
            {"id": 2, "name": "Fusion S", "category": "charge", "group": "Projectile Ammo"},
            {"id": 3, "name": "Multifrequency S", "category": "charge", "group": "Frequency Crystal"}
        ]
    }"#;

    #[test]
    fn looks_up_names_case_insensitively() {
        let catalog = Catalog::from_reader(Cursor::new(SAMPLE)).expect("catalog parses");
        let item = catalog.find("  emp s ").expect("item present");
        assert_eq!(item.id, ItemId(1));
        assert_eq!(catalog.len(), 3);
    }

    #[test]
    fn unknown_names_offer_close_matches() {
        let catalog = Catalog::from_reader(Cursor::new(SAMPLE)).expect("catalog parses");
        match catalog.by_name("Fusion") {
            Err(Error::UnknownItem { suggestions, .. }) => {
                assert_eq!(suggestions.first().map(String::as_str), Some("Fusion S"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn filters_charges_by_group() {
        let catalog = Catalog::from_reader(Cursor::new(SAMPLE)).expect("catalog parses");
        let groups = vec!["Projectile Ammo".to_string()];
        let names: Vec<&str> = catalog
            .charges_in_groups(&groups)
            .map(|item| item.name.as_str())
            .collect();
        assert_eq!(names, vec!["EMP S", "Fusion S"]);
    }
}
