//! The user's shopping list.
//!
//! [`ShoppingListManager`] owns the list, deduplicates by ingredient text
//! and writes the whole list through to its [`Storage`] after every
//! change. Storage failures never fail an operation: the in-memory list
//! stays authoritative, the failure is logged and kept for
//! [`ShoppingListManager::last_persistence_error`].

use crate::config::{Config, SHOPPING_LIST_KEY};
use crate::notify::{Level, Notifier};
use crate::storage::{Storage, StorageError};
use crate::text::numbered_list;
use crate::Recipe;
use chrono::Utc;
use tracing::{debug, warn};

mod model;

pub use model::{ItemId, ShoppingListItem};

/// Persisted, deduplicated shopping list.
///
/// # Examples
///
/// ```
/// use odin_recipes::{MemoryStorage, RecordingNotifier, ShoppingListManager};
///
/// let mut list = ShoppingListManager::new(MemoryStorage::new(), RecordingNotifier::new());
/// let id = list.add("2 cups egusi seeds", "Egusi Soup").unwrap();
/// assert!(list.add("2 cups egusi seeds", "Egusi Soup").is_none());
///
/// assert_eq!(list.toggle(id), Some(true));
/// list.clear();
/// assert!(list.is_empty());
/// ```
#[derive(Debug)]
pub struct ShoppingListManager<S: Storage, N: Notifier> {
    storage: S,
    notifier: N,
    key: String,
    items: Vec<ShoppingListItem>,
    last_id: ItemId,
    last_error: Option<String>,
}

impl<S: Storage, N: Notifier> ShoppingListManager<S, N> {
    /// Loads the list stored under the default `shoppingList` key.
    pub fn new(storage: S, notifier: N) -> Self {
        Self::with_key(storage, notifier, SHOPPING_LIST_KEY)
    }

    /// Loads the list stored under the key named in `config`.
    pub fn from_config(storage: S, notifier: N, config: &Config) -> Self {
        Self::with_key(storage, notifier, &config.shopping_list_key)
    }

    /// Loads the list stored under `key`.
    ///
    /// A missing value gives an empty list, and so does an unreadable or
    /// malformed one (logged, and reported by `last_persistence_error`).
    pub fn with_key(storage: S, notifier: N, key: &str) -> Self {
        let mut last_error = None;
        let items = match storage.load(key) {
            Ok(Some(blob)) => match serde_json::from_str::<Vec<ShoppingListItem>>(&blob) {
                Ok(items) => items,
                Err(e) => {
                    warn!("Discarding malformed shopping list under {}: {}", key, e);
                    last_error = Some(StorageError::from(e).to_string());
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!("Failed to load shopping list under {}: {}", key, e);
                last_error = Some(e.to_string());
                Vec::new()
            }
        };
        debug!("Loaded {} shopping list items", items.len());

        let last_id = items.iter().map(|item| item.id).max().unwrap_or(0);
        ShoppingListManager {
            storage,
            notifier,
            key: key.to_string(),
            items,
            last_id,
            last_error,
        }
    }

    /// Adds an ingredient unless an item with the same text exists.
    ///
    /// Returns the new item's id, or `None` when the ingredient was
    /// already on the list (nothing is stored or notified then).
    pub fn add(&mut self, ingredient: &str, recipe_title: &str) -> Option<ItemId> {
        let id = self.insert(ingredient, recipe_title)?;
        self.persist();
        self.notifier.notify(
            &format!("{} added to shopping list!", ingredient),
            Level::Info,
        );
        Some(id)
    }

    /// Adds every ingredient of `recipe` in order, with one notification.
    ///
    /// Returns how many items were new.
    pub fn add_all(&mut self, recipe: &Recipe) -> usize {
        let added = recipe
            .ingredients
            .iter()
            .filter_map(|ingredient| self.insert(ingredient, &recipe.title))
            .count();
        if added > 0 {
            self.persist();
        }
        self.notifier
            .notify("All ingredients added to shopping list!", Level::Success);
        added
    }

    /// Removes the item with `id` and returns it.
    ///
    /// An unknown id is a no-op returning `None`.
    pub fn remove(&mut self, id: ItemId) -> Option<ShoppingListItem> {
        let index = self.items.iter().position(|item| item.id == id)?;
        let removed = self.items.remove(index);
        self.persist();
        self.notifier.notify(
            &format!("{} removed from shopping list", removed.ingredient_name),
            Level::Info,
        );
        Some(removed)
    }

    /// Flips the checked state of `id` and returns the new state.
    pub fn toggle(&mut self, id: ItemId) -> Option<bool> {
        let item = self.items.iter_mut().find(|item| item.id == id)?;
        item.checked = !item.checked;
        let checked = item.checked;
        self.persist();
        Some(checked)
    }

    /// Empties the list.
    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
        self.notifier.notify("Shopping list cleared", Level::Info);
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[ShoppingListItem] {
        &self.items
    }

    /// Owned copy of the items for the rendering layer.
    pub fn snapshot(&self) -> Vec<ShoppingListItem> {
        self.items.clone()
    }

    pub fn get(&self, id: ItemId) -> Option<&ShoppingListItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Whether an item with exactly this ingredient text exists.
    pub fn contains(&self, ingredient: &str) -> bool {
        self.items
            .iter()
            .any(|item| item.ingredient_name == ingredient)
    }

    /// Items not yet checked off.
    pub fn unchecked(&self) -> Vec<&ShoppingListItem> {
        self.items.iter().filter(|item| !item.checked).collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The list as numbered lines (`1. 2 cups garri`).
    pub fn to_text(&self) -> String {
        numbered_list(self.items.iter().map(|item| item.ingredient_name.as_str()))
    }

    /// The most recent load or save failure, cleared by a successful save.
    pub fn last_persistence_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    /// Inserts without persisting or notifying; `None` for duplicates
    fn insert(&mut self, ingredient: &str, recipe_title: &str) -> Option<ItemId> {
        if self.contains(ingredient) {
            debug!("{} already on the shopping list", ingredient);
            return None;
        }
        let id = self.next_id();
        self.items
            .push(ShoppingListItem::new(id, ingredient, recipe_title));
        Some(id)
    }

    /// Millisecond timestamp, bumped past the last id so rapid adds stay unique
    fn next_id(&mut self) -> ItemId {
        let now = ItemId::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let candidate = now.max(self.last_id.saturating_add(1));
        let id = if self.get(candidate).is_some() {
            // No room above a stored id of ItemId::MAX
            self.lowest_free_id()
        } else {
            candidate
        };
        self.last_id = self.last_id.max(id);
        id
    }

    fn lowest_free_id(&self) -> ItemId {
        (1..=ItemId::MAX)
            .find(|id| self.get(*id).is_none())
            .unwrap_or_default()
    }

    fn persist(&mut self) {
        let result = serde_json::to_string(&self.items)
            .map_err(StorageError::from)
            .and_then(|blob| self.storage.save(&self.key, &blob));

        match result {
            Ok(()) => self.last_error = None,
            Err(e) => {
                warn!("Failed to persist shopping list under {}: {}", self.key, e);
                self.last_error = Some(e.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{Notification, RecordingNotifier};
    use crate::storage::{FileStorage, MemoryStorage};
    use crate::{Config, RecipeStore};
    use camino::Utf8PathBuf;
    use std::collections::HashSet;
    use tempfile::TempDir;

    type Manager = ShoppingListManager<MemoryStorage, RecordingNotifier>;

    fn manager() -> Manager {
        ShoppingListManager::new(MemoryStorage::new(), RecordingNotifier::new())
    }

    fn stored_items(list: &Manager) -> Vec<ShoppingListItem> {
        let blob = list.storage().get("shoppingList").unwrap();
        serde_json::from_str(blob).unwrap()
    }

    fn messages(list: &Manager) -> Vec<String> {
        list.notifier()
            .notifications()
            .iter()
            .map(|n| n.message.clone())
            .collect()
    }

    /// Storage whose writes always fail
    #[derive(Default)]
    struct BrokenStorage {
        blob: Option<String>,
    }

    impl Storage for BrokenStorage {
        fn load(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Ok(self.blob.clone())
        }

        fn save(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::IoError(std::io::Error::new(
                std::io::ErrorKind::Other,
                "quota exceeded",
            )))
        }

        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    /// Storage that cannot be read at all
    struct UnreadableStorage;

    impl Storage for UnreadableStorage {
        fn load(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::IoError(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "permission denied",
            )))
        }

        fn save(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Ok(())
        }

        fn remove(&mut self, _key: &str) -> Result<(), StorageError> {
            Ok(())
        }
    }

    #[test]
    fn test_add_creates_unchecked_item() {
        let mut list = manager();
        let id = list.add("2 cups egusi seeds", "Egusi Soup").unwrap();

        let item = list.get(id).unwrap();
        assert_eq!(item.ingredient_name, "2 cups egusi seeds");
        assert_eq!(item.source_recipe_title, "Egusi Soup");
        assert!(!item.checked);
        assert_eq!(stored_items(&list), list.snapshot());
        assert_eq!(messages(&list), vec!["2 cups egusi seeds added to shopping list!"]);
        assert_eq!(list.notifier().notifications()[0].level, Level::Info);
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut list = manager();
        assert!(list.add("1 onion", "Egusi Soup").is_some());
        assert!(list.add("1 onion", "Jollof Rice").is_none());

        assert_eq!(list.len(), 1);
        assert_eq!(list.items()[0].source_recipe_title, "Egusi Soup");
        assert_eq!(messages(&list).len(), 1);
    }

    #[test]
    fn test_dedupe_is_case_sensitive() {
        let mut list = manager();
        list.add("Water", "Garri");
        list.add("water", "Garri");

        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_ids_unique_under_rapid_adds() {
        let mut list = manager();
        for i in 0..200 {
            list.add(&format!("item {i}"), "Test");
        }

        let ids: HashSet<ItemId> = list.items().iter().map(|item| item.id).collect();
        assert_eq!(ids.len(), 200);
        assert!(list.items().windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn test_add_then_remove_round_trips() {
        let mut list = manager();
        list.add("1 onion", "Egusi Soup");
        let before = list.snapshot();

        let id = list.add("2 stock cubes", "Egusi Soup").unwrap();
        let removed = list.remove(id).unwrap();

        assert_eq!(removed.ingredient_name, "2 stock cubes");
        assert_eq!(list.snapshot(), before);
        assert_eq!(stored_items(&list), before);
        assert_eq!(
            messages(&list).last().unwrap(),
            "2 stock cubes removed from shopping list"
        );
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut list = manager();
        list.add("1 onion", "Egusi Soup");
        let notified = messages(&list).len();

        assert!(list.remove(42).is_none());
        assert_eq!(list.len(), 1);
        assert_eq!(messages(&list).len(), notified);
    }

    #[test]
    fn test_toggle_is_an_involution() {
        let mut list = manager();
        let id = list.add("1 cup palm oil", "Okra Soup").unwrap();

        assert_eq!(list.toggle(id), Some(true));
        assert!(stored_items(&list)[0].checked);
        assert!(list.unchecked().is_empty());

        assert_eq!(list.toggle(id), Some(false));
        assert!(!stored_items(&list)[0].checked);
        assert_eq!(list.unchecked().len(), 1);

        assert_eq!(list.toggle(id + 1000), None);
    }

    #[test]
    fn test_clear_persists_empty_list() {
        let mut list = manager();
        list.add("2 cups egusi seeds", "Egusi Soup");
        list.clear();

        assert!(list.is_empty());
        assert_eq!(list.storage().get("shoppingList"), Some("[]"));
        assert_eq!(messages(&list).last().unwrap(), "Shopping list cleared");
    }

    #[test]
    fn test_add_all_sends_one_notification() {
        let store = RecipeStore::builtin();
        let garri = store.get_by_id(5).unwrap();
        let mut list = manager();
        list.add("Water", "Something else");
        list.notifier_mut().drain();

        let added = list.add_all(garri);

        assert_eq!(added, 4);
        let names: Vec<&str> = list
            .items()
            .iter()
            .map(|item| item.ingredient_name.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "Water",
                "2 cups garri",
                "Sugar (optional)",
                "Milk (optional)",
                "Groundnuts (optional)"
            ]
        );
        assert_eq!(
            list.notifier().notifications(),
            &[Notification {
                message: "All ingredients added to shopping list!".to_string(),
                level: Level::Success,
            }]
        );
        assert_eq!(stored_items(&list).len(), 5);
    }

    #[test]
    fn test_reload_from_storage() {
        let mut list = manager();
        let id = list.add("1kg yam", "Yam Porridge").unwrap();
        list.toggle(id);
        let storage = list.storage().clone();

        let reloaded = ShoppingListManager::new(storage, RecordingNotifier::new());
        assert_eq!(reloaded.snapshot(), list.snapshot());
        assert!(reloaded.last_persistence_error().is_none());
    }

    #[test]
    fn test_reload_continues_ids_after_stored_ones() {
        let mut storage = MemoryStorage::new();
        let far_future = r#"[{"id": 99999999999999, "ingredient": "1 onion", "recipe": "Egusi Soup", "checked": false, "added": "2024-05-01T10:00:00Z"}]"#;
        storage.save("shoppingList", far_future).unwrap();

        let mut list = ShoppingListManager::new(storage, RecordingNotifier::new());
        let id = list.add("1kg yam", "Yam Porridge").unwrap();
        assert_eq!(id, 100000000000000);
    }

    #[test]
    fn test_stored_max_id_does_not_overflow() {
        let mut storage = MemoryStorage::new();
        let max_id = r#"[{"id": 18446744073709551615, "ingredient": "1 onion", "recipe": "Egusi Soup", "checked": false, "added": "2024-05-01T10:00:00Z"}]"#;
        storage.save("shoppingList", max_id).unwrap();

        let mut list = ShoppingListManager::new(storage, RecordingNotifier::new());
        let first = list.add("1kg yam", "Yam Porridge").unwrap();
        let second = list.add("2 carrots", "Vegetable Sauce").unwrap();

        assert_eq!(list.len(), 3);
        let ids: HashSet<ItemId> = list.items().iter().map(|item| item.id).collect();
        assert_eq!(ids.len(), 3);
        assert_ne!(first, ItemId::MAX);
        assert_ne!(second, ItemId::MAX);
    }

    #[test]
    fn test_failed_load_starts_empty() {
        let list = ShoppingListManager::new(UnreadableStorage, RecordingNotifier::new());

        assert!(list.is_empty());
        assert!(list
            .last_persistence_error()
            .unwrap()
            .contains("permission denied"));
    }

    #[test]
    fn test_from_config_uses_configured_key() {
        let config = Config::from_yaml_str("shopping_list_key: groceries").unwrap();
        let mut list = ShoppingListManager::from_config(MemoryStorage::new(), RecordingNotifier::new(), &config);
        list.add("2 carrots", "Vegetable Sauce");

        assert!(list.storage().get("groceries").is_some());
        assert!(list.storage().get("shoppingList").is_none());
    }

    #[test]
    fn test_malformed_storage_loads_empty() {
        for blob in ["not json", "{\"id\": 1}", "[{\"id\": \"x\"}]"] {
            let mut storage = MemoryStorage::new();
            storage.save("shoppingList", blob).unwrap();

            let list = ShoppingListManager::new(storage, RecordingNotifier::new());
            assert!(list.is_empty());
            assert!(list.last_persistence_error().is_some());
        }
    }

    #[test]
    fn test_storage_failure_is_not_fatal() {
        let mut list = ShoppingListManager::new(BrokenStorage::default(), RecordingNotifier::new());

        let id = list.add("1 onion", "Egusi Soup").unwrap();
        assert_eq!(list.len(), 1);
        assert!(list
            .last_persistence_error()
            .unwrap()
            .contains("quota exceeded"));

        assert_eq!(list.toggle(id), Some(true));
        assert!(list.remove(id).is_some());
        assert!(list.is_empty());
    }

    #[test]
    fn test_custom_key() {
        let mut list =
            ShoppingListManager::with_key(MemoryStorage::new(), RecordingNotifier::new(), "groceries");
        list.add("2 carrots", "Vegetable Sauce");

        assert!(list.storage().get("groceries").is_some());
        assert!(list.storage().get("shoppingList").is_none());
    }

    #[test]
    fn test_to_text() {
        let mut list = manager();
        assert_eq!(list.to_text(), "");
        list.add("2 carrots", "Vegetable Sauce");
        list.add("1 cabbage", "Vegetable Sauce");

        assert_eq!(list.to_text(), "1. 2 carrots\n2. 1 cabbage");
    }

    #[test]
    fn test_file_backed_list_survives_restart() {
        let temp_dir = TempDir::new().unwrap();
        let root = Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf()).unwrap();

        {
            let mut list = ShoppingListManager::new(FileStorage::new(root.clone()), RecordingNotifier::new());
            list.add("2 cups egusi seeds", "Egusi Soup");
            list.add("1 cup palm oil", "Egusi Soup");
        }

        let mut list = ShoppingListManager::new(FileStorage::new(root.clone()), RecordingNotifier::new());
        assert_eq!(list.len(), 2);
        list.clear();

        let blob = std::fs::read_to_string(root.join("shoppingList.json")).unwrap();
        assert_eq!(blob, "[]");
    }

    #[test]
    fn test_stored_blob_uses_site_field_names() {
        let mut list = manager();
        list.add("1 onion", "Egusi Soup");

        let value: serde_json::Value =
            serde_json::from_str(list.storage().get("shoppingList").unwrap()).unwrap();
        let item = &value[0];
        assert_eq!(item["ingredient"], "1 onion");
        assert_eq!(item["recipe"], "Egusi Soup");
        assert_eq!(item["checked"], false);
        assert!(item["added"].is_string());
        assert!(item["id"].is_u64());
    }
}
