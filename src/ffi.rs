//! UniFFI bindings for cross-platform support (iOS, Android).
//!
//! This module provides FFI-safe types and functions for use with UniFFI.
//! Catalog and shopping list state live behind objects; everything else
//! crosses the boundary as plain records.

use crate::contact::{CharacterStatus, ContactForm, FieldError};
use crate::notify::{Level, Notification, RecordingNotifier};
use crate::shopping::{ShoppingListItem, ShoppingListManager};
use crate::storage::FileStorage;
use crate::store::{CatalogError, RecipeStore, StoreError};
use crate::config::ConfigError;
use crate::{Config, Difficulty, ParseDifficultyError, Recipe, ThreadRandom};
use std::sync::{Arc, Mutex, MutexGuard};

/// FFI-safe error type that wraps all possible errors.
#[derive(Debug, uniffi::Error, thiserror::Error)]
pub enum RecipeBookError {
    #[error("Recipe not found: {message}")]
    NotFound { message: String },

    #[error("Invalid catalog: {message}")]
    InvalidCatalog { message: String },

    #[error("Invalid argument: {message}")]
    InvalidArgument { message: String },

    #[error("Invalid config: {message}")]
    InvalidConfig { message: String },
}

impl From<ConfigError> for RecipeBookError {
    fn from(e: ConfigError) -> Self {
        RecipeBookError::InvalidConfig {
            message: e.to_string(),
        }
    }
}

fn load_config(path: &str) -> Result<Config, RecipeBookError> {
    Ok(Config::from_path(camino::Utf8Path::new(path))?)
}

impl From<StoreError> for RecipeBookError {
    fn from(e: StoreError) -> Self {
        RecipeBookError::NotFound {
            message: e.to_string(),
        }
    }
}

impl From<ParseDifficultyError> for RecipeBookError {
    fn from(e: ParseDifficultyError) -> Self {
        RecipeBookError::InvalidArgument {
            message: e.to_string(),
        }
    }
}

impl From<CatalogError> for RecipeBookError {
    fn from(e: CatalogError) -> Self {
        RecipeBookError::InvalidCatalog {
            message: e.to_string(),
        }
    }
}

/// FFI-safe representation of a recipe.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRecipe {
    pub id: u32,
    pub title: String,
    pub description: String,
    /// `easy`, `medium` or `hard`
    pub difficulty: String,
    pub cook_time: String,
    pub servings: String,
    pub emoji: String,
    pub image: String,
    /// Page file name on the site, e.g. `egusi-soup.html`
    pub page_name: String,
    pub tags: Vec<String>,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
}

impl From<&Recipe> for FfiRecipe {
    fn from(r: &Recipe) -> Self {
        FfiRecipe {
            id: r.id,
            title: r.title.clone(),
            description: r.description.clone(),
            difficulty: r.difficulty.to_string(),
            cook_time: r.cook_time.clone(),
            servings: r.servings.clone(),
            emoji: r.emoji.clone(),
            image: r.image.clone(),
            page_name: r.page_name(),
            tags: r.tags.clone(),
            ingredients: r.ingredients.clone(),
            steps: r.steps.clone(),
        }
    }
}

fn to_records(recipes: Vec<&Recipe>) -> Vec<FfiRecipe> {
    recipes.into_iter().map(FfiRecipe::from).collect()
}

/// FFI-safe representation of a shopping list item.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiShoppingItem {
    pub id: u64,
    pub ingredient_name: String,
    pub source_recipe_title: String,
    pub checked: bool,
    /// RFC 3339 timestamp
    pub added_at: String,
}

impl From<&ShoppingListItem> for FfiShoppingItem {
    fn from(item: &ShoppingListItem) -> Self {
        FfiShoppingItem {
            id: item.id,
            ingredient_name: item.ingredient_name.clone(),
            source_recipe_title: item.source_recipe_title.clone(),
            checked: item.checked,
            added_at: item.added_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiLevel {
    Info,
    Success,
    Error,
}

impl From<Level> for FfiLevel {
    fn from(level: Level) -> Self {
        match level {
            Level::Info => FfiLevel::Info,
            Level::Success => FfiLevel::Success,
            Level::Error => FfiLevel::Error,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiNotification {
    pub message: String,
    pub level: FfiLevel,
}

impl From<Notification> for FfiNotification {
    fn from(n: Notification) -> Self {
        FfiNotification {
            message: n.message,
            level: n.level.into(),
        }
    }
}

/// The recipe catalog with its search and selection operations.
#[derive(uniffi::Object)]
pub struct RecipeCatalog {
    store: RecipeStore,
    config: Config,
}

#[uniffi::export]
impl RecipeCatalog {
    /// Catalog of the recipes shipped with the site.
    #[uniffi::constructor]
    pub fn new() -> Arc<Self> {
        Arc::new(RecipeCatalog {
            store: RecipeStore::builtin(),
            config: Config::default(),
        })
    }

    /// Built-in catalog with counts and fallback recipe from a YAML config file.
    #[uniffi::constructor]
    pub fn with_config(config_path: String) -> Result<Arc<Self>, RecipeBookError> {
        Ok(Arc::new(RecipeCatalog {
            store: RecipeStore::builtin(),
            config: load_config(&config_path)?,
        }))
    }

    /// Catalog loaded from a YAML list of recipes.
    #[uniffi::constructor]
    pub fn from_yaml(yaml: String) -> Result<Arc<Self>, RecipeBookError> {
        Ok(Arc::new(RecipeCatalog {
            store: RecipeStore::from_yaml_str(&yaml)?,
            config: Config::default(),
        }))
    }

    pub fn all(&self) -> Vec<FfiRecipe> {
        self.store.all().iter().map(FfiRecipe::from).collect()
    }

    pub fn get_by_id(&self, id: u32) -> Result<FfiRecipe, RecipeBookError> {
        Ok(FfiRecipe::from(self.store.get_by_id(id)?))
    }

    /// Recipes of a difficulty given as `easy`, `medium` or `hard`.
    pub fn get_by_difficulty(&self, difficulty: String) -> Result<Vec<FfiRecipe>, RecipeBookError> {
        let difficulty: Difficulty = difficulty.parse()?;
        Ok(to_records(self.store.get_by_difficulty(difficulty)))
    }

    pub fn get_by_tag(&self, tag: String) -> Vec<FfiRecipe> {
        to_records(self.store.get_by_tag(&tag))
    }

    pub fn search(&self, query: String) -> Vec<FfiRecipe> {
        to_records(self.store.search(&query))
    }

    /// Random picks; `count` defaults to the configured random count when 0.
    pub fn random(&self, count: u32) -> Vec<FfiRecipe> {
        let count = if count == 0 {
            self.config.random_count
        } else {
            count as usize
        };
        to_records(self.store.get_random(count, &mut ThreadRandom))
    }

    /// Recipes to suggest below the recipe with `id`.
    pub fn related(&self, id: u32) -> Result<Vec<FfiRecipe>, RecipeBookError> {
        let recipe = self.store.get_by_id(id)?;
        Ok(to_records(self.store.related(
            recipe,
            self.config.related_count,
            &mut ThreadRandom,
        )))
    }

    /// The recipe for a page name, falling back to the default recipe.
    pub fn recipe_for_page(&self, page: String) -> Result<FfiRecipe, RecipeBookError> {
        let recipe = self
            .store
            .resolve_page(&page, self.config.default_recipe_id)?;
        Ok(FfiRecipe::from(recipe))
    }

    pub fn tags(&self) -> Vec<String> {
        self.store.tags().into_iter().map(String::from).collect()
    }
}

/// A shopping list persisted in a directory.
#[derive(uniffi::Object)]
pub struct ShoppingList {
    inner: Mutex<ShoppingListManager<FileStorage, RecordingNotifier>>,
}

impl ShoppingList {
    fn open_inner(storage_dir: String, config: &Config) -> Arc<Self> {
        let manager = ShoppingListManager::from_config(
            FileStorage::new(storage_dir),
            RecordingNotifier::new(),
            config,
        );
        Arc::new(ShoppingList {
            inner: Mutex::new(manager),
        })
    }

    fn lock(&self) -> MutexGuard<'_, ShoppingListManager<FileStorage, RecordingNotifier>> {
        // Every operation leaves the list consistent, so a poisoned lock is safe to reuse
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[uniffi::export]
impl ShoppingList {
    /// Opens the list stored under `storage_dir`, creating it on first write.
    #[uniffi::constructor]
    pub fn open(storage_dir: String) -> Arc<Self> {
        Self::open_inner(storage_dir, &Config::default())
    }

    /// Like `open`, storing the list under the key named in a YAML config file.
    #[uniffi::constructor]
    pub fn open_with_config(
        storage_dir: String,
        config_path: String,
    ) -> Result<Arc<Self>, RecipeBookError> {
        let config = load_config(&config_path)?;
        Ok(Self::open_inner(storage_dir, &config))
    }

    /// Adds an ingredient; returns `None` if it was already listed.
    pub fn add(&self, ingredient: String, recipe_title: String) -> Option<u64> {
        self.lock().add(&ingredient, &recipe_title)
    }

    /// Adds every ingredient of a catalog recipe; returns how many were new.
    pub fn add_recipe(
        &self,
        catalog: Arc<RecipeCatalog>,
        recipe_id: u32,
    ) -> Result<u32, RecipeBookError> {
        let recipe = catalog.store.get_by_id(recipe_id)?;
        let added = self.lock().add_all(recipe);
        Ok(u32::try_from(added).unwrap_or(u32::MAX))
    }

    pub fn remove(&self, id: u64) -> Option<FfiShoppingItem> {
        self.lock().remove(id).as_ref().map(FfiShoppingItem::from)
    }

    pub fn toggle(&self, id: u64) -> Option<bool> {
        self.lock().toggle(id)
    }

    pub fn clear(&self) {
        self.lock().clear()
    }

    pub fn items(&self) -> Vec<FfiShoppingItem> {
        self.lock().items().iter().map(FfiShoppingItem::from).collect()
    }

    pub fn to_text(&self) -> String {
        self.lock().to_text()
    }

    /// Notifications raised since the last call, oldest first.
    pub fn drain_notifications(&self) -> Vec<FfiNotification> {
        self.lock()
            .notifier_mut()
            .drain()
            .into_iter()
            .map(FfiNotification::from)
            .collect()
    }

    pub fn last_persistence_error(&self) -> Option<String> {
        self.lock().last_persistence_error().map(String::from)
    }
}

/// FFI-safe contact form.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiContactForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub subject: String,
    pub recipe: Option<String>,
    pub message: String,
    pub consent: bool,
}

impl From<FfiContactForm> for ContactForm {
    fn from(f: FfiContactForm) -> Self {
        ContactForm {
            first_name: f.first_name,
            last_name: f.last_name,
            email: f.email,
            subject: f.subject,
            recipe: f.recipe,
            message: f.message,
            consent: f.consent,
        }
    }
}

#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFieldError {
    /// Field name, e.g. `first_name`
    pub field: String,
    pub message: String,
}

impl From<FieldError> for FfiFieldError {
    fn from(e: FieldError) -> Self {
        FfiFieldError {
            field: e.field.to_string(),
            message: e.message,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiCharacterStatus {
    Normal,
    Warning,
    Error,
}

impl From<CharacterStatus> for FfiCharacterStatus {
    fn from(status: CharacterStatus) -> Self {
        match status {
            CharacterStatus::Normal => FfiCharacterStatus::Normal,
            CharacterStatus::Warning => FfiCharacterStatus::Warning,
            CharacterStatus::Error => FfiCharacterStatus::Error,
        }
    }
}

// ============================================================================
// Exported FFI Functions
// ============================================================================

/// Validates a contact form, returning one entry per invalid field.
///
/// An empty list means the form can be submitted.
#[uniffi::export]
pub fn validate_contact(form: FfiContactForm) -> Vec<FfiFieldError> {
    match ContactForm::from(form).validate() {
        Ok(()) => Vec::new(),
        Err(errors) => errors.into_iter().map(FfiFieldError::from).collect(),
    }
}

/// Counter state for a contact message of `len` characters.
#[uniffi::export]
pub fn message_character_status(len: u32) -> FfiCharacterStatus {
    crate::contact::character_status(len as usize, &Config::default().contact).into()
}

/// Which field to highlight first, if any.
#[uniffi::export]
pub fn first_invalid_field(form: FfiContactForm) -> Option<String> {
    let errors = ContactForm::from(form).validate().err()?;
    errors.first().map(|e| e.field.to_string())
}

/// Converts a cook time like `45 mins` to minutes.
#[uniffi::export]
pub fn time_to_minutes(text: String) -> u32 {
    crate::text::time_to_minutes(&text)
}

/// Scales ingredient amounts from `original_servings` to `servings`.
#[uniffi::export]
pub fn scale_ingredients(servings: f64, original_servings: f64, ingredients: Vec<String>) -> Vec<String> {
    crate::text::scale_ingredients(servings, original_servings, &ingredients)
}

/// Returns the library version.
#[uniffi::export]
pub fn library_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use tempfile::TempDir;

    fn contact_form() -> FfiContactForm {
        FfiContactForm {
            first_name: "Ada".to_string(),
            last_name: "Obi".to_string(),
            email: "ada@example.com".to_string(),
            subject: "recipe-request".to_string(),
            recipe: Some("Egusi Soup".to_string()),
            message: "Could you add moi moi, please?".to_string(),
            consent: true,
        }
    }

    #[test]
    fn test_catalog_lookups() {
        let catalog = RecipeCatalog::new();

        assert_eq!(catalog.all().len(), 7);
        let jollof = catalog.get_by_id(2).unwrap();
        assert_eq!(jollof.title, "Jollof Rice");
        assert_eq!(jollof.difficulty, "medium");
        assert_eq!(jollof.page_name, "jollof-rice.html");

        assert!(matches!(
            catalog.get_by_id(9999),
            Err(RecipeBookError::NotFound { .. })
        ));
        assert_eq!(catalog.get_by_tag("soup".to_string()).len(), 3);
        assert_eq!(catalog.search("PALM OIL".to_string()).len(), 4);
        assert_eq!(catalog.get_by_difficulty("easy".to_string()).unwrap().len(), 4);
        assert!(matches!(
            catalog.get_by_difficulty("extreme".to_string()),
            Err(RecipeBookError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_catalog_random_and_related() {
        let catalog = RecipeCatalog::new();

        assert_eq!(catalog.random(0).len(), 3);
        assert_eq!(catalog.random(10).len(), 7);

        let related = catalog.related(5).unwrap();
        assert_eq!(related.len(), 4);
        assert!(related.iter().all(|r| r.id != 5));
        assert!(catalog.related(42).is_err());
    }

    #[test]
    fn test_recipe_for_page() {
        let catalog = RecipeCatalog::new();

        assert_eq!(catalog.recipe_for_page("okra-soup.html".to_string()).unwrap().id, 4);
        assert_eq!(catalog.recipe_for_page("unknown.html".to_string()).unwrap().id, 1);
    }

    #[test]
    fn test_catalog_from_yaml() {
        let catalog = RecipeCatalog::from_yaml(
            indoc! {r#"
                - id: 1
                  title: Puff Puff
                  difficulty: easy
                  tags: [snack]
            "#}
            .to_string(),
        )
        .unwrap();
        assert_eq!(catalog.tags(), vec!["snack"]);

        let invalid = RecipeCatalog::from_yaml("- {id: 0, title: A, difficulty: easy}".to_string());
        assert!(matches!(invalid, Err(RecipeBookError::InvalidCatalog { .. })));
    }

    #[test]
    fn test_shopping_list_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().to_str().unwrap().to_string();
        let catalog = RecipeCatalog::new();

        let list = ShoppingList::open(dir.clone());
        let id = list.add("1 onion".to_string(), "Egusi Soup".to_string()).unwrap();
        assert!(list.add("1 onion".to_string(), "Okra Soup".to_string()).is_none());
        assert_eq!(list.add_recipe(catalog.clone(), 1).unwrap(), 6);
        assert_eq!(list.toggle(id), Some(true));
        assert!(list.add_recipe(catalog, 99).is_err());

        let notifications = list.drain_notifications();
        assert_eq!(notifications.len(), 2);
        assert_eq!(notifications[1].level, FfiLevel::Success);
        assert!(list.drain_notifications().is_empty());

        let reopened = ShoppingList::open(dir);
        let items = reopened.items();
        assert_eq!(items.len(), 7);
        assert!(items[0].checked);
        assert_eq!(items[0].ingredient_name, "1 onion");
        assert!(reopened.last_persistence_error().is_none());

        let removed = reopened.remove(id).unwrap();
        assert_eq!(removed.ingredient_name, "1 onion");
        reopened.clear();
        assert!(reopened.items().is_empty());
        assert_eq!(reopened.to_text(), "");
    }

    #[test]
    fn test_config_file_is_honoured() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("odin.yaml");
        std::fs::write(
            &config_path,
            indoc! {r#"
                shopping_list_key: groceries
                related_count: 2
                random_count: 5
                default_recipe_id: 5
            "#},
        )
        .unwrap();
        let config_path = config_path.to_str().unwrap().to_string();

        let catalog = RecipeCatalog::with_config(config_path.clone()).unwrap();
        assert_eq!(catalog.related(1).unwrap().len(), 2);
        assert_eq!(catalog.random(0).len(), 5);
        assert_eq!(catalog.recipe_for_page("unknown.html".to_string()).unwrap().id, 5);

        let dir = temp_dir.path().join("lists");
        let list = ShoppingList::open_with_config(dir.to_str().unwrap().to_string(), config_path).unwrap();
        list.add("1 onion".to_string(), "Egusi Soup".to_string());
        assert!(dir.join("groceries.json").exists());
        assert!(!dir.join("shoppingList.json").exists());

        let missing = temp_dir.path().join("missing.yaml").to_str().unwrap().to_string();
        assert!(matches!(
            RecipeCatalog::with_config(missing),
            Err(RecipeBookError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_validate_contact() {
        assert!(validate_contact(contact_form()).is_empty());

        let form = FfiContactForm {
            email: "nope".to_string(),
            consent: false,
            ..contact_form()
        };
        let errors = validate_contact(form.clone());
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "email");
        assert_eq!(errors[0].message, "Invalid email");
        assert_eq!(errors[1].field, "consent");
        assert_eq!(first_invalid_field(form), Some("email".to_string()));
        assert_eq!(first_invalid_field(contact_form()), None);
    }

    #[test]
    fn test_text_helpers() {
        assert_eq!(time_to_minutes("40 mins".to_string()), 40);
        assert_eq!(
            scale_ingredients(8.0, 4.0, vec!["2 cups garri".to_string()]),
            vec!["4.0 cups garri"]
        );
        assert_eq!(message_character_status(800), FfiCharacterStatus::Warning);
    }

    #[test]
    fn test_library_version() {
        let version = library_version();
        assert!(!version.is_empty());
        assert_eq!(version, env!("CARGO_PKG_VERSION"));
    }
}
