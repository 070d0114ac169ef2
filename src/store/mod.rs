//! Read-only access to the recipe catalog.
//!
//! The store owns the catalog for the lifetime of the program and hands
//! out shared borrows. Every query returns a freshly built `Vec`, so a
//! caller can sort or truncate its result without touching the catalog.

use crate::random::{shuffle, RandomSource};
use crate::related::related_recipes;
use crate::{builtin_recipes, Difficulty, Recipe};
use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;

/// Errors raised by catalog lookups.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Recipe not found: {0}")]
    NotFound(u32),
}

/// Errors raised when building a store from custom catalog data.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Recipe id must be positive (title: {0})")]
    InvalidId(String),

    #[error("Recipe {0} has an empty title")]
    EmptyTitle(u32),

    #[error("Duplicate recipe id: {0}")]
    DuplicateId(u32),

    #[error("Duplicate recipe title: {0}")]
    DuplicateTitle(String),

    #[error("Failed to parse catalog YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Failed to parse catalog JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Immutable recipe catalog with lookup, filter and search operations.
///
/// # Examples
///
/// ```
/// use odin_recipes::{Difficulty, RecipeStore};
///
/// let store = RecipeStore::builtin();
///
/// let soups: Vec<_> = store.get_by_tag("soup").iter().map(|r| r.title.as_str()).collect();
/// assert_eq!(soups, ["Egusi Soup", "Ogbono Soup", "Okra Soup"]);
///
/// assert_eq!(store.get_by_difficulty(Difficulty::Hard).len(), 0);
/// assert!(store.get_by_id(9999).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct RecipeStore {
    recipes: Vec<Recipe>,
}

impl RecipeStore {
    /// Store over the seven recipes shipped with the site.
    pub fn builtin() -> Self {
        RecipeStore {
            recipes: builtin_recipes(),
        }
    }

    /// Creates a store from custom catalog data.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if an id is zero or repeated, or a title is
    /// empty or repeated.
    pub fn new(recipes: Vec<Recipe>) -> Result<Self, CatalogError> {
        validate(&recipes)?;
        Ok(RecipeStore { recipes })
    }

    /// Creates a store from a YAML sequence of recipes.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let recipes: Vec<Recipe> = serde_yaml::from_str(yaml)?;
        Self::new(recipes)
    }

    /// Creates a store from a JSON array of recipes, as exported by the site.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let recipes: Vec<Recipe> = serde_json::from_str(json)?;
        Self::new(recipes)
    }

    /// All recipes in catalog order.
    pub fn all(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Looks up a recipe by id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` when no recipe has this id. The store
    /// never substitutes another recipe; see [`RecipeStore::resolve_page`]
    /// for a lookup with a fallback.
    pub fn get_by_id(&self, id: u32) -> Result<&Recipe, StoreError> {
        self.recipes
            .iter()
            .find(|recipe| recipe.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    pub fn get_by_difficulty(&self, difficulty: Difficulty) -> Vec<&Recipe> {
        self.recipes
            .iter()
            .filter(|recipe| recipe.difficulty == difficulty)
            .collect()
    }

    /// Recipes carrying `tag`, compared exactly and case-sensitively.
    pub fn get_by_tag(&self, tag: &str) -> Vec<&Recipe> {
        self.recipes
            .iter()
            .filter(|recipe| recipe.has_tag(tag))
            .collect()
    }

    /// Case-insensitive search over title, description, tags and ingredients.
    ///
    /// See [`crate::search::search`] for the matching rules.
    pub fn search(&self, query: &str) -> Vec<&Recipe> {
        crate::search::search(&self.recipes, query)
    }

    /// `count` distinct recipes in random order.
    ///
    /// Asking for more recipes than the catalog holds returns the whole
    /// catalog, shuffled.
    pub fn get_random<R: RandomSource + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<&Recipe> {
        let mut picks: Vec<&Recipe> = self.recipes.iter().collect();
        shuffle(&mut picks, rng);
        picks.truncate(count);
        picks
    }

    /// Up to `limit` recipes related to `recipe` by shared tags.
    ///
    /// See [`crate::related::related_recipes`].
    pub fn related<R: RandomSource + ?Sized>(
        &self,
        recipe: &Recipe,
        limit: usize,
        rng: &mut R,
    ) -> Vec<&Recipe> {
        related_recipes(&self.recipes, recipe, limit, rng)
    }

    /// Distinct tags across the catalog, in first-seen order.
    pub fn tags(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.recipes
            .iter()
            .flat_map(|recipe| recipe.tags.iter())
            .map(String::as_str)
            .filter(|tag| seen.insert(*tag))
            .collect()
    }

    /// Finds the recipe a page name refers to.
    ///
    /// Accepts `egusi-soup`, `egusi-soup.html`, `egusisoup` or a path
    /// ending in one of those. Exact slug matches win over partial ones.
    pub fn find_by_page(&self, page: &str) -> Option<&Recipe> {
        let name = page_stem(page);
        if name.is_empty() {
            return None;
        }

        let exact = self
            .recipes
            .iter()
            .find(|recipe| recipe.slug() == name || recipe.compact_title() == name);
        if exact.is_some() {
            return exact;
        }

        let undashed = name.replace('-', "");
        let partial = self.recipes.iter().find(|recipe| {
            name.contains(&recipe.compact_title()) || recipe.title.to_lowercase().contains(&undashed)
        });
        if partial.is_none() {
            debug!("No recipe matches page {}", page);
        }
        partial
    }

    /// Like [`RecipeStore::find_by_page`], falling back to `default_id`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` only when the page does not match and
    /// the fallback id is not in the catalog either.
    pub fn resolve_page(&self, page: &str, default_id: u32) -> Result<&Recipe, StoreError> {
        match self.find_by_page(page) {
            Some(recipe) => Ok(recipe),
            None => self.get_by_id(default_id),
        }
    }
}

impl Default for RecipeStore {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Last path segment, lowercased, without a trailing `.html`
fn page_stem(page: &str) -> String {
    let last = page.trim().rsplit('/').next().unwrap_or("");
    let last = last.strip_suffix(".html").unwrap_or(last);
    last.to_lowercase()
}

fn validate(recipes: &[Recipe]) -> Result<(), CatalogError> {
    let mut ids = HashSet::new();
    let mut titles = HashSet::new();

    for recipe in recipes {
        if recipe.id == 0 {
            return Err(CatalogError::InvalidId(recipe.title.clone()));
        }
        if recipe.title.trim().is_empty() {
            return Err(CatalogError::EmptyTitle(recipe.id));
        }
        if !ids.insert(recipe.id) {
            return Err(CatalogError::DuplicateId(recipe.id));
        }
        if !titles.insert(recipe.title.as_str()) {
            return Err(CatalogError::DuplicateTitle(recipe.title.clone()));
        }
    }

    Ok(())
}
