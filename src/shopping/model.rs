use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier of a shopping list item.
pub type ItemId = u64;

/// One ingredient on the shopping list.
///
/// Serialized with the field names of the site's stored blob
/// (`ingredient`, `recipe`, `added`) so existing lists load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingListItem {
    pub id: ItemId,
    #[serde(rename = "ingredient")]
    pub ingredient_name: String,
    /// Title of the recipe the ingredient came from
    #[serde(rename = "recipe")]
    pub source_recipe_title: String,
    #[serde(default)]
    pub checked: bool,
    #[serde(rename = "added")]
    pub added_at: DateTime<Utc>,
}

impl ShoppingListItem {
    pub(crate) fn new(id: ItemId, ingredient_name: &str, source_recipe_title: &str) -> Self {
        ShoppingListItem {
            id,
            ingredient_name: ingredient_name.to_string(),
            source_recipe_title: source_recipe_title.to_string(),
            checked: false,
            added_at: Utc::now(),
        }
    }
}
