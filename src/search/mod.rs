use crate::Recipe;

/// Filter `recipes` down to those matching `query`, keeping their order.
///
/// Matching is a case-insensitive substring test against the title, the
/// description, every tag and every ingredient line. A recipe matches when
/// any of those fields contains the query. An empty or whitespace-only
/// query matches everything.
pub fn search<'a, I>(recipes: I, query: &str) -> Vec<&'a Recipe>
where
    I: IntoIterator<Item = &'a Recipe>,
{
    if query.trim().is_empty() {
        return recipes.into_iter().collect();
    }

    let query_lower = query.to_lowercase();
    recipes
        .into_iter()
        .filter(|recipe| matches(recipe, &query_lower))
        .collect()
}

/// Check a single recipe against an already lowercased query
fn matches(recipe: &Recipe, query_lower: &str) -> bool {
    let contains = |field: &str| field.to_lowercase().contains(query_lower);

    contains(&recipe.title)
        || contains(&recipe.description)
        || recipe.tags.iter().any(|tag| contains(tag))
        || recipe.ingredients.iter().any(|line| contains(line))
}
