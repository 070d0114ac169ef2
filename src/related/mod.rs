use crate::random::{shuffle, RandomSource};
use crate::Recipe;

/// Number of related recipes shown under a recipe page.
pub const DEFAULT_RELATED_COUNT: usize = 4;

/// Select up to `limit` recipes related to `current`.
///
/// Recipes sharing at least one tag with `current` come first, in catalog
/// order. If there are fewer than `limit` of those, the remainder is
/// backfilled with random picks from the rest of the catalog. `current`
/// itself is never returned, and recipes are compared by id so a cloned
/// `current` works as well as a borrowed one.
///
/// The result holds exactly `limit` recipes whenever the catalog has at
/// least `limit + 1` of them.
pub fn related_recipes<'a, R>(
    catalog: &'a [Recipe],
    current: &Recipe,
    limit: usize,
    rng: &mut R,
) -> Vec<&'a Recipe>
where
    R: RandomSource + ?Sized,
{
    let mut selected: Vec<&Recipe> = catalog
        .iter()
        .filter(|recipe| recipe.id != current.id && recipe.shares_tag_with(current))
        .take(limit)
        .collect();

    if selected.len() < limit {
        let mut backfill: Vec<&Recipe> = catalog
            .iter()
            .filter(|recipe| {
                recipe.id != current.id && !selected.iter().any(|picked| picked.id == recipe.id)
            })
            .collect();
        shuffle(&mut backfill, rng);
        backfill.truncate(limit - selected.len());
        selected.extend(backfill);
    }

    selected
}
