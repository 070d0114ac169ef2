mod catalog;
mod recipe;

pub use catalog::builtin_recipes;
pub use recipe::{Difficulty, ParseDifficultyError, Recipe};
