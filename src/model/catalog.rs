use super::recipe::{Difficulty, Recipe};

struct Seed {
    id: u32,
    title: &'static str,
    description: &'static str,
    difficulty: Difficulty,
    cook_time: &'static str,
    servings: &'static str,
    emoji: &'static str,
    image: &'static str,
    tags: &'static [&'static str],
    ingredients: &'static [&'static str],
    steps: &'static [&'static str],
}

fn owned(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|s| s.to_string()).collect()
}

impl Seed {
    fn to_recipe(&self) -> Recipe {
        Recipe {
            id: self.id,
            title: self.title.to_string(),
            description: self.description.to_string(),
            difficulty: self.difficulty,
            cook_time: self.cook_time.to_string(),
            servings: self.servings.to_string(),
            emoji: self.emoji.to_string(),
            image: self.image.to_string(),
            tags: owned(self.tags),
            ingredients: owned(self.ingredients),
            steps: owned(self.steps),
        }
    }
}

const SEEDS: &[Seed] = &[
    Seed {
        id: 1,
        title: "Egusi Soup",
        description: "A rich, hearty soup made with ground melon seeds, vegetables, and your choice of meat. A true Nigerian classic.",
        difficulty: Difficulty::Medium,
        cook_time: "45 mins",
        servings: "6-8",
        emoji: "🥣",
        image: "egusi-soup",
        tags: &["soup", "melon seeds", "vegetables"],
        ingredients: &[
            "2 cups egusi seeds",
            "1kg assorted meat",
            "2 cups fresh spinach",
            "1 cup palm oil",
            "2 stock cubes",
            "1 onion",
            "3 fresh peppers",
        ],
        steps: &[
            "Grind egusi seeds into powder",
            "Boil meat with seasonings until tender",
            "Heat palm oil and fry egusi",
            "Add meat stock and vegetables",
            "Simmer for 15 minutes",
        ],
    },
    Seed {
        id: 2,
        title: "Jollof Rice",
        description: "The legendary one-pot rice dish with rich tomato sauce. A party favorite across West Africa.",
        difficulty: Difficulty::Medium,
        cook_time: "40 mins",
        servings: "6-8",
        emoji: "🍚",
        image: "jollof-rice",
        tags: &["rice", "tomato", "party"],
        ingredients: &[
            "4 cups long grain rice",
            "6 large tomatoes",
            "2 red bell peppers",
            "1 onion",
            "3 cups chicken stock",
            "1 cup vegetable oil",
        ],
        steps: &[
            "Blend tomatoes and peppers",
            "Fry tomato mixture until thick",
            "Add rice and stock",
            "Cook on low heat until done",
            "Stir and serve hot",
        ],
    },
    Seed {
        id: 3,
        title: "Ogbono Soup",
        description: "A draw soup made from wild mango seeds, known for its unique texture and rich flavor.",
        difficulty: Difficulty::Easy,
        cook_time: "30 mins",
        servings: "4-6",
        emoji: "🍲",
        image: "ogbono-soup",
        tags: &["soup", "mango seeds", "draw soup"],
        ingredients: &[
            "2 handfuls ogbono seeds",
            "500g assorted meat",
            "2 cups ugwu leaves",
            "1 cup palm oil",
            "2 stock cubes",
            "1 onion",
        ],
        steps: &[
            "Grind ogbono seeds",
            "Boil meat until tender",
            "Dissolve ogbono in palm oil",
            "Add meat stock and vegetables",
            "Simmer until thick",
        ],
    },
    Seed {
        id: 4,
        title: "Okra Soup",
        description: "Fresh okra soup with a viscous texture, packed with nutrients and flavor.",
        difficulty: Difficulty::Easy,
        cook_time: "25 mins",
        servings: "4-6",
        emoji: "🥒",
        image: "okra-soup",
        tags: &["soup", "okra", "vegetables"],
        ingredients: &[
            "30 pieces fresh okra",
            "500g assorted meat",
            "1 cup palm oil",
            "2 cups spinach",
            "2 stock cubes",
            "1 onion",
        ],
        steps: &[
            "Chop or blend okra",
            "Boil meat with seasonings",
            "Add palm oil and okra",
            "Add vegetables",
            "Simmer for 10 minutes",
        ],
    },
    Seed {
        id: 5,
        title: "Garri",
        description: "Cassava flakes that can be enjoyed as a drink or made into eba. A versatile staple.",
        difficulty: Difficulty::Easy,
        cook_time: "5 mins",
        servings: "2-4",
        emoji: "🥤",
        image: "garri",
        tags: &["cassava", "staple", "drink"],
        ingredients: &[
            "2 cups garri",
            "Water",
            "Sugar (optional)",
            "Milk (optional)",
            "Groundnuts (optional)",
        ],
        steps: &[
            "Sieve garri to remove lumps",
            "Add cold water gradually",
            "Stir to desired consistency",
            "Add sugar and milk if desired",
            "Enjoy with groundnuts",
        ],
    },
    Seed {
        id: 6,
        title: "Yam Porridge",
        description: "Hearty yam cooked in a rich pepper sauce with vegetables. Comfort food at its best.",
        difficulty: Difficulty::Medium,
        cook_time: "35 mins",
        servings: "4-6",
        emoji: "🍠",
        image: "yam-porridge",
        tags: &["yam", "porridge", "vegetables"],
        ingredients: &[
            "1kg yam",
            "4 large tomatoes",
            "2 red bell peppers",
            "1 onion",
            "2 cups spinach",
            "1 cup palm oil",
        ],
        steps: &[
            "Peel and cut yam into chunks",
            "Blend tomatoes and peppers",
            "Cook yam with tomato mixture",
            "Add palm oil and seasonings",
            "Add vegetables and simmer",
        ],
    },
    Seed {
        id: 7,
        title: "Vegetable Sauce",
        description: "Mixed vegetable sauce that pairs perfectly with rice, yam, or plantain.",
        difficulty: Difficulty::Easy,
        cook_time: "20 mins",
        servings: "4-6",
        emoji: "🥘",
        image: "vegetable-sauce",
        tags: &["sauce", "vegetables", "healthy"],
        ingredients: &[
            "1 whole chicken",
            "2 cups mixed vegetables",
            "4 plum tomatoes",
            "2 carrots",
            "1 cabbage",
            "2 bell peppers",
        ],
        steps: &[
            "Cut and season chicken",
            "Chop all vegetables",
            "Cook chicken with onions",
            "Add vegetables in order",
            "Simmer until tender",
        ],
    },
];

/// The recipes shipped with the site, in display order.
pub fn builtin_recipes() -> Vec<Recipe> {
    SEEDS.iter().map(Seed::to_recipe).collect()
}
