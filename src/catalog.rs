//! Food catalog
//!
//! Static word list backing the autocomplete on the food name inputs.
//! Lookup only; nothing here touches form state.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Word list a catalog name was filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSection {
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
    General,
}

impl CatalogSection {
    pub const ALL: [CatalogSection; 5] = [
        CatalogSection::Breakfast,
        CatalogSection::Lunch,
        CatalogSection::Dinner,
        CatalogSection::Snacks,
        CatalogSection::General,
    ];

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "breakfast" => Some(CatalogSection::Breakfast),
            "lunch" => Some(CatalogSection::Lunch),
            "dinner" => Some(CatalogSection::Dinner),
            "snacks" | "snack" => Some(CatalogSection::Snacks),
            "general" => Some(CatalogSection::General),
            _ => None,
        }
    }
}

const BREAKFAST: &[&str] = &[
    "Oatmeal", "Pancakes", "Waffles", "French Toast", "Cereal", "Toast", "Bagel", "Muffin",
    "Eggs", "Bacon", "Sausage", "Ham", "Yogurt", "Fruit Salad", "Smoothie", "Orange Juice",
    "Coffee", "Tea", "Milk", "Granola", "Croissant", "Danish", "Scone", "Porridge",
];

const LUNCH: &[&str] = &[
    "Sandwich", "Soup", "Salad", "Pasta", "Pizza", "Burger", "Hot Dog", "Wrap", "Taco",
    "Quesadilla", "Stir Fry", "Fried Rice", "Noodles", "Sushi", "Fish", "Chicken", "Turkey",
    "Beef", "Pork", "Vegetables", "Rice", "Bread", "Cheese", "Tomato",
];

const DINNER: &[&str] = &[
    "Steak", "Chicken", "Fish", "Pork Chops", "Lamb", "Turkey", "Meatloaf", "Roast Beef",
    "Pasta", "Lasagna", "Spaghetti", "Pizza", "Casserole", "Stew", "Curry", "Chili",
    "Potatoes", "Rice", "Vegetables", "Salad", "Bread", "Rolls", "Wine", "Water",
];

const SNACKS: &[&str] = &[
    "Chips", "Crackers", "Cookies", "Cake", "Ice Cream", "Chocolate", "Candy", "Nuts", "Fruit",
    "Apple", "Banana", "Orange", "Grapes", "Berries", "Cheese", "Yogurt", "Popcorn", "Pretzels",
    "Trail Mix", "Granola Bar", "Muffin", "Donut",
];

const GENERAL: &[&str] = &[
    // Ingredients
    "Chicken", "Beef", "Pork", "Fish", "Turkey", "Lamb", "Eggs", "Milk", "Cheese", "Butter",
    "Bread", "Rice", "Pasta", "Potatoes", "Tomatoes", "Onions", "Garlic", "Carrots", "Broccoli",
    "Spinach", "Lettuce", "Mushrooms", "Peppers", "Beans", "Lentils", "Quinoa", "Oats",
    "Apples", "Bananas", "Oranges", "Strawberries", "Blueberries", "Grapes", "Avocado",
    "Olive Oil", "Salt", "Pepper", "Sugar", "Flour", "Honey", "Vanilla", "Cinnamon",
    // Dishes
    "Soup", "Salad", "Sandwich", "Pizza", "Burger", "Tacos", "Sushi", "Curry", "Stir Fry",
    "Pancakes", "Waffles", "French Toast", "Omelette", "Smoothie", "Ice Cream", "Cake",
    // Beverages
    "Water", "Coffee", "Tea", "Juice", "Soda", "Wine", "Beer", "Milk", "Smoothie",
];

/// Searchable set of known food names
#[derive(Debug, Clone)]
pub struct FoodCatalog {
    /// Unique names, sorted
    names: Vec<String>,
    sections: BTreeMap<CatalogSection, Vec<String>>,
}

impl Default for FoodCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl FoodCatalog {
    /// Catalog built from the bundled word lists
    pub fn builtin() -> Self {
        let mut catalog = Self::from_names(Vec::<String>::new());
        for section in CatalogSection::ALL {
            let words = match section {
                CatalogSection::Breakfast => BREAKFAST,
                CatalogSection::Lunch => LUNCH,
                CatalogSection::Dinner => DINNER,
                CatalogSection::Snacks => SNACKS,
                CatalogSection::General => GENERAL,
            };
            catalog.add_section(section, words.iter().copied());
        }
        catalog
    }

    /// Catalog with every name filed under General
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut catalog = Self {
            names: Vec::new(),
            sections: BTreeMap::new(),
        };
        catalog.add_section(CatalogSection::General, names);
        catalog
    }

    fn add_section<I, S>(&mut self, section: CatalogSection, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = names.into_iter().map(Into::into).collect();
        if words.is_empty() {
            return;
        }
        let unique: BTreeSet<String> = self.names.drain(..).chain(words.iter().cloned()).collect();
        self.names = unique.into_iter().collect();
        self.sections.entry(section).or_default().extend(words);
    }

    pub fn all_foods(&self) -> &[String] {
        &self.names
    }

    /// Names filed under one section, in list order
    pub fn foods_in(&self, section: CatalogSection) -> &[String] {
        self.sections.get(&section).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Case-insensitive lookup. Exact matches come first, then substring
    /// matches; catalog order breaks ties.
    pub fn search(&self, query: &str, limit: usize) -> Vec<String> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let needle = query.to_lowercase();

        let exact = self
            .names
            .iter()
            .filter(|name| name.to_lowercase() == needle);
        let partial = self.names.iter().filter(|name| {
            let lower = name.to_lowercase();
            lower != needle && lower.contains(&needle)
        });

        exact.chain(partial).take(limit).cloned().collect()
    }
}
