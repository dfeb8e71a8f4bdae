use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Storage key for the user-editable example list.
pub const EXAMPLES_KEY: &str = "conic_examples_v1";

pub const DEFAULT_EXAMPLES: [&str; 6] = [
    "x^2/9 - y^2/4 = 1",
    "y^2/16 - x^2/25 = 1",
    "5x^2 - 6xy + 5y^2 - 32 = 0",
    "x^2 + y^2 = 25",
    "x^2/16 + y^2/9 = 1",
    "y^2 = 4x",
];

/// Key-value persistence for example equations. The engine never performs
/// I/O itself; callers inject whatever backend suits them (a JSON file for
/// the CLI, an in-memory map for tests).
pub trait ExampleStore {
    fn load(&self, key: &str) -> Option<Vec<String>>;
    fn save(&mut self, key: &str, examples: &[String]);
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<String>>,
}

impl ExampleStore for MemoryStore {
    fn load(&self, key: &str) -> Option<Vec<String>> {
        self.entries.get(key).cloned()
    }
    fn save(&mut self, key: &str, examples: &[String]) {
        self.entries.insert(key.to_string(), examples.to_vec());
    }
}

/// User-editable example list, seeded with defaults when the store holds
/// nothing yet.
pub struct Examples<S: ExampleStore> {
    store: S,
    entries: Vec<String>,
}

impl<S: ExampleStore> Examples<S> {
    pub fn load(store: S) -> Self {
        let entries = store
            .load(EXAMPLES_KEY)
            .unwrap_or_else(|| DEFAULT_EXAMPLES.iter().map(|s| s.to_string()).collect());
        Examples { store, entries }
    }

    pub fn list(&self) -> &[String] {
        &self.entries
    }

    /// Front-insert a new equation and persist. Blank input is ignored.
    pub fn add(&mut self, equation: &str) {
        let equation = equation.trim();
        if equation.is_empty() {
            return;
        }
        self.entries.insert(0, equation.to_string());
        self.store.save(EXAMPLES_KEY, &self.entries);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryEntry {
    pub name: String,
    pub equation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryCategory {
    pub category: String,
    pub equations: Vec<LibraryEntry>,
}

/// Curated general-form equations, grouped by conic family.
pub fn equation_library() -> Vec<LibraryCategory> {
    let entry = |name: &str, equation: &str| LibraryEntry {
        name: name.to_string(),
        equation: equation.to_string(),
    };
    vec![
        LibraryCategory {
            category: "Hyperbola".to_string(),
            equations: vec![
                entry("Conjugate (rotated)", "xy = 8"),
                entry("General form (rotated)", "x^2 - 4xy + y^2 + 8x - 4y + 4 = 0"),
                entry("General form (shifted)", "9x^2 - 16y^2 - 18x - 64y - 199 = 0"),
                entry("General form (complex)", "2x^2 + 7xy + 3y^2 + 8x + 14y - 6 = 0"),
            ],
        },
        LibraryCategory {
            category: "Ellipse".to_string(),
            equations: vec![
                entry("General form (rotated)", "5x^2 - 6xy + 5y^2 - 32 = 0"),
                entry("General form (shifted)", "4x^2 + 9y^2 - 16x + 18y - 11 = 0"),
                entry("General form (rotated, alternate)", "13x^2 - 10xy + 13y^2 - 72 = 0"),
            ],
        },
        LibraryCategory {
            category: "Parabola".to_string(),
            equations: vec![
                entry("General form (rotated)", "x^2 - 2xy + y^2 - 8x - 8y = 0"),
                entry("General form (shifted)", "y^2 - 8x - 6y + 17 = 0"),
                entry("General form (complex)", "4x^2 - 4xy + y^2 - 8x - 6y + 5 = 0"),
            ],
        },
        LibraryCategory {
            category: "Circle".to_string(),
            equations: vec![
                entry("General form (shifted)", "x^2 + y^2 - 6x + 4y - 12 = 0"),
                entry("General form (other shift)", "x^2 + y^2 + 8x - 10y - 8 = 0"),
            ],
        },
    ]
}
