//! Expense categories and the candidate label set for classification.
//!
//! Categories are free text typed by the user. To stop near-duplicate
//! variants ("food", "Food ", "FOOD") from accumulating in the database,
//! every category is normalized before storage.

use std::{collections::BTreeSet, fmt::Display};

use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::Error;

/// The categories offered before the user has recorded their own.
///
/// These serve as candidate labels for the classifier and as options in the
/// filter drop-down. They are never written to the database.
pub const DEFAULT_CATEGORIES: [&str; 7] = [
    "Entertainment",
    "Food",
    "Health",
    "Other",
    "Shopping",
    "Transport",
    "Utilities",
];

/// A normalized expense category.
///
/// Stored categories are always in this form, so no two stored categories
/// differ only by case or surrounding whitespace.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name, normalizing `raw`.
    ///
    /// The string is trimmed and each word is title-cased (first letter
    /// uppercased, the rest lowercased), with interior whitespace runs
    /// collapsed to a single space. Normalization is idempotent. A string
    /// that is empty after trimming is kept as-is.
    pub fn new(raw: &str) -> Self {
        let normalized = raw
            .split_whitespace()
            .map(title_case_word)
            .collect::<Vec<_>>()
            .join(" ");

        Self(normalized)
    }

    /// Wrap a string that is already in normalized form.
    ///
    /// Intended for values read back from the database, which are always
    /// stored post-normalization.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

fn title_case_word(word: &str) -> String {
    let mut chars = word.chars();

    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Retrieve the distinct categories currently in storage, ordered by name.
pub(crate) fn get_distinct_categories(connection: &Connection) -> Result<Vec<CategoryName>, Error> {
    connection
        .prepare("SELECT DISTINCT category FROM expenses ORDER BY category ASC;")?
        .query_map([], |row| row.get::<usize, String>(0))?
        .map(|maybe_name| {
            maybe_name
                .map(|name| CategoryName::new_unchecked(&name))
                .map_err(|error| error.into())
        })
        .collect()
}

/// The category list shown in the filter drop-down and offered to the
/// classifier as candidate labels: the distinct stored categories merged
/// with [DEFAULT_CATEGORIES], deduplicated and sorted.
pub(crate) fn candidate_categories(connection: &Connection) -> Result<Vec<CategoryName>, Error> {
    let mut categories: BTreeSet<CategoryName> = DEFAULT_CATEGORIES
        .iter()
        .map(|name| CategoryName::new_unchecked(name))
        .collect();

    // Rows recorded without a category do not make useful labels.
    categories.extend(
        get_distinct_categories(connection)?
            .into_iter()
            .filter(|category| !category.as_ref().is_empty()),
    );

    Ok(categories.into_iter().collect())
}
