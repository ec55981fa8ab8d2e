//! Menu sections and grouping of catalog items by section.

use serde::Serialize;

use crate::MenuItem;

/// Sections of the standard menu, in display order.
pub const DEFAULT_CATEGORIES: [&str; 4] = ["Entrees", "Sides", "Beverages", "Desserts"];

/// An ordered set of known menu sections.
///
/// Matching is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySet {
    names: Vec<String>,
}

impl CategorySet {
    /// Builds a set from names, keeping first-seen order.
    ///
    /// Names are trimmed; blanks and duplicates are skipped.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self { names: Vec::new() };
        for name in names {
            let name = name.as_ref().trim();
            if !name.is_empty() && !set.contains(name) {
                set.names.push(name.to_string());
            }
        }
        set
    }

    /// Parses a comma-separated list such as `"Entrees,Sides"`.
    pub fn parse(list: &str) -> Self {
        Self::new(list.split(','))
    }

    /// Returns true if `category` is one of the known sections.
    pub fn contains(&self, category: &str) -> bool {
        self.names.iter().any(|n| n == category)
    }

    /// Iterates the sections in display order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for CategorySet {
    fn default() -> Self {
        Self::new(DEFAULT_CATEGORIES)
    }
}

/// The items of one menu section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryGroup {
    pub category: String,
    pub items: Vec<MenuItem>,
}

/// Catalog items grouped by section.
///
/// Every known section has a group, even when empty. Items whose category is
/// not known appear in no group; they are collected in
/// [`unclassified`](GroupedMenu::unclassified) instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedMenu {
    groups: Vec<CategoryGroup>,
    unclassified: Vec<MenuItem>,
}

impl GroupedMenu {
    /// Groups `items` under the sections of `categories`, keeping item order.
    pub fn group(categories: &CategorySet, items: impl IntoIterator<Item = MenuItem>) -> Self {
        let mut groups: Vec<CategoryGroup> = categories
            .iter()
            .map(|category| CategoryGroup {
                category: category.to_string(),
                items: Vec::new(),
            })
            .collect();
        let mut unclassified = Vec::new();

        for item in items {
            match groups.iter_mut().find(|g| g.category == item.category) {
                Some(group) => group.items.push(item),
                None => unclassified.push(item),
            }
        }

        Self {
            groups,
            unclassified,
        }
    }

    /// Returns the items of a section, or None if the section is not known.
    pub fn get(&self, category: &str) -> Option<&[MenuItem]> {
        self.groups
            .iter()
            .find(|g| g.category == category)
            .map(|g| g.items.as_slice())
    }

    /// Returns the groups in display order.
    pub fn groups(&self) -> &[CategoryGroup] {
        &self.groups
    }

    /// Iterates `(section, items)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[MenuItem])> {
        self.groups
            .iter()
            .map(|g| (g.category.as_str(), g.items.as_slice()))
    }

    /// Items whose category matched no known section.
    pub fn unclassified(&self) -> &[MenuItem] {
        &self.unclassified
    }

    /// Number of grouped items (excluding unclassified ones).
    pub fn item_count(&self) -> usize {
        self.groups.iter().map(|g| g.items.len()).sum()
    }
}
