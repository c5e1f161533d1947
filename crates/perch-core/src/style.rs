//! Computed inline styles and their string form.
//!
//! The placement engine produces a [`StyleMap`]: an ordered set of CSS
//! declarations for the popup. [`StyleMap::to_style_string`] serializes it
//! into the inline style text handed to callers:
//!
//! ```text
//! position: fixed; top: 22px; left: 0px;
//! ```
//!
//! Every declaration is written as `property: value;` and declarations are
//! separated by a single space. Declarations with an empty value are skipped.

use std::fmt;

use indexmap::IndexMap;

/// Ordered CSS declarations computed for an element.
///
/// Insertion order is preserved so the serialized string is stable across
/// recomputations.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleMap {
    declarations: IndexMap<&'static str, String>,
}

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a declaration, keeping its original position if it already exists.
    pub fn set(&mut self, property: &'static str, value: impl Into<String>) {
        self.declarations.insert(property, value.into());
    }

    /// Returns the value of a declaration
    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations.get(property).map(String::as_str)
    }

    /// Iterates the declarations in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.declarations
            .iter()
            .map(|(property, value)| (*property, value.as_str()))
    }

    /// Returns the number of declarations
    pub fn len(&self) -> usize {
        self.declarations.len()
    }

    /// Returns true if there are no declarations
    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }

    /// Serializes the declarations into an inline style string.
    ///
    /// # Examples
    ///
    /// ```
    /// # use perch_core::style::StyleMap;
    /// let mut styles = StyleMap::new();
    /// styles.set("top", "100px");
    /// styles.set("left", "20px");
    /// assert_eq!(styles.to_style_string(), "top: 100px; left: 20px;");
    /// ```
    pub fn to_style_string(&self) -> String {
        self.iter()
            .filter(|(_, value)| !value.is_empty())
            .map(|(property, value)| format!("{property}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for StyleMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_style_string())
    }
}

/// Formats a pixel length the way CSS expects it, e.g. `22px` or `10.5px`.
pub fn px(value: f32) -> String {
    // Avoid `-0px` after rounding.
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{value}px")
}
