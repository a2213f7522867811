//! Sorter configuration.

use tabledom::EventKind;

/// Configuration shared by every table a [`TableSort`](crate::TableSort)
/// initializes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortConfig {
    /// Attribute that opts a table into sorting.
    pub marker_attribute: String,

    /// Class of the inline element that shows the sort direction.
    pub marker_class: String,

    /// Glyph shown while sorted ascending.
    pub ascending_glyph: char,

    /// Glyph shown while sorted descending.
    pub descending_glyph: char,

    /// `cursor` style applied to header cells.
    pub cursor: String,

    /// Event that advances the sort on a header cell.
    pub trigger: EventKind,
}

impl Default for SortConfig {
    fn default() -> Self {
        Self {
            marker_attribute: "table-sort".to_string(),
            marker_class: "table-sort-marker".to_string(),
            ascending_glyph: '\u{25BE}',
            descending_glyph: '\u{25B4}',
            cursor: "pointer".to_string(),
            trigger: EventKind::MouseDown,
        }
    }
}

impl SortConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the opt-in attribute name.
    pub fn marker_attribute(mut self, name: impl Into<String>) -> Self {
        self.marker_attribute = name.into();
        self
    }

    pub fn marker_class(mut self, class: impl Into<String>) -> Self {
        self.marker_class = class.into();
        self
    }

    /// Set the ascending and descending glyphs.
    pub fn glyphs(mut self, ascending: char, descending: char) -> Self {
        self.ascending_glyph = ascending;
        self.descending_glyph = descending;
        self
    }

    pub fn cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = cursor.into();
        self
    }

    /// Bind header cells to `kind` instead of the press.
    pub fn trigger(mut self, kind: EventKind) -> Self {
        self.trigger = kind;
        self
    }
}
