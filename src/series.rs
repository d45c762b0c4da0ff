//! Per-series presentation attributes.
//!
//! Attributes are assigned once, when a name is first seen, so a series keeps
//! its color when others are hidden or sort before it.

use std::collections::{HashMap, HashSet};

use crate::style::{Color, Theme};

/// Identifier assigned in first-sight order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SeriesId(u64);

impl SeriesId {
    /// Position of the series in first-sight order.
    pub fn index(self) -> u64 {
        self.0
    }
}

/// Presentation attributes of one series.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesAttributes {
    id: SeriesId,
    name: String,
    color: Color,
    visible: bool,
}

impl SeriesAttributes {
    /// Access the series identifier.
    pub fn id(&self) -> SeriesId {
        self.id
    }

    /// Access the series name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Access the series color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Check if the series is visible.
    pub fn is_visible(&self) -> bool {
        self.visible
    }
}

/// Table of series attributes keyed by name.
#[derive(Debug, Clone, Default)]
pub struct SeriesTable {
    theme: Theme,
    entries: HashMap<String, SeriesAttributes>,
    hidden_unseen: HashSet<String>,
    next_id: u64,
}

impl SeriesTable {
    /// Create an empty table coloring series from `theme`.
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            entries: HashMap::new(),
            hidden_unseen: HashSet::new(),
            next_id: 0,
        }
    }

    /// Register a name if unseen and return its attributes.
    pub fn register(&mut self, name: &str) -> &SeriesAttributes {
        if !self.entries.contains_key(name) {
            let id = SeriesId(self.next_id);
            self.next_id += 1;
            let attributes = SeriesAttributes {
                id,
                name: name.to_string(),
                color: self.theme.series_color(id.0 as usize),
                visible: !self.hidden_unseen.remove(name),
            };
            self.entries.insert(name.to_string(), attributes);
        }
        &self.entries[name]
    }

    /// Look up attributes by name.
    pub fn get(&self, name: &str) -> Option<&SeriesAttributes> {
        self.entries.get(name)
    }

    /// Check whether a series is visible.
    ///
    /// Unknown names count as visible unless they were toggled off ahead of
    /// their first sample.
    pub fn is_visible(&self, name: &str) -> bool {
        match self.entries.get(name) {
            Some(entry) => entry.visible,
            None => !self.hidden_unseen.contains(name),
        }
    }

    /// Set the visibility of a known series. Returns false for unknown names.
    pub fn set_visible(&mut self, name: &str, visible: bool) -> bool {
        match self.entries.get_mut(name) {
            Some(entry) => {
                entry.visible = visible;
                true
            }
            None => false,
        }
    }

    /// Flip the visibility of a series.
    ///
    /// An unseen name is remembered without taking an id or a color, and
    /// starts hidden when it is registered. Returns the new visibility.
    pub fn toggle(&mut self, name: &str) -> bool {
        let visible = match self.entries.get_mut(name) {
            Some(entry) => {
                entry.visible = !entry.visible;
                entry.visible
            }
            None => {
                if !self.hidden_unseen.remove(name) {
                    self.hidden_unseen.insert(name.to_string());
                }
                !self.hidden_unseen.contains(name)
            }
        };
        tracing::debug!(series = name, visible, "series visibility toggled");
        visible
    }

    /// Names of hidden series, sorted.
    pub fn hidden_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .entries
            .values()
            .filter(|entry| !entry.visible)
            .map(|entry| entry.name.clone())
            .chain(self.hidden_unseen.iter().cloned())
            .collect();
        names.sort();
        names
    }

    /// Number of registered series.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether no series are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget every series and restart first-sight numbering.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hidden_unseen.clear();
        self.next_id = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colors_follow_first_sight_order() {
        let theme = Theme::default();
        let mut table = SeriesTable::new(theme.clone());
        table.register("zeta");
        table.register("alpha");
        assert_eq!(table.get("zeta").unwrap().color(), theme.series_color(0));
        assert_eq!(table.get("alpha").unwrap().color(), theme.series_color(1));
        assert_eq!(table.get("alpha").unwrap().id().index(), 1);
    }

    #[test]
    fn register_is_idempotent() {
        let mut table = SeriesTable::default();
        let first = table.register("a").id();
        let second = table.register("a").id();
        assert_eq!(first, second);
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn toggle_flips_visibility() {
        let mut table = SeriesTable::default();
        table.register("a");
        assert!(table.is_visible("a"));
        assert!(!table.toggle("a"));
        assert!(!table.is_visible("a"));
        assert_eq!(table.hidden_names(), vec!["a".to_string()]);
        assert!(table.toggle("a"));
        assert!(table.hidden_names().is_empty());
    }

    #[test]
    fn toggling_unknown_name_hides_it_ahead_of_data() {
        let theme = Theme::default();
        let mut table = SeriesTable::new(theme.clone());
        assert!(!table.toggle("later"));
        assert!(!table.is_visible("later"));
        assert!(table.get("later").is_none());
        assert_eq!(table.hidden_names(), vec!["later".to_string()]);
        assert!(!table.set_visible("other", false));

        let first = table.register("first").clone();
        assert_eq!(first.id().index(), 0);
        assert_eq!(first.color(), theme.series_color(0));

        let later = table.register("later").clone();
        assert_eq!(later.id().index(), 1);
        assert!(!later.is_visible());
    }

    #[test]
    fn toggling_unknown_name_twice_restores_it() {
        let mut table = SeriesTable::default();
        assert!(!table.toggle("typo"));
        assert!(table.toggle("typo"));
        assert!(table.is_visible("typo"));
        assert!(table.hidden_names().is_empty());
        assert!(table.is_empty());
    }

    #[test]
    fn clear_restarts_numbering() {
        let mut table = SeriesTable::default();
        table.register("a");
        table.register("b");
        table.clear();
        assert!(table.is_empty());
        assert_eq!(table.register("b").id().index(), 0);
    }
}
