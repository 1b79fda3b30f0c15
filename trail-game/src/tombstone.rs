//! Tombstones left along the trail by earlier parties.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const EPITAPH_MAX_CHARS: usize = 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tombstone {
    pub mile_marker: u32,
    pub name: String,
    #[serde(default)]
    pub epitaph: String,
}

impl Tombstone {
    #[must_use]
    pub fn new(mile_marker: u32, name: impl Into<String>, epitaph: &str) -> Self {
        Self {
            mile_marker,
            name: name.into(),
            epitaph: epitaph.trim().chars().take(EPITAPH_MAX_CHARS).collect(),
        }
    }

    #[must_use]
    pub fn inscription(&self) -> String {
        if self.epitaph.is_empty() {
            format!("Here lies {}.", self.name)
        } else {
            format!("Here lies {}. {}", self.name, self.epitaph)
        }
    }
}

/// At most one tombstone per mile marker.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Graveyard {
    stones: BTreeMap<u32, Tombstone>,
}

impl Graveyard {
    /// Place a tombstone. A marker that already has one keeps it.
    pub fn add(&mut self, tombstone: Tombstone) -> bool {
        if self.stones.contains_key(&tombstone.mile_marker) {
            return false;
        }
        log::debug!("tombstone for {} at mile {}", tombstone.name, tombstone.mile_marker);
        self.stones.insert(tombstone.mile_marker, tombstone);
        true
    }

    #[must_use]
    pub fn at(&self, mile_marker: u32) -> Option<&Tombstone> {
        self.stones.get(&mile_marker)
    }

    /// Tombstones passed when travelling from `from` (exclusive) to `to` (inclusive).
    /// Leaving the starting mile also passes any stone at mile 0.
    pub fn passed(&self, from: u32, to: u32) -> impl Iterator<Item = &Tombstone> {
        let first = if from == 0 { 0 } else { from + 1 };
        (to > from)
            .then(|| self.stones.range(first..=to))
            .into_iter()
            .flatten()
            .map(|(_, stone)| stone)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stones.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stones.is_empty()
    }

    pub fn clear(&mut self) {
        self.stones.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tombstone> {
        self.stones.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_stone_per_marker() {
        let mut yard = Graveyard::default();
        assert!(yard.add(Tombstone::new(300, "Ezra", "pepperoni and cheese")));
        assert!(!yard.add(Tombstone::new(300, "Mary", "")));
        assert_eq!(yard.len(), 1);
        assert_eq!(yard.at(300).map(|t| t.name.as_str()), Some("Ezra"));
    }

    #[test]
    fn passed_covers_half_open_range() {
        let mut yard = Graveyard::default();
        yard.add(Tombstone::new(100, "A", ""));
        yard.add(Tombstone::new(114, "B", ""));
        yard.add(Tombstone::new(200, "C", ""));
        let names: Vec<&str> = yard.passed(100, 200).map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["B", "C"]);
        assert_eq!(yard.passed(200, 200).count(), 0);
        assert_eq!(yard.passed(250, 10).count(), 0);
    }

    #[test]
    fn setting_out_passes_the_stone_at_the_start() {
        let mut yard = Graveyard::default();
        yard.add(Tombstone::new(0, "Abe", "Never left Independence"));
        yard.add(Tombstone::new(12, "Ruth", ""));
        let names: Vec<&str> = yard.passed(0, 15).map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["Abe", "Ruth"]);
        assert_eq!(yard.passed(0, 0).count(), 0);
        assert_eq!(yard.passed(15, 30).count(), 0);
    }

    #[test]
    fn epitaphs_are_trimmed_and_bounded() {
        let long = "x".repeat(100);
        let stone = Tombstone::new(5, "Jed", &format!("  {long}  "));
        assert_eq!(stone.epitaph.len(), EPITAPH_MAX_CHARS);
        assert_eq!(Tombstone::new(5, "Jed", "   ").inscription(), "Here lies Jed.");
    }
}
