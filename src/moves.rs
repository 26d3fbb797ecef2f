use schema::{Element, MoveDefinition};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

pub const DEFAULT_MOVE_NAME: &str = "Tackle";
pub const DEFAULT_MOVE_POWER: u16 = 40;

/// A named attack. Immutable once built; every field is read through accessors.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    name: String,
    element: Element,
    base_power: u16,
}

impl Move {
    /// Zero power is bumped to 1 so every move is a positive scalar.
    pub fn new(name: impl Into<String>, element: Element, base_power: u16) -> Self {
        Self {
            name: name.into(),
            element,
            base_power: base_power.max(1),
        }
    }

    pub fn from_definition(name: impl Into<String>, definition: &MoveDefinition) -> Self {
        Self::new(name, definition.element, definition.base_power)
    }

    /// The Normal-element Tackle every fallback path substitutes.
    pub fn default_move() -> Self {
        Self::new(DEFAULT_MOVE_NAME, Element::Normal, DEFAULT_MOVE_POWER)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn element(&self) -> Element {
        self.element
    }

    pub fn base_power(&self) -> u16 {
        self.base_power
    }
}

impl Default for Move {
    fn default() -> Self {
        Self::default_move()
    }
}

/// Read-only move table, keyed by move name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoveBook {
    definitions: HashMap<String, MoveDefinition>,
}

impl MoveBook {
    pub fn new(definitions: HashMap<String, MoveDefinition>) -> Self {
        Self { definitions }
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<Move> {
        self.definitions
            .get(name)
            .map(|definition| Move::from_definition(name, definition))
    }

    /// Look a move up by name, substituting the default move when it is unknown.
    pub fn resolve(&self, name: &str) -> Move {
        match self.get(name) {
            Some(move_) => move_,
            None => {
                warn!(move_name = name, "unknown move, substituting {}", DEFAULT_MOVE_NAME);
                Move::default_move()
            }
        }
    }

    /// Resolve a starter list, keeping at most `limit` entries in order.
    pub fn resolve_all<S: AsRef<str>>(&self, names: &[S], limit: usize) -> Vec<Move> {
        names
            .iter()
            .take(limit)
            .map(|name| self.resolve(name.as_ref()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn book() -> MoveBook {
        let mut definitions = HashMap::new();
        definitions.insert(
            "Ember".to_string(),
            MoveDefinition {
                element: Element::Fire,
                base_power: 40,
            },
        );
        definitions.insert(
            "Vine Whip".to_string(),
            MoveDefinition {
                element: Element::Grass,
                base_power: 45,
            },
        );
        MoveBook::new(definitions)
    }

    #[test]
    fn test_known_move_resolves_from_table() {
        let ember = book().resolve("Ember");
        assert_eq!(ember.name(), "Ember");
        assert_eq!(ember.element(), Element::Fire);
        assert_eq!(ember.base_power(), 40);
    }

    #[test]
    fn test_unknown_move_falls_back_to_tackle() {
        let fallback = book().resolve("Hyper Beam");
        assert_eq!(fallback, Move::default_move());
        assert_eq!(fallback.name(), "Tackle");
        assert_eq!(fallback.element(), Element::Normal);
        assert_eq!(fallback.base_power(), 40);
    }

    #[test]
    fn test_resolve_all_truncates_and_keeps_order() {
        let names = ["Vine Whip", "Mystery", "Ember", "Ember", "Vine Whip"];
        let moves = book().resolve_all(&names, 4);

        let resolved: Vec<&str> = moves.iter().map(Move::name).collect();
        assert_eq!(resolved, vec!["Vine Whip", "Tackle", "Ember", "Ember"]);
    }

    #[test]
    fn test_zero_power_is_raised_to_one() {
        assert_eq!(Move::new("Splash", Element::Water, 0).base_power(), 1);
    }
}
