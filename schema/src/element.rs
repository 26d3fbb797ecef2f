use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{EnumIter, EnumString};

/// Elemental tag carried by combatants and moves.
///
/// Only a handful of elements have entries in the default effectiveness
/// chart; every other pairing is neutral.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumIter, EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Element {
    #[default]
    Normal,
    Fire,
    Water,
    Grass,
    Electric,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_element_parses_case_insensitively() {
        assert_eq!(Element::from_str("fire"), Ok(Element::Fire));
        assert_eq!(Element::from_str("GRASS"), Ok(Element::Grass));
        assert!(Element::from_str("Plasma").is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        for element in Element::iter() {
            assert_eq!(Element::from_str(&element.to_string()), Ok(element));
        }
    }
}
