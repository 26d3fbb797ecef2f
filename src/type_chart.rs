use schema::Element;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How a matchup should be narrated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effectiveness {
    SuperEffective,
    Neutral,
    NotVeryEffective,
}

impl Effectiveness {
    /// 2.0 is super effective, 0.5 is not very effective, anything else is neutral.
    pub fn from_multiplier(multiplier: f64) -> Self {
        if multiplier == 2.0 {
            Effectiveness::SuperEffective
        } else if multiplier == 0.5 {
            Effectiveness::NotVeryEffective
        } else {
            Effectiveness::Neutral
        }
    }
}

/// Directional attack-element -> defend-element multiplier table.
///
/// Lookups are total: a missing attacking row or a missing pair is neutral (1.0).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeChart {
    chart: HashMap<Element, HashMap<Element, f64>>,
}

impl Default for TypeChart {
    /// The four-element chart the game ships with.
    fn default() -> Self {
        use Element::*;

        let rows = [
            (Fire, [(Fire, 1.0), (Water, 0.5), (Grass, 2.0), (Normal, 1.0)]),
            (Water, [(Fire, 2.0), (Water, 1.0), (Grass, 0.5), (Normal, 1.0)]),
            (Grass, [(Fire, 0.5), (Water, 2.0), (Grass, 1.0), (Normal, 1.0)]),
            (Normal, [(Fire, 1.0), (Water, 1.0), (Grass, 1.0), (Normal, 1.0)]),
        ];

        let chart: HashMap<Element, HashMap<Element, f64>> = rows
            .into_iter()
            .map(|(attacking, row)| (attacking, row.into_iter().collect::<HashMap<_, _>>()))
            .collect();

        Self { chart }
    }
}

impl TypeChart {
    /// A chart with no entries; every matchup is neutral.
    pub fn empty() -> Self {
        Self {
            chart: HashMap::new(),
        }
    }

    /// Set a single directional entry, replacing any previous value.
    pub fn set(&mut self, attacking: Element, defending: Element, multiplier: f64) {
        self.chart
            .entry(attacking)
            .or_default()
            .insert(defending, multiplier);
    }

    pub fn multiplier(&self, attacking: Element, defending: Element) -> f64 {
        self.chart
            .get(&attacking)
            .and_then(|row| row.get(&defending))
            .copied()
            .unwrap_or(1.0)
    }

    pub fn effectiveness(&self, attacking: Element, defending: Element) -> Effectiveness {
        Effectiveness::from_multiplier(self.multiplier(attacking, defending))
    }
}
