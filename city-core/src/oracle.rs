use std::collections::HashMap;

use crate::context::ValuationOracle;
use crate::types::{Stat, Stats, TilePos};

/// Default valuation: a weighted sum of yields.
///
/// Food is weighted up while the settlement's food surplus is below
/// `comfortable_surplus`, which is what makes specialist value depend on how
/// much food the tiles already bring in.
#[derive(Debug, Clone)]
pub struct YieldOracle {
    pub weights: Stats,
    pub hungry_food_weight: f64,
    pub comfortable_surplus: f64,
    pub specialist_yields: HashMap<String, Stats>,
}

impl Default for YieldOracle {
    fn default() -> Self {
        Self {
            weights: Stats {
                food: 1.0,
                production: 1.0,
                gold: 0.7,
                science: 0.8,
                culture: 0.6,
                faith: 0.5,
            },
            hungry_food_weight: 3.0,
            comfortable_surplus: 2.0,
            specialist_yields: default_specialists(),
        }
    }
}

/// The usual four specialist roles.
pub fn default_specialists() -> HashMap<String, Stats> {
    HashMap::from([
        ("Scientist".to_string(), Stats::default().with(Stat::Science, 3.0)),
        ("Engineer".to_string(), Stats::default().with(Stat::Production, 2.0)),
        ("Merchant".to_string(), Stats::default().with(Stat::Gold, 3.0)),
        ("Artist".to_string(), Stats::default().with(Stat::Culture, 3.0)),
    ])
}

impl YieldOracle {
    pub fn with_specialists(mut self, specialist_yields: HashMap<String, Stats>) -> Self {
        self.specialist_yields = specialist_yields;
        self
    }

    fn weigh(&self, yields: &Stats, city_stats: &Stats) -> f64 {
        Stat::all()
            .map(|stat| {
                let weight = match stat {
                    Stat::Food if city_stats.food < self.comfortable_surplus => {
                        self.hungry_food_weight
                    }
                    _ => self.weights.get(stat),
                };
                weight * yields.get(stat)
            })
            .sum()
    }
}

impl ValuationOracle for YieldOracle {
    fn rank_tile(&self, _tile: TilePos, tile_yields: &Stats, city_stats: &Stats) -> f64 {
        self.weigh(tile_yields, city_stats)
    }

    fn rank_specialist(&self, role: &str, city_stats: &Stats) -> f64 {
        self.specialist_yields
            .get(role)
            .map(|yields| self.weigh(yields, city_stats))
            .unwrap_or(0.0)
    }
}
