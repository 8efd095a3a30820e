use serde::{Deserialize, Serialize};

/// Tunables for food growth and citizen allocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationConfig {
    /// Food needed to grow from population 1 to 2 before modifiers.
    pub base_food: f64,
    /// Linear threshold increase per population above 1.
    pub food_per_population: f64,
    /// Exponent of the super-linear threshold term.
    pub growth_exponent: f64,
    /// Threshold multiplier for city-state polities.
    pub city_state_growth_multiplier: f64,
    /// Ceiling on summed carry-over food percentages.
    pub max_carry_over_percent: i32,
    /// Food eaten by one specialist before consumption modifiers.
    pub specialist_base_food: f64,
    /// Tiles farther than this from the center can't be worked.
    pub work_radius: u32,
    /// Added to a locked tile's rank when picking a tile to release.
    pub locked_tile_bias: f64,
    /// When false, locked tiles get no protection during unassignment.
    pub protect_locked_tiles: bool,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            base_food: 15.0,
            food_per_population: 6.0,
            growth_exponent: 1.8,
            city_state_growth_multiplier: 1.5,
            max_carry_over_percent: 95,
            specialist_base_food: 2.0,
            work_radius: 3,
            locked_tile_bias: 10.0,
            protect_locked_tiles: true,
        }
    }
}

impl PopulationConfig {
    /// Parse from JSON. Missing fields fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// Per-query growth inputs owned by the game rules rather than the ledger.
/// Speed and difficulty can change between turns, so this is read fresh for
/// every threshold computation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GrowthModifiers {
    pub speed: f64,
    pub ai_growth: f64,
    pub is_city_state: bool,
    pub is_human: bool,
}

impl Default for GrowthModifiers {
    fn default() -> Self {
        Self {
            speed: 1.0,
            ai_growth: 1.0,
            is_city_state: false,
            is_human: true,
        }
    }
}
