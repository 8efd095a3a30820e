//! Per-turn food bookkeeping: growth threshold, starvation, growth and the
//! turn-count predictions shown to the player.

use crate::config::{GrowthModifiers, PopulationConfig};
use crate::context::{CityContext, Notification, ValuationOracle};
use crate::population::PopulationLedger;
#[cfg(feature = "instrument")]
use crate::types::KeyToU64;

/// Food needed to grow from `population` to `population + 1`.
///
/// `base + per_pop·(n−1) + floor((n−1)^exp)`, scaled by game speed, the
/// city-state multiplier and, for AI owners, the difficulty growth modifier.
pub fn food_to_next_population(
    population: u32,
    config: &PopulationConfig,
    modifiers: &GrowthModifiers,
) -> i32 {
    let n = population.saturating_sub(1) as f64;
    let mut required =
        config.base_food + config.food_per_population * n + n.powf(config.growth_exponent).floor();

    required *= modifiers.speed;
    if modifiers.is_city_state {
        required *= config.city_state_growth_multiplier;
    }
    if !modifiers.is_human {
        required *= modifiers.ai_growth;
    }
    required as i32
}

/// Summed carry-over percentage, clamped to `0..=max`.
pub fn carry_over_percent(percents: &[i32], max: i32) -> i32 {
    percents.iter().sum::<i32>().clamp(0, max)
}

impl PopulationLedger {
    pub fn food_to_next_population(&self, city: &dyn CityContext) -> i32 {
        food_to_next_population(self.population(), city.config(), &city.growth_modifiers())
    }

    /// Apply one turn's net food. May starve away or grow one population unit,
    /// each of which reallocates citizens.
    pub fn apply_turn(
        &mut self,
        food_delta: i32,
        city: &mut dyn CityContext,
        oracle: &dyn ValuationOracle,
    ) {
        self.food_stored = self.food_stored.saturating_add(food_delta);

        if food_delta < 0 {
            let warning = Notification::starving(city.name(), city.center());
            city.notify(warning);
        }

        if self.food_stored < 0 {
            #[cfg(feature = "instrument")]
            tracing::info!(
                target: "starvation",
                settlement_id = city.id().to_u64(),
                population = self.population(),
                food_stored = self.food_stored,
                food_delta = food_delta,
            );

            if self.population() > 1 {
                self.add_population(-1, city, oracle);
            }
            self.food_stored = 0;
        }

        let threshold = self.food_to_next_population(city);
        if self.food_stored >= threshold {
            self.food_stored -= threshold;

            let percent = carry_over_percent(
                &city.carry_over_food_percents(),
                city.config().max_carry_over_percent,
            );
            self.food_stored += (threshold as i64 * percent as i64 / 100) as i32;

            #[cfg(feature = "instrument")]
            tracing::info!(
                target: "growth",
                settlement_id = city.id().to_u64(),
                population = self.population() + 1,
                threshold = threshold,
                carry_over_percent = percent,
                food_stored = self.food_stored,
            );

            self.add_population(1, city, oracle);
            city.mark_citizens_stale();
            let grown = Notification::grown(city.name(), city.center());
            city.notify(grown);
        }
    }

    /// Turns until the next population loss. `None` while not starving.
    pub fn turns_to_starvation(&self, city: &dyn CityContext) -> Option<u32> {
        let net = city.food_for_next_turn();
        if net >= 0 {
            return None;
        }
        Some(self.food_stored.max(0) as u32 / net.unsigned_abs() + 1)
    }

    /// Turns until the next population gain. `None` while not growing.
    pub fn turns_to_growth(&self, city: &dyn CityContext) -> Option<u32> {
        let net = city.food_for_next_turn();
        if net <= 0 {
            return None;
        }
        let remaining = (self.food_to_next_population(city) - self.food_stored) as f64;
        let turns = (remaining / net as f64).ceil() as i64;
        Some(turns.max(1) as u32)
    }
}
