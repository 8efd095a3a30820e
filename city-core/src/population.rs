//! Population ledger: head count, stored food and specialist allocations of
//! one settlement.
//!
//! Growth bookkeeping lives in [`crate::growth`] and the citizen allocation
//! passes in [`crate::allocation`]; both extend [`PopulationLedger`].

use serde::{Deserialize, Serialize};

use crate::context::{CityContext, ValuationOracle};
use crate::counter::RoleCounter;
#[cfg(feature = "instrument")]
use crate::types::KeyToU64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationLedger {
    population: u32,
    pub food_stored: i32,
    pub specialist_allocations: RoleCounter,
}

impl Default for PopulationLedger {
    fn default() -> Self {
        Self {
            population: 1,
            food_stored: 0,
            specialist_allocations: RoleCounter::new(),
        }
    }
}

/// Population categories referenced by rule conditions elsewhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopulationFilter {
    Specialists,
    Population,
    FollowersOfMajorityReligion,
    Unemployed,
    Unknown,
}

impl From<&str> for PopulationFilter {
    fn from(name: &str) -> Self {
        match name {
            "Specialists" => PopulationFilter::Specialists,
            "Population" => PopulationFilter::Population,
            "Followers of the Majority Religion" | "Followers of this Religion" => {
                PopulationFilter::FollowersOfMajorityReligion
            }
            "Unemployed" => PopulationFilter::Unemployed,
            _ => PopulationFilter::Unknown,
        }
    }
}

impl PopulationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger restored from saved values.
    pub fn restore(population: u32, food_stored: i32, specialist_allocations: RoleCounter) -> Self {
        Self {
            population,
            food_stored: food_stored.max(0),
            specialist_allocations,
        }
    }

    pub fn population(&self) -> u32 {
        self.population
    }

    pub fn specialist_count(&self) -> u32 {
        self.specialist_allocations.total()
    }

    /// Population not working a tile or a specialist slot. Negative while the
    /// settlement holds more jobs than people.
    pub fn free_population(&self, city: &dyn CityContext) -> i32 {
        self.population as i32 - city.worked_tiles().len() as i32 - self.specialist_count() as i32
    }

    /// Specialist capacity per role summed over built structures.
    pub fn max_specialists(&self, city: &dyn CityContext) -> RoleCounter {
        let mut counter = RoleCounter::new();
        for structure in city.built_structures() {
            counter.add_all(&structure.specialist_slots);
        }
        counter
    }

    pub fn population_filter_amount(&self, filter: &str, city: &dyn CityContext) -> i32 {
        match PopulationFilter::from(filter) {
            PopulationFilter::Specialists => self.specialist_count() as i32,
            PopulationFilter::Population => self.population as i32,
            PopulationFilter::FollowersOfMajorityReligion => {
                city.majority_religion_followers() as i32
            }
            PopulationFilter::Unemployed => self.free_population(city),
            PopulationFilter::Unknown => 0,
        }
    }

    /// Change population by `delta` (clamped so it never goes below 0), then
    /// bring worked tiles and specialists back in line with the new count.
    pub fn add_population(
        &mut self,
        delta: i32,
        city: &mut dyn CityContext,
        oracle: &dyn ValuationOracle,
    ) {
        let changed = if self.population as i64 + (delta as i64) < 0 {
            -(self.population as i32)
        } else {
            delta
        };
        self.population = self.population.saturating_add_signed(changed);

        #[cfg(feature = "instrument")]
        tracing::info!(
            target: "population",
            settlement_id = city.id().to_u64(),
            requested = delta,
            changed = changed,
            population = self.population,
        );

        if self.free_population(city) < 0 {
            self.unassign_extra(city, oracle);
        } else {
            self.auto_assign(city, oracle);
        }

        city.on_population_change(changed);
    }

    pub fn set_population(
        &mut self,
        value: u32,
        city: &mut dyn CityContext,
        oracle: &dyn ValuationOracle,
    ) {
        let delta = value as i64 - self.population as i64;
        self.add_population(delta.clamp(i32::MIN as i64, i32::MAX as i64) as i32, city, oracle);
    }
}
