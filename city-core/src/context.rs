//! Collaborator seams for the population ledger.
//!
//! The ledger only owns counts. Everything it needs to know about the map,
//! the built structures, the settlement's aggregate stats and the scoring
//! heuristic comes through the two traits here, so the allocation passes can
//! run against the reference [`World`](crate::world::World) or against a
//! scripted stand-in in tests.

use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

use crate::config::{GrowthModifiers, PopulationConfig};
use crate::counter::RoleCounter;
use crate::population::PopulationLedger;
use crate::types::{CivId, SettlementId, Stats, TilePos};

/// Scores candidate assignments. Higher is better.
///
/// Implementations must be pure functions of their arguments: the allocation
/// passes call them repeatedly while mutating the stats they pass in.
pub trait ValuationOracle {
    fn rank_tile(&self, tile: TilePos, tile_yields: &Stats, city_stats: &Stats) -> f64;
    fn rank_specialist(&self, role: &str, city_stats: &Stats) -> f64;
}

/// Map-side facts about one tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileStatus {
    pub owner: Option<CivId>,
    pub working_settlement: Option<SettlementId>,
    pub locked: bool,
    /// Already yielding for some settlement (worked, or a settlement center).
    pub provides_yield: bool,
}

/// A built structure and the specialist slots it grants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Structure {
    pub name: String,
    pub specialist_slots: RoleCounter,
}

impl Structure {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            specialist_slots: RoleCounter::new(),
        }
    }

    pub fn with_slots(mut self, role: &str, count: u32) -> Self {
        self.specialist_slots.add(role, count as i32);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub enum NotificationCategory {
    Cities,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub enum NotificationIcon {
    Growth,
    Death,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct Notification {
    pub text: String,
    pub location: TilePos,
    pub category: NotificationCategory,
    pub icons: Vec<NotificationIcon>,
}

impl Notification {
    pub fn starving(name: &str, location: TilePos) -> Self {
        Self {
            text: format!("[{name}] is starving!"),
            location,
            category: NotificationCategory::Cities,
            icons: vec![NotificationIcon::Growth, NotificationIcon::Death],
        }
    }

    pub fn grown(name: &str, location: TilePos) -> Self {
        Self {
            text: format!("[{name}] has grown!"),
            location,
            category: NotificationCategory::Cities,
            icons: vec![NotificationIcon::Growth],
        }
    }
}

/// The settlement a [`PopulationLedger`] belongs to.
///
/// Passed by reference into every ledger operation; the ledger never keeps
/// hold of it.
pub trait CityContext {
    fn id(&self) -> SettlementId;
    fn name(&self) -> &str;
    fn owner(&self) -> CivId;
    fn center(&self) -> TilePos;
    fn config(&self) -> &PopulationConfig;
    fn growth_modifiers(&self) -> GrowthModifiers;

    // --- tiles ---
    fn worked_tiles(&self) -> Vec<TilePos>;
    /// Claim `tile` for this settlement.
    fn work_tile(&mut self, tile: TilePos);
    /// Drop `tile` from the worked set.
    fn release_tile(&mut self, tile: TilePos);
    /// Tiles this settlement may legally work, worked or not.
    fn workable_tiles(&self) -> Vec<TilePos>;
    fn tile_status(&self, tile: TilePos) -> TileStatus;
    /// Yields `tile` would give this settlement with the allocations in
    /// `ledger`. Potentially expensive.
    fn tile_yields(&self, tile: TilePos, ledger: &PopulationLedger) -> Stats;

    // --- structures and specialists ---
    fn built_structures(&self) -> Vec<Structure>;
    fn manual_specialists(&self) -> bool;

    // --- aggregate stats ---
    fn current_stats(&self) -> Stats;
    fn recompute_stats(&mut self, ledger: &PopulationLedger);
    /// Rounded net food of the current stats.
    fn food_for_next_turn(&self) -> i32;

    // --- modifiers ---
    /// Percent parameters of carry-over-food modifiers applying here.
    fn carry_over_food_percents(&self) -> Vec<i32>;
    /// Percent parameters of specialist-food-consumption modifiers applying
    /// here (e.g. -50 halves what specialists eat).
    fn specialist_food_consumption_percents(&self) -> Vec<f64>;

    // --- side effects ---
    fn notify(&mut self, notification: Notification);
    fn mark_citizens_stale(&mut self);
    fn on_population_change(&mut self, delta: i32);
    fn majority_religion_followers(&self) -> u32;
}
