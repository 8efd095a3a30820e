use serde::{Deserialize, Serialize};
use tsify_next::Tsify;

use crate::context::{CityContext, Notification};
use crate::types::{KeyToU64, SettlementId, Stats, TilePos};
use crate::world::World;

// ============================================================================
// Serializable State Snapshot for JS
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct StateSnapshot {
    pub turn: u64,
    pub cities: Vec<CitySnapshot>,
    pub notifications: Vec<Notification>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct SpecialistSnapshot {
    pub role: String,
    pub count: u32,
    pub max: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi)]
pub struct CitySnapshot {
    pub id: u64,
    pub name: String,
    pub population: u32,
    pub food_stored: i32,
    pub food_to_next_population: i32,
    pub free_population: i32,
    pub turns_to_growth: Option<u32>,
    pub turns_to_starvation: Option<u32>,
    pub manual_specialists: bool,
    pub specialists: Vec<SpecialistSnapshot>,
    pub worked_tiles: Vec<TilePos>,
    pub stats: Stats,
}

impl World {
    /// Snapshot of every settlement for rendering. Refreshes each settlement's
    /// stats first so the predictions match the current allocation.
    pub fn snapshot(&mut self) -> StateSnapshot {
        let ids: Vec<SettlementId> = self.cities.keys().collect();
        let cities = ids
            .into_iter()
            .filter_map(|id| self.city_snapshot(id))
            .collect();
        let notifications = self
            .civs
            .values()
            .filter(|civ| civ.is_human)
            .flat_map(|civ| civ.notifications.iter().cloned())
            .collect();

        StateSnapshot {
            turn: self.turn,
            cities,
            notifications,
        }
    }

    pub fn city_snapshot(&mut self, id: SettlementId) -> Option<CitySnapshot> {
        self.with_city(id, |ledger, view| {
            view.recompute_stats(ledger);

            let max = ledger.max_specialists(view);
            let mut specialists: Vec<SpecialistSnapshot> = max
                .iter()
                .map(|(role, max)| SpecialistSnapshot {
                    role: role.to_string(),
                    count: ledger.specialist_allocations.get(role),
                    max,
                })
                .collect();
            // Manually placed specialists can outlive their slots.
            for (role, count) in ledger.specialist_allocations.iter() {
                if max.get(role) == 0 {
                    specialists.push(SpecialistSnapshot {
                        role: role.to_string(),
                        count,
                        max: 0,
                    });
                }
            }

            CitySnapshot {
                id: id.to_u64(),
                name: view.name().to_string(),
                population: ledger.population(),
                food_stored: ledger.food_stored,
                food_to_next_population: ledger.food_to_next_population(view),
                free_population: ledger.free_population(view),
                turns_to_growth: ledger.turns_to_growth(view),
                turns_to_starvation: ledger.turns_to_starvation(view),
                manual_specialists: view.manual_specialists(),
                specialists,
                worked_tiles: view.worked_tiles(),
                stats: view.current_stats(),
            }
        })
    }
}
