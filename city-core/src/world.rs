// Reference world: hex tile map, civilizations and settlements, implementing
// the collaborator traits the population ledger runs against.

use std::collections::{BTreeSet, HashMap};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use slotmap::SlotMap;

use crate::allocation::specialist_food_bonus;
use crate::config::{GrowthModifiers, PopulationConfig};
use crate::context::{CityContext, Notification, Structure, TileStatus, ValuationOracle};
use crate::counter::RoleCounter;
use crate::oracle::default_specialists;
use crate::population::PopulationLedger;
use crate::types::{CivId, SettlementId, Stats, TilePos};

// === CONSTANTS ===

/// Food every citizen eats per turn.
pub const FOOD_EATEN_PER_CITIZEN: f64 = 2.0;
/// Ring of tiles a new settlement claims around its center.
pub const FOUNDING_CLAIM_RADIUS: u32 = 1;

// === MAP ===

#[derive(Debug, Clone, Default)]
pub struct Tile {
    pub yields: Stats,
    pub owner: Option<CivId>,
    pub working_settlement: Option<SettlementId>,
    pub locked: bool,
}

// === CIVILIZATIONS ===

#[derive(Debug, Clone)]
pub struct Civ {
    pub name: String,
    pub is_human: bool,
    pub is_city_state: bool,
    pub notifications: Vec<Notification>,
}

/// Game-wide rules looked up per query.
#[derive(Debug, Clone)]
pub struct GameSettings {
    pub speed: f64,
    /// Difficulty growth modifier for AI-owned settlements.
    pub ai_growth: f64,
    pub religion_enabled: bool,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            speed: 1.0,
            ai_growth: 1.0,
            religion_enabled: true,
        }
    }
}

// === SETTLEMENTS ===

/// Tile bonus granted while the settlement has at least `min_specialists`.
#[derive(Debug, Clone)]
pub struct SpecialistTileBonus {
    pub min_specialists: u32,
    pub bonus: Stats,
}

/// Everything about a settlement except its population ledger.
#[derive(Debug, Clone)]
pub struct CityState {
    pub name: String,
    pub owner: CivId,
    pub center: TilePos,
    pub worked_tiles: BTreeSet<TilePos>,
    pub structures: Vec<Structure>,
    pub manual_specialists: bool,
    pub stats: Stats,
    /// Citizen display needs refreshing.
    pub update_citizens: bool,
    pub majority_followers: u32,
    pub carry_over_food: Vec<i32>,
    pub specialist_food_consumption: Vec<f64>,
    pub tile_bonuses: Vec<SpecialistTileBonus>,
}

#[derive(Debug, Clone)]
pub struct City {
    pub population: PopulationLedger,
    pub state: CityState,
}

/// Borrowed view of one settlement and the world around it.
pub struct CityView<'a> {
    id: SettlementId,
    state: &'a mut CityState,
    civ: &'a mut Civ,
    tiles: &'a mut HashMap<TilePos, Tile>,
    config: &'a PopulationConfig,
    settings: &'a GameSettings,
    specialist_yields: &'a HashMap<String, Stats>,
}

impl CityContext for CityView<'_> {
    fn id(&self) -> SettlementId {
        self.id
    }

    fn name(&self) -> &str {
        &self.state.name
    }

    fn owner(&self) -> CivId {
        self.state.owner
    }

    fn center(&self) -> TilePos {
        self.state.center
    }

    fn config(&self) -> &PopulationConfig {
        self.config
    }

    fn growth_modifiers(&self) -> GrowthModifiers {
        GrowthModifiers {
            speed: self.settings.speed,
            ai_growth: self.settings.ai_growth,
            is_city_state: self.civ.is_city_state,
            is_human: self.civ.is_human,
        }
    }

    fn worked_tiles(&self) -> Vec<TilePos> {
        self.state.worked_tiles.iter().copied().collect()
    }

    fn work_tile(&mut self, tile: TilePos) {
        self.state.worked_tiles.insert(tile);
        self.tiles.entry(tile).or_default().working_settlement = Some(self.id);
    }

    fn release_tile(&mut self, tile: TilePos) {
        self.state.worked_tiles.remove(&tile);
        if let Some(t) = self.tiles.get_mut(&tile) {
            if t.working_settlement == Some(self.id) {
                t.working_settlement = None;
            }
        }
    }

    fn workable_tiles(&self) -> Vec<TilePos> {
        let owner = Some(self.state.owner);
        let mut tiles: Vec<TilePos> = self
            .state
            .center
            .within(self.config.work_radius)
            .filter(|pos| *pos != self.state.center)
            .filter(|pos| self.tiles.get(pos).is_some_and(|t| t.owner == owner))
            .collect();
        tiles.sort();
        tiles
    }

    fn tile_status(&self, tile: TilePos) -> TileStatus {
        match self.tiles.get(&tile) {
            Some(t) => TileStatus {
                owner: t.owner,
                working_settlement: t.working_settlement,
                locked: t.locked,
                provides_yield: t.working_settlement.is_some(),
            },
            None => TileStatus {
                owner: None,
                working_settlement: None,
                locked: false,
                provides_yield: false,
            },
        }
    }

    fn tile_yields(&self, tile: TilePos, ledger: &PopulationLedger) -> Stats {
        let mut yields = self.tiles.get(&tile).map(|t| t.yields).unwrap_or_default();
        if tile != self.state.center {
            let specialists = ledger.specialist_count();
            for bonus in &self.state.tile_bonuses {
                if specialists >= bonus.min_specialists {
                    yields += bonus.bonus;
                }
            }
        }
        yields
    }

    fn built_structures(&self) -> Vec<Structure> {
        self.state.structures.clone()
    }

    fn manual_specialists(&self) -> bool {
        self.state.manual_specialists
    }

    fn current_stats(&self) -> Stats {
        self.state.stats
    }

    fn recompute_stats(&mut self, ledger: &PopulationLedger) {
        let mut stats = self.tile_yields(self.state.center, ledger);
        for &tile in &self.state.worked_tiles {
            stats += self.tile_yields(tile, ledger);
        }
        for (role, count) in ledger.specialist_allocations.iter() {
            if let Some(yields) = self.specialist_yields.get(role) {
                stats += yields.scaled(count as f64);
            }
        }
        let bonus = specialist_food_bonus(
            self.config.specialist_base_food,
            &self.state.specialist_food_consumption,
        );
        stats.food -= FOOD_EATEN_PER_CITIZEN * ledger.population() as f64
            - bonus * ledger.specialist_count() as f64;
        self.state.stats = stats;
    }

    fn food_for_next_turn(&self) -> i32 {
        self.state.stats.food.round() as i32
    }

    fn carry_over_food_percents(&self) -> Vec<i32> {
        self.state.carry_over_food.clone()
    }

    fn specialist_food_consumption_percents(&self) -> Vec<f64> {
        self.state.specialist_food_consumption.clone()
    }

    fn notify(&mut self, notification: Notification) {
        self.civ.notifications.push(notification);
    }

    fn mark_citizens_stale(&mut self) {
        self.state.update_citizens = true;
    }

    fn on_population_change(&mut self, delta: i32) {
        if self.settings.religion_enabled {
            self.state.majority_followers = self.state.majority_followers.saturating_add_signed(delta);
        }
    }

    fn majority_religion_followers(&self) -> u32 {
        self.state.majority_followers
    }
}

// === WORLD ===

#[derive(Debug, Clone)]
pub struct World {
    pub turn: u64,
    pub config: PopulationConfig,
    pub settings: GameSettings,
    pub tiles: HashMap<TilePos, Tile>,
    pub civs: SlotMap<CivId, Civ>,
    pub cities: SlotMap<SettlementId, City>,
    /// Yields of one specialist of each role.
    pub specialist_yields: HashMap<String, Stats>,
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

impl World {
    pub fn new() -> Self {
        Self::with_config(PopulationConfig::default())
    }

    pub fn with_config(config: PopulationConfig) -> Self {
        Self {
            turn: 0,
            config,
            settings: GameSettings::default(),
            tiles: HashMap::new(),
            civs: SlotMap::with_key(),
            cities: SlotMap::with_key(),
            specialist_yields: default_specialists(),
        }
    }

    // === Map ===

    pub fn set_tile(&mut self, pos: TilePos, yields: Stats) {
        self.tiles.entry(pos).or_default().yields = yields;
    }

    /// Fill a hex of `radius` around the origin with random yields.
    pub fn generate_terrain(&mut self, seed: u64, radius: u32) {
        let mut rng = StdRng::seed_from_u64(seed);
        for pos in TilePos::new(0, 0).within(radius) {
            let yields = Stats {
                food: rng.random_range(0..=3) as f64,
                production: rng.random_range(0..=2) as f64,
                gold: rng.random_range(0..=1) as f64,
                ..Default::default()
            };
            self.set_tile(pos, yields);
        }
    }

    /// Change who owns `pos`. Whoever works it keeps working it until their
    /// next cleanup pass.
    pub fn transfer_tile(&mut self, pos: TilePos, owner: Option<CivId>) {
        self.tiles.entry(pos).or_default().owner = owner;
    }

    pub fn set_locked(&mut self, pos: TilePos, locked: bool) {
        self.tiles.entry(pos).or_default().locked = locked;
    }

    // === Civilizations ===

    pub fn add_civ(&mut self, name: impl Into<String>, is_human: bool, is_city_state: bool) -> CivId {
        self.civs.insert(Civ {
            name: name.into(),
            is_human,
            is_city_state,
            notifications: Vec::new(),
        })
    }

    pub fn notifications(&self, civ: CivId) -> &[Notification] {
        self.civs
            .get(civ)
            .map(|c| c.notifications.as_slice())
            .unwrap_or(&[])
    }

    // === Settlements ===

    /// Found a settlement at `center` for `owner`, claiming unowned tiles in
    /// the first ring. Returns `None` if `owner` doesn't exist.
    pub fn found_city(
        &mut self,
        name: impl Into<String>,
        owner: CivId,
        center: TilePos,
    ) -> Option<SettlementId> {
        if !self.civs.contains_key(owner) {
            return None;
        }

        let id = self.cities.insert(City {
            population: PopulationLedger::new(),
            state: CityState {
                name: name.into(),
                owner,
                center,
                worked_tiles: BTreeSet::new(),
                structures: Vec::new(),
                manual_specialists: false,
                stats: Stats::default(),
                update_citizens: false,
                majority_followers: 0,
                carry_over_food: Vec::new(),
                specialist_food_consumption: Vec::new(),
                tile_bonuses: Vec::new(),
            },
        });

        for pos in center.within(FOUNDING_CLAIM_RADIUS) {
            let tile = self.tiles.entry(pos).or_default();
            if tile.owner.is_none() {
                tile.owner = Some(owner);
            }
        }
        let center_tile = self.tiles.entry(center).or_default();
        center_tile.owner = Some(owner);
        center_tile.working_settlement = Some(id);

        Some(id)
    }

    pub fn city(&self, id: SettlementId) -> Option<&City> {
        self.cities.get(id)
    }

    pub fn city_mut(&mut self, id: SettlementId) -> Option<&mut City> {
        self.cities.get_mut(id)
    }

    /// Claim every tile within `radius` of the settlement center for its
    /// owner, taking them from whoever held them.
    pub fn expand_borders(&mut self, id: SettlementId, radius: u32) -> Option<()> {
        let city = self.cities.get(id)?;
        let (owner, center) = (city.state.owner, city.state.center);
        for pos in center.within(radius) {
            if let Some(tile) = self.tiles.get_mut(&pos) {
                tile.owner = Some(owner);
            }
        }
        Some(())
    }

    pub fn add_structure(&mut self, id: SettlementId, structure: Structure) -> Option<()> {
        self.cities.get_mut(id)?.state.structures.push(structure);
        Some(())
    }

    /// Remove the first structure called `name`. Returns whether one existed.
    pub fn remove_structure(&mut self, id: SettlementId, name: &str) -> bool {
        let Some(city) = self.cities.get_mut(id) else {
            return false;
        };
        match city.state.structures.iter().position(|s| s.name == name) {
            Some(index) => {
                city.state.structures.remove(index);
                true
            }
            None => false,
        }
    }

    pub fn set_manual_specialists(&mut self, id: SettlementId, manual: bool) -> Option<()> {
        self.cities.get_mut(id)?.state.manual_specialists = manual;
        Some(())
    }

    /// Run `f` against a settlement's ledger and a view of its surroundings.
    pub fn with_city<R>(
        &mut self,
        id: SettlementId,
        f: impl FnOnce(&mut PopulationLedger, &mut CityView<'_>) -> R,
    ) -> Option<R> {
        let World {
            tiles,
            civs,
            cities,
            config,
            settings,
            specialist_yields,
            ..
        } = self;
        let city = cities.get_mut(id)?;
        let civ = civs.get_mut(city.state.owner)?;
        let mut view = CityView {
            id,
            state: &mut city.state,
            civ,
            tiles,
            config,
            settings,
            specialist_yields,
        };
        Some(f(&mut city.population, &mut view))
    }

    // === Ledger operations ===

    pub fn add_population(
        &mut self,
        id: SettlementId,
        delta: i32,
        oracle: &dyn ValuationOracle,
    ) -> Option<()> {
        self.with_city(id, |ledger, view| ledger.add_population(delta, view, oracle))
    }

    pub fn set_population(
        &mut self,
        id: SettlementId,
        value: u32,
        oracle: &dyn ValuationOracle,
    ) -> Option<()> {
        self.with_city(id, |ledger, view| ledger.set_population(value, view, oracle))
    }

    pub fn auto_assign(&mut self, id: SettlementId, oracle: &dyn ValuationOracle) -> Option<()> {
        self.with_city(id, |ledger, view| ledger.auto_assign(view, oracle))
    }

    pub fn unassign_extra(&mut self, id: SettlementId, oracle: &dyn ValuationOracle) -> Option<()> {
        self.with_city(id, |ledger, view| ledger.unassign_extra(view, oracle))
    }

    pub fn rebalance(&mut self, id: SettlementId, oracle: &dyn ValuationOracle) -> Option<()> {
        self.with_city(id, |ledger, view| ledger.rebalance(view, oracle))
    }

    pub fn apply_turn(
        &mut self,
        id: SettlementId,
        food_delta: i32,
        oracle: &dyn ValuationOracle,
    ) -> Option<()> {
        self.with_city(id, |ledger, view| ledger.apply_turn(food_delta, view, oracle))
    }

    /// One settlement's turn: apply this turn's net food, then reallocate.
    pub fn city_turn(&mut self, id: SettlementId, oracle: &dyn ValuationOracle) -> Option<()> {
        self.with_city(id, |ledger, view| {
            view.recompute_stats(ledger);
            let food = view.food_for_next_turn();
            ledger.apply_turn(food, view, oracle);
            ledger.rebalance(view, oracle);
            view.recompute_stats(ledger);
        })
    }

    /// Advance every settlement one turn, one at a time.
    pub fn end_turn(&mut self, oracle: &dyn ValuationOracle) {
        self.turn += 1;
        let ids: Vec<SettlementId> = self.cities.keys().collect();
        for id in ids {
            self.city_turn(id, oracle);
        }
    }

    // === Queries ===

    pub fn free_population(&mut self, id: SettlementId) -> Option<i32> {
        self.with_city(id, |ledger, view| ledger.free_population(view))
    }

    pub fn max_specialists(&mut self, id: SettlementId) -> Option<RoleCounter> {
        self.with_city(id, |ledger, view| ledger.max_specialists(view))
    }

    pub fn food_to_next_population(&mut self, id: SettlementId) -> Option<i32> {
        self.with_city(id, |ledger, view| ledger.food_to_next_population(view))
    }

    pub fn turns_to_growth(&mut self, id: SettlementId) -> Option<u32> {
        self.with_city(id, |ledger, view| ledger.turns_to_growth(view))
            .flatten()
    }

    pub fn turns_to_starvation(&mut self, id: SettlementId) -> Option<u32> {
        self.with_city(id, |ledger, view| ledger.turns_to_starvation(view))
            .flatten()
    }

    pub fn population_filter_amount(&mut self, id: SettlementId, filter: &str) -> Option<i32> {
        self.with_city(id, |ledger, view| ledger.population_filter_amount(filter, view))
    }

    pub fn recompute_stats(&mut self, id: SettlementId) -> Option<Stats> {
        self.with_city(id, |ledger, view| {
            view.recompute_stats(ledger);
            view.current_stats()
        })
    }
}
