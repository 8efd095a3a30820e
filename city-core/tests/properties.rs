//! Behavioral tests for the population ledger against a scripted settlement.
//!
//! The scripted context and oracle pin every score and food value, so each
//! test states exactly which job should be claimed or released.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

use city_core::{
    CityContext, CivId, GrowthModifiers, Notification, NotificationIcon, PopulationConfig,
    PopulationLedger, RoleCounter, SettlementId, Stats, Structure, TilePos, TileStatus,
    ValuationOracle,
};
use slotmap::KeyData;

// === TEST FIXTURES ===

struct ScriptedTile {
    yields: Stats,
    owner: CivId,
    locked: bool,
    worked_by: Option<SettlementId>,
}

/// Settlement whose map, structures and food balance are set by the test.
struct ScriptedCity {
    id: SettlementId,
    owner: CivId,
    config: PopulationConfig,
    modifiers: GrowthModifiers,
    tiles: BTreeMap<TilePos, ScriptedTile>,
    worked: Vec<TilePos>,
    structures: Vec<Structure>,
    manual: bool,
    stats: Stats,
    /// Overrides the computed net food when set.
    net_food: Option<i32>,
    carry_over: Vec<i32>,
    specialist_consumption: Vec<f64>,
    /// Extra tile food per specialist already placed.
    food_per_specialist: f64,
    followers: u32,
    notifications: Vec<Notification>,
    population_changes: Vec<i32>,
    citizens_stale: bool,
}

fn civ(n: u64) -> CivId {
    CivId::from(KeyData::from_ffi(n))
}

impl ScriptedCity {
    fn new() -> Self {
        Self {
            id: SettlementId::from(KeyData::from_ffi(1)),
            owner: civ(1),
            config: PopulationConfig::default(),
            modifiers: GrowthModifiers::default(),
            tiles: BTreeMap::new(),
            worked: Vec::new(),
            structures: Vec::new(),
            manual: false,
            stats: Stats::default(),
            net_food: None,
            carry_over: Vec::new(),
            specialist_consumption: Vec::new(),
            food_per_specialist: 0.0,
            followers: 0,
            notifications: Vec::new(),
            population_changes: Vec::new(),
            citizens_stale: false,
        }
    }

    fn with_tile(mut self, q: i32, r: i32, food: f64) -> Self {
        self.tiles.insert(
            TilePos::new(q, r),
            ScriptedTile {
                yields: Stats::food(food),
                owner: self.owner,
                locked: false,
                worked_by: None,
            },
        );
        self
    }

    fn with_slots(mut self, role: &str, count: u32) -> Self {
        self.structures
            .push(Structure::new(format!("{role} Guild")).with_slots(role, count));
        self
    }

    /// Mark a tile as already worked by this settlement.
    fn working(mut self, q: i32, r: i32) -> Self {
        let pos = TilePos::new(q, r);
        if let Some(tile) = self.tiles.get_mut(&pos) {
            tile.worked_by = Some(self.id);
        }
        self.worked.push(pos);
        self
    }

    fn lock(mut self, q: i32, r: i32) -> Self {
        if let Some(tile) = self.tiles.get_mut(&TilePos::new(q, r)) {
            tile.locked = true;
        }
        self
    }

    fn is_working(&self, q: i32, r: i32) -> bool {
        self.worked.contains(&TilePos::new(q, r))
    }
}

impl CityContext for ScriptedCity {
    fn id(&self) -> SettlementId {
        self.id
    }

    fn name(&self) -> &str {
        "Testville"
    }

    fn owner(&self) -> CivId {
        self.owner
    }

    fn center(&self) -> TilePos {
        TilePos::new(0, 0)
    }

    fn config(&self) -> &PopulationConfig {
        &self.config
    }

    fn growth_modifiers(&self) -> GrowthModifiers {
        self.modifiers
    }

    fn worked_tiles(&self) -> Vec<TilePos> {
        self.worked.clone()
    }

    fn work_tile(&mut self, tile: TilePos) {
        if let Some(t) = self.tiles.get_mut(&tile) {
            t.worked_by = Some(self.id);
        }
        self.worked.push(tile);
    }

    fn release_tile(&mut self, tile: TilePos) {
        if let Some(t) = self.tiles.get_mut(&tile) {
            t.worked_by = None;
        }
        self.worked.retain(|&t| t != tile);
    }

    fn workable_tiles(&self) -> Vec<TilePos> {
        self.tiles
            .iter()
            .filter(|(_, t)| t.owner == self.owner)
            .map(|(pos, _)| *pos)
            .collect()
    }

    fn tile_status(&self, tile: TilePos) -> TileStatus {
        let t = self.tiles.get(&tile);
        TileStatus {
            owner: t.map(|t| t.owner),
            working_settlement: t.and_then(|t| t.worked_by),
            locked: t.is_some_and(|t| t.locked),
            provides_yield: t.is_some_and(|t| t.worked_by.is_some()),
        }
    }

    fn tile_yields(&self, tile: TilePos, ledger: &PopulationLedger) -> Stats {
        let mut yields = self.tiles.get(&tile).map(|t| t.yields).unwrap_or_default();
        yields.food += self.food_per_specialist * ledger.specialist_count() as f64;
        yields
    }

    fn built_structures(&self) -> Vec<Structure> {
        self.structures.clone()
    }

    fn manual_specialists(&self) -> bool {
        self.manual
    }

    fn current_stats(&self) -> Stats {
        self.stats
    }

    fn recompute_stats(&mut self, ledger: &PopulationLedger) {
        let worked_food: f64 = self
            .worked
            .iter()
            .filter_map(|pos| self.tiles.get(pos))
            .map(|t| t.yields.food)
            .sum();
        self.stats = Stats::food(worked_food - 2.0 * ledger.population() as f64);
    }

    fn food_for_next_turn(&self) -> i32 {
        self.net_food.unwrap_or(self.stats.food.round() as i32)
    }

    fn carry_over_food_percents(&self) -> Vec<i32> {
        self.carry_over.clone()
    }

    fn specialist_food_consumption_percents(&self) -> Vec<f64> {
        self.specialist_consumption.clone()
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    fn mark_citizens_stale(&mut self) {
        self.citizens_stale = true;
    }

    fn on_population_change(&mut self, delta: i32) {
        self.population_changes.push(delta);
    }

    fn majority_religion_followers(&self) -> u32 {
        self.followers
    }
}

/// Fixed scores per tile and per role, independent of settlement stats.
#[derive(Default)]
struct ScriptedOracle {
    tiles: HashMap<TilePos, f64>,
    roles: HashMap<String, f64>,
}

impl ScriptedOracle {
    fn tile(mut self, q: i32, r: i32, score: f64) -> Self {
        self.tiles.insert(TilePos::new(q, r), score);
        self
    }

    fn role(mut self, role: &str, score: f64) -> Self {
        self.roles.insert(role.to_string(), score);
        self
    }
}

impl ValuationOracle for ScriptedOracle {
    fn rank_tile(&self, tile: TilePos, _tile_yields: &Stats, _city_stats: &Stats) -> f64 {
        self.tiles.get(&tile).copied().unwrap_or(0.0)
    }

    fn rank_specialist(&self, role: &str, _city_stats: &Stats) -> f64 {
        self.roles.get(role).copied().unwrap_or(0.0)
    }
}

/// Specialists are worth `fed` once the settlement's food is non-negative and
/// `hungry` before that.
struct HungerOracle {
    tiles: HashMap<TilePos, f64>,
    hungry: f64,
    fed: f64,
}

impl ValuationOracle for HungerOracle {
    fn rank_tile(&self, tile: TilePos, _tile_yields: &Stats, _city_stats: &Stats) -> f64 {
        self.tiles.get(&tile).copied().unwrap_or(0.0)
    }

    fn rank_specialist(&self, _role: &str, city_stats: &Stats) -> f64 {
        if city_stats.food >= 0.0 { self.fed } else { self.hungry }
    }
}

/// Tiles are worth their food; specialists a fixed score. Remembers the
/// settlement food seen by each tile ranking.
struct FoodOracle {
    specialist: f64,
    seen_food: RefCell<Vec<f64>>,
}

impl ValuationOracle for FoodOracle {
    fn rank_tile(&self, _tile: TilePos, tile_yields: &Stats, city_stats: &Stats) -> f64 {
        self.seen_food.borrow_mut().push(city_stats.food);
        tile_yields.food
    }

    fn rank_specialist(&self, _role: &str, _city_stats: &Stats) -> f64 {
        self.specialist
    }
}

fn ledger(population: u32, food_stored: i32) -> PopulationLedger {
    PopulationLedger::restore(population, food_stored, RoleCounter::new())
}

// === GROWTH ===

#[test]
fn growth_at_threshold_adds_population() {
    let mut city = ScriptedCity::new().with_tile(1, 0, 2.0);
    let oracle = ScriptedOracle::default().tile(1, 0, 1.0);
    let mut ledger = ledger(1, 14);

    ledger.apply_turn(1, &mut city, &oracle);

    assert_eq!(ledger.population(), 2);
    assert_eq!(ledger.food_stored, 0);
    assert_eq!(city.population_changes, vec![1]);
    assert!(city.citizens_stale);
    assert_eq!(city.notifications.len(), 1);
    assert_eq!(city.notifications[0].text, "[Testville] has grown!");
    assert_eq!(city.notifications[0].icons, vec![NotificationIcon::Growth]);
    // the new citizen went straight to work
    assert!(city.is_working(1, 0));
}

#[test]
fn growth_keeps_carry_over_share_of_threshold() {
    let mut city = ScriptedCity::new();
    city.carry_over = vec![50];
    let mut ledger = ledger(1, 14);

    ledger.apply_turn(3, &mut city, &ScriptedOracle::default());

    // 17 - 15 = 2 left, plus floor(15 * 50%) = 7
    assert_eq!(ledger.food_stored, 9);
    assert_eq!(ledger.population(), 2);
}

#[test]
fn below_threshold_only_stores_food() {
    let mut city = ScriptedCity::new();
    let mut ledger = ledger(1, 5);

    ledger.apply_turn(4, &mut city, &ScriptedOracle::default());

    assert_eq!(ledger.food_stored, 9);
    assert_eq!(ledger.population(), 1);
    assert!(city.notifications.is_empty());
    assert!(city.population_changes.is_empty());
}

// === STARVATION ===

#[test]
fn starvation_removes_one_population() {
    let mut city = ScriptedCity::new();
    let mut ledger = ledger(2, 0);

    ledger.apply_turn(-5, &mut city, &ScriptedOracle::default());

    assert_eq!(ledger.population(), 1);
    assert_eq!(ledger.food_stored, 0);
    assert_eq!(city.population_changes, vec![-1]);
    assert_eq!(city.notifications[0].text, "[Testville] is starving!");
    assert_eq!(
        city.notifications[0].icons,
        vec![NotificationIcon::Growth, NotificationIcon::Death]
    );
}

#[test]
fn starvation_never_kills_the_last_citizen() {
    let mut city = ScriptedCity::new();
    let mut ledger = ledger(1, 0);

    ledger.apply_turn(-5, &mut city, &ScriptedOracle::default());

    assert_eq!(ledger.population(), 1);
    assert_eq!(ledger.food_stored, 0);
    assert!(city.population_changes.is_empty());
}

#[test]
fn deficit_with_stores_warns_without_shrinking() {
    let mut city = ScriptedCity::new();
    let mut ledger = ledger(3, 10);

    ledger.apply_turn(-4, &mut city, &ScriptedOracle::default());

    assert_eq!(ledger.population(), 3);
    assert_eq!(ledger.food_stored, 6);
    assert_eq!(city.notifications.len(), 1);
}

// === PREDICTIONS ===

#[test]
fn turns_to_growth_rounds_up() {
    let mut city = ScriptedCity::new();
    city.net_food = Some(4);
    let ledger = ledger(1, 2);
    // 13 remaining at 4 per turn
    assert_eq!(ledger.turns_to_growth(&city), Some(4));
    assert_eq!(ledger.turns_to_starvation(&city), None);

    city.net_food = Some(0);
    assert_eq!(ledger.turns_to_growth(&city), None);
}

#[test]
fn turns_to_growth_is_at_least_one() {
    let mut city = ScriptedCity::new();
    city.net_food = Some(1);
    let ledger = ledger(1, 20);
    assert_eq!(ledger.turns_to_growth(&city), Some(1));
}

#[test]
fn turns_to_starvation_survives_extreme_deficit() {
    let mut city = ScriptedCity::new();
    city.net_food = Some(i32::MIN);
    let ledger = ledger(2, 10);
    assert_eq!(ledger.turns_to_starvation(&city), Some(1));
}

#[test]
fn turns_to_starvation_counts_the_empty_turn() {
    let mut city = ScriptedCity::new();
    city.net_food = Some(-4);
    let ledger = ledger(2, 10);
    assert_eq!(ledger.turns_to_starvation(&city), Some(3));
    assert_eq!(ledger.turns_to_growth(&city), None);
}

// === AUTO-ASSIGN ===

#[test]
fn better_tile_is_claimed_before_specialist() {
    let mut city = ScriptedCity::new()
        .with_tile(1, 0, 0.0)
        .with_slots("Scientist", 1);
    let oracle = ScriptedOracle::default()
        .tile(1, 0, 3.0)
        .role("Scientist", 2.0);
    let mut ledger = ledger(2, 0);

    ledger.auto_assign(&mut city, &oracle);

    assert!(city.is_working(1, 0));
    assert_eq!(ledger.specialist_allocations.get("Scientist"), 1);
    assert_eq!(ledger.free_population(&city), 0);
}

#[test]
fn specialist_wins_ties_against_tiles() {
    let mut city = ScriptedCity::new()
        .with_tile(1, 0, 0.0)
        .with_slots("Merchant", 1);
    let oracle = ScriptedOracle::default()
        .tile(1, 0, 2.0)
        .role("Merchant", 2.0);
    let mut ledger = ledger(1, 0);

    ledger.auto_assign(&mut city, &oracle);

    assert!(!city.is_working(1, 0));
    assert_eq!(ledger.specialist_allocations.get("Merchant"), 1);
}

#[test]
fn full_slots_are_not_offered() {
    let mut city = ScriptedCity::new()
        .with_tile(1, 0, 0.0)
        .with_slots("Scientist", 1);
    let oracle = ScriptedOracle::default()
        .tile(1, 0, 1.0)
        .role("Scientist", 5.0);
    let mut ledger = PopulationLedger::restore(2, 0, RoleCounter::from_iter([("Scientist", 1)]));

    ledger.auto_assign(&mut city, &oracle);

    assert_eq!(ledger.specialist_allocations.get("Scientist"), 1);
    assert!(city.is_working(1, 0));
}

#[test]
fn tiles_worked_elsewhere_are_skipped() {
    let other = SettlementId::from(KeyData::from_ffi(2));
    let mut city = ScriptedCity::new().with_tile(1, 0, 1.0).with_tile(2, 0, 1.0);
    if let Some(tile) = city.tiles.get_mut(&TilePos::new(1, 0)) {
        tile.worked_by = Some(other);
    }
    let oracle = ScriptedOracle::default().tile(1, 0, 9.0).tile(2, 0, 1.0);
    let mut ledger = ledger(1, 0);

    ledger.auto_assign(&mut city, &oracle);

    assert!(city.is_working(2, 0));
    assert!(!city.is_working(1, 0));
}

#[test]
fn food_tile_rescores_specialists() {
    let oracle = HungerOracle {
        tiles: HashMap::from([(TilePos::new(1, 0), 3.0), (TilePos::new(2, 0), 1.5)]),
        hungry: 1.0,
        fed: 5.0,
    };

    // 2 citizens eat 4; the farm brings the settlement to 0 and makes the
    // scientist worth more than the second tile.
    let mut city = ScriptedCity::new()
        .with_tile(1, 0, 4.0)
        .with_tile(2, 0, 0.0)
        .with_slots("Scientist", 1);
    let mut fed = ledger(2, 0);
    fed.auto_assign(&mut city, &oracle);
    assert!(city.is_working(1, 0));
    assert!(!city.is_working(2, 0));
    assert_eq!(fed.specialist_allocations.get("Scientist"), 1);

    // A tile without food leaves specialist scores as they were.
    let mut city = ScriptedCity::new()
        .with_tile(1, 0, 0.0)
        .with_tile(2, 0, 0.0)
        .with_slots("Scientist", 1);
    let mut hungry = ledger(2, 0);
    hungry.auto_assign(&mut city, &oracle);
    assert!(city.is_working(1, 0));
    assert!(city.is_working(2, 0));
    assert_eq!(hungry.specialist_count(), 0);
}

#[test]
fn specialist_refreshes_tile_yields_and_feeds_stats() {
    let oracle = FoodOracle {
        specialist: 2.0,
        seen_food: RefCell::new(Vec::new()),
    };
    let mut city = ScriptedCity::new()
        .with_tile(1, 0, 1.0)
        .with_slots("Scientist", 2);
    city.food_per_specialist = 2.0;
    city.specialist_consumption = vec![-50.0];
    let mut ledger = ledger(2, 0);

    ledger.auto_assign(&mut city, &oracle);

    // 1 food loses to the scientist; with one scientist placed the tile
    // yields 3 and beats the second slot.
    assert_eq!(ledger.specialist_allocations.get("Scientist"), 1);
    assert!(city.is_working(1, 0));
    // starts at -4 (two citizens eating), then +1 from the half-eating specialist
    assert_eq!(*oracle.seen_food.borrow(), vec![-4.0, -3.0]);
}

#[test]
fn nothing_assignable_leaves_population_idle() {
    let mut city = ScriptedCity::new();
    let mut ledger = ledger(3, 0);

    ledger.auto_assign(&mut city, &ScriptedOracle::default());

    assert_eq!(ledger.free_population(&city), 3);
    assert_eq!(ledger.population_filter_amount("Unemployed", &city), 3);
}

#[test]
fn manual_mode_never_adds_specialists() {
    let mut city = ScriptedCity::new().with_slots("Scientist", 2);
    city.manual = true;
    let oracle = ScriptedOracle::default().role("Scientist", 5.0);
    let mut ledger = ledger(2, 0);

    ledger.auto_assign(&mut city, &oracle);

    assert_eq!(ledger.specialist_count(), 0);
}

// === UNASSIGN ===

#[test]
fn lowest_scoring_job_is_released_first() {
    let mut city = ScriptedCity::new()
        .with_tile(1, 0, 1.0)
        .with_tile(2, 0, 1.0)
        .working(1, 0)
        .working(2, 0);
    let oracle = ScriptedOracle::default().tile(1, 0, 4.0).tile(2, 0, 1.0);
    let mut ledger = ledger(1, 0);

    ledger.unassign_extra(&mut city, &oracle);

    assert!(city.is_working(1, 0));
    assert!(!city.is_working(2, 0));
    assert_eq!(ledger.free_population(&city), 0);
}

#[test]
fn specialist_released_when_cheaper_than_worst_tile() {
    let mut city = ScriptedCity::new()
        .with_tile(1, 0, 1.0)
        .working(1, 0)
        .with_slots("Artist", 1);
    let oracle = ScriptedOracle::default().tile(1, 0, 3.0).role("Artist", 1.0);
    let mut ledger = PopulationLedger::restore(1, 0, RoleCounter::from_iter([("Artist", 1)]));

    ledger.unassign_extra(&mut city, &oracle);

    assert!(city.is_working(1, 0));
    assert_eq!(ledger.specialist_count(), 0);
}

#[test]
fn locked_tiles_are_released_last() {
    let build = || {
        ScriptedCity::new()
            .with_tile(1, 0, 1.0)
            .with_tile(2, 0, 1.0)
            .working(1, 0)
            .working(2, 0)
            .lock(1, 0)
    };
    let oracle = ScriptedOracle::default().tile(1, 0, 1.0).tile(2, 0, 2.0);

    let mut city = build();
    let mut protected = ledger(1, 0);
    protected.unassign_extra(&mut city, &oracle);
    assert!(city.is_working(1, 0), "locked tile should survive");
    assert!(!city.is_working(2, 0));

    let mut city = build();
    city.config.protect_locked_tiles = false;
    let mut unprotected = ledger(1, 0);
    unprotected.unassign_extra(&mut city, &oracle);
    assert!(!city.is_working(1, 0));
    assert!(city.is_working(2, 0));
}

#[test]
fn locked_tile_competes_with_specialists_on_plain_score() {
    let mut city = ScriptedCity::new()
        .with_tile(1, 0, 1.0)
        .working(1, 0)
        .lock(1, 0)
        .with_slots("Scientist", 1);
    let oracle = ScriptedOracle::default()
        .tile(1, 0, 1.0)
        .role("Scientist", 2.0);
    let mut ledger = PopulationLedger::restore(1, 0, RoleCounter::from_iter([("Scientist", 1)]));

    ledger.unassign_extra(&mut city, &oracle);

    assert!(!city.is_working(1, 0));
    assert_eq!(ledger.specialist_allocations.get("Scientist"), 1);
}

#[test]
fn foreign_tiles_are_released_even_without_deficit() {
    let mut city = ScriptedCity::new()
        .with_tile(1, 0, 1.0)
        .with_tile(2, 0, 1.0)
        .working(1, 0)
        .working(2, 0);
    if let Some(tile) = city.tiles.get_mut(&TilePos::new(2, 0)) {
        tile.owner = civ(2);
    }
    let mut ledger = ledger(5, 0);

    ledger.unassign_extra(&mut city, &ScriptedOracle::default());

    assert!(city.is_working(1, 0));
    assert!(!city.is_working(2, 0));
}

#[test]
fn out_of_range_tiles_are_released() {
    let mut city = ScriptedCity::new().with_tile(5, 0, 1.0).working(5, 0);
    let mut ledger = ledger(1, 0);

    ledger.unassign_extra(&mut city, &ScriptedOracle::default());

    assert!(city.worked.is_empty());
}

#[test]
fn allocations_over_capacity_are_clamped() {
    let mut city = ScriptedCity::new().with_slots("Engineer", 1);
    let mut ledger = PopulationLedger::restore(
        5,
        0,
        RoleCounter::from_iter([("Engineer", 3), ("Scientist", 2)]),
    );

    ledger.unassign_extra(&mut city, &ScriptedOracle::default());

    assert_eq!(ledger.specialist_allocations.get("Engineer"), 1);
    assert_eq!(ledger.specialist_allocations.get("Scientist"), 0);
    assert!(ledger.free_population(&city) >= 0);
}

#[test]
fn manual_specialists_still_shed_under_deficit() {
    let mut city = ScriptedCity::new().with_slots("Scientist", 3);
    city.manual = true;
    let mut ledger = PopulationLedger::restore(1, 0, RoleCounter::from_iter([("Scientist", 3)]));

    ledger.unassign_extra(&mut city, &ScriptedOracle::default());

    assert_eq!(ledger.specialist_allocations.get("Scientist"), 1);
    assert_eq!(ledger.free_population(&city), 0);
}

// === POPULATION CHANGES ===

#[test]
fn add_population_clamps_at_zero() {
    let mut city = ScriptedCity::new().with_tile(1, 0, 1.0).working(1, 0);
    let mut ledger = ledger(2, 0);

    ledger.add_population(-5, &mut city, &ScriptedOracle::default());

    assert_eq!(ledger.population(), 0);
    assert_eq!(city.population_changes, vec![-2]);
    assert!(city.worked.is_empty());
}

#[test]
fn set_population_assigns_new_citizens() {
    let mut city = ScriptedCity::new()
        .with_tile(1, 0, 1.0)
        .with_tile(2, 0, 1.0)
        .with_slots("Scientist", 1);
    let oracle = ScriptedOracle::default()
        .tile(1, 0, 3.0)
        .tile(2, 0, 2.0)
        .role("Scientist", 1.0);
    let mut ledger = ledger(1, 0);
    ledger.auto_assign(&mut city, &oracle);
    assert!(city.is_working(1, 0));

    ledger.set_population(4, &mut city, &oracle);

    assert_eq!(ledger.population(), 4);
    assert_eq!(city.population_changes, vec![3]);
    assert!(city.is_working(2, 0));
    assert_eq!(ledger.specialist_allocations.get("Scientist"), 1);
    assert_eq!(ledger.free_population(&city), 1);
}

#[test]
fn filters_read_ledger_and_context() {
    let mut city = ScriptedCity::new().with_tile(1, 0, 1.0).working(1, 0);
    city.followers = 2;
    let ledger = PopulationLedger::restore(4, 0, RoleCounter::from_iter([("Merchant", 1)]));

    assert_eq!(ledger.population_filter_amount("Population", &city), 4);
    assert_eq!(ledger.population_filter_amount("Specialists", &city), 1);
    assert_eq!(ledger.population_filter_amount("Unemployed", &city), 2);
    assert_eq!(
        ledger.population_filter_amount("Followers of the Majority Religion", &city),
        2
    );
    assert_eq!(ledger.population_filter_amount("Wonders", &city), 0);
}
