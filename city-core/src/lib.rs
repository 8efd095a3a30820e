use wasm_bindgen::prelude::*;

mod allocation;
mod config;
mod context;
mod counter;
mod growth;
mod oracle;
mod population;
mod state;
mod types;
mod world;

pub use allocation::*;
pub use config::*;
pub use context::*;
pub use counter::*;
pub use growth::*;
pub use oracle::*;
pub use population::*;
pub use state::*;
pub use types::*;
pub use world::*;

#[cfg(feature = "instrument")]
pub use instrument;

// ============================================================================
// WASM API - Simulation
// ============================================================================

#[wasm_bindgen]
pub struct Simulation {
    world: World,
    oracle: YieldOracle,
}

#[wasm_bindgen]
impl Simulation {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        // Better panic messages in browser console
        console_error_panic_hook::set_once();

        Self {
            world: World::new(),
            oracle: YieldOracle::default(),
        }
    }

    /// Create a simulation with a test scenario
    #[wasm_bindgen]
    pub fn with_test_scenario() -> Self {
        let mut sim = Self::new();
        sim.setup_test_scenario();
        sim
    }

    /// Advance every settlement by one turn
    #[wasm_bindgen]
    pub fn advance_turn(&mut self) {
        self.world.end_turn(&self.oracle);
    }

    #[wasm_bindgen]
    pub fn get_turn(&self) -> u64 {
        self.world.turn
    }

    /// Get a snapshot of the current state for rendering
    #[wasm_bindgen]
    pub fn get_state_snapshot(&mut self) -> StateSnapshot {
        self.world.snapshot()
    }

    /// Toggle manual specialist control and reallocate. Returns false for an
    /// unknown settlement.
    #[wasm_bindgen]
    pub fn set_manual_specialists(&mut self, city_id: u64, manual: bool) -> bool {
        let id = SettlementId::from(slotmap::KeyData::from_ffi(city_id));
        if self.world.set_manual_specialists(id, manual).is_none() {
            return false;
        }
        self.world.rebalance(id, &self.oracle).is_some()
    }

    /// Replace the population config with a JS object. Missing fields keep
    /// their defaults.
    #[wasm_bindgen]
    pub fn load_config(&mut self, config: JsValue) -> Result<(), JsValue> {
        let config: PopulationConfig = serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from(js_sys::Error::new(&e.to_string())))?;
        self.world.config = config;
        Ok(())
    }

    /// Same as `load_config`, from a JSON string.
    #[wasm_bindgen]
    pub fn load_config_json(&mut self, json: &str) -> Result<(), JsValue> {
        let config = PopulationConfig::from_json(json)
            .map_err(|e| JsValue::from(js_sys::Error::new(&e.to_string())))?;
        self.world.config = config;
        Ok(())
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation {
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    fn setup_test_scenario(&mut self) {
        let world = &mut self.world;
        world.generate_terrain(42, 7);

        // One settlement per owner kind, so growth modifiers differ
        let rome = world.add_civ("Rome", true, false);
        let carthage = world.add_civ("Carthage", false, false);
        let venice = world.add_civ("Venice", false, true);

        let cities = [
            world.found_city("Rome", rome, TilePos::new(0, 0)),
            world.found_city("Carthage", carthage, TilePos::new(4, -2)),
            world.found_city("Venice", venice, TilePos::new(-4, 2)),
        ];

        for id in cities.into_iter().flatten() {
            world.expand_borders(id, 2);
            world.add_structure(id, Structure::new("Library").with_slots("Scientist", 1));
            world.add_structure(id, Structure::new("Market").with_slots("Merchant", 1));
            world.rebalance(id, &self.oracle);
        }
    }
}
