use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;
use tsify_next::Tsify;

// ============================================================================
// IDs - Using slotmap for generational indices
// ============================================================================

new_key_type! {
    pub struct SettlementId;
    pub struct CivId;
}

/// Trait for converting SlotMap keys to u64 for WASM boundary
pub trait KeyToU64 {
    fn to_u64(self) -> u64;
}

impl KeyToU64 for SettlementId {
    fn to_u64(self) -> u64 {
        self.0.as_ffi()
    }
}

impl KeyToU64 for CivId {
    fn to_u64(self) -> u64 {
        self.0.as_ffi()
    }
}

// ============================================================================
// Tile positions - axial hex coordinates
// ============================================================================

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Tsify,
)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct TilePos {
    pub q: i32,
    pub r: i32,
}

impl TilePos {
    pub const fn new(q: i32, r: i32) -> Self {
        Self { q, r }
    }

    /// Hex distance in tiles.
    pub fn distance_to(self, other: TilePos) -> u32 {
        let dq = self.q - other.q;
        let dr = self.r - other.r;
        ((dq.abs() + dr.abs() + (dq + dr).abs()) / 2) as u32
    }

    /// Every position within `radius` of `self`, including `self`.
    pub fn within(self, radius: u32) -> impl Iterator<Item = TilePos> {
        let r = radius as i32;
        (-r..=r).flat_map(move |dq| {
            let lo = (-r).max(-dq - r);
            let hi = r.min(-dq + r);
            (lo..=hi).map(move |dr| TilePos::new(self.q + dq, self.r + dr))
        })
    }
}

// ============================================================================
// Stats - per-turn yields of a tile, specialist or whole settlement
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub enum Stat {
    Food,
    Production,
    Gold,
    Science,
    Culture,
    Faith,
}

impl Stat {
    pub fn all() -> impl Iterator<Item = Stat> {
        [
            Stat::Food,
            Stat::Production,
            Stat::Gold,
            Stat::Science,
            Stat::Culture,
            Stat::Faith,
        ]
        .into_iter()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, Tsify)]
#[tsify(into_wasm_abi, from_wasm_abi)]
pub struct Stats {
    pub food: f64,
    pub production: f64,
    pub gold: f64,
    pub science: f64,
    pub culture: f64,
    pub faith: f64,
}

impl Stats {
    pub fn food(food: f64) -> Self {
        Self {
            food,
            ..Default::default()
        }
    }

    pub fn get(&self, stat: Stat) -> f64 {
        match stat {
            Stat::Food => self.food,
            Stat::Production => self.production,
            Stat::Gold => self.gold,
            Stat::Science => self.science,
            Stat::Culture => self.culture,
            Stat::Faith => self.faith,
        }
    }

    pub fn get_mut(&mut self, stat: Stat) -> &mut f64 {
        match stat {
            Stat::Food => &mut self.food,
            Stat::Production => &mut self.production,
            Stat::Gold => &mut self.gold,
            Stat::Science => &mut self.science,
            Stat::Culture => &mut self.culture,
            Stat::Faith => &mut self.faith,
        }
    }

    pub fn with(mut self, stat: Stat, amount: f64) -> Self {
        *self.get_mut(stat) = amount;
        self
    }

    pub fn scaled(&self, factor: f64) -> Stats {
        let mut out = *self;
        for stat in Stat::all() {
            *out.get_mut(stat) *= factor;
        }
        out
    }
}

impl Add for Stats {
    type Output = Stats;

    fn add(mut self, rhs: Stats) -> Stats {
        self += rhs;
        self
    }
}

impl AddAssign for Stats {
    fn add_assign(&mut self, rhs: Stats) {
        for stat in Stat::all() {
            *self.get_mut(stat) += rhs.get(stat);
        }
    }
}
