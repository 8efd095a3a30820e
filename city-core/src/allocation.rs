//! Citizen allocation: greedy assignment of free population to tiles and
//! specialist slots, and the reverse pass that releases jobs when the
//! settlement holds more of them than it has people.
//!
//! Both passes are local searches over oracle scores, not optimizers. The
//! re-scoring points matter: food from a new tile changes what specialists
//! are worth, and a new specialist can change tile yields through
//! specialist-count conditional modifiers.

use std::collections::HashMap;

use crate::context::{CityContext, ValuationOracle};
use crate::population::PopulationLedger;
use crate::types::{Stats, TilePos};
#[cfg(feature = "instrument")]
use crate::types::KeyToU64;

/// Net food one specialist adds relative to its unmodified consumption.
///
/// `base − base·Π(1 + pct/100)`: 0 with no modifiers, positive when
/// modifiers make specialists eat less.
pub fn specialist_food_bonus(base: f64, consumption_percents: &[f64]) -> f64 {
    let eaten = consumption_percents
        .iter()
        .fold(base, |food, pct| food * (1.0 + pct / 100.0));
    base - eaten
}

/// Highest-scoring item; the earliest wins ties.
fn best_by<T: Copy>(items: impl Iterator<Item = (T, f64)>) -> Option<(T, f64)> {
    items.fold(None, |best, (item, score)| match best {
        Some((_, best_score)) if score <= best_score => best,
        _ => Some((item, score)),
    })
}

/// Lowest-scoring item; the earliest wins ties.
fn worst_by<T: Copy>(items: impl Iterator<Item = (T, f64)>) -> Option<(T, f64)> {
    items.fold(None, |worst, (item, score)| match worst {
        Some((_, worst_score)) if score >= worst_score => worst,
        _ => Some((item, score)),
    })
}

impl PopulationLedger {
    /// Roles with a free slot, in name order.
    fn open_roles(&self, city: &dyn CityContext) -> Vec<String> {
        self.max_specialists(city)
            .iter()
            .filter(|(role, max)| self.specialist_allocations.get(role) < *max)
            .map(|(role, _)| role.to_string())
            .collect()
    }

    /// Fill every free population unit with the best-scoring open tile or
    /// specialist slot.
    ///
    /// The number of iterations is fixed at the free population when the pass
    /// starts. An iteration with nothing assignable ends the pass early and
    /// leaves the rest idle.
    pub fn auto_assign(&mut self, city: &mut dyn CityContext, oracle: &dyn ValuationOracle) {
        city.recompute_stats(self);
        let mut stats = city.current_stats();
        let specialist_food = specialist_food_bonus(
            city.config().specialist_base_food,
            &city.specialist_food_consumption_percents(),
        );

        let mut tile_pool: Vec<TilePos> = city
            .workable_tiles()
            .into_iter()
            .filter(|&tile| !city.tile_status(tile).provides_yield)
            .collect();
        let mut tile_yields: HashMap<TilePos, Stats> = tile_pool
            .iter()
            .map(|&tile| (tile, city.tile_yields(tile, self)))
            .collect();

        let mut specialist_scores: HashMap<String, f64> = self
            .open_roles(city)
            .into_iter()
            .map(|role| {
                let score = oracle.rank_specialist(&role, &stats);
                (role, score)
            })
            .collect();

        let manual = city.manual_specialists();
        let free = self.free_population(city);
        let mut refresh_tile_yields = false;

        for i in 1..=free {
            if refresh_tile_yields {
                for &tile in &tile_pool {
                    tile_yields.insert(tile, city.tile_yields(tile, self));
                }
                refresh_tile_yields = false;
            }

            let best_tile = best_by(tile_pool.iter().map(|&tile| {
                let yields = tile_yields.get(&tile).copied().unwrap_or_default();
                (tile, oracle.rank_tile(tile, &yields, &stats))
            }));

            let open_roles = if manual { Vec::new() } else { self.open_roles(city) };
            let best_role = best_by(open_roles.iter().map(|role| {
                let score = specialist_scores.get(role).copied().unwrap_or(0.0);
                (role.as_str(), score)
            }))
            .map(|(role, score)| (role.to_string(), score));
            let role_score = best_role.as_ref().map(|(_, score)| *score).unwrap_or(0.0);

            match (best_tile, best_role) {
                (Some((tile, score)), _) if score > role_score => {
                    city.work_tile(tile);
                    tile_pool.retain(|&t| t != tile);
                    let added_food = tile_yields.get(&tile).map(|y| y.food).unwrap_or(0.0);
                    stats.food += added_food;

                    #[cfg(feature = "instrument")]
                    tracing::info!(
                        target: "assignment",
                        settlement_id = city.id().to_u64(),
                        kind = "tile",
                        q = tile.q,
                        r = tile.r,
                        score = score,
                    );

                    if added_food > 0.0 && i < free {
                        self.rescore_specialists(&mut specialist_scores, city, oracle, &stats);
                    }
                }
                (_, Some((role, score))) => {
                    self.specialist_allocations.add(&role, 1);
                    stats.food += specialist_food;

                    #[cfg(feature = "instrument")]
                    tracing::info!(
                        target: "assignment",
                        settlement_id = city.id().to_u64(),
                        kind = "specialist",
                        role = role.as_str(),
                        score = score,
                    );
                    let _ = score;

                    if i < free {
                        self.rescore_specialists(&mut specialist_scores, city, oracle, &stats);
                        refresh_tile_yields = true;
                    }
                }
                _ => break,
            }
        }

        city.recompute_stats(self);
    }

    fn rescore_specialists(
        &self,
        scores: &mut HashMap<String, f64>,
        city: &dyn CityContext,
        oracle: &dyn ValuationOracle,
        stats: &Stats,
    ) {
        for role in self.open_roles(city) {
            let score = oracle.rank_specialist(&role, stats);
            scores.insert(role, score);
        }
    }

    /// Release jobs that are no longer valid, then release the lowest-valued
    /// jobs until free population is no longer negative.
    ///
    /// Stops with a residual deficit when nothing is left to release.
    pub fn unassign_extra(&mut self, city: &mut dyn CityContext, oracle: &dyn ValuationOracle) {
        let owner = city.owner();
        let id = city.id();
        let center = city.center();
        let radius = city.config().work_radius;
        for tile in city.worked_tiles() {
            let status = city.tile_status(tile);
            if status.owner != Some(owner)
                || status.working_settlement != Some(id)
                || tile.distance_to(center) > radius
            {
                city.release_tile(tile);

                #[cfg(feature = "instrument")]
                tracing::info!(
                    target: "unassignment",
                    settlement_id = id.to_u64(),
                    kind = "invalid_tile",
                    q = tile.q,
                    r = tile.r,
                );
            }
        }

        let max = self.max_specialists(city);
        let over_capacity: Vec<(String, u32)> = self
            .specialist_allocations
            .iter()
            .filter(|(role, count)| *count > max.get(role))
            .map(|(role, _)| (role.to_string(), max.get(role)))
            .collect();
        for (role, cap) in over_capacity {
            self.specialist_allocations.set(&role, cap);
        }

        let stats = city.current_stats();
        let manual = city.manual_specialists();
        let locked_bias = if city.config().protect_locked_tiles {
            city.config().locked_tile_bias
        } else {
            0.0
        };

        loop {
            let free = self.free_population(city);
            if free >= 0 {
                break;
            }
            // Locked tiles are harder to pick, but once picked they compete
            // with specialists on their plain score.
            let worst_tile = worst_by(city.worked_tiles().into_iter().map(|tile| {
                let score = oracle.rank_tile(tile, &city.tile_yields(tile, self), &stats);
                let bias = if city.tile_status(tile).locked { locked_bias } else { 0.0 };
                ((tile, score), score + bias)
            }))
            .map(|(candidate, _)| candidate);

            let worst_role = if manual {
                None
            } else {
                self.worst_specialist(oracle, &stats)
            };

            match (worst_tile, worst_role) {
                (Some((tile, tile_score)), Some((role, role_score))) => {
                    if tile_score < role_score {
                        self.release_worked_tile(tile, city);
                    } else {
                        self.release_specialist(&role, city);
                    }
                }
                (None, Some((role, _))) => self.release_specialist(&role, city),
                (Some((tile, _)), None) => self.release_worked_tile(tile, city),
                (None, None) => {
                    // Manual control can leave more specialists than people
                    // (e.g. while razing); take one away anyway.
                    if let Some((role, _)) = self.worst_specialist(oracle, &stats) {
                        self.release_specialist(&role, city);
                    }
                }
            }

            // Nothing was released: residual deficit.
            if self.free_population(city) <= free {
                #[cfg(feature = "instrument")]
                tracing::info!(
                    target: "unassignment",
                    settlement_id = id.to_u64(),
                    kind = "residual_deficit",
                    free_population = self.free_population(city) as i64,
                );
                break;
            }
        }
    }

    fn worst_specialist(&self, oracle: &dyn ValuationOracle, stats: &Stats) -> Option<(String, f64)> {
        worst_by(
            self.specialist_allocations
                .roles()
                .map(|role| (role, oracle.rank_specialist(role, stats))),
        )
        .map(|(role, score)| (role.to_string(), score))
    }

    fn release_worked_tile(&self, tile: TilePos, city: &mut dyn CityContext) {
        city.release_tile(tile);

        #[cfg(feature = "instrument")]
        tracing::info!(
            target: "unassignment",
            settlement_id = city.id().to_u64(),
            kind = "tile",
            q = tile.q,
            r = tile.r,
        );
    }

    fn release_specialist(&mut self, role: &str, city: &dyn CityContext) {
        self.specialist_allocations.add(role, -1);

        #[cfg(feature = "instrument")]
        tracing::info!(
            target: "unassignment",
            settlement_id = city.id().to_u64(),
            kind = "specialist",
            role = role,
        );
        #[cfg(not(feature = "instrument"))]
        let _ = city;
    }

    /// End-of-turn allocation step: consistency cleanup, then fill any
    /// remaining free population.
    pub fn rebalance(&mut self, city: &mut dyn CityContext, oracle: &dyn ValuationOracle) {
        self.unassign_extra(city, oracle);
        if self.free_population(city) > 0 {
            self.auto_assign(city, oracle);
        }
    }
}
