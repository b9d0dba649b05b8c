//! Process-wide constants.
//!
//! Sterilizer batch capacity, substrate mix ratios and the loss factor
//! shared by every plan.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;

/// Per-pound substrate mix ratios.
///
/// Multiplying by the fruiting bag size gives the per-bag amount of each
/// component, in pounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MixRatios {
    /// Hardwood pellets per pound of substrate.
    pub hw_pellets_per_lb: f64,
    /// Softwood pellets per pound of substrate.
    pub sh_pellets_per_lb: f64,
    /// Water per pound of substrate.
    pub water_per_lb: f64,
}

impl Default for MixRatios {
    fn default() -> Self {
        Self {
            hw_pellets_per_lb: 0.20,
            sh_pellets_per_lb: 0.20,
            water_per_lb: 0.60,
        }
    }
}

/// Static process configuration.
///
/// Fields missing from a deserialized document take their built-in values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessConstants {
    /// Fruiting bag size (lbs) → bags per sterilization cycle, per sterilizer.
    ///
    /// Serialized as a list of `{ bag_size_lbs, bags_per_cycle }` entries,
    /// since TOML table keys cannot be integers.
    #[serde(with = "capacity_table")]
    pub sterilizer_capacity_per_cycle: BTreeMap<u32, u32>,
    /// Substrate mix ratios.
    pub substrate_mix_ratios: MixRatios,
    /// Multiplicative overproduction buffer applied at each stage transition.
    pub loss_factor: f64,
}

/// Loss factor of the built-in process table.
pub const DEFAULT_LOSS_FACTOR: f64 = 1.02;

impl Default for ProcessConstants {
    fn default() -> Self {
        Self {
            sterilizer_capacity_per_cycle: BTreeMap::from([(5, 40), (10, 20)]),
            substrate_mix_ratios: MixRatios::default(),
            loss_factor: DEFAULT_LOSS_FACTOR,
        }
    }
}

impl ProcessConstants {
    /// Sets the loss factor.
    pub fn with_loss_factor(mut self, loss_factor: f64) -> Self {
        self.loss_factor = loss_factor;
        self
    }

    /// Sets the per-cycle capacity for a bag size.
    pub fn with_capacity(mut self, bag_size_lbs: u32, bags_per_cycle: u32) -> Self {
        self.sterilizer_capacity_per_cycle
            .insert(bag_size_lbs, bags_per_cycle);
        self
    }

    /// Sets the substrate mix ratios.
    pub fn with_mix_ratios(mut self, ratios: MixRatios) -> Self {
        self.substrate_mix_ratios = ratios;
        self
    }

    /// Bags per cycle for a fruiting bag size, if configured.
    pub fn capacity_for(&self, bag_size_lbs: u32) -> Option<u32> {
        self.sterilizer_capacity_per_cycle.get(&bag_size_lbs).copied()
    }

    /// Bag sizes with a configured sterilizer capacity, ascending.
    pub fn bag_sizes(&self) -> Vec<u32> {
        self.sterilizer_capacity_per_cycle.keys().copied().collect()
    }
}

mod capacity_table {
    use super::*;

    #[derive(Serialize, Deserialize)]
    struct Entry {
        bag_size_lbs: u32,
        bags_per_cycle: u32,
    }

    pub fn serialize<S: Serializer>(
        table: &BTreeMap<u32, u32>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        let entries: Vec<Entry> = table
            .iter()
            .map(|(&bag_size_lbs, &bags_per_cycle)| Entry {
                bag_size_lbs,
                bags_per_cycle,
            })
            .collect();
        entries.serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<BTreeMap<u32, u32>, D::Error> {
        let entries = Vec::<Entry>::deserialize(deserializer)?;
        Ok(entries
            .into_iter()
            .map(|e| (e.bag_size_lbs, e.bags_per_cycle))
            .collect())
    }
}
