//! Species growth profile.
//!
//! A profile captures how one cultivated organism colonizes substrate,
//! fruits, and converts substrate weight into fresh mushroom weight.

use serde::{Deserialize, Serialize};

/// Growth timing and yield behavior of one species.
///
/// Plans take a copy of the profile, so later registry edits never
/// change an already computed plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesProfile {
    /// Substrate colonization duration (days).
    pub incubation_days: u32,
    /// Days to grow spawn from culture. Only used when spawn is self-produced.
    pub cultural_inoculation_days: u32,
    /// Duration of the fruiting stage (days).
    pub fruiting_days: u32,
    /// Fresh mushroom weight per unit substrate weight, in (0, 1].
    pub expected_yield_ratio: f64,
    /// Grain-spawn bag size used when the request does not specify one (lbs).
    pub default_grain_size_lbs: u32,
}

impl SpeciesProfile {
    /// Creates a profile.
    pub fn new(
        incubation_days: u32,
        cultural_inoculation_days: u32,
        fruiting_days: u32,
        expected_yield_ratio: f64,
        default_grain_size_lbs: u32,
    ) -> Self {
        Self {
            incubation_days,
            cultural_inoculation_days,
            fruiting_days,
            expected_yield_ratio,
            default_grain_size_lbs,
        }
    }

    /// Grain spawn incubation length for the given sourcing.
    ///
    /// Purchased spawn only needs a single acclimation day; self-produced
    /// spawn needs the full culture period plus a handoff day.
    pub fn spawn_incubation_days(&self, spawn_purchased: bool) -> u32 {
        if spawn_purchased {
            1
        } else {
            self.cultural_inoculation_days.saturating_add(1)
        }
    }
}
