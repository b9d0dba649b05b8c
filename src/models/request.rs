//! Plan request model.
//!
//! The input contract of the plan engine: what to harvest, when, and the
//! operator-supplied process parameters.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::SpeciesProfile;

/// Default substrate mixing duration (days).
pub const DEFAULT_SUBSTRATE_MIX_DAYS: f64 = 1.0;
/// Default substrate sterilization duration (days).
pub const DEFAULT_SUBSTRATE_STERILIZATION_DAYS: f64 = 3.0;
/// Default number of sterilizers.
pub const DEFAULT_NUM_STERILIZERS: u32 = 2;
/// Default grain bag sterilization duration (days).
pub const DEFAULT_GRAIN_STERILIZATION_DAYS: f64 = 1.0;

/// A request to plan one production run.
///
/// # Preconditions
/// `compute_plan` does not check these; use [`crate::validation::validate_request`]
/// or [`crate::planner::Planner`] at the caller boundary.
/// - `desired_yield_lbs > 0`
/// - `fruiting_bag_size_lbs` has a sterilizer capacity entry
/// - `num_sterilizers >= 1`
/// - operator durations are non-negative
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Target fresh weight at harvest (lbs).
    pub desired_yield_lbs: f64,
    /// Last day of fruiting.
    pub desired_harvest_date: NaiveDate,
    /// Substrate weight per fruiting bag (lbs).
    pub fruiting_bag_size_lbs: u32,
    /// Snapshot of the species profile.
    pub species: SpeciesProfile,
    /// Descriptive substrate label. Carried into the incubation block only.
    pub substrate_type: String,
    /// Whether grain spawn is bought rather than grown from culture.
    pub spawn_purchased: bool,
    /// Substrate bag mixing duration (days).
    pub substrate_mix_days: f64,
    /// Substrate bag sterilization duration (days).
    pub substrate_sterilization_days: f64,
    /// Sterilizers running cycles in parallel.
    pub num_sterilizers: u32,
    /// Grain spawn bag size (lbs). `None` = species default.
    pub grain_bag_size_lbs: Option<u32>,
    /// Grain bag sterilization duration (days).
    pub grain_sterilization_days: f64,
}

impl PlanRequest {
    /// Creates a request with default operator parameters.
    ///
    /// Spawn is assumed purchased and the substrate label is empty.
    pub fn new(
        desired_yield_lbs: f64,
        desired_harvest_date: NaiveDate,
        fruiting_bag_size_lbs: u32,
        species: SpeciesProfile,
    ) -> Self {
        Self {
            desired_yield_lbs,
            desired_harvest_date,
            fruiting_bag_size_lbs,
            species,
            substrate_type: String::new(),
            spawn_purchased: true,
            substrate_mix_days: DEFAULT_SUBSTRATE_MIX_DAYS,
            substrate_sterilization_days: DEFAULT_SUBSTRATE_STERILIZATION_DAYS,
            num_sterilizers: DEFAULT_NUM_STERILIZERS,
            grain_bag_size_lbs: None,
            grain_sterilization_days: DEFAULT_GRAIN_STERILIZATION_DAYS,
        }
    }

    /// Sets the substrate label.
    pub fn with_substrate_type(mut self, substrate_type: impl Into<String>) -> Self {
        self.substrate_type = substrate_type.into();
        self
    }

    /// Sets whether spawn is purchased.
    pub fn with_spawn_purchased(mut self, purchased: bool) -> Self {
        self.spawn_purchased = purchased;
        self
    }

    /// Sets the substrate mixing duration (days).
    pub fn with_substrate_mix_days(mut self, days: f64) -> Self {
        self.substrate_mix_days = days;
        self
    }

    /// Sets the substrate sterilization duration (days).
    pub fn with_substrate_sterilization_days(mut self, days: f64) -> Self {
        self.substrate_sterilization_days = days;
        self
    }

    /// Sets the number of sterilizers.
    pub fn with_sterilizers(mut self, count: u32) -> Self {
        self.num_sterilizers = count;
        self
    }

    /// Sets the grain spawn bag size (lbs).
    pub fn with_grain_bag_size(mut self, lbs: u32) -> Self {
        self.grain_bag_size_lbs = Some(lbs);
        self
    }

    /// Sets the grain bag sterilization duration (days).
    pub fn with_grain_sterilization_days(mut self, days: f64) -> Self {
        self.grain_sterilization_days = days;
        self
    }

    /// Grain spawn bag size, falling back to the species default.
    pub fn effective_grain_bag_size(&self) -> u32 {
        self.grain_bag_size_lbs
            .unwrap_or(self.species.default_grain_size_lbs)
    }
}
