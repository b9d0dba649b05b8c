//! TOML plan file format.
//!
//! A plan file lists optional custom species and one or more plans:
//!
//! ```toml
//! [[species]]
//! name = "Golden Oyster"
//! incubation_days = 14
//! cultural_inoculation_days = 21
//! fruiting_days = 14
//! expected_yield_ratio = 0.2
//! default_grain_size_lbs = 3
//!
//! [[plans]]
//! species = "Lion's Mane"
//! desired_yield_lbs = 100.0
//! harvest_date = "2025-06-30"
//! ```
//!
//! Dates are quoted `YYYY-MM-DD` strings. Every other plan field is
//! optional and defaults to the standard operator parameters.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::error::PlanError;
use crate::models::{
    PlanRequest, SpeciesProfile, DEFAULT_GRAIN_STERILIZATION_DAYS, DEFAULT_NUM_STERILIZERS,
    DEFAULT_SUBSTRATE_MIX_DAYS, DEFAULT_SUBSTRATE_STERILIZATION_DAYS,
};
use crate::reference::{NamedSpecies, SpeciesRegistry};

/// Top-level structure of a plan file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanFile {
    /// Custom species to register before planning.
    #[serde(default)]
    pub species: Vec<NamedSpecies>,
    /// Plans, in display order.
    #[serde(default)]
    pub plans: Vec<PlanEntry>,
}

/// A single `[[plans]]` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanEntry {
    /// Species name (built-in or declared in `[[species]]`).
    pub species: String,
    pub desired_yield_lbs: f64,
    pub harvest_date: NaiveDate,
    #[serde(default = "default_fruiting_bag_size")]
    pub fruiting_bag_size_lbs: u32,
    #[serde(default = "default_substrate_type")]
    pub substrate_type: String,
    #[serde(default = "default_spawn_purchased")]
    pub spawn_purchased: bool,
    #[serde(default = "default_substrate_mix_days")]
    pub substrate_mix_days: f64,
    #[serde(default = "default_substrate_sterilization_days")]
    pub substrate_sterilization_days: f64,
    #[serde(default = "default_num_sterilizers")]
    pub num_sterilizers: u32,
    /// Grain spawn bag size; the species default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grain_bag_size_lbs: Option<u32>,
    #[serde(default = "default_grain_sterilization_days")]
    pub grain_sterilization_days: f64,
}

/// A resolved plan request with the species name it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedRequest {
    /// 1-based position in the plan file, counting skipped plans.
    pub number: usize,
    pub species: String,
    pub request: PlanRequest,
}

fn default_fruiting_bag_size() -> u32 {
    5
}

fn default_substrate_type() -> String {
    "Masters Mix".to_string()
}

fn default_spawn_purchased() -> bool {
    true
}

fn default_substrate_mix_days() -> f64 {
    DEFAULT_SUBSTRATE_MIX_DAYS
}

fn default_substrate_sterilization_days() -> f64 {
    DEFAULT_SUBSTRATE_STERILIZATION_DAYS
}

fn default_num_sterilizers() -> u32 {
    DEFAULT_NUM_STERILIZERS
}

fn default_grain_sterilization_days() -> f64 {
    DEFAULT_GRAIN_STERILIZATION_DAYS
}

impl PlanFile {
    /// Parses a plan file from TOML.
    pub fn from_toml_str(s: &str) -> Result<Self, PlanError> {
        Ok(toml::from_str(s)?)
    }

    /// Reads and parses a plan file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PlanError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Registers custom species, then builds one request per plan.
    ///
    /// Plans without a positive yield are skipped before their species is
    /// looked up; the remaining plans keep their file position as number.
    /// An unknown species on a kept plan fails the whole file.
    pub fn resolve(&self, registry: &mut SpeciesRegistry) -> Result<Vec<NamedRequest>, PlanError> {
        for entry in &self.species {
            registry.add(&entry.name, entry.profile.clone())?;
        }

        let mut requests = Vec::with_capacity(self.plans.len());
        for (idx, plan) in self.plans.iter().enumerate() {
            let number = idx + 1;
            if plan.desired_yield_lbs.is_nan() || plan.desired_yield_lbs <= 0.0 {
                info!(
                    plan = number,
                    species = %plan.species,
                    "skipping plan without a positive desired yield"
                );
                continue;
            }
            let profile = registry.require(&plan.species)?.clone();
            requests.push(NamedRequest {
                number,
                species: plan.species.clone(),
                request: plan.to_request(profile),
            });
        }
        Ok(requests)
    }
}

impl PlanEntry {
    fn to_request(&self, species: SpeciesProfile) -> PlanRequest {
        let mut request = PlanRequest::new(
            self.desired_yield_lbs,
            self.harvest_date,
            self.fruiting_bag_size_lbs,
            species,
        )
        .with_substrate_type(self.substrate_type.clone())
        .with_spawn_purchased(self.spawn_purchased)
        .with_substrate_mix_days(self.substrate_mix_days)
        .with_substrate_sterilization_days(self.substrate_sterilization_days)
        .with_sterilizers(self.num_sterilizers)
        .with_grain_sterilization_days(self.grain_sterilization_days);
        request.grain_bag_size_lbs = self.grain_bag_size_lbs;
        request
    }
}
