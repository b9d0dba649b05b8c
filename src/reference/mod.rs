//! Reference data: species table and process constants.
//!
//! Read-only lookup data consumed by the plan engine. The store does not
//! check requested keys; a missing species or bag size is reported by the
//! caller (see [`SpeciesRegistry::require`] and [`crate::validation`]).
//!
//! # Loading
//!
//! [`ReferenceData::builtin`] provides the standard table. A TOML document
//! can replace any section; omitted sections keep their built-in values:
//!
//! ```
//! use u_harvest::reference::ReferenceData;
//!
//! let data = ReferenceData::from_toml_str(r#"
//!     substrate_types = ["Masters Mix"]
//!
//!     [constants]
//!     loss_factor = 1.05
//! "#).unwrap();
//!
//! assert_eq!(data.substrate_types(), ["Masters Mix"]);
//! assert!(data.species("Reishi").is_some());
//! ```

mod registry;

pub use registry::SpeciesRegistry;

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::PlanError;
use crate::models::{ProcessConstants, SpeciesProfile};

/// A species profile under its display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedSpecies {
    pub name: String,
    #[serde(flatten)]
    pub profile: SpeciesProfile,
}

impl NamedSpecies {
    /// Creates a named species.
    pub fn new(name: impl Into<String>, profile: SpeciesProfile) -> Self {
        Self {
            name: name.into(),
            profile,
        }
    }
}

/// Immutable reference tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceData {
    species: Vec<NamedSpecies>,
    constants: ProcessConstants,
    grain_bag_sizes: Vec<u32>,
    substrate_types: Vec<String>,
}

impl Default for ReferenceData {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ReferenceData {
    /// The standard reference table.
    pub fn builtin() -> Self {
        Self {
            species: builtin_species(),
            constants: ProcessConstants::default(),
            grain_bag_sizes: vec![3, 6],
            substrate_types: vec![
                "Masters Mix".to_string(),
                "Chopped Straw".to_string(),
                "Saw Dust".to_string(),
            ],
        }
    }

    /// Parses a TOML reference document.
    pub fn from_toml_str(s: &str) -> Result<Self, PlanError> {
        Ok(toml::from_str(s)?)
    }

    /// Reads and parses a TOML reference file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PlanError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let data = Self::from_toml_str(&text)?;
        tracing::debug!(
            path = %path.as_ref().display(),
            species = data.species.len(),
            "loaded reference data"
        );
        Ok(data)
    }

    /// Looks up a species profile by name.
    pub fn species(&self, name: &str) -> Option<&SpeciesProfile> {
        self.species
            .iter()
            .find(|s| s.name == name)
            .map(|s| &s.profile)
    }

    /// Species names in table order.
    pub fn species_names(&self) -> Vec<&str> {
        self.species.iter().map(|s| s.name.as_str()).collect()
    }

    /// All species entries in table order.
    pub fn species_entries(&self) -> &[NamedSpecies] {
        &self.species
    }

    /// Process constants.
    pub fn constants(&self) -> &ProcessConstants {
        &self.constants
    }

    /// Fruiting bag sizes with a sterilizer capacity entry.
    pub fn fruiting_bag_sizes(&self) -> Vec<u32> {
        self.constants.bag_sizes()
    }

    /// Selectable grain spawn bag sizes (lbs).
    pub fn grain_bag_sizes(&self) -> &[u32] {
        &self.grain_bag_sizes
    }

    /// Substrate labels.
    pub fn substrate_types(&self) -> &[String] {
        &self.substrate_types
    }
}

fn builtin_species() -> Vec<NamedSpecies> {
    [
        ("Lion's Mane", 14, 21, 21, 0.20, 3),
        ("Turkey Tail", 21, 18, 30, 0.15, 6),
        ("Reishi", 45, 24, 75, 0.16, 6),
        ("Blue Oyster", 14, 21, 7, 0.28, 3),
        ("Pink Oyster", 14, 12, 8, 0.24, 3),
        ("King Oyster", 21, 18, 12, 0.22, 3),
        ("Yellow Oyster", 14, 12, 8, 0.11, 3),
        ("Pearl Oyster", 21, 14, 6, 0.28, 3),
        ("Shiitake", 56, 70, 75, 0.28, 6),
        ("Pioppino", 21, 30, 10, 0.32, 3),
    ]
    .into_iter()
    .map(|(name, incubation, culture, fruiting, ratio, grain)| {
        NamedSpecies::new(
            name,
            SpeciesProfile::new(incubation, culture, fruiting, ratio, grain),
        )
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{validate_constants, validate_species};
    use std::io::Write;

    #[test]
    fn test_builtin_table() {
        let data = ReferenceData::builtin();
        assert_eq!(data.species_names().len(), 10);
        assert_eq!(data.species_names()[0], "Lion's Mane");

        let lm = data.species("Lion's Mane").unwrap();
        assert_eq!(lm.incubation_days, 14);
        assert_eq!(lm.fruiting_days, 21);
        assert!((lm.expected_yield_ratio - 0.20).abs() < 1e-12);

        let shiitake = data.species("Shiitake").unwrap();
        assert_eq!(shiitake.cultural_inoculation_days, 70);
        assert_eq!(shiitake.default_grain_size_lbs, 6);

        assert!(data.species("Chanterelle").is_none());
        assert_eq!(data.fruiting_bag_sizes(), vec![5, 10]);
        assert_eq!(data.grain_bag_sizes(), &[3, 6]);
        assert_eq!(data.substrate_types().len(), 3);
    }

    #[test]
    fn test_builtin_is_well_formed() {
        let data = ReferenceData::builtin();
        for entry in data.species_entries() {
            assert!(validate_species(&entry.profile).is_ok(), "{}", entry.name);
        }
        assert!(validate_constants(data.constants()).is_ok());
    }

    #[test]
    fn test_toml_overrides_sections() {
        let data = ReferenceData::from_toml_str(
            r#"
[[species]]
name = "Golden Oyster"
incubation_days = 12
cultural_inoculation_days = 14
fruiting_days = 9
expected_yield_ratio = 0.25
default_grain_size_lbs = 3

[constants]
loss_factor = 1.1

[[constants.sterilizer_capacity_per_cycle]]
bag_size_lbs = 5
bags_per_cycle = 36
"#,
        )
        .unwrap();

        assert_eq!(data.species_names(), vec!["Golden Oyster"]);
        assert_eq!(data.species("Golden Oyster").unwrap().fruiting_days, 9);
        assert!((data.constants().loss_factor - 1.1).abs() < 1e-12);
        assert_eq!(data.constants().capacity_for(5), Some(36));
        // Untouched sections keep built-in values.
        assert_eq!(data.grain_bag_sizes(), &[3, 6]);
        assert!((data.constants().substrate_mix_ratios.water_per_lb - 0.60).abs() < 1e-12);
    }

    #[test]
    fn test_empty_toml_is_builtin() {
        let data = ReferenceData::from_toml_str("").unwrap();
        assert_eq!(data, ReferenceData::builtin());
    }

    #[test]
    fn test_malformed_toml() {
        let err = ReferenceData::from_toml_str("[constants\nloss_factor = 1").unwrap_err();
        assert!(matches!(err, PlanError::Config(_)));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "substrate_types = [\"Saw Dust\"]").unwrap();
        let data = ReferenceData::load(file.path()).unwrap();
        assert_eq!(data.substrate_types(), ["Saw Dust"]);

        let missing = ReferenceData::load("/nonexistent/reference.toml").unwrap_err();
        assert!(matches!(missing, PlanError::Io(_)));
    }
}
