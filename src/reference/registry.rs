//! Species registry.
//!
//! Built-in species from the reference data plus user-created species.
//! The registry is an explicit value owned by the caller; mutation goes
//! through `&mut self`, so concurrent writers need their own lock.

use tracing::info;

use super::{NamedSpecies, ReferenceData};
use crate::error::PlanError;
use crate::models::SpeciesProfile;
use crate::validation::validate_species;

/// Mutable species lookup layered over the reference table.
#[derive(Debug, Clone, Default)]
pub struct SpeciesRegistry {
    builtin: Vec<NamedSpecies>,
    custom: Vec<NamedSpecies>,
}

impl SpeciesRegistry {
    /// Creates a registry seeded with the reference species.
    pub fn new(reference: &ReferenceData) -> Self {
        Self {
            builtin: reference.species_entries().to_vec(),
            custom: Vec::new(),
        }
    }

    /// Adds a custom species.
    ///
    /// # Errors
    /// - [`PlanError::InvalidSpeciesName`] if the trimmed name is empty
    /// - [`PlanError::DuplicateSpecies`] if the name is already taken
    /// - [`PlanError::Invalid`] if the profile fails validation
    pub fn add(&mut self, name: &str, profile: SpeciesProfile) -> Result<(), PlanError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(PlanError::InvalidSpeciesName);
        }
        if self.get(name).is_some() {
            return Err(PlanError::DuplicateSpecies(name.to_string()));
        }
        validate_species(&profile)?;

        info!(species = name, "added custom species");
        self.custom.push(NamedSpecies::new(name, profile));
        Ok(())
    }

    /// Removes a custom species, returning its profile.
    ///
    /// Plans computed earlier keep their own copy of the profile.
    pub fn remove(&mut self, name: &str) -> Result<SpeciesProfile, PlanError> {
        let name = name.trim();
        if let Some(idx) = self.custom.iter().position(|s| s.name == name) {
            info!(species = name, "removed custom species");
            return Ok(self.custom.remove(idx).profile);
        }
        if self.builtin.iter().any(|s| s.name == name) {
            return Err(PlanError::BuiltinSpecies(name.to_string()));
        }
        Err(PlanError::UnknownSpecies(name.to_string()))
    }

    /// Looks up a species by name, ignoring surrounding whitespace.
    pub fn get(&self, name: &str) -> Option<&SpeciesProfile> {
        let name = name.trim();
        self.builtin
            .iter()
            .chain(&self.custom)
            .find(|s| s.name == name)
            .map(|s| &s.profile)
    }

    /// Looks up a species, failing with [`PlanError::UnknownSpecies`].
    pub fn require(&self, name: &str) -> Result<&SpeciesProfile, PlanError> {
        self.get(name)
            .ok_or_else(|| PlanError::UnknownSpecies(name.trim().to_string()))
    }

    /// Whether the name refers to a user-created species.
    pub fn is_custom(&self, name: &str) -> bool {
        let name = name.trim();
        self.custom.iter().any(|s| s.name == name)
    }

    /// All names: built-in first, then custom, each in insertion order.
    pub fn names(&self) -> Vec<&str> {
        self.builtin
            .iter()
            .chain(&self.custom)
            .map(|s| s.name.as_str())
            .collect()
    }

    /// All entries in [`names`](Self::names) order.
    pub fn entries(&self) -> impl Iterator<Item = &NamedSpecies> {
        self.builtin.iter().chain(&self.custom)
    }

    /// Number of custom species.
    pub fn custom_count(&self) -> usize {
        self.custom.len()
    }

    /// Total number of species.
    pub fn len(&self) -> usize {
        self.builtin.len() + self.custom.len()
    }

    /// Whether the registry holds no species.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
