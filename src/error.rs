//! Crate-wide error type.
//!
//! Reference lookups fail fast: an unknown species or bag size is reported
//! before any stage is computed, so callers never see a partial plan.

use chrono::NaiveDate;
use thiserror::Error;

use crate::validation::ValidationError;

/// Errors raised by planning, reference lookups, registry edits and export.
#[derive(Debug, Error)]
pub enum PlanError {
    /// The fruiting bag size has no entry in the sterilizer capacity table.
    #[error("no sterilizer capacity configured for {bag_size} lb bags")]
    UnknownBagSize { bag_size: u32 },

    /// Stepping back from a date leaves the supported calendar range.
    #[error("cannot schedule {days} days before {date}: date out of range")]
    DateOutOfRange { date: NaiveDate, days: f64 },

    /// The named species is not in the reference data or registry.
    #[error("unknown species {0:?}")]
    UnknownSpecies(String),

    /// A species with this name already exists.
    #[error("species {0:?} already exists")]
    DuplicateSpecies(String),

    /// Built-in species are read-only.
    #[error("species {0:?} is built in and cannot be removed")]
    BuiltinSpecies(String),

    /// Species names must contain at least one non-whitespace character.
    #[error("species name must not be blank")]
    InvalidSpeciesName,

    /// Boundary validation rejected the input.
    #[error("invalid input: {}", summarize(.0))]
    Invalid(Vec<ValidationError>),

    /// A TOML document could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for PlanError {
    fn from(err: toml::de::Error) -> Self {
        PlanError::Config(err.to_string())
    }
}

impl From<Vec<ValidationError>> for PlanError {
    fn from(errors: Vec<ValidationError>) -> Self {
        PlanError::Invalid(errors)
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}
