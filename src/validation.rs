//! Input validation for plan requests.
//!
//! The plan engine does not guard its inputs: a non-positive yield gives a
//! zero bag count and a missing sterilizer gives zero cycles. These checks
//! run at the caller boundary, before the engine. Detects:
//! - Non-positive or non-finite yield
//! - Bag sizes without a sterilizer capacity entry
//! - Zero sterilizers
//! - Negative or non-finite operator durations
//! - Malformed species profiles and process constants
//!
//! All detected issues are reported together, not just the first.

use crate::models::{PlanRequest, ProcessConstants, SpeciesProfile};

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Desired yield is zero, negative, or not finite.
    NonPositiveYield,
    /// Fruiting bag size has no sterilizer capacity entry.
    UnknownBagSize,
    /// No sterilizer to run cycles on.
    NoSterilizers,
    /// An operator duration is negative or not finite.
    InvalidDuration,
    /// A bag size is zero.
    InvalidBagSize,
    /// A species profile breaks its invariants.
    InvalidSpecies,
    /// Process constants are malformed.
    InvalidConstants,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a plan request against the process constants.
///
/// Checks:
/// 1. Desired yield is finite and positive
/// 2. Fruiting bag size has a sterilizer capacity entry
/// 3. At least one sterilizer
/// 4. Operator durations are finite and non-negative
/// 5. Explicit grain bag size is positive
/// 6. The embedded species profile is valid
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_request(request: &PlanRequest, constants: &ProcessConstants) -> ValidationResult {
    let mut errors = Vec::new();

    if !(request.desired_yield_lbs.is_finite() && request.desired_yield_lbs > 0.0) {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonPositiveYield,
            format!(
                "Desired yield must be positive, got {} lbs",
                request.desired_yield_lbs
            ),
        ));
    }

    if constants
        .capacity_for(request.fruiting_bag_size_lbs)
        .is_none()
    {
        errors.push(ValidationError::new(
            ValidationErrorKind::UnknownBagSize,
            format!(
                "No sterilizer capacity for {} lb fruiting bags (configured: {:?})",
                request.fruiting_bag_size_lbs,
                constants.bag_sizes()
            ),
        ));
    }

    if request.num_sterilizers == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoSterilizers,
            "At least one sterilizer is required",
        ));
    }

    let durations = [
        ("Substrate mixing", request.substrate_mix_days),
        ("Substrate sterilization", request.substrate_sterilization_days),
        ("Grain sterilization", request.grain_sterilization_days),
    ];
    for (label, days) in durations {
        if !(days.is_finite() && days >= 0.0) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidDuration,
                format!("{label} duration must be a non-negative number of days, got {days}"),
            ));
        }
    }

    if request.grain_bag_size_lbs == Some(0) {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidBagSize,
            "Grain spawn bag size must be positive",
        ));
    }

    if let Err(species_errors) = validate_species(&request.species) {
        errors.extend(species_errors);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a species profile.
///
/// Durations must be positive and the yield ratio must lie in (0, 1].
pub fn validate_species(species: &SpeciesProfile) -> ValidationResult {
    let mut errors = Vec::new();

    let durations = [
        ("incubation_days", species.incubation_days),
        ("cultural_inoculation_days", species.cultural_inoculation_days),
        ("fruiting_days", species.fruiting_days),
    ];
    for (field, days) in durations {
        if days == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidSpecies,
                format!("Species {field} must be positive"),
            ));
        }
    }

    let ratio = species.expected_yield_ratio;
    if !(ratio > 0.0 && ratio <= 1.0) {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidSpecies,
            format!("Species expected_yield_ratio must be in (0, 1], got {ratio}"),
        ));
    }

    if species.default_grain_size_lbs == 0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidSpecies,
            "Species default_grain_size_lbs must be positive",
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates process constants.
pub fn validate_constants(constants: &ProcessConstants) -> ValidationResult {
    let mut errors = Vec::new();

    if !(constants.loss_factor.is_finite() && constants.loss_factor >= 1.0) {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidConstants,
            format!("Loss factor must be at least 1, got {}", constants.loss_factor),
        ));
    }

    if constants.sterilizer_capacity_per_cycle.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::InvalidConstants,
            "Sterilizer capacity table is empty",
        ));
    }
    for (&bag_size, &capacity) in &constants.sterilizer_capacity_per_cycle {
        if bag_size == 0 || capacity == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidConstants,
                format!("Invalid capacity entry: {bag_size} lb bags → {capacity} per cycle"),
            ));
        }
    }

    let ratios = &constants.substrate_mix_ratios;
    for (label, value) in [
        ("hw_pellets_per_lb", ratios.hw_pellets_per_lb),
        ("sh_pellets_per_lb", ratios.sh_pellets_per_lb),
        ("water_per_lb", ratios.water_per_lb),
    ] {
        if !(value.is_finite() && value >= 0.0) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidConstants,
                format!("Mix ratio {label} must be non-negative, got {value}"),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
