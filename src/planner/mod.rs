//! Plan computation.
//!
//! - [`compute_plan`]: the pure backward-chaining engine.
//! - [`Planner`]: validates requests at the boundary, then runs the engine.
//! - [`MasterSchedule`]: combined view over several plans.

mod engine;
mod master;

pub use engine::{compute_plan, GRAIN_MIXING_DAYS};
pub use master::{MasterRow, MasterSchedule};

use crate::error::PlanError;
use crate::models::{Plan, PlanRequest, ProcessConstants};
use crate::reference::ReferenceData;
use crate::validation::validate_request;

/// Validating front end to the plan engine.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_harvest::planner::Planner;
/// use u_harvest::reference::ReferenceData;
/// use u_harvest::models::PlanRequest;
///
/// let reference = ReferenceData::builtin();
/// let planner = Planner::from_reference(&reference);
/// let species = reference.species("Blue Oyster").unwrap().clone();
/// let harvest = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
///
/// let plan = planner.plan(&PlanRequest::new(60.0, harvest, 10, species)).unwrap();
/// assert_eq!(plan.block_count(), 7);
///
/// let bad = PlanRequest::new(0.0, harvest, 10, reference.species("Reishi").unwrap().clone());
/// assert!(planner.plan(&bad).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct Planner {
    constants: ProcessConstants,
}

impl Planner {
    /// Creates a planner over the given constants.
    pub fn new(constants: ProcessConstants) -> Self {
        Self { constants }
    }

    /// Creates a planner over the reference data's constants.
    pub fn from_reference(reference: &ReferenceData) -> Self {
        Self::new(reference.constants().clone())
    }

    /// Process constants in use.
    pub fn constants(&self) -> &ProcessConstants {
        &self.constants
    }

    /// Validates the request, then computes its plan.
    ///
    /// # Errors
    /// [`PlanError::Invalid`] with every detected issue if validation fails.
    pub fn plan(&self, request: &PlanRequest) -> Result<Plan, PlanError> {
        validate_request(request, &self.constants)?;
        compute_plan(request, &self.constants)
    }

    /// Plans each request in order, stopping at the first failure.
    pub fn plan_all(&self, requests: &[PlanRequest]) -> Result<Vec<Plan>, PlanError> {
        requests.iter().map(|r| self.plan(r)).collect()
    }
}
