//! Cultivation planning domain models.
//!
//! Provides the data types for describing a production request and the
//! backward-chained plan computed from it.
//!
//! # Domain Mappings
//!
//! | u-harvest | Scheduling | Meaning |
//! |-----------|------------|---------|
//! | PlanRequest | Order | Yield target due on a harvest date |
//! | StageBlock | Operation | One production step with dates and quantities |
//! | Plan | Schedule | All steps plus material tables |
//! | ProcessConstants | Resource data | Sterilizer capacity, mix ratios, loss factor |

mod constants;
mod plan;
mod request;
mod species;
mod stage;

pub use constants::{MixRatios, ProcessConstants, DEFAULT_LOSS_FACTOR};
pub use plan::{MaterialRow, MixRatioRow, Plan, PlanSummary, TotalDuration};
pub use request::{
    PlanRequest, DEFAULT_GRAIN_STERILIZATION_DAYS, DEFAULT_NUM_STERILIZERS,
    DEFAULT_SUBSTRATE_MIX_DAYS, DEFAULT_SUBSTRATE_STERILIZATION_DAYS,
};
pub use species::SpeciesProfile;
pub use stage::{StageBlock, StageDetails, StageKind, StageRecord};
