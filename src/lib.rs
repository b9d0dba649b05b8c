//! Backward-chained cultivation scheduling for mushroom production.
//!
//! Given a yield target and a harvest date, derives the start and end of
//! every upstream production stage (grain mixing and sterilization,
//! substrate mixing and sterilization, spawn and substrate incubation,
//! fruiting), together with bag counts, sterilizer cycles and material
//! totals. The schedule is closed-form arithmetic; no search is involved.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `SpeciesProfile`, `ProcessConstants`,
//!   `PlanRequest`, `StageBlock`, `Plan`
//! - **`reference`**: Built-in species and process tables, TOML loading,
//!   and the mutable `SpeciesRegistry`
//! - **`planner`**: The `compute_plan` engine, the validating `Planner`,
//!   and the multi-plan `MasterSchedule`
//! - **`validation`**: Caller-boundary input checks
//! - **`export`**: CSV tables of stage blocks and master schedules
//! - **`config`**: TOML plan file format
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use u_harvest::models::PlanRequest;
//! use u_harvest::planner::Planner;
//! use u_harvest::reference::ReferenceData;
//!
//! let reference = ReferenceData::builtin();
//! let species = reference.species("Lion's Mane").unwrap().clone();
//! let harvest = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
//!
//! let plan = Planner::from_reference(&reference)
//!     .plan(&PlanRequest::new(100.0, harvest, 5, species))
//!     .unwrap();
//!
//! assert_eq!(plan.summary.fruiting_bags, 102);
//! assert_eq!(plan.summary.total_duration.to_string(), "5 weeks, 5 days");
//! ```

pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod planner;
pub mod reference;
pub mod validation;

pub use error::PlanError;
