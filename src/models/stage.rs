//! Stage block model.
//!
//! A stage block is one scheduled production step. Stage-specific
//! quantities live in a tagged [`StageDetails`] variant; [`StageRecord`]
//! flattens any block into one sparse row for tabular export.
//!
//! # Stage Order
//!
//! | # | Stage | Ends at |
//! |---|-------|---------|
//! | 1 | Grain Bags (Mixing) | grain sterilization start |
//! | 2 | Grain Bags Sterilization | substrate sterilization start |
//! | 3 | Substrate Bags (Mixing) | substrate sterilization start |
//! | 4 | Substrate Bags Sterilization | grain spawn incubation start |
//! | 5 | Grain Spawn Incubation | substrate incubation start |
//! | 6 | Substrate Bags Incubation | fruiting start |
//! | 7 | Fruiting | harvest date |

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Production stage kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum StageKind {
    GrainMixing,
    GrainSterilization,
    SubstrateMixing,
    SubstrateSterilization,
    GrainSpawnIncubation,
    SubstrateIncubation,
    Fruiting,
}

impl StageKind {
    /// All stages in plan order.
    pub const ALL: [StageKind; 7] = [
        StageKind::GrainMixing,
        StageKind::GrainSterilization,
        StageKind::SubstrateMixing,
        StageKind::SubstrateSterilization,
        StageKind::GrainSpawnIncubation,
        StageKind::SubstrateIncubation,
        StageKind::Fruiting,
    ];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            StageKind::GrainMixing => "Grain Bags (Mixing)",
            StageKind::GrainSterilization => "Grain Bags Sterilization",
            StageKind::SubstrateMixing => "Substrate Bags (Mixing)",
            StageKind::SubstrateSterilization => "Substrate Bags Sterilization",
            StageKind::GrainSpawnIncubation => "Grain Spawn Incubation",
            StageKind::SubstrateIncubation => "Substrate Bags Incubation",
            StageKind::Fruiting => "Fruiting",
        }
    }

    /// The stage whose start this stage's end is anchored to.
    ///
    /// `None` for fruiting, which ends on the harvest date.
    pub fn feeds(self) -> Option<StageKind> {
        match self {
            StageKind::GrainMixing => Some(StageKind::GrainSterilization),
            StageKind::GrainSterilization | StageKind::SubstrateMixing => {
                Some(StageKind::SubstrateSterilization)
            }
            StageKind::SubstrateSterilization => Some(StageKind::GrainSpawnIncubation),
            StageKind::GrainSpawnIncubation => Some(StageKind::SubstrateIncubation),
            StageKind::SubstrateIncubation => Some(StageKind::Fruiting),
            StageKind::Fruiting => None,
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Stage-specific quantities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "stage", rename_all = "snake_case")]
pub enum StageDetails {
    GrainMixing,
    GrainSterilization,
    SubstrateMixing {
        num_bags: u64,
        hw_per_bag: f64,
        sh_per_bag: f64,
        water_per_bag: f64,
    },
    SubstrateSterilization {
        num_bags: u64,
        bag_size: u32,
        num_sterilizers: u32,
        capacity_per_cycle: u32,
        cycles: u64,
    },
    GrainSpawnIncubation {
        bag_size: u32,
        spawn_purchased: bool,
    },
    SubstrateIncubation {
        bag_size: u32,
        num_bags: u64,
        substrate_type: String,
    },
    Fruiting {
        bag_size: u32,
        num_bags: u64,
        expected_yield_ratio: f64,
    },
}

impl StageDetails {
    /// Stage kind of these details.
    pub fn kind(&self) -> StageKind {
        match self {
            StageDetails::GrainMixing => StageKind::GrainMixing,
            StageDetails::GrainSterilization => StageKind::GrainSterilization,
            StageDetails::SubstrateMixing { .. } => StageKind::SubstrateMixing,
            StageDetails::SubstrateSterilization { .. } => StageKind::SubstrateSterilization,
            StageDetails::GrainSpawnIncubation { .. } => StageKind::GrainSpawnIncubation,
            StageDetails::SubstrateIncubation { .. } => StageKind::SubstrateIncubation,
            StageDetails::Fruiting { .. } => StageKind::Fruiting,
        }
    }
}

/// One scheduled production step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageBlock {
    /// First calendar day of the stage (display value).
    pub start: NaiveDate,
    /// Day the stage hands off to the next.
    pub end: NaiveDate,
    /// Logical duration (days). May differ from `end - start`.
    pub duration_days: f64,
    /// Stage-specific quantities.
    pub details: StageDetails,
}

impl StageBlock {
    /// Creates a block.
    pub fn new(start: NaiveDate, end: NaiveDate, duration_days: f64, details: StageDetails) -> Self {
        Self {
            start,
            end,
            duration_days,
            details,
        }
    }

    /// Stage kind.
    #[inline]
    pub fn kind(&self) -> StageKind {
        self.details.kind()
    }

    /// Display name.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    /// Calendar days between start and end.
    pub fn calendar_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Bag count, for stages that track one.
    pub fn num_bags(&self) -> Option<u64> {
        match &self.details {
            StageDetails::SubstrateMixing { num_bags, .. }
            | StageDetails::SubstrateSterilization { num_bags, .. }
            | StageDetails::SubstrateIncubation { num_bags, .. }
            | StageDetails::Fruiting { num_bags, .. } => Some(*num_bags),
            _ => None,
        }
    }

    /// Flattens the block into a sparse export row.
    pub fn to_record(&self) -> StageRecord {
        let mut record = StageRecord::bare(self.name(), self.start, self.end, self.duration_days);

        match &self.details {
            StageDetails::GrainMixing | StageDetails::GrainSterilization => {}
            StageDetails::SubstrateMixing {
                num_bags,
                hw_per_bag,
                sh_per_bag,
                water_per_bag,
            } => {
                record.num_bags = Some(*num_bags);
                record.hw_per_bag = Some(*hw_per_bag);
                record.sh_per_bag = Some(*sh_per_bag);
                record.water_per_bag = Some(*water_per_bag);
            }
            StageDetails::SubstrateSterilization {
                num_bags,
                bag_size,
                num_sterilizers,
                capacity_per_cycle,
                cycles,
            } => {
                record.num_bags = Some(*num_bags);
                record.bag_size = Some(*bag_size);
                record.num_sterilizers = Some(*num_sterilizers);
                record.capacity_per_cycle = Some(*capacity_per_cycle);
                record.cycles = Some(*cycles);
            }
            StageDetails::GrainSpawnIncubation {
                bag_size,
                spawn_purchased,
            } => {
                record.bag_size = Some(*bag_size);
                record.spawn_purchased = Some(*spawn_purchased);
            }
            StageDetails::SubstrateIncubation {
                bag_size,
                num_bags,
                substrate_type,
            } => {
                record.bag_size = Some(*bag_size);
                record.num_bags = Some(*num_bags);
                record.substrate_type = Some(substrate_type.clone());
            }
            StageDetails::Fruiting {
                bag_size,
                num_bags,
                expected_yield_ratio,
            } => {
                record.bag_size = Some(*bag_size);
                record.num_bags = Some(*num_bags);
                record.expected_yield_ratio = Some(*expected_yield_ratio);
            }
        }

        record
    }
}

/// Flat, sparse row for one stage block.
///
/// Field order is the column order of the exported table. Fields a stage
/// does not track are `None` and export as empty cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageRecord {
    pub name: String,
    pub date_start: NaiveDate,
    pub date_end: NaiveDate,
    pub duration_days: f64,
    pub num_bags: Option<u64>,
    pub hw_per_bag: Option<f64>,
    pub sh_per_bag: Option<f64>,
    pub water_per_bag: Option<f64>,
    pub bag_size: Option<u32>,
    pub num_sterilizers: Option<u32>,
    pub capacity_per_cycle: Option<u32>,
    pub cycles: Option<u64>,
    pub spawn_purchased: Option<bool>,
    pub substrate_type: Option<String>,
    pub expected_yield_ratio: Option<f64>,
}

impl StageRecord {
    fn bare(name: &str, date_start: NaiveDate, date_end: NaiveDate, duration_days: f64) -> Self {
        Self {
            name: name.to_string(),
            date_start,
            date_end,
            duration_days,
            num_bags: None,
            hw_per_bag: None,
            sh_per_bag: None,
            water_per_bag: None,
            bag_size: None,
            num_sterilizers: None,
            capacity_per_cycle: None,
            cycles: None,
            spawn_purchased: None,
            substrate_type: None,
            expected_yield_ratio: None,
        }
    }

    /// Column names, in export order.
    pub const COLUMNS: [&'static str; 15] = [
        "name",
        "date_start",
        "date_end",
        "duration_days",
        "num_bags",
        "hw_per_bag",
        "sh_per_bag",
        "water_per_bag",
        "bag_size",
        "num_sterilizers",
        "capacity_per_cycle",
        "cycles",
        "spawn_purchased",
        "substrate_type",
        "expected_yield_ratio",
    ];
}
