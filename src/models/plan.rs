//! Plan (engine output) model.
//!
//! A plan bundles the ordered stage blocks with the per-bag mix table,
//! the batch material totals and a headline summary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::{StageBlock, StageKind};

/// A computed production plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    /// Seven stage blocks in plan order.
    pub blocks: Vec<StageBlock>,
    /// Per-bag substrate composition.
    pub mix_ratio: Vec<MixRatioRow>,
    /// Totals for the substrate sterilization batch.
    pub materials: Vec<MaterialRow>,
    /// Headline figures.
    pub summary: PlanSummary,
}

/// One component of the per-bag substrate mix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixRatioRow {
    pub component: String,
    pub amount_lbs: f64,
}

/// One line of the material totals table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRow {
    pub material: String,
    pub total: f64,
}

/// Plan headline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSummary {
    /// Bags entering fruiting.
    pub fruiting_bags: u64,
    /// Earliest displayed start across all blocks.
    pub schedule_start: NaiveDate,
    /// Harvest date (fruiting end).
    pub schedule_end: NaiveDate,
    /// Logical span of the schedule.
    pub total_duration: TotalDuration,
}

/// A day count split into whole weeks and remaining days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalDuration {
    pub weeks: i64,
    pub days: i64,
}

impl TotalDuration {
    /// Splits a day count with floor division by 7.
    pub fn from_days(total_days: i64) -> Self {
        Self {
            weeks: total_days.div_euclid(7),
            days: total_days.rem_euclid(7),
        }
    }

    /// Total day count.
    pub fn total_days(&self) -> i64 {
        self.weeks * 7 + self.days
    }
}

impl fmt::Display for TotalDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} weeks, {} days", self.weeks, self.days)
    }
}

impl Plan {
    /// Finds the block for a stage.
    pub fn block(&self, kind: StageKind) -> Option<&StageBlock> {
        self.blocks.iter().find(|b| b.kind() == kind)
    }

    /// Looks up a material total by label.
    pub fn material_total(&self, material: &str) -> Option<f64> {
        self.materials
            .iter()
            .find(|m| m.material == material)
            .map(|m| m.total)
    }

    /// Number of stage blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_duration_split() {
        let t = TotalDuration::from_days(68);
        assert_eq!(t.weeks, 9);
        assert_eq!(t.days, 5);
        assert_eq!(t.total_days(), 68);
        assert_eq!(t.to_string(), "9 weeks, 5 days");
    }

    #[test]
    fn test_total_duration_floor_for_negative() {
        // Floor division keeps days in 0..7.
        let t = TotalDuration::from_days(-3);
        assert_eq!(t.weeks, -1);
        assert_eq!(t.days, 4);
        assert_eq!(t.total_days(), -3);
    }

    #[test]
    fn test_total_duration_exact_weeks() {
        assert_eq!(TotalDuration::from_days(14).to_string(), "2 weeks, 0 days");
        assert_eq!(TotalDuration::from_days(0).to_string(), "0 weeks, 0 days");
    }
}
