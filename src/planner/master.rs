//! Master schedule across several plans.
//!
//! Collects the stage blocks of independently computed plans into one
//! table that can be viewed chronologically or grouped by species.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{Plan, PlanRequest};

/// One stage of one plan in the master schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasterRow {
    /// 1-based plan number, in insertion order.
    #[serde(rename = "Plan")]
    pub plan: usize,
    /// Species label.
    #[serde(rename = "Mushroom")]
    pub species: String,
    /// Stage name.
    #[serde(rename = "Task")]
    pub task: String,
    #[serde(rename = "Start")]
    pub start: NaiveDate,
    #[serde(rename = "End")]
    pub end: NaiveDate,
    #[serde(rename = "Duration (days)")]
    pub duration_days: f64,
    #[serde(rename = "Desired Yield (lbs)")]
    pub desired_yield_lbs: f64,
}

/// Aggregated stage rows of several plans.
#[derive(Debug, Clone, Default)]
pub struct MasterSchedule {
    rows: Vec<MasterRow>,
    plans: usize,
    last_number: usize,
}

impl MasterSchedule {
    /// Creates an empty master schedule.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends every block of a plan under the next free plan number.
    ///
    /// Returns the plan number assigned.
    pub fn add_plan(
        &mut self,
        species: impl Into<String>,
        request: &PlanRequest,
        plan: &Plan,
    ) -> usize {
        let number = self.last_number + 1;
        self.add_numbered_plan(number, species, request, plan);
        number
    }

    /// Appends every block of a plan under a caller-chosen plan number,
    /// e.g. its position in a plan file.
    pub fn add_numbered_plan(
        &mut self,
        number: usize,
        species: impl Into<String>,
        request: &PlanRequest,
        plan: &Plan,
    ) {
        self.plans += 1;
        self.last_number = self.last_number.max(number);
        let species = species.into();
        self.rows.extend(plan.blocks.iter().map(|b| MasterRow {
            plan: number,
            species: species.clone(),
            task: b.name().to_string(),
            start: b.start,
            end: b.end,
            duration_days: b.duration_days,
            desired_yield_lbs: request.desired_yield_lbs,
        }));
    }

    /// Rows in insertion order.
    pub fn rows(&self) -> &[MasterRow] {
        &self.rows
    }

    /// Rows sorted by start, then end, then plan number.
    pub fn chronological(&self) -> Vec<&MasterRow> {
        let mut rows: Vec<&MasterRow> = self.rows.iter().collect();
        rows.sort_by(|a, b| {
            a.start
                .cmp(&b.start)
                .then(a.end.cmp(&b.end))
                .then(a.plan.cmp(&b.plan))
        });
        rows
    }

    /// Rows grouped by species name, each group chronological.
    pub fn by_species(&self) -> BTreeMap<&str, Vec<&MasterRow>> {
        let mut groups: BTreeMap<&str, Vec<&MasterRow>> = BTreeMap::new();
        for row in self.chronological() {
            groups.entry(row.species.as_str()).or_default().push(row);
        }
        groups
    }

    /// Earliest start and latest end over all rows.
    pub fn span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let start = self.rows.iter().map(|r| r.start).min()?;
        let end = self.rows.iter().map(|r| r.end).max()?;
        Some((start, end))
    }

    /// Number of plans added.
    pub fn plan_count(&self) -> usize {
        self.plans
    }

    /// Whether no plan has been added.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
