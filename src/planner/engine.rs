//! Backward-chained plan engine.
//!
//! # Algorithm
//!
//! 1. Anchor fruiting on the harvest date; size fruiting bags from the
//!    yield target.
//! 2. Walk upstream: every stage ends on the start of the stage it feeds.
//! 3. Inflate each upstream bag count by the loss factor.
//! 4. Size sterilization cycles from the per-cycle capacity of the
//!    fruiting bag size, scaled by sterilizer count.
//! 5. Derive mix and material tables and the schedule span.
//!
//! Every bag and cycle count is a ceiling: partial bags cannot be made.
//!
//! # Complexity
//! O(1): a fixed chain of seven stages.

use chrono::{Duration, NaiveDate};
use tracing::{debug, instrument, warn};

use crate::error::PlanError;
use crate::models::{
    MaterialRow, MixRatioRow, Plan, PlanRequest, PlanSummary, ProcessConstants, StageBlock,
    StageDetails, TotalDuration,
};

/// Logical duration recorded for grain bag mixing (days).
pub const GRAIN_MIXING_DAYS: f64 = 0.5;

/// Calendar days grain bag mixing is displayed over.
///
/// The half-day step is shown on the full prior calendar day; the schedule
/// span removes this extra day again.
const GRAIN_MIXING_DISPLAY_DAYS: u32 = 1;

/// Computes a production plan by chaining stages backward from the harvest date.
///
/// Pure: the same request and constants always give the same plan.
///
/// Request parameters are not validated here (see
/// [`crate::validation::validate_request`]); a non-positive yield yields a
/// zero bag count and zero sterilizers yield zero cycles.
///
/// # Errors
/// - [`PlanError::UnknownBagSize`] if the fruiting bag size has no sterilizer
///   capacity entry. Nothing is computed in that case.
/// - [`PlanError::DateOutOfRange`] if a stage would start before the
///   earliest representable date.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_harvest::models::{PlanRequest, ProcessConstants, SpeciesProfile, StageKind};
/// use u_harvest::planner::compute_plan;
///
/// let species = SpeciesProfile::new(14, 21, 21, 0.20, 3);
/// let harvest = NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
/// let request = PlanRequest::new(100.0, harvest, 5, species);
///
/// let plan = compute_plan(&request, &ProcessConstants::default()).unwrap();
/// let fruiting = plan.block(StageKind::Fruiting).unwrap();
/// assert_eq!(fruiting.num_bags(), Some(102));
/// assert_eq!(fruiting.start, NaiveDate::from_ymd_opt(2025, 6, 9).unwrap());
/// ```
#[instrument(
    level = "debug",
    skip(request, constants),
    fields(
        harvest = %request.desired_harvest_date,
        yield_lbs = request.desired_yield_lbs,
        bag_size = request.fruiting_bag_size_lbs,
    )
)]
pub fn compute_plan(request: &PlanRequest, constants: &ProcessConstants) -> Result<Plan, PlanError> {
    let bag_size = request.fruiting_bag_size_lbs;
    let capacity = constants
        .capacity_for(bag_size)
        .ok_or(PlanError::UnknownBagSize { bag_size })?;
    let loss = constants.loss_factor;
    let species = &request.species;
    let bag_size_lbs = f64::from(bag_size);

    // 1. Fruiting (anchor)
    let fruit_end = request.desired_harvest_date;
    let fruit_start = days_before(fruit_end, species.fruiting_days)?;
    let fruit_bags = ceil_count(
        (request.desired_yield_lbs * loss) / (species.expected_yield_ratio * bag_size_lbs),
    );
    if fruit_bags == 0 {
        warn!(
            yield_lbs = request.desired_yield_lbs,
            "degenerate request: no fruiting bags required"
        );
    }
    let fruiting = StageBlock::new(
        fruit_start,
        fruit_end,
        f64::from(species.fruiting_days),
        StageDetails::Fruiting {
            bag_size,
            num_bags: fruit_bags,
            expected_yield_ratio: species.expected_yield_ratio,
        },
    );

    // 2. Substrate bag incubation
    let inc_end = fruit_start;
    let inc_start = days_before(inc_end, species.incubation_days)?;
    let inc_bags = inflate(fruit_bags, loss);
    let substrate_incubation = StageBlock::new(
        inc_start,
        inc_end,
        f64::from(species.incubation_days),
        StageDetails::SubstrateIncubation {
            bag_size,
            num_bags: inc_bags,
            substrate_type: request.substrate_type.clone(),
        },
    );

    // 3. Grain spawn incubation
    let spawn_days = species.spawn_incubation_days(request.spawn_purchased);
    let spawn_end = inc_start;
    let spawn_start = days_before(spawn_end, spawn_days)?;
    let grain_spawn = StageBlock::new(
        spawn_start,
        spawn_end,
        f64::from(spawn_days),
        StageDetails::GrainSpawnIncubation {
            bag_size: request.effective_grain_bag_size(),
            spawn_purchased: request.spawn_purchased,
        },
    );

    // 4. Substrate bag sterilization
    let ster_end = spawn_start;
    let ster_start = fractional_days_before(ster_end, request.substrate_sterilization_days)?;
    let ster_bags = inflate(inc_bags, loss);
    let batch = u64::from(capacity) * u64::from(request.num_sterilizers);
    let cycles = if batch == 0 {
        warn!(
            sterilizers = request.num_sterilizers,
            capacity, "zero batch capacity; reporting no sterilization cycles"
        );
        0
    } else {
        ster_bags.div_ceil(batch)
    };
    let substrate_sterilization = StageBlock::new(
        ster_start,
        ster_end,
        request.substrate_sterilization_days,
        StageDetails::SubstrateSterilization {
            num_bags: ster_bags,
            bag_size,
            num_sterilizers: request.num_sterilizers,
            capacity_per_cycle: capacity,
            cycles,
        },
    );

    // 5. Substrate bag mixing
    let ratios = &constants.substrate_mix_ratios;
    let hw_per_bag = ratios.hw_pellets_per_lb * bag_size_lbs;
    let sh_per_bag = ratios.sh_pellets_per_lb * bag_size_lbs;
    let water_per_bag = ratios.water_per_lb * bag_size_lbs;
    let mix_end = ster_start;
    let mix_start = fractional_days_before(mix_end, request.substrate_mix_days)?;
    let substrate_mixing = StageBlock::new(
        mix_start,
        mix_end,
        request.substrate_mix_days,
        StageDetails::SubstrateMixing {
            num_bags: ster_bags,
            hw_per_bag,
            sh_per_bag,
            water_per_bag,
        },
    );

    // 6. Grain bag sterilization, in parallel with substrate mixing
    let gbs_end = ster_start;
    let gbs_start = fractional_days_before(gbs_end, request.grain_sterilization_days)?;
    let grain_sterilization = StageBlock::new(
        gbs_start,
        gbs_end,
        request.grain_sterilization_days,
        StageDetails::GrainSterilization,
    );

    // 7. Grain bag mixing
    let gm_end = gbs_start;
    let gm_start = days_before(gm_end, GRAIN_MIXING_DISPLAY_DAYS)?;
    let grain_mixing = StageBlock::new(
        gm_start,
        gm_end,
        GRAIN_MIXING_DAYS,
        StageDetails::GrainMixing,
    );

    let blocks = vec![
        grain_mixing,
        grain_sterilization,
        substrate_mixing,
        substrate_sterilization,
        grain_spawn,
        substrate_incubation,
        fruiting,
    ];

    let schedule_start = blocks
        .iter()
        .map(|b| b.start)
        .min()
        .unwrap_or(fruit_start);
    let logical_start = logical_schedule_start(schedule_start, &blocks[0]);
    let total_duration = TotalDuration::from_days((fruit_end - logical_start).num_days());

    let mix_ratio = vec![
        MixRatioRow {
            component: "HW pellets (lbs per bag)".to_string(),
            amount_lbs: hw_per_bag,
        },
        MixRatioRow {
            component: "SH pellets (lbs per bag)".to_string(),
            amount_lbs: sh_per_bag,
        },
        MixRatioRow {
            component: "Water (lbs per bag)".to_string(),
            amount_lbs: water_per_bag,
        },
    ];

    let batch_bags = ster_bags as f64;
    let materials = vec![
        MaterialRow {
            material: "HW pellets total (lbs)".to_string(),
            total: hw_per_bag * batch_bags,
        },
        MaterialRow {
            material: "SH pellets total (lbs)".to_string(),
            total: sh_per_bag * batch_bags,
        },
        MaterialRow {
            material: "Water total (lbs)".to_string(),
            total: water_per_bag * batch_bags,
        },
        MaterialRow {
            material: "Bags planned".to_string(),
            total: batch_bags,
        },
        MaterialRow {
            material: "Bag size (lbs)".to_string(),
            total: bag_size_lbs,
        },
    ];

    debug!(
        fruiting_bags = fruit_bags,
        sterilized_bags = ster_bags,
        cycles,
        start = %schedule_start,
        total = %total_duration,
        "plan computed"
    );

    Ok(Plan {
        blocks,
        mix_ratio,
        materials,
        summary: PlanSummary {
            fruiting_bags: fruit_bags,
            schedule_start,
            schedule_end: fruit_end,
            total_duration,
        },
    })
}

/// Start date used for span arithmetic.
///
/// When grain mixing opens the schedule, its displayed start is one
/// calendar day early; the span starts one day later to compensate.
fn logical_schedule_start(earliest: NaiveDate, grain_mixing: &StageBlock) -> NaiveDate {
    if earliest == grain_mixing.start && grain_mixing.duration_days == GRAIN_MIXING_DAYS {
        // One display day later, i.e. the grain mixing end.
        grain_mixing.end
    } else {
        earliest
    }
}

fn days_before(date: NaiveDate, days: u32) -> Result<NaiveDate, PlanError> {
    step_back(date, i64::from(days), f64::from(days))
}

/// Subtracts a fractional day count, keeping whole calendar days (floor).
fn fractional_days_before(date: NaiveDate, days: f64) -> Result<NaiveDate, PlanError> {
    step_back(date, days.floor() as i64, days)
}

fn step_back(date: NaiveDate, whole_days: i64, days: f64) -> Result<NaiveDate, PlanError> {
    Duration::try_days(whole_days)
        .and_then(|delta| date.checked_sub_signed(delta))
        .ok_or(PlanError::DateOutOfRange { date, days })
}

/// Smallest whole count covering `x`. Negative and NaN inputs give 0.
fn ceil_count(x: f64) -> u64 {
    x.ceil() as u64
}

/// Upstream count that survives `loss` attrition.
fn inflate(bags: u64, loss: f64) -> u64 {
    ceil_count(bags as f64 * loss)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{SpeciesProfile, StageKind};
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn lions_mane() -> SpeciesProfile {
        SpeciesProfile::new(14, 21, 21, 0.20, 3)
    }

    fn base_request() -> PlanRequest {
        PlanRequest::new(100.0, d(2025, 6, 30), 5, lions_mane()).with_substrate_type("Masters Mix")
    }

    fn block(plan: &Plan, kind: StageKind) -> &StageBlock {
        plan.block(kind).unwrap()
    }

    fn assert_chain(plan: &Plan, harvest: NaiveDate) {
        assert_eq!(plan.blocks.len(), 7);
        for (b, kind) in plan.blocks.iter().zip(StageKind::ALL) {
            assert_eq!(b.kind(), kind);
            match kind.feeds() {
                Some(next) => assert_eq!(b.end, block(plan, next).start, "{kind} → {next}"),
                None => assert_eq!(b.end, harvest),
            }
        }
    }

    #[test]
    fn test_reference_scenario() {
        let plan = compute_plan(&base_request(), &ProcessConstants::default()).unwrap();

        let fruiting = block(&plan, StageKind::Fruiting);
        assert_eq!(fruiting.num_bags(), Some(102));
        assert_eq!(fruiting.start, d(2025, 6, 9));
        assert_eq!(fruiting.end, d(2025, 6, 30));

        let inc = block(&plan, StageKind::SubstrateIncubation);
        assert_eq!(inc.start, d(2025, 5, 26));
        assert_eq!(inc.num_bags(), Some(105));

        let spawn = block(&plan, StageKind::GrainSpawnIncubation);
        assert_eq!(spawn.start, d(2025, 5, 25));

        let ster = block(&plan, StageKind::SubstrateSterilization);
        assert_eq!(ster.start, d(2025, 5, 22));
        match &ster.details {
            StageDetails::SubstrateSterilization {
                num_bags, cycles, ..
            } => {
                assert_eq!(*num_bags, 108);
                assert_eq!(*cycles, 2);
            }
            other => panic!("unexpected details {other:?}"),
        }

        assert_eq!(block(&plan, StageKind::SubstrateMixing).start, d(2025, 5, 21));
        assert_eq!(block(&plan, StageKind::GrainSterilization).start, d(2025, 5, 21));
        assert_eq!(block(&plan, StageKind::GrainMixing).start, d(2025, 5, 20));

        assert_eq!(plan.summary.fruiting_bags, 102);
        assert_eq!(plan.summary.schedule_start, d(2025, 5, 20));
        assert_eq!(plan.summary.schedule_end, d(2025, 6, 30));
        // May 21 → Jun 30 = 40 days once the display day is removed.
        assert_eq!(plan.summary.total_duration.total_days(), 40);
        assert_eq!(plan.summary.total_duration.to_string(), "5 weeks, 5 days");

        assert_chain(&plan, d(2025, 6, 30));
    }

    #[test]
    fn test_mix_and_materials() {
        let plan = compute_plan(&base_request(), &ProcessConstants::default()).unwrap();

        let amounts: Vec<f64> = plan.mix_ratio.iter().map(|r| r.amount_lbs).collect();
        assert!((amounts[0] - 1.0).abs() < 1e-9);
        assert!((amounts[1] - 1.0).abs() < 1e-9);
        assert!((amounts[2] - 3.0).abs() < 1e-9);

        assert!((plan.material_total("HW pellets total (lbs)").unwrap() - 108.0).abs() < 1e-9);
        assert!((plan.material_total("Water total (lbs)").unwrap() - 324.0).abs() < 1e-9);
        assert_eq!(plan.material_total("Bags planned"), Some(108.0));
        assert_eq!(plan.material_total("Bag size (lbs)"), Some(5.0));
        assert_eq!(plan.materials.len(), 5);

        let mixing = block(&plan, StageKind::SubstrateMixing);
        assert_eq!(mixing.num_bags(), Some(108));
    }

    #[test]
    fn test_spawn_sourcing_duration() {
        let constants = ProcessConstants::default();

        let bought = compute_plan(&base_request(), &constants).unwrap();
        let spawn = block(&bought, StageKind::GrainSpawnIncubation);
        assert!((spawn.duration_days - 1.0).abs() < 1e-12);
        assert_eq!(spawn.calendar_days(), 1);

        let grown = compute_plan(&base_request().with_spawn_purchased(false), &constants).unwrap();
        let spawn = block(&grown, StageKind::GrainSpawnIncubation);
        assert!((spawn.duration_days - 22.0).abs() < 1e-12);
        assert_eq!(spawn.start, d(2025, 5, 4));
        // Apr 30 → Jun 30.
        assert_eq!(grown.summary.total_duration.total_days(), 61);
        assert_chain(&grown, d(2025, 6, 30));
    }

    #[test]
    fn test_grain_spawn_bag_size() {
        let constants = ProcessConstants::default();
        let plan = compute_plan(&base_request(), &constants).unwrap();
        let record = block(&plan, StageKind::GrainSpawnIncubation).to_record();
        assert_eq!(record.bag_size, Some(3));
        assert_eq!(record.spawn_purchased, Some(true));

        let plan = compute_plan(&base_request().with_grain_bag_size(6), &constants).unwrap();
        let record = block(&plan, StageKind::GrainSpawnIncubation).to_record();
        assert_eq!(record.bag_size, Some(6));
    }

    #[test]
    fn test_grain_mixing_display_vs_logical() {
        let plan = compute_plan(&base_request(), &ProcessConstants::default()).unwrap();
        let gm = block(&plan, StageKind::GrainMixing);
        assert!((gm.duration_days - 0.5).abs() < 1e-12);
        assert_eq!(gm.calendar_days(), 1);
    }

    #[test]
    fn test_no_reconciliation_when_substrate_mixing_is_earliest() {
        // Five days of mixing starts before grain mixing (May 20).
        let request = base_request().with_substrate_mix_days(5.0);
        let plan = compute_plan(&request, &ProcessConstants::default()).unwrap();

        assert_eq!(plan.summary.schedule_start, d(2025, 5, 17));
        // May 17 → Jun 30, no correction.
        assert_eq!(plan.summary.total_duration.total_days(), 44);
        assert_eq!(plan.summary.total_duration.to_string(), "6 weeks, 2 days");
    }

    #[test]
    fn test_reconciliation_applies_on_tie() {
        // Two days of mixing also starts May 20; grain mixing still opens the span.
        let request = base_request().with_substrate_mix_days(2.0);
        let plan = compute_plan(&request, &ProcessConstants::default()).unwrap();

        assert_eq!(plan.summary.schedule_start, d(2025, 5, 20));
        assert_eq!(plan.summary.total_duration.total_days(), 40);
    }

    #[test]
    fn test_fractional_operator_durations() {
        let request = base_request()
            .with_substrate_sterilization_days(1.5)
            .with_grain_sterilization_days(0.5);
        let plan = compute_plan(&request, &ProcessConstants::default()).unwrap();

        let ster = block(&plan, StageKind::SubstrateSterilization);
        assert!((ster.duration_days - 1.5).abs() < 1e-12);
        assert_eq!(ster.calendar_days(), 1);

        let gbs = block(&plan, StageKind::GrainSterilization);
        assert!((gbs.duration_days - 0.5).abs() < 1e-12);
        assert_eq!(gbs.calendar_days(), 0);
        assert_chain(&plan, d(2025, 6, 30));
    }

    #[test]
    fn test_sterilizer_scaling() {
        let constants = ProcessConstants::default();
        let cycles = |n: u32| {
            let plan = compute_plan(&base_request().with_sterilizers(n), &constants).unwrap();
            block(&plan, StageKind::SubstrateSterilization)
                .to_record()
                .cycles
                .unwrap()
        };
        // 108 bags, 40 per cycle per sterilizer.
        assert_eq!(cycles(1), 3);
        assert_eq!(cycles(2), 2);
        assert_eq!(cycles(3), 1);
    }

    #[test]
    fn test_ten_pound_bags() {
        let mut request = base_request();
        request.fruiting_bag_size_lbs = 10;
        let plan = compute_plan(&request, &ProcessConstants::default()).unwrap();
        // ceil(102 / 2.0) = 51 → 53 → 55 bags; 20 per cycle × 2.
        assert_eq!(plan.summary.fruiting_bags, 51);
        let record = block(&plan, StageKind::SubstrateSterilization).to_record();
        assert_eq!(record.num_bags, Some(55));
        assert_eq!(record.capacity_per_cycle, Some(20));
        assert_eq!(record.cycles, Some(2));
        assert!((plan.mix_ratio[2].amount_lbs - 6.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_bag_size_fails_fast() {
        let mut request = base_request();
        request.fruiting_bag_size_lbs = 7;
        let err = compute_plan(&request, &ProcessConstants::default()).unwrap_err();
        assert!(matches!(err, PlanError::UnknownBagSize { bag_size: 7 }));
    }

    #[test]
    fn test_degenerate_inputs_do_not_panic() {
        let constants = ProcessConstants::default();

        let mut zero = base_request();
        zero.desired_yield_lbs = 0.0;
        let plan = compute_plan(&zero, &constants).unwrap();
        assert_eq!(plan.summary.fruiting_bags, 0);
        assert_eq!(block(&plan, StageKind::SubstrateSterilization).num_bags(), Some(0));

        let mut negative = base_request();
        negative.desired_yield_lbs = -50.0;
        let plan = compute_plan(&negative, &constants).unwrap();
        assert_eq!(plan.summary.fruiting_bags, 0);

        let plan = compute_plan(&base_request().with_sterilizers(0), &constants).unwrap();
        let record = block(&plan, StageKind::SubstrateSterilization).to_record();
        assert_eq!(record.cycles, Some(0));
    }

    #[test]
    fn test_huge_durations_are_errors() {
        let constants = ProcessConstants::default();
        let out_of_range = |request: &PlanRequest| {
            matches!(
                compute_plan(request, &constants),
                Err(PlanError::DateOutOfRange { .. })
            )
        };

        assert!(out_of_range(&base_request().with_substrate_sterilization_days(1e9)));
        assert!(out_of_range(&base_request().with_substrate_mix_days(f64::MAX)));

        let mut long_fruiting = base_request();
        long_fruiting.species.fruiting_days = 200_000_000;
        assert!(out_of_range(&long_fruiting));

        let mut long_culture = base_request().with_spawn_purchased(false);
        long_culture.species.cultural_inoculation_days = u32::MAX;
        assert!(out_of_range(&long_culture));
    }

    #[test]
    fn test_plan_near_earliest_date() {
        // Fruiting reaches back to the first representable date.
        let harvest = NaiveDate::MIN + Duration::days(21);
        let request = PlanRequest::new(100.0, harvest, 5, lions_mane());
        let err = compute_plan(&request, &ProcessConstants::default()).unwrap_err();
        assert!(matches!(err, PlanError::DateOutOfRange { date, .. } if date == NaiveDate::MIN));
    }

    #[test]
    fn test_idempotent() {
        let constants = ProcessConstants::default();
        let request = base_request().with_spawn_purchased(false);
        let a = compute_plan(&request, &constants).unwrap();
        let b = compute_plan(&request, &constants).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    fn half_days(rng: &mut SmallRng) -> f64 {
        f64::from(rng.random_range(0..10u32)) * 0.5
    }

    fn random_request(rng: &mut SmallRng) -> PlanRequest {
        let species = SpeciesProfile::new(
            rng.random_range(1..60),
            rng.random_range(1..80),
            rng.random_range(1..90),
            rng.random_range(0.05..=1.0),
            if rng.random_bool(0.5) { 3 } else { 6 },
        );
        let harvest = d(2025, 1, 1) + Duration::days(rng.random_range(0..730));
        let bag_size = if rng.random_bool(0.5) { 5 } else { 10 };

        PlanRequest::new(rng.random_range(1.0..5000.0), harvest, bag_size, species)
            .with_spawn_purchased(rng.random_bool(0.5))
            .with_substrate_mix_days(half_days(rng))
            .with_substrate_sterilization_days(half_days(rng))
            .with_grain_sterilization_days(half_days(rng))
            .with_sterilizers(rng.random_range(1..6))
    }

    #[test]
    fn test_random_requests_hold_invariants() {
        let mut rng = SmallRng::seed_from_u64(42);

        for _ in 0..500 {
            let constants = ProcessConstants::default()
                .with_loss_factor(rng.random_range(1.0..1.3));
            let request = random_request(&mut rng);
            let plan = compute_plan(&request, &constants).unwrap();
            let loss = constants.loss_factor;

            assert_chain(&plan, request.desired_harvest_date);

            // Ceiling property at every stage.
            let size = f64::from(request.fruiting_bag_size_lbs);
            let fruit_bags = plan.summary.fruiting_bags as f64;
            let required = request.desired_yield_lbs * loss;
            assert!(
                fruit_bags * request.species.expected_yield_ratio * size >= required * (1.0 - 1e-12)
            );

            let inc_bags = block(&plan, StageKind::SubstrateIncubation).num_bags().unwrap();
            assert!(inc_bags as f64 >= fruit_bags * loss * (1.0 - 1e-12));

            let ster = block(&plan, StageKind::SubstrateSterilization).to_record();
            let ster_bags = ster.num_bags.unwrap();
            assert!(ster_bags as f64 >= inc_bags as f64 * loss * (1.0 - 1e-12));

            // Cycle capacity covers the batch, with no slack cycle.
            let batch = u64::from(ster.capacity_per_cycle.unwrap())
                * u64::from(ster.num_sterilizers.unwrap());
            let cycles = ster.cycles.unwrap();
            assert!(batch * cycles >= ster_bags);
            assert!(batch * cycles.saturating_sub(1) < ster_bags);

            // Grain mixing: half a day, shown over one calendar day.
            let gm = block(&plan, StageKind::GrainMixing);
            assert_eq!(gm.calendar_days(), 1);
            assert!((gm.duration_days - 0.5).abs() < 1e-12);

            // Span: earliest display start, minus the display day when grain mixing opens it.
            let earliest = plan.blocks.iter().map(|b| b.start).min().unwrap();
            assert_eq!(plan.summary.schedule_start, earliest);
            let expected_days = (request.desired_harvest_date - earliest).num_days()
                - i64::from(earliest == gm.start);
            assert_eq!(plan.summary.total_duration.total_days(), expected_days);
        }
    }

    #[test]
    fn test_loss_factor_monotonicity() {
        let mut rng = SmallRng::seed_from_u64(7);
        let losses = [1.0, 1.01, 1.02, 1.05, 1.1, 1.25];

        for _ in 0..200 {
            let request = random_request(&mut rng);
            let counts: Vec<(u64, u64, u64, u64)> = losses
                .iter()
                .map(|&loss| {
                    let constants = ProcessConstants::default().with_loss_factor(loss);
                    let plan = compute_plan(&request, &constants).unwrap();
                    let ster = block(&plan, StageKind::SubstrateSterilization).to_record();
                    (
                        plan.summary.fruiting_bags,
                        block(&plan, StageKind::SubstrateIncubation).num_bags().unwrap(),
                        ster.num_bags.unwrap(),
                        ster.cycles.unwrap(),
                    )
                })
                .collect();

            for pair in counts.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                assert!(b.0 >= a.0 && b.1 >= a.1 && b.2 >= a.2 && b.3 >= a.3);
            }
        }
    }
}
