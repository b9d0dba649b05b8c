use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use u_harvest::config::{NamedRequest, PlanFile};
use u_harvest::export;
use u_harvest::models::Plan;
use u_harvest::planner::{MasterSchedule, Planner};
use u_harvest::reference::{ReferenceData, SpeciesRegistry};
use u_harvest::validation::validate_constants;
use u_harvest::PlanError;

#[derive(Parser)]
#[command(
    name = "u-harvest",
    version,
    about = "Backward-chained mushroom production schedules"
)]
struct Cli {
    /// Reference data TOML (defaults to the built-in tables).
    #[arg(long, global = true)]
    reference: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute every plan in a plan file.
    Plan {
        /// Plan file (TOML).
        file: PathBuf,
        /// Write the stage table of each plan as CSV. With several plans,
        /// the plan number is appended to the file stem.
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Write the combined master schedule as CSV.
        #[arg(long)]
        master_csv: Option<PathBuf>,
        /// Print plans as JSON instead of tables.
        #[arg(long)]
        json: bool,
    },
    /// List species and their parameters.
    Species,
}

fn main() -> anyhow::Result<()> {
    u_harvest::logging::init();
    let cli = Cli::parse();

    let reference = match &cli.reference {
        Some(path) => {
            let data = ReferenceData::load(path)
                .with_context(|| format!("cannot load reference data: {}", path.display()))?;
            validate_constants(data.constants())
                .map_err(PlanError::from)
                .with_context(|| format!("invalid process constants in {}", path.display()))?;
            data
        }
        None => ReferenceData::builtin(),
    };

    match cli.command {
        Commands::Plan {
            file,
            csv,
            master_csv,
            json,
        } => run_plan(&reference, &file, csv.as_deref(), master_csv.as_deref(), json),
        Commands::Species => {
            list_species(&reference);
            Ok(())
        }
    }
}

fn run_plan(
    reference: &ReferenceData,
    file: &Path,
    csv: Option<&Path>,
    master_csv: Option<&Path>,
    json: bool,
) -> anyhow::Result<()> {
    let plan_file = PlanFile::load(file)
        .with_context(|| format!("cannot read plan file: {}", file.display()))?;
    let mut registry = SpeciesRegistry::new(reference);
    let requests = plan_file.resolve(&mut registry)?;
    if requests.is_empty() {
        println!("No plan with a positive desired yield.");
        return Ok(());
    }

    let planner = Planner::from_reference(reference);
    let mut master = MasterSchedule::new();
    let multiple = plan_file.plans.len() > 1;

    for NamedRequest {
        number,
        species,
        request,
    } in &requests
    {
        let number = *number;
        let plan = planner
            .plan(request)
            .with_context(|| format!("cannot plan {species} (plan {number})"))?;
        master.add_numbered_plan(number, species.as_str(), request, &plan);

        if json {
            println!("{}", serde_json::to_string_pretty(&plan)?);
        } else {
            print_plan(number, species, &plan);
        }

        if let Some(path) = csv {
            let path = numbered_path(path, number, multiple);
            let out = File::create(&path)
                .with_context(|| format!("cannot create output file: {}", path.display()))?;
            export::write_blocks_csv(&plan.blocks, out)?;
            info!(path = %path.display(), "wrote stage table");
        }
    }

    if multiple && !json {
        print_master(&master);
    }

    if let Some(path) = master_csv {
        let out = File::create(path)
            .with_context(|| format!("cannot create output file: {}", path.display()))?;
        export::write_master_csv(&master, out)?;
        info!(path = %path.display(), rows = master.rows().len(), "wrote master schedule");
    }

    Ok(())
}

fn numbered_path(path: &Path, number: usize, multiple: bool) -> PathBuf {
    if !multiple {
        return path.to_path_buf();
    }
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = match path.extension() {
        Some(ext) => format!("{stem}_{number}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{number}"),
    };
    path.with_file_name(name)
}

fn print_plan(number: usize, species: &str, plan: &Plan) {
    let summary = &plan.summary;
    println!("=== Plan {number}: {species} ===");
    println!("Fruiting bags:   {}", summary.fruiting_bags);
    println!("Schedule starts: {}", summary.schedule_start);
    println!("Schedule ends:   {}", summary.schedule_end);
    println!("Total duration:  {}", summary.total_duration);
    println!();

    println!("{:<30} {:<12} {:<12} {:>6} {:>6}", "Stage", "Start", "End", "Days", "Bags");
    for block in &plan.blocks {
        let bags = block.num_bags().map(|n| n.to_string()).unwrap_or_default();
        println!(
            "{:<30} {:<12} {:<12} {:>6} {:>6}",
            block.name(),
            block.start.to_string(),
            block.end.to_string(),
            block.duration_days,
            bags
        );
    }
    println!();

    println!("Mix ratio (per bag)");
    for row in &plan.mix_ratio {
        println!("  {:<28} {:>10.2}", row.component, row.amount_lbs);
    }
    println!("Materials (total quantities)");
    for row in &plan.materials {
        println!("  {:<28} {:>10.2}", row.material, row.total);
    }
    println!();
}

fn print_master(master: &MasterSchedule) {
    println!("=== Master schedule ===");
    if let Some((start, end)) = master.span() {
        println!("{start} → {end}");
    }
    for (species, rows) in master.by_species() {
        println!("{species}");
        for row in rows {
            println!(
                "  [{}] {:<30} {} → {}",
                row.plan, row.task, row.start, row.end
            );
        }
    }
}

fn list_species(reference: &ReferenceData) {
    println!(
        "{:<16} {:>10} {:>8} {:>9} {:>7} {:>6}",
        "Species", "Incubation", "Culture", "Fruiting", "Yield", "Grain"
    );
    for entry in reference.species_entries() {
        let p = &entry.profile;
        println!(
            "{:<16} {:>10} {:>8} {:>9} {:>7.2} {:>6}",
            entry.name,
            p.incubation_days,
            p.cultural_inoculation_days,
            p.fruiting_days,
            p.expected_yield_ratio,
            p.default_grain_size_lbs
        );
    }
    println!();
    println!("Fruiting bag sizes (lbs): {:?}", reference.fruiting_bag_sizes());
    println!("Grain bag sizes (lbs):    {:?}", reference.grain_bag_sizes());
    println!("Substrate types:          {}", reference.substrate_types().join(", "));
}
