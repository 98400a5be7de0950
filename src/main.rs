use clap::Parser;
use project_overrun::analysis::finance::{FinancialSummary, UnitPrice};
use project_overrun::io::{reporting, scenario};
use project_overrun::logging::init_tracing;
use project_overrun::simulation::batch::run_batch;
use project_overrun::{ProjectSimulation, RunStatus, SimulationConfig, TechDebtLevel};
use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "project-overrun")]
#[command(about = "Simulate how staffing, defects and scope creep blow up a project budget")]
#[command(version)]
struct Args {
    /// TOML scenario file; flags below override its values
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Initial scope in story points
    #[arg(long)]
    scope: Option<f64>,

    /// Initial headcount
    #[arg(long)]
    staff: Option<u32>,

    /// People added in the crisis response
    #[arg(long)]
    add_staff: Option<u32>,

    /// Day the extra people join
    #[arg(long)]
    trigger_day: Option<u32>,

    /// Technical debt level: Low, Medium or High
    #[arg(long)]
    tech_debt: Option<TechDebtLevel>,

    /// Daily probability of a scope creep event
    #[arg(long)]
    creep: Option<f64>,

    /// Give up after this many days
    #[arg(long)]
    max_days: Option<u32>,

    /// Seed for the scope creep draws
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Monthly cost of one engineer
    #[arg(long, default_value_t = 1_000_000.0)]
    monthly_price: f64,

    /// Write the daily history (or batch runs) to this CSV file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Run a Monte-Carlo batch of this many seeds instead of a single run
    #[arg(long)]
    runs: Option<usize>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn config(&self) -> Result<SimulationConfig, Box<dyn Error>> {
        let mut config = match &self.scenario {
            Some(path) => scenario::load_scenario(path)?,
            None => SimulationConfig::default(),
        };

        if let Some(scope) = self.scope {
            config.total_scope = scope;
        }
        if let Some(staff) = self.staff {
            config.initial_staff = staff;
        }
        if let Some(add) = self.add_staff {
            config.add_staff_num = add;
        }
        if let Some(day) = self.trigger_day {
            config.add_staff_trigger_day = day;
        }
        if let Some(level) = self.tech_debt {
            config.tech_debt_level = level;
        }
        if let Some(creep) = self.creep {
            config.scope_creep_probability = creep;
        }
        if let Some(days) = self.max_days {
            config.max_days = days;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            let mut source = e.source();
            while let Some(cause) = source {
                eprintln!("  caused by: {}", cause);
                source = cause.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    println!("=== Project Overrun Simulation ===");

    // 1. SETUP CONFIGURATION
    let config = args.config()?;
    let price = UnitPrice::from_monthly(args.monthly_price);

    match args.runs {
        Some(iterations) => run_many(args, &config, iterations),
        None => run_once(args, config, price),
    }
}

fn run_once(args: &Args, config: SimulationConfig, price: UnitPrice) -> Result<(), Box<dyn Error>> {
    // 2. RUN SIMULATION
    let outcome = ProjectSimulation::seeded(config, args.seed)?.run();

    // 3. EXPORT RESULTS
    if let Some(path) = &args.output {
        reporting::write_simulation_log(path, &outcome.history)?;
        println!("History written to {}", path.display());
    }

    // 4. PRINT COST ANALYSIS
    let summary = FinancialSummary::from_outcome(&outcome, price);
    let status = match outcome.status {
        RunStatus::Completed => "Completed",
        RunStatus::TimedOut => "Failed (day cap reached)",
        RunStatus::Running => "Running",
    };

    println!("\n=== Schedule ===");
    println!("Status: {} after {} days", status, summary.days);
    if let Some(last) = outcome.last_record() {
        println!(
            "Completed {:.1} of {:.1} SP, {:.1} open defects, {} staff",
            last.completed_work, last.current_scope, last.active_defects, last.staff
        );
    }
    println!("Cost: {:.0} person-days", outcome.total_cost());

    println!("\n=== Financial Impact ===");
    println!("Initial budget: {:.0}", summary.initial_budget);
    println!("Actual cost:    {:.0}", summary.actual_cost);
    println!(
        "Profit/Loss:    {:.0} ({})",
        summary.profit_loss,
        if summary.is_over_budget() { "loss" } else { "profit" }
    );
    match summary.overrun_ratio {
        Some(ratio) => println!("Cost vs budget: {:.1}%", ratio * 100.0),
        None => println!("Cost vs budget: n/a"),
    }
    match summary.rework_share {
        Some(share) => println!(
            "Rework:         {:.0} ({:.1}% of actual cost)",
            summary.rework_cost,
            share * 100.0
        ),
        None => println!("Rework:         {:.0}", summary.rework_cost),
    }

    Ok(())
}

fn run_many(args: &Args, config: &SimulationConfig, iterations: usize) -> Result<(), Box<dyn Error>> {
    println!("Running {} simulations from seed {}...", iterations, args.seed);
    let summary = run_batch(config, iterations, args.seed)?;

    if let Some(path) = &args.output {
        reporting::write_batch_runs(path, &summary.runs)?;
        println!("Batch results written to {}", path.display());
    }

    println!("\n=== Batch Summary ===");
    println!(
        "Completed: {}  Timed out: {}",
        summary.completed(),
        summary.timed_out()
    );
    if let Some(rate) = summary.completion_rate() {
        println!("Completion rate: {:.1}%", rate * 100.0);
    }
    for percent in [50.0, 85.0, 100.0] {
        if let (Some(days), Some(cost)) = (
            summary.day_percentile(percent),
            summary.cost_percentile(percent),
        ) {
            println!("P{:<3} {:>4} days  {:>8.0} person-days", percent, days, cost);
        }
    }

    Ok(())
}
