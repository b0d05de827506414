//! `evacuate`: run an evacuation on a floor-plan file and print the tallies.
//!
//! ```text
//! evacuate -i floors/museum.txt -n 40 -t 30 -g
//! evacuate -i floors/office.txt -n 25 --replications 100 --summary-json out.json
//! RUST_LOG=evac_sim=debug evacuate -i floors/corridor.txt -n 3 -g
//! ```

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use evac_floor::{FloorGraph, load_floor_plan};
use evac_output::{AsciiRenderer, CsvWriter, OutputWriter, SimOutputObserver, SummaryRow};
use evac_sim::{BatchSummary, EvacConfig, EvacReport, SimBuilder, run_replications};

// ── Command line ──────────────────────────────────────────────────────────────

/// Discrete-event evacuation simulator.
///
/// Flags override the values in `--config`; anything set in neither place
/// takes the built-in default.
#[derive(Parser, Debug)]
#[command(name = "evacuate", version)]
struct Args {
    /// Floor-plan text file.
    #[arg(short, long)]
    input: PathBuf,

    /// Number of people to place [default: 10].
    #[arg(short = 'n', long = "numpeople")]
    numpeople: Option<usize>,

    /// Random seed [default: 8675309].
    #[arg(short = 'r', long = "random-state")]
    random_state: Option<u64>,

    /// Deadline in simulated time [default: none].
    #[arg(short = 't', long = "max-time")]
    max_time: Option<f64>,

    /// Time between bottleneck releases [default: 1].
    #[arg(short = 'b', long = "bottleneck-delay")]
    bottleneck_delay: Option<f64>,

    /// Log every agent transition.
    #[arg(short = 'o', long = "output")]
    verbose: bool,

    /// Do not animate the run in the terminal.
    #[arg(short = 'g', long = "no-graphical-output")]
    no_graphical_output: bool,

    /// Seconds to pause between animation frames.
    #[arg(short = 'a', long = "animation-delay", default_value_t = 1.0)]
    animation_delay: f64,

    /// JSON file holding an `EvacConfig`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for `transitions.csv` and `summary.csv`.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Write the report(s) as JSON to this path.
    #[arg(long)]
    summary_json: Option<PathBuf>,

    /// Independent runs with seeds `seed`, `seed + 1`, …
    #[arg(long, default_value_t = 1)]
    replications: usize,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn build_config(args: &Args) -> Result<EvacConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => EvacConfig::default(),
    };

    if let Some(n) = args.numpeople {
        config.agent_count = n;
    }
    if let Some(seed) = args.random_state {
        config.seed = seed;
    }
    if args.max_time.is_some() {
        config.deadline = args.max_time;
    }
    if let Some(delay) = args.bottleneck_delay {
        config.bottleneck_delay = delay;
    }
    config.validate()?;
    Ok(config)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if !(args.animation_delay.is_finite() && args.animation_delay >= 0.0) {
        bail!("animation delay must be a non-negative number of seconds");
    }
    if args.replications == 0 {
        bail!("--replications must be at least 1");
    }

    let config = build_config(&args)?;
    let floor = load_floor_plan(&args.input)
        .with_context(|| format!("loading floor plan {}", args.input.display()))?;
    info!(
        path = %args.input.display(),
        rows = floor.rows(),
        cols = floor.cols(),
        "floor plan loaded"
    );

    if let Some(dir) = &args.out_dir {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    if args.replications > 1 {
        run_batch(&args, &config, &floor)
    } else {
        run_single(&args, config, floor)
    }
}

fn run_single(args: &Args, config: EvacConfig, floor: FloorGraph) -> Result<()> {
    let mut sim = SimBuilder::new(config, floor).build()?;

    let renderer = (!args.no_graphical_output).then(|| {
        AsciiRenderer::new(io::stdout())
            .with_frame_delay(Duration::from_secs_f64(args.animation_delay))
            .with_clear_screen(true)
    });
    let output = match &args.out_dir {
        Some(dir) => Some(SimOutputObserver::new(CsvWriter::new(dir)?)),
        None => None,
    };
    let mut observers = (renderer, output);

    let t0 = Instant::now();
    let report = sim.run(&mut observers)?;
    info!(elapsed_ms = t0.elapsed().as_millis() as u64, "run complete");

    let (renderer, output) = &mut observers;
    if let Some(e) = renderer.as_mut().and_then(AsciiRenderer::take_error) {
        warn!("animation stopped: {e}");
    }
    if let Some(e) = output.as_mut().and_then(SimOutputObserver::take_error) {
        warn!("output error: {e}");
    }

    print_report(&report);
    if let Some(path) = &args.summary_json {
        write_json(path, &report)?;
    }
    Ok(())
}

fn run_batch(args: &Args, config: &EvacConfig, floor: &FloorGraph) -> Result<()> {
    if !args.no_graphical_output {
        info!("animation is disabled for replications");
    }

    let t0 = Instant::now();
    let reports = run_replications(config, floor, args.replications)?;
    info!(
        runs = reports.len(),
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "replications complete"
    );

    let summary = BatchSummary::from_reports(&reports);
    println!("{:<12} {:>6} {:>6} {:>8} {:>10} {:>10}", "Seed", "Safe", "Dead", "Injured", "Unresolved", "Avg exit");
    println!("{}", "-".repeat(57));
    for r in &reports {
        let avg = r.stats.avg_exit_time().map_or_else(|| "NA".to_owned(), |t| format!("{t:.3}"));
        println!(
            "{:<12} {:>6} {:>6} {:>8} {:>10} {:>10}",
            r.seed, r.stats.safe, r.stats.dead, r.stats.injured, r.stats.unresolved(), avg
        );
    }
    println!();
    println!("Runs:                 {}", summary.runs);
    println!("Mean safe:            {:.2}", summary.mean_safe);
    println!("Mean dead:            {:.2}", summary.mean_dead);
    println!("Mean gravely injured: {:.2}", summary.mean_injured);
    println!("Mean unresolved:      {:.2}", summary.mean_unresolved);
    match summary.mean_exit_time {
        Some(t) => println!("Mean time to safe:    {t:.3}"),
        None    => println!("Mean time to safe:    NA"),
    }

    if let Some(dir) = &args.out_dir {
        let mut writer = CsvWriter::new(dir)?;
        for r in &reports {
            writer.write_summary(&SummaryRow::from(r))?;
        }
        writer.finish()?;
    }
    if let Some(path) = &args.summary_json {
        write_json(path, &serde_json::json!({ "summary": summary, "reports": reports }))?;
    }
    Ok(())
}

fn print_report(report: &EvacReport) {
    println!();
    println!("{}", report.stats);
    println!("Outcome:                 {} at {}", report.outcome, report.end_time);
    println!("Events processed:        {}", report.events_processed);
}

fn write_json<T: serde::Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    serde_json::to_writer_pretty(file, value)?;
    Ok(())
}
