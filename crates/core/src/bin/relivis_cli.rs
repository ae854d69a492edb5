//! Headless renderer: simulate once and write the chart as SVG.
//!
//! Examples:
//!   relivis-cli --subjects 12 --bias 15 -o chart.svg
//!   relivis-cli --config controls.json --group-average hide
//!   relivis-cli --seed 7 --variation 0 --print-data
//!
//! Without `--output` the SVG goes to stdout.

use std::io::Write;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use relivis::controls::{ControlKey, ControlState};
use relivis::export::scene_to_svg;
use relivis::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Visibility {
    Show,
    Hide,
}

impl Visibility {
    fn is_shown(self) -> bool {
        self == Visibility::Show
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Render simulated trial trajectories to SVG")]
struct Args {
    /// Control values as JSON; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of trials per subject
    #[arg(long)]
    trials: Option<usize>,

    /// Number of subjects
    #[arg(long)]
    subjects: Option<usize>,

    /// Height of the logistic bias shift
    #[arg(long, allow_hyphen_values = true)]
    bias: Option<f64>,

    /// Standard deviation of per-trial noise
    #[arg(long)]
    variation: Option<f64>,

    /// Steepness control of the bias curve
    #[arg(long, allow_hyphen_values = true)]
    learning: Option<f64>,

    /// Group mean line and SD band
    #[arg(long, value_enum)]
    group_average: Option<Visibility>,

    /// One line per subject
    #[arg(long, value_enum)]
    individual_paths: Option<Visibility>,

    /// Seed for initial conditions and noise (defaults to the clock)
    #[arg(long)]
    seed: Option<u64>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Print the matrix and per-trial stats as JSON to stderr
    #[arg(long, default_value_t = false)]
    print_data: bool,

    /// Clamp out-of-range control values instead of failing
    #[arg(long, default_value_t = false)]
    clamp: bool,

    /// Debug logging (RUST_LOG overrides)
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x5EED)
}

fn load_controls(args: &Args) -> Result<ControlState, Box<dyn std::error::Error>> {
    let mut controls = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| format!("reading {}: {e}", path.display()))?;
            ControlState::from_json_str(&text)?
        }
        None => ControlState::default(),
    };

    let numeric = [
        (ControlKey::Trials, args.trials.map(|v| v as f64)),
        (ControlKey::Subjects, args.subjects.map(|v| v as f64)),
        (ControlKey::Bias, args.bias),
        (ControlKey::Variation, args.variation),
        (ControlKey::Learning, args.learning),
    ];
    for (key, value) in numeric {
        if let Some(v) = value {
            controls.set(key, v);
        }
    }
    if let Some(v) = args.group_average {
        controls.show_group_average = v.is_shown();
    }
    if let Some(v) = args.individual_paths {
        controls.show_individual_paths = v.is_shown();
    }

    if args.clamp {
        let clamped = controls.clamped();
        if clamped != controls {
            warn!("control values clamped into slider bounds");
        }
        controls = clamped;
    }
    controls.validate()?;
    Ok(controls)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if args.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("info")
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let controls = load_controls(&args)?;
    let seed = args.seed.unwrap_or_else(clock_seed);
    let mut chart = TrialChart::with_seed(seed);
    let frame = chart.update(&controls)?;

    if args.print_data {
        let dump = serde_json::json!({
            "seed": seed,
            "controls": controls,
            "initial_conditions": chart.initial_conditions(),
            "matrix": frame.matrix,
            "trial_stats": trial_stats(&frame.matrix),
        });
        eprintln!("{}", serde_json::to_string_pretty(&dump)?);
    }

    let svg = scene_to_svg(&frame.scene)?;
    match &args.output {
        Some(path) => {
            std::fs::write(path, &svg)?;
            info!(
                "wrote {} ({} elements, {} bytes)",
                path.display(),
                frame.scene.len(),
                svg.len()
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(svg.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}
