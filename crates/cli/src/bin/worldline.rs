use std::path::PathBuf;

use anyhow::{Context, anyhow};
use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use cosmic_worldline::config::{ViewerConfig, load_mapping_catalog, load_viewer_config};
use cosmic_worldline::ephemeris::{EphemerisEngine, EphemerisProvider};
#[cfg(feature = "spice")]
use cosmic_worldline::ephemeris::spice::SpiceEngine;
use cosmic_worldline::export::json::write_json;
use cosmic_worldline::export::orbits::write_orbits_csv;
use cosmic_worldline::export::plot::render_top_view;
use cosmic_worldline::motion::distance::DEFAULT_INTEGRATION_STEP_DAYS;
use cosmic_worldline::motion::{CmbReference, DateInput, DistanceStrategy, VelocityOptions};
use cosmic_worldline::settings::distance_strategy;
use cosmic_worldline::{
    Epoch, ViewerSession, ViewerSettings, WorldlineOptions, compute_worldline_state_with,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Distance traveled through nested reference frames, and the solar-system
/// scene at any epoch.
#[derive(Parser, Debug)]
#[command(author, version, about = "Cosmic worldline calculator and scene exporter")]
struct Cli {
    /// Log debug events to stderr (RUST_LOG overrides)
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Ephemeris engine answering position and orientation queries
    #[arg(long, value_enum, global = true, default_value_t = EngineChoice::Vsop87)]
    engine: EngineChoice,

    #[command(subcommand)]
    command: Command,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum EngineChoice {
    /// Analytic VSOP87 planets and Meeus Moon
    Vsop87,
    /// CSPICE over the kernels in data/spice (needs the `spice` feature)
    Spice,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Age, per-frame speeds, and distance traveled since birth, as JSON.
    Travel(TravelArgs),
    /// Resolve the scene at an epoch and export it.
    Scene(SceneArgs),
}

#[derive(Args, Debug)]
struct TravelArgs {
    /// Birth date (RFC 3339 or YYYY-MM-DD); falls back to observer.birth in --config
    #[arg(long)]
    birth: Option<String>,

    /// Observer latitude in degrees
    #[arg(long, allow_hyphen_values = true)]
    latitude: Option<f64>,

    /// Target date; defaults to now
    #[arg(long)]
    target: Option<String>,

    /// Integrate Earth's path through the ephemeris instead of speed × time
    #[arg(long, default_value_t = false)]
    integrated: bool,

    /// Sample spacing for --integrated, in days
    #[arg(long, default_value_t = DEFAULT_INTEGRATION_STEP_DAYS)]
    step_days: f64,

    /// Report CMB motion of the Local Group instead of the Sun
    #[arg(long, default_value_t = false)]
    local_group: bool,

    /// Viewer configuration (YAML or TOML) supplying observer defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output file (use '-' for stdout)
    #[arg(long, default_value = "-")]
    output: PathBuf,
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// Epoch (RFC 3339 or YYYY-MM-DD); defaults to now
    #[arg(long)]
    epoch: Option<String>,

    /// Preset key (schoolModel, trueSizes, truePhysical) or custom mapping name
    #[arg(long)]
    preset: Option<String>,

    /// Body to center the scene on
    #[arg(long)]
    focus: Option<String>,

    /// Viewer configuration (YAML or TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Extra mapping catalog: a directory of TOML files, or a YAML/TOML file
    #[arg(long)]
    mappings: Option<PathBuf>,

    /// Samples per orbit ring
    #[arg(long)]
    segments: Option<usize>,

    /// Write the frame as JSON ('-' for stdout)
    #[arg(long)]
    json: Option<PathBuf>,

    /// Write orbit rings as CSV
    #[arg(long)]
    orbits_csv: Option<PathBuf>,

    /// Render a top-down PNG
    #[arg(long)]
    plot: Option<PathBuf>,

    #[arg(long, default_value_t = 800)]
    width: u32,

    #[arg(long, default_value_t = 800)]
    height: u32,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match (cli.command, cli.engine) {
        (Command::Travel(args), EngineChoice::Vsop87) => {
            run_travel(args, &EphemerisProvider::vsop87())
        }
        (Command::Travel(args), EngineChoice::Spice) => run_travel(args, &spice_provider()?),
        (Command::Scene(args), EngineChoice::Vsop87) => {
            run_scene(args, EphemerisProvider::vsop87())
        }
        (Command::Scene(args), EngineChoice::Spice) => run_scene(args, spice_provider()?),
    }
}

#[cfg(feature = "spice")]
fn spice_provider() -> anyhow::Result<EphemerisProvider<SpiceEngine>> {
    let engine = SpiceEngine::load().context("failed to load SPICE kernels")?;
    Ok(EphemerisProvider::new(engine))
}

#[cfg(not(feature = "spice"))]
fn spice_provider() -> anyhow::Result<EphemerisProvider> {
    Err(anyhow!("--engine spice requires a build with `--features spice`"))
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<ViewerConfig> {
    match path {
        Some(path) => load_viewer_config(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(ViewerConfig::default()),
    }
}

fn run_travel<E: EphemerisEngine>(
    args: TravelArgs,
    provider: &EphemerisProvider<E>,
) -> anyhow::Result<()> {
    let config = load_config(args.config.as_ref())?;
    let birth = args
        .birth
        .or(config.observer.birth.clone())
        .ok_or_else(|| anyhow!("--birth is required unless the config sets observer.birth"))?;
    let latitude = args.latitude.unwrap_or(config.observer.latitude_deg);
    let strategy = if args.integrated {
        DistanceStrategy::EphemerisIntegrated {
            step_days: args.step_days,
        }
    } else {
        distance_strategy(&config)
    };
    let options = WorldlineOptions {
        strategy,
        velocity: VelocityOptions {
            cmb_reference: if args.local_group {
                CmbReference::LocalGroup
            } else {
                CmbReference::Barycentric
            },
        },
    };
    let target = match args.target.as_deref() {
        Some(text) => DateInput::Text(text),
        None => DateInput::Instant(Utc::now()),
    };

    let state = compute_worldline_state_with(
        birth.as_str(),
        latitude,
        target,
        options,
        provider,
    )?;
    info!(
        engine = provider.engine().name(),
        duration = %state.formatted_duration,
        "worldline computed"
    );
    write_json(&args.output, &state)?;
    Ok(())
}

fn run_scene<E: EphemerisEngine>(
    args: SceneArgs,
    provider: EphemerisProvider<E>,
) -> anyhow::Result<()> {
    let mut config = load_config(args.config.as_ref())?;
    if let Some(path) = &args.mappings {
        let catalog = load_mapping_catalog(path)
            .with_context(|| format!("failed to load mappings {}", path.display()))?;
        config.mappings.extend(catalog);
    }
    if let Some(preset) = args.preset {
        config.preset = preset;
    }
    if let Some(focus) = args.focus {
        config.focus = focus;
    }
    if let Some(segments) = args.segments {
        config.orbit_segments = segments;
    }
    let settings = ViewerSettings::from_config(&config)?;
    let epoch = match args.epoch.as_deref() {
        Some(text) => Epoch::parse(text)?,
        None => Epoch::from_utc(Utc::now()),
    };

    let mut viewer = ViewerSession::new(provider, &settings, epoch)?;
    let frame = viewer.frame(epoch)?;
    info!(
        focus = %frame.scene.focus,
        mapping = %frame.mapping,
        orbits = frame.orbits.len(),
        "scene resolved"
    );

    let wrote_file = args.orbits_csv.is_some() || args.plot.is_some();
    match args.json {
        Some(path) => write_json(&path, &frame)?,
        None if !wrote_file => write_json(&PathBuf::from("-"), &frame)?,
        None => {}
    }
    if let Some(path) = args.orbits_csv {
        write_orbits_csv(&path, &frame.orbits)?;
    }
    if let Some(path) = args.plot {
        render_top_view(&path, &frame.scene, &frame.orbits, (args.width, args.height))?;
    }
    Ok(())
}
