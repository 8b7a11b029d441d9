use std::io::IsTerminal;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use distind_config::{Config, SourceKind};
use distind_core::geometry::offsets;
use distind_core::layout::TrackLayout;
use distind_core::source::{
    run_source, spawn_stdin_source, RandomSource, ScriptedSource, StateHub, StateSource,
};
use distind_core::state::parse_state_list;
use distind_core::DistanceState;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

#[derive(Parser)]
#[command(name = "distind", about = "Distance indicator gauge for the terminal", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Where readings come from (random, script, stdin)
    #[arg(short, long)]
    source: Option<SourceKind>,

    /// Comma separated states for the script source (e.g. too-close,ok,too-far)
    #[arg(long)]
    script: Option<String>,

    /// Milliseconds between readings
    #[arg(short, long)]
    interval_ms: Option<u64>,

    /// Seed for the random source
    #[arg(long)]
    seed: Option<u64>,

    /// Colour theme (dark, light, high-contrast)
    #[arg(short, long)]
    theme: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show current configuration
    Config,
    /// Print the ruler layout and target offsets for a track width
    Trace {
        /// Track width in columns
        #[arg(short, long, default_value_t = 81)]
        width: u16,
        /// States to evaluate, comma separated
        #[arg(long)]
        states: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let interactive = cli.command.is_none();
    init_tracing(interactive)?;

    let mut config = Config::load()?;
    apply_overrides(&mut config, &cli)?;

    match cli.command {
        Some(Commands::Config) => {
            let path = Config::config_path();
            println!("Config path: {}", path.display());
            println!("{}", toml::to_string_pretty(&config)?);
        }
        Some(Commands::Trace { width, states }) => {
            let states = match states {
                Some(list) => parse_state_list(&list)?,
                None => DistanceState::ALL.to_vec(),
            };
            trace(&config, width, &states);
        }
        None => run_tui(config).await?,
    }

    Ok(())
}

fn init_tracing(interactive: bool) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive("distind=info".parse()?);

    if interactive {
        // the terminal belongs to the UI, so logs go to a file
        Config::ensure_dirs()?;
        let path = Config::log_path();
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .init();
    }
    Ok(())
}

fn apply_overrides(config: &mut Config, cli: &Cli) -> Result<()> {
    if let Some(kind) = cli.source {
        config.source.kind = kind;
    }
    if let Some(ref script) = cli.script {
        config.source.script = parse_state_list(script)?;
        if cli.source.is_none() {
            config.source.kind = SourceKind::Script;
        }
    }
    if let Some(ms) = cli.interval_ms {
        config.source.interval_ms = ms;
    }
    if let Some(seed) = cli.seed {
        config.source.seed = Some(seed);
    }
    if let Some(ref theme) = cli.theme {
        config.tui.theme = theme.clone();
    }
    config.validate();
    Ok(())
}

async fn run_tui(config: Config) -> Result<()> {
    let hub = Arc::new(StateHub::new());
    let cancel = CancellationToken::new();

    let task = match config.source.kind {
        SourceKind::Random => {
            let source = match config.source.seed {
                Some(seed) => RandomSource::seeded(seed),
                None => RandomSource::new(),
            };
            Some(spawn_source(source, &config, hub.clone(), cancel.clone()))
        }
        SourceKind::Script => {
            let source = ScriptedSource::new(config.source.script.clone())?;
            Some(spawn_source(source, &config, hub.clone(), cancel.clone()))
        }
        SourceKind::Stdin => {
            if std::io::stdin().is_terminal() {
                bail!("the stdin source needs readings piped in, e.g. `sensor | distind -s stdin`");
            }
            spawn_stdin_source(hub.clone(), cancel.clone())
                .context("Failed to start the stdin reader")?;
            None
        }
    };

    let mut app = distind_tui::App::new(&config, &config.source.kind.to_string())
        .with_readings(hub.subscribe());
    let result = app.run().await;

    cancel.cancel();
    if let Some(task) = task {
        if let Err(e) = task.await {
            tracing::warn!(error = %e, "State source task failed");
        }
    }
    result
}

fn spawn_source<S>(
    source: S,
    config: &Config,
    hub: Arc<StateHub>,
    cancel: CancellationToken,
) -> JoinHandle<()>
where
    S: StateSource + 'static,
{
    let interval = config.source.interval();
    tokio::spawn(async move {
        run_source(source, interval, &hub, cancel).await;
    })
}

fn trace(config: &Config, width: u16, states: &[DistanceState]) {
    let spec = config.ruler.spec();
    let layout = TrackLayout::compute(width, spec.marks, spec.mark_width as u16);
    let measured = layout.measurement(config.ruler.mark_rows);

    println!(
        "track {} cols, {} marks, spacer {:.2}, marks at {:?}",
        layout.width, spec.marks, measured.spacer.width, layout.marks
    );
    println!("{:<12} {:>10} {:>10}", "state", "highlight", "arrow");
    for state in states {
        let o = offsets(*state, &measured, &spec);
        println!("{:<12} {:>10.2} {:>10.2}", state.name(), o.highlight, o.arrow);
    }
}
