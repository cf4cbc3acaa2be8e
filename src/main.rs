//! Plan Illustrator CLI
//!
//! Usage:
//!   plan-illustrator [OPTIONS] [FILE]
//!
//! Options:
//!   -s, --stylesheet <FILE>  Stylesheet file for the role palette (TOML format)
//!   -d, --debug              Log the computed layout and edges to stderr
//!   --width <PX>             Canvas width
//!   --height <PX>            Canvas height
//!   --no-legend              Leave out the line-style legend
//!   --edges                  Print the resolved edges as JSON instead of SVG
//!   --seed                   Print the seed snapshot as JSON
//!   -h, --help               Print help

use std::fs;
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use plan_illustrator::api::decode_plan_response;
use plan_illustrator::{
    persist, render_with_config, resolve_edges_with, Action, Error, LayoutConfig, PersistError,
    PlanSnapshot, PlanStore, RenderConfig, Stylesheet, SvgConfig,
};

#[derive(Parser)]
#[command(name = "plan-illustrator")]
#[command(about = "Render a business plan's supply flow as an SVG diagram")]
struct Cli {
    /// Snapshot or `{success, data}` response JSON (reads stdin if not provided)
    input: Option<PathBuf>,

    /// Stylesheet file for the role palette (TOML format)
    #[arg(short, long)]
    stylesheet: Option<PathBuf>,

    /// Debug mode: log the computed layout and edges
    #[arg(short, long)]
    debug: bool,

    /// Canvas width in pixels
    #[arg(long, default_value_t = 1400.0)]
    width: f64,

    /// Canvas height in pixels
    #[arg(long, default_value_t = 700.0)]
    height: f64,

    /// Leave out the line-style legend
    #[arg(long)]
    no_legend: bool,

    /// Print the resolved edges as JSON instead of SVG
    #[arg(long)]
    edges: bool,

    /// Print the seed snapshot as JSON and exit
    #[arg(long)]
    seed: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    match run(&cli) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run(cli: &Cli) -> Result<String, Error> {
    if cli.seed {
        return Ok(persist::to_json(&PlanSnapshot::seed())?);
    }

    let stylesheet = match &cli.stylesheet {
        Some(path) => Stylesheet::from_file(path)?,
        None => Stylesheet::default(),
    };

    let snapshot = match read_input(cli)? {
        Some(text) => {
            let mut store = PlanStore::default();
            store.dispatch(Action::load(parse_input(&text)?))?;
            store.get()
        }
        // Interactive with no file: draw the built-in plan
        None => PlanStore::default().get(),
    };

    let layout = LayoutConfig::default().with_canvas(cli.width, cli.height);
    let config = RenderConfig::new()
        .with_layout(layout)
        .with_svg(SvgConfig::default().with_legend(!cli.no_legend))
        .with_stylesheet(stylesheet)
        .with_debug(cli.debug);

    if cli.edges {
        let edges = resolve_edges_with(
            &snapshot.business_flow,
            &snapshot.supplier_ids(),
            &config.labels,
        );
        return serde_json::to_string_pretty(&edges)
            .map_err(|e| Error::Persist(PersistError::Json(e)));
    }

    Ok(render_with_config(&snapshot, &config))
}

fn read_input(cli: &Cli) -> Result<Option<String>, Error> {
    match &cli.input {
        Some(path) => Ok(Some(fs::read_to_string(path).map_err(PersistError::from)?)),
        None if io::stdin().is_terminal() => Ok(None),
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(PersistError::from)?;
            Ok(Some(buffer))
        }
    }
}

/// Accept either a bare snapshot or a backend response envelope
fn parse_input(text: &str) -> Result<PlanSnapshot, Error> {
    let value: serde_json::Value = serde_json::from_str(text).map_err(PersistError::from)?;
    if value.get("success").is_some() {
        Ok(decode_plan_response(text)?)
    } else {
        Ok(persist::from_json(text)?)
    }
}
