use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use stopline_engine::layout::layout;
use stopline_engine::model::{QueryGraph, RouteQuery};

#[derive(Parser, Debug)]
#[command(
    name = "scheme-render",
    author,
    version,
    about = "Render a schematic transit route diagram as SVG",
    long_about = "Reads an already-fetched geodata query result (nodes and relations as JSON), \
                  assembles the matching routes with their stops and nearby-POI badges, and \
                  writes the laid-out diagram as a single SVG document.\n\n\
                  Fetching the query result from the geodata API is out of scope; any client \
                  producing the documented graph shape can feed this tool."
)]
struct Args {
    /// Input query-result graph (JSON: {"nodes": [...], "relations": [...]})
    #[arg(short, long)]
    graph: PathBuf,

    /// Route reference to draw (e.g. "21")
    #[arg(short, long)]
    route_ref: String,

    /// Network name filter (exact match)
    #[arg(long, default_value = "")]
    network: String,

    /// Operator name filter (exact match)
    #[arg(long, default_value = "")]
    operator: String,

    /// Proximity radius for badge collection, meters (non-positive uses the default of 300)
    #[arg(short, long, default_value_t = 0.0)]
    distance: f64,

    /// Two-letter language code for the scheme header (ru, en, es, de, zh, ko)
    #[arg(long, default_value = "en")]
    lang: String,

    /// Output SVG file
    #[arg(short, long)]
    output: PathBuf,

    /// Verbose output (show debug messages)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .format_timestamp(None)
    .init();

    if !args.graph.exists() {
        bail!("Graph file does not exist: {}", args.graph.display());
    }

    let raw = fs::read_to_string(&args.graph)
        .with_context(|| format!("Failed to read {}", args.graph.display()))?;
    let graph: QueryGraph = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse {}", args.graph.display()))?;
    log::info!(
        "Loaded graph: {} nodes, {} relations",
        graph.nodes().len(),
        graph.relations().len()
    );

    let query = RouteQuery::new(&args.route_ref)
        .with_network(&args.network)
        .with_operator(&args.operator)
        .with_radius(args.distance);

    let routes = stopline_engine::assemble::assemble(&query, &graph);
    if routes.is_empty() {
        log::warn!(
            "No relation matched ref={:?} network={:?} operator={:?}; writing an empty document",
            args.route_ref,
            args.network,
            args.operator
        );
    }
    for route in &routes {
        log::info!(
            "Route {} ({}): {} stops",
            route.reference,
            route.name,
            route.stops.len()
        );
    }

    let scheme = layout(&routes, &args.lang);
    let svg = stopline_svg::render_document(&scheme).context("Failed to serialize SVG")?;

    fs::write(&args.output, svg)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;
    log::info!(
        "Wrote {} ({} commands, height {})",
        args.output.display(),
        scheme.commands.len(),
        scheme.total_height
    );

    Ok(())
}
