// CLI command definitions and dispatch

use crate::graph::LabeledGraph;
use crate::output;
use crate::result::ResultView;
use crate::solver::Solver;
use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// cflr - CFL-R fixpoint solver for whole-program Andersen-style pointer analysis
#[derive(Parser, Debug, Clone)]
#[command(name = "cflr")]
#[command(author, version, about)]
#[command(long_about = "cflr saturates a pointer assignment graph under a fixed CFL-R \
grammar (the classical cubic Andersen analysis) and reports the resulting points-to \
relation.

Input is either the bundled text grammar or an equivalent JSON statement list; see \
--format to force one or the other when the extension is ambiguous.")]
pub struct Cli {
    /// Path to a PAG input file (text grammar or JSON, see --format)
    pub input: PathBuf,

    /// Force the input format instead of inferring it from the file extension
    #[arg(long, value_enum)]
    pub format: Option<InputFormat>,

    /// Output format
    #[arg(global = true, long, value_enum, default_value_t = OutputFormat::Human)]
    pub output: OutputFormat,

    /// Dump the full saturated graph instead of only the points-to relation
    #[arg(global = true, long)]
    pub dump_graph: bool,

    /// Log level (overridden by RUST_LOG if set)
    #[arg(long, env = "RUST_LOG", default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Text,
    Json,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable `pointer -> object` lines
    Human,
    /// Compact JSON
    Json,
    /// Indented JSON
    Pretty,
    /// Graphviz DOT
    Dot,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print solver statistics instead of the points-to relation
    Stats,
}

/// Parse `input` per `format` (or the file extension), returning the
/// unsaturated graph. File I/O failures surface as `FrontendError::Io`
/// (via its `#[from] std::io::Error`) rather than a bare `anyhow::Error`,
/// so `main` can tell an unreadable file apart from a malformed one and
/// exit with the matching code (see `output::EXIT_IO`/`EXIT_PARSE`).
fn load_graph(
    input: &PathBuf,
    format: Option<InputFormat>,
) -> std::result::Result<LabeledGraph, crate::frontend::FrontendError> {
    let text = std::fs::read_to_string(input)?;

    let format = format.unwrap_or_else(|| match input.extension().and_then(|e| e.to_str()) {
        Some("json") => InputFormat::Json,
        _ => InputFormat::Text,
    });

    match format {
        InputFormat::Text => crate::frontend::parse_text(&text),
        InputFormat::Json => crate::frontend::parse_json(&text),
    }
}

/// Run the full pipeline: load, solve, render.
///
/// `load_graph`'s `FrontendError` converts into the returned `anyhow::Error`
/// via its blanket `From<E: std::error::Error>` impl, which preserves the
/// original error as the downcast target — `main` recovers it with
/// `err.downcast_ref::<FrontendError>()` to pick an exit code, rather than
/// losing the variant behind a formatted string.
pub fn run(cli: &Cli) -> Result<()> {
    let graph = load_graph(&cli.input, cli.format)?;
    let mut solver = Solver::new(graph);
    solver.solve();

    if matches!(cli.command, Some(Commands::Stats)) {
        print_stats(cli, &solver);
        return Ok(());
    }

    let graph = solver.into_graph();
    if cli.dump_graph {
        print_graph(cli, &graph);
    } else {
        print_points_to(cli, &graph);
    }

    Ok(())
}

fn print_stats(cli: &Cli, solver: &Solver) {
    let stats = solver.stats();
    match cli.output {
        OutputFormat::Human => {
            output::header("solver statistics");
            println!("edges seeded:  {}", stats.edges_seeded);
            println!("edges derived: {}", stats.edges_derived);
            println!("worklist pops: {}", stats.pops);
        }
        OutputFormat::Json => {
            println!("{}", output::JsonResponse::new(stats).to_json());
        }
        OutputFormat::Pretty => {
            println!("{}", output::JsonResponse::new(stats).to_pretty_json());
        }
        OutputFormat::Dot => {
            output::warn("--output dot has no meaning for `stats`; showing JSON instead");
            println!("{}", output::JsonResponse::new(stats).to_pretty_json());
        }
    }
}

fn print_points_to(cli: &Cli, graph: &LabeledGraph) {
    let view = ResultView::new(graph);
    match cli.output {
        OutputFormat::Human => print!("{}", output::render_points_to_human(&view)),
        OutputFormat::Json => println!("{}", output::render_points_to_json(&view, false)),
        OutputFormat::Pretty => println!("{}", output::render_points_to_json(&view, true)),
        OutputFormat::Dot => println!("{}", output::render_graph_dot(graph)),
    }
}

fn print_graph(cli: &Cli, graph: &LabeledGraph) {
    match cli.output {
        OutputFormat::Human => print!("{}", output::render_graph_dot(graph)),
        OutputFormat::Json => println!("{}", output::render_graph_json(graph, false)),
        OutputFormat::Pretty => println!("{}", output::render_graph_json(graph, true)),
        OutputFormat::Dot => println!("{}", output::render_graph_dot(graph)),
    }
}
