// cflr: CFL-R fixpoint solver for whole-program Andersen-style pointer analysis

#![allow(dead_code)]

use clap::Parser;

mod cli;
mod frontend;
mod grammar;
mod graph;
mod output;
mod result;
mod solver;
mod worklist;

use cli::Cli;

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&cli.log_level))
        .init();

    if let Err(err) = cli::run(&cli) {
        // `run` preserves the original `FrontendError` behind `anyhow::Error`
        // (see `cli::load_graph`), so an unreadable file can be told apart
        // from a malformed one and exited with the matching code.
        let is_io_error =
            matches!(err.downcast_ref::<frontend::FrontendError>(), Some(frontend::FrontendError::Io(_)));
        let exit_code = if is_io_error { output::EXIT_IO } else { output::EXIT_PARSE };

        match cli.output {
            cli::OutputFormat::Json | cli::OutputFormat::Pretty => {
                let json_err = if is_io_error {
                    output::JsonError::io_failed(&err.to_string())
                } else {
                    output::JsonError::parse_failed(&err.to_string())
                };
                eprintln!("{}", serde_json::to_string(&json_err).unwrap_or_default());
            }
            _ => output::error(&err.to_string()),
        }
        std::process::exit(exit_code);
    }
}
