mod cli;
mod commands;
mod formatting;
mod settings;

use std::process::ExitCode;

use cli::Commands;
use commands::{run_analyze, run_export, run_history, run_summary};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();
    init_tracing(args.verbose);

    match args.command {
        Commands::Analyze {
            source,
            nodes,
            batch_size,
            history,
            snapshot_dir,
            format,
            output,
        } => {
            run_analyze(
                args.config,
                source,
                nodes,
                batch_size,
                history,
                snapshot_dir,
                format,
                output,
            )
            .await
        }
        Commands::Summary {
            source,
            nodes,
            batch_size,
            format,
            output,
        } => run_summary(args.config, source, nodes, batch_size, format, output).await,
        Commands::Export {
            source,
            nodes,
            format,
            output,
        } => run_export(args.config, source, nodes, format, output).await,
        Commands::History {
            history,
            format,
            output,
        } => run_history(history, format, output),
    }
}

/// Diagnostics go to stderr so stdout stays parseable JSON.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "dsa=debug,dsa_lib=debug"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
