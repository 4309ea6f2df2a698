use std::path::PathBuf;
use std::process::ExitCode;

use dsa_lib::output::{DsaOutput, SummaryOutput, DSA_OUTPUT_VERSION};
use dsa_lib::{AnalysisSession, Config};

use crate::cli::OutputFormat;
use crate::formatting::{exit_code_for_frames, render_error, write_output};
use crate::settings::resolve_settings;

use super::{effective_nodes, extract_frames, load_source};

pub async fn run_summary(
    config_path: Option<PathBuf>,
    source: String,
    nodes: Option<Vec<String>>,
    batch_size: Option<usize>,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> ExitCode {
    let config = match Config::load(config_path.as_deref()) {
        Ok(config) => config,
        Err(err) => return render_error(err, format, output),
    };
    let settings = resolve_settings(batch_size, &config);

    let loaded = match load_source(&source).await {
        Ok(loaded) => loaded,
        Err(err) => return render_error(err, format, output),
    };

    let node_ids = effective_nodes(nodes, &loaded.url_node_ids);
    let mut session = AnalysisSession::new();
    let outcome = match extract_frames(&loaded, &node_ids, &settings, &mut session) {
        Ok(outcome) => outcome,
        Err(err) => return render_error(err, format, output),
    };

    let exit = exit_code_for_frames(&outcome.failures);
    let mut advisories = outcome.advisories;
    advisories.extend(
        outcome
            .failures
            .iter()
            .map(|f| format!("frame {} skipped: {}", f.frame, f.error.message)),
    );

    let body = DsaOutput::Summary(SummaryOutput {
        version: DSA_OUTPUT_VERSION.to_string(),
        source: loaded.label.clone(),
        summary: session.summarize(),
        advisories,
    });

    match write_output(&body, format, output) {
        Ok(()) => exit,
        Err(err) => {
            eprintln!("Failed to write output: {err}");
            ExitCode::from(2)
        }
    }
}
