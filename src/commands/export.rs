use std::path::PathBuf;
use std::process::ExitCode;

use dsa_lib::output::{DsaOutput, ExportOutput, DSA_OUTPUT_VERSION};
use dsa_lib::{AnalysisSession, Config};

use crate::cli::OutputFormat;
use crate::formatting::{render_error, write_output};
use crate::settings::resolve_settings;

use super::{effective_nodes, extract_frames, load_source};

pub async fn run_export(
    config_path: Option<PathBuf>,
    source: String,
    nodes: Option<Vec<String>>,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> ExitCode {
    let config = match Config::load(config_path.as_deref()) {
        Ok(config) => config,
        Err(err) => return render_error(err, format, output),
    };
    let settings = resolve_settings(None, &config);

    let loaded = match load_source(&source).await {
        Ok(loaded) => loaded,
        Err(err) => return render_error(err, format, output),
    };

    let node_ids = effective_nodes(nodes, &loaded.url_node_ids);
    let mut session = AnalysisSession::new();
    if let Err(err) = extract_frames(&loaded, &node_ids, &settings, &mut session) {
        return render_error(err, format, output);
    }

    // An empty stylesheet is reported as a warning, not written out.
    let stylesheet = match session.export() {
        Ok(stylesheet) => stylesheet,
        Err(err) => return render_error(err, format, output),
    };

    let body = DsaOutput::Export(ExportOutput {
        version: DSA_OUTPUT_VERSION.to_string(),
        source: loaded.label.clone(),
        stylesheet,
    });

    match write_output(&body, format, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Failed to write output: {err}");
            ExitCode::from(2)
        }
    }
}
