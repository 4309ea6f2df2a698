use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use tracing::warn;

use dsa_lib::output::{AnalyzeOutput, DsaOutput, DSA_OUTPUT_VERSION};
use dsa_lib::{
    sanitize_identifier, AnalysisSession, Config, FileHistoryStore, HistoryEntry, HistoryStore,
};

use crate::cli::OutputFormat;
use crate::formatting::{exit_code_for_frames, render_error, write_output};
use crate::settings::resolve_settings;

use super::{effective_nodes, extract_frames, load_source, AnalyzedFrame, LoadedSource};

#[allow(clippy::too_many_arguments)]
pub async fn run_analyze(
    config_path: Option<PathBuf>,
    source: String,
    nodes: Option<Vec<String>>,
    batch_size: Option<usize>,
    history: Option<PathBuf>,
    snapshot_dir: Option<PathBuf>,
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

    if let Some(history_path) = history {
        if let Err(err) = update_history(&history_path, &outcome.analyzed) {
            // history is a convenience cache, never a reason to fail
            warn!("failed to update history {}: {err}", history_path.display());
        }
    }

    if let Some(dir) = snapshot_dir {
        download_snapshots(&loaded, &outcome.analyzed, &dir).await;
    }

    let exit = exit_code_for_frames(&outcome.failures);
    let body = DsaOutput::Analyze(AnalyzeOutput {
        version: DSA_OUTPUT_VERSION.to_string(),
        source: loaded.label.clone(),
        frames: session.records().to_vec(),
        failures: outcome.failures,
        advisories: outcome.advisories,
    });

    match write_output(&body, format, output) {
        Ok(()) => exit,
        Err(err) => {
            eprintln!("Failed to write output: {err}");
            ExitCode::from(2)
        }
    }
}

fn update_history(path: &PathBuf, analyzed: &[AnalyzedFrame]) -> dsa_lib::Result<()> {
    let mut store = FileHistoryStore::load(path)?;
    for frame in analyzed {
        store.set(
            &frame.id,
            HistoryEntry {
                name: frame.name.clone(),
                last_analyzed: Utc::now(),
                element_count: frame.element_count,
                analysis_output_id: format!("analysis:{}", frame.name),
                exists: true,
            },
        )?;
    }
    Ok(())
}

/// Download one rendered PNG per analyzed frame. Snapshot failures are
/// logged and skipped; the analysis output is already complete.
async fn download_snapshots(loaded: &LoadedSource, analyzed: &[AnalyzedFrame], dir: &PathBuf) {
    let Some((client, file_key)) = &loaded.figma else {
        warn!("--snapshot-dir is only supported for figma.com sources; skipping");
        return;
    };

    if let Err(err) = std::fs::create_dir_all(dir) {
        warn!("cannot create snapshot dir {}: {err}", dir.display());
        return;
    }

    for frame in analyzed {
        let result = async {
            let url = client.export_snapshot_url(file_key, &frame.id).await?;
            let bytes = client.download_snapshot(&url).await?;
            let path = dir.join(format!("{}.png", sanitize_identifier(&frame.name)));
            std::fs::write(&path, bytes)?;
            Ok::<_, dsa_lib::DsaError>(path)
        }
        .await;

        match result {
            Ok(path) => tracing::debug!("saved snapshot {}", path.display()),
            Err(err) => warn!("snapshot for '{}' failed: {err}", frame.name),
        }
    }
}
