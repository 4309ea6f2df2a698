mod analyze;
mod export;
mod history;
mod summary;

pub use analyze::run_analyze;
pub use export::run_export;
pub use history::run_history;
pub use summary::run_summary;

use tracing::debug;

use dsa_lib::{
    parse_source, AnalysisSession, DesignSource, DocumentResolver, DsaError, FigmaAuth,
    FigmaClient, FrameExtractor, LoadedDocument, Result,
};
use dsa_lib::figma::FileResponse;
use dsa_lib::output::FrameFailure;

use crate::settings::ResolvedSettings;

/// A design source loaded and ready for extraction.
pub(crate) struct LoadedSource {
    pub document: LoadedDocument,
    /// Display label for outputs ("design.json" or "figma:KEY")
    pub label: String,
    /// Node ids carried by the source URL itself
    pub url_node_ids: Vec<String>,
    /// Present for live Figma sources; used for snapshot downloads
    pub figma: Option<(FigmaClient, String)>,
}

pub(crate) async fn load_source(raw: &str) -> Result<LoadedSource> {
    let source = parse_source(raw).map_err(|e| DsaError::Config(e.to_string()))?;

    match source {
        DesignSource::LocalJson(path) => {
            let data = std::fs::read_to_string(&path)?;
            let file: FileResponse = serde_json::from_str(&data)?;
            Ok(LoadedSource {
                document: LoadedDocument::from_file_response(&file),
                label: path,
                url_node_ids: Vec::new(),
                figma: None,
            })
        }
        DesignSource::Figma { file_key, node_ids } => {
            let auth = FigmaAuth::from_env().ok_or_else(|| {
                DsaError::Config(
                    "FIGMA_TOKEN environment variable is required for figma.com sources"
                        .to_string(),
                )
            })?;
            let client = FigmaClient::new(auth)?;
            let file = client.fetch_file(&file_key).await?;
            Ok(LoadedSource {
                document: LoadedDocument::from_file_response(&file),
                label: format!("figma:{file_key}"),
                url_node_ids: node_ids,
                figma: Some((client, file_key)),
            })
        }
    }
}

/// One successfully analyzed frame, for history and snapshots.
pub(crate) struct AnalyzedFrame {
    pub id: String,
    pub name: String,
    pub element_count: usize,
}

#[derive(Default)]
pub(crate) struct ExtractionOutcome {
    pub analyzed: Vec<AnalyzedFrame>,
    pub failures: Vec<FrameFailure>,
    pub advisories: Vec<String>,
}

/// Extract every requested frame into the session.
///
/// Each explicitly-requested frame runs inside its own failure
/// boundary: a stale or invalid id is reported and the remaining
/// frames still extract. With no ids, the default selection's
/// precondition errors surface directly.
pub(crate) fn extract_frames(
    source: &LoadedSource,
    node_ids: &[String],
    settings: &ResolvedSettings,
    session: &mut AnalysisSession,
) -> Result<ExtractionOutcome> {
    let resolver = DocumentResolver::new(&source.document.index);
    let mut outcome = ExtractionOutcome::default();

    let mut extract_one = |frame: &dsa_lib::SceneNode, outcome: &mut ExtractionOutcome| {
        let total = frame.subtree_size();
        if total > settings.large_frame_threshold {
            outcome.advisories.push(format!(
                "Frame '{}' has {} elements; analysis proceeds but may take a while. Consider narrowing the selection.",
                frame.name, total
            ));
        }

        let record = FrameExtractor::new(&resolver)
            .with_batch_size(settings.batch_size)
            .with_progress(std::sync::Arc::new(|message: &str| {
                debug!("{message}");
            }))
            .extract(frame);

        outcome.analyzed.push(AnalyzedFrame {
            id: frame.id.clone(),
            name: frame.name.clone(),
            element_count: record.frame_info.element_count,
        });
        session.store(record);
    };

    if node_ids.is_empty() {
        for frame in source.document.select_frames(&[])? {
            extract_one(frame, &mut outcome);
        }
        return Ok(outcome);
    }

    for id in node_ids {
        match source.document.select_frames(std::slice::from_ref(id)) {
            Ok(frames) => {
                for frame in frames {
                    extract_one(frame, &mut outcome);
                }
            }
            Err(err) => {
                outcome.failures.push(FrameFailure {
                    frame: id.clone(),
                    error: err.to_payload(),
                });
            }
        }
    }

    Ok(outcome)
}

/// CLI node ids win over ids embedded in the source URL.
pub(crate) fn effective_nodes(cli_nodes: Option<Vec<String>>, url_nodes: &[String]) -> Vec<String> {
    match cli_nodes {
        Some(nodes) if !nodes.is_empty() => nodes,
        _ => url_nodes.to_vec(),
    }
}
