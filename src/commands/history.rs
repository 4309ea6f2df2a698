use std::path::PathBuf;
use std::process::ExitCode;

use dsa_lib::output::{DsaOutput, HistoryFrame, HistoryOutput, DSA_OUTPUT_VERSION};
use dsa_lib::{FileHistoryStore, HistoryStore};

use crate::cli::OutputFormat;
use crate::formatting::{render_error, write_output};

pub fn run_history(
    history: PathBuf,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> ExitCode {
    let store = match FileHistoryStore::load(&history) {
        Ok(store) => store,
        Err(err) => return render_error(err, format, output),
    };

    let frames = store
        .entries()
        .into_iter()
        .map(|(id, entry)| HistoryFrame { id, entry })
        .collect();

    let body = DsaOutput::History(HistoryOutput {
        version: DSA_OUTPUT_VERSION.to_string(),
        history: history.display().to_string(),
        frames,
    });

    match write_output(&body, format, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Failed to write output: {err}");
            ExitCode::from(2)
        }
    }
}
