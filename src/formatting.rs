use std::fmt::Write as FmtWrite;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use dsa_lib::output::DSA_OUTPUT_VERSION;
use dsa_lib::{DsaError, DsaOutput, ErrorOutput};

use crate::cli::OutputFormat;

/// Write output in the requested format.
pub fn write_output(
    body: &DsaOutput,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => write_json_output(body, output.as_deref())?,
        OutputFormat::Pretty => write_pretty_output(body, output.as_deref())?,
    };
    Ok(())
}

/// Exit code for analysis runs: 0 when every frame extracted, 1 when
/// some frames were skipped (the output still carries the rest).
pub fn exit_code_for_frames(failures: &[dsa_lib::FrameFailure]) -> ExitCode {
    if failures.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    }
}

/// Render an error and return the appropriate exit code.
pub fn render_error(err: DsaError, format: OutputFormat, output: Option<PathBuf>) -> ExitCode {
    // Empty exports are a warning condition, not a fatal failure.
    let exit = if matches!(err, DsaError::EmptyExport) {
        ExitCode::from(1)
    } else {
        ExitCode::from(2)
    };

    let error_payload = err.to_payload();
    let payload = DsaOutput::Error(ErrorOutput {
        version: DSA_OUTPUT_VERSION.to_string(),
        message: Some(error_payload.message.clone()),
        error: error_payload,
    });

    match format {
        OutputFormat::Json => {
            let content =
                serde_json::to_string(&payload).unwrap_or_else(|_| "{\"mode\":\"error\"}".into());
            if let Some(path) = output {
                if let Err(write_err) = std::fs::write(&path, &content) {
                    eprintln!("Failed to write error output: {}", write_err);
                    println!("{content}");
                }
            } else {
                println!("{content}");
            }
        }
        OutputFormat::Pretty => {
            if let Err(write_err) = write_pretty_output(&payload, output.as_deref()) {
                eprintln!("Failed to write error output: {}", write_err);
            }
        }
    };

    exit
}

fn write_json_output(
    body: &DsaOutput,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = serde_json::to_string(body)?;
    if let Some(path) = output {
        std::fs::write(path, content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}

fn write_pretty_output(body: &DsaOutput, output: Option<&Path>) -> io::Result<()> {
    let stdout_is_tty = std::io::stdout().is_terminal();
    let use_human = output.is_none() && stdout_is_tty;

    if use_human {
        let content = format_pretty(body);
        println!("{content}");
        return Ok(());
    }

    // Non-tty or file output: keep JSON shape for pipelines/files.
    let content =
        serde_json::to_string_pretty(body).unwrap_or_else(|_| "{\"mode\":\"error\"}".to_string());
    if let Some(path) = output {
        std::fs::write(path, &content)?;
    } else {
        println!("{content}");
    }
    Ok(())
}

/// Format output for human consumption in a terminal.
pub fn format_pretty(body: &DsaOutput) -> String {
    match body {
        DsaOutput::Analyze(out) => {
            let mut buf = String::new();
            writeln!(buf, "Analyzed {} frame(s) from {}", out.frames.len(), out.source).ok();
            for advisory in &out.advisories {
                writeln!(buf, "note: {advisory}").ok();
            }
            for record in &out.frames {
                let info = &record.frame_info;
                writeln!(
                    buf,
                    "\n{} ({}x{}, {} elements)",
                    info.name, info.width, info.height, info.element_count
                )
                .ok();
                writeln!(
                    buf,
                    "  components: {}  icons: {}  fonts: {}  colors: {}",
                    record.components.len(),
                    record.icons.len(),
                    record.fonts.len(),
                    record.colors.len()
                )
                .ok();
                for component in &record.components {
                    writeln!(buf, "  [component] {} x{}", label(component), component.instance_count)
                        .ok();
                }
                for icon in &record.icons {
                    writeln!(buf, "  [icon] {} x{}", label(icon), icon.instance_count).ok();
                }
                for font in &record.fonts {
                    writeln!(buf, "  [font] {}", font.display()).ok();
                }
                for color in &record.colors {
                    writeln!(buf, "  [color] {}", color.color_key).ok();
                }
            }
            for failure in &out.failures {
                writeln!(buf, "\nfailed: {} - {}", failure.frame, failure.error.message).ok();
            }
            buf
        }
        DsaOutput::Summary(out) => {
            let mut buf = String::new();
            let summary = &out.summary;
            writeln!(
                buf,
                "Summary of {} frame(s) from {}",
                summary.frame_count, out.source
            )
            .ok();
            for advisory in &out.advisories {
                writeln!(buf, "note: {advisory}").ok();
            }
            writeln!(
                buf,
                "components: {}  icons: {}  fonts: {}  colors: {}",
                summary.components.len(),
                summary.icons.len(),
                summary.fonts.len(),
                summary.colors.len()
            )
            .ok();
            for component in &summary.components {
                writeln!(buf, "  [component] {}", label(component)).ok();
            }
            for icon in &summary.icons {
                writeln!(buf, "  [icon] {}", label(icon)).ok();
            }
            for font in &summary.fonts {
                writeln!(buf, "  [font] {}", font.display()).ok();
            }
            for color in &summary.colors {
                writeln!(buf, "  [color] {}", color.hex).ok();
            }
            buf
        }
        DsaOutput::Export(out) => {
            let mut buf = String::new();
            writeln!(
                buf,
                "Stylesheet from {}: {} color(s), {} font(s)",
                out.source,
                out.stylesheet.colors.len(),
                out.stylesheet.typography.len()
            )
            .ok();
            for (key, color) in &out.stylesheet.colors {
                writeln!(buf, "  {key}: {} {}", color.hex, color.rgb565).ok();
            }
            for (key, font) in &out.stylesheet.typography {
                writeln!(buf, "  {key}: {}", font.lvgl_font).ok();
            }
            buf
        }
        DsaOutput::History(out) => {
            let mut buf = String::new();
            writeln!(buf, "{} analyzed frame(s) in {}", out.frames.len(), out.history).ok();
            for frame in &out.frames {
                writeln!(
                    buf,
                    "  {} '{}' ({} elements, last analyzed {}{})",
                    frame.id,
                    frame.entry.name,
                    frame.entry.element_count,
                    frame.entry.last_analyzed.to_rfc3339(),
                    if frame.entry.exists { "" } else { ", missing" }
                )
                .ok();
            }
            buf
        }
        DsaOutput::Error(out) => {
            let mut buf = String::new();
            writeln!(buf, "error: {}", out.error.message).ok();
            if let Some(remediation) = &out.error.remediation {
                writeln!(buf, "hint: {remediation}").ok();
            }
            buf
        }
    }
}

fn label(component: &dsa_lib::ComponentReference) -> String {
    match &component.variant_name {
        Some(variant) => format!("{} / {}", component.master_name, variant),
        None => component.master_name.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dsa_lib::error::{ErrorCategory, ErrorPayload};

    #[test]
    fn pretty_error_includes_hint() {
        let body = DsaOutput::Error(ErrorOutput {
            version: DSA_OUTPUT_VERSION.to_string(),
            message: Some("No frame selected".into()),
            error: ErrorPayload::new(
                ErrorCategory::Selection,
                "No frame selected".into(),
                "Pass --nodes.",
            ),
        });
        let text = format_pretty(&body);
        assert!(text.contains("error: No frame selected"));
        assert!(text.contains("hint: Pass --nodes."));
    }
}
