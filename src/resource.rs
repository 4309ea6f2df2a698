use std::path::Path;
use thiserror::Error;
use url::Url;

/// Where the design document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesignSource {
    /// Local file export (`figma REST file response` JSON)
    LocalJson(String),
    /// Live file fetched from the Figma API
    Figma {
        file_key: String,
        /// Node ids taken from the URL's node-id query, if present
        node_ids: Vec<String>,
    },
}

#[derive(Debug, Error)]
pub enum ResourceParseError {
    #[error("Invalid URL '{value}': {message}. Hint: include http(s):// and ensure the URL is well-formed.")]
    InvalidUrl { value: String, message: String },
    #[error("Figma URL missing file key in '{url}'. Hint: use https://www.figma.com/file/<FILE_KEY>/... and node-id if needed.")]
    FigmaMissingFileKey { url: String },
    #[error("Only figma.com URLs are supported, got '{url}'.")]
    UnsupportedHost { url: String },
    #[error("Local file not found: {path}. Hint: check the path relative to the current working directory or use an absolute path.")]
    FileNotFound { path: String },
    #[error("Unsupported file extension '{extension}'. Expected a .json design export.")]
    UnsupportedExtension { extension: String },
}

/// Parse a design source argument: a figma.com URL or a local `.json`
/// export path.
pub fn parse_source(value: &str) -> Result<DesignSource, ResourceParseError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        parse_figma_url(value)
    } else {
        parse_local_json(value)
    }
}

fn parse_figma_url(value: &str) -> Result<DesignSource, ResourceParseError> {
    let url = Url::parse(value).map_err(|e| ResourceParseError::InvalidUrl {
        value: value.to_string(),
        message: e.to_string(),
    })?;

    let host = url.host_str().unwrap_or("");
    if !host.contains("figma.com") {
        return Err(ResourceParseError::UnsupportedHost {
            url: value.to_string(),
        });
    }

    let path_segments: Vec<&str> = url.path_segments().map(|c| c.collect()).unwrap_or_default();
    let file_key = path_segments
        .iter()
        .position(|&s| s == "file" || s == "design")
        .and_then(|i| path_segments.get(i + 1))
        .map(|s| s.to_string())
        .ok_or_else(|| ResourceParseError::FigmaMissingFileKey {
            url: value.to_string(),
        })?;

    let node_ids: Vec<String> = url
        .query_pairs()
        .filter(|(k, _)| k == "node-id")
        .map(|(_, v)| v.replace('-', ":"))
        .collect();

    Ok(DesignSource::Figma { file_key, node_ids })
}

fn parse_local_json(value: &str) -> Result<DesignSource, ResourceParseError> {
    let path = Path::new(value);

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    if extension != "json" {
        return Err(ResourceParseError::UnsupportedExtension {
            extension: if extension.is_empty() {
                "no extension".to_string()
            } else {
                extension
            },
        });
    }

    if !path.is_file() {
        return Err(ResourceParseError::FileNotFound {
            path: path.to_string_lossy().into_owned(),
        });
    }

    Ok(DesignSource::LocalJson(value.to_string()))
}
