//! Logo preview collaborator.

use std::{fs, path::Path};

use serde::Serialize;
use thiserror::Error;
use tracing::warn;

const IMAGE_EXTENSIONS: [(&str, &str); 6] = [
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("svg", "image/svg+xml"),
    ("webp", "image/webp"),
];

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error("cannot read logo: {0}")]
    Unreadable(String),
    #[error("unsupported image type: {0}")]
    Unsupported(String),
}

/// Displayable preview of an uploaded logo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewHandle {
    pub source: String,
    pub media_type: &'static str,
    pub size_bytes: u64,
}

pub trait PreviewRenderer {
    fn render(&self, logo: &str) -> Result<PreviewHandle, PreviewError>;
}

/// Treats the logo reference as a local file path.
#[derive(Debug, Default, Clone, Copy)]
pub struct FilePreviewRenderer;

impl PreviewRenderer for FilePreviewRenderer {
    fn render(&self, logo: &str) -> Result<PreviewHandle, PreviewError> {
        let path = Path::new(logo);
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let media_type = IMAGE_EXTENSIONS
            .iter()
            .find(|(ext, _)| *ext == extension)
            .map(|(_, media)| *media)
            .ok_or_else(|| PreviewError::Unsupported(logo.to_string()))?;
        let metadata =
            fs::metadata(path).map_err(|err| PreviewError::Unreadable(format!("{logo}: {err}")))?;
        if !metadata.is_file() {
            return Err(PreviewError::Unreadable(format!("{logo}: not a file")));
        }
        Ok(PreviewHandle {
            source: logo.to_string(),
            media_type,
            size_bytes: metadata.len(),
        })
    }
}

/// Returns the preview when `logo` can be rendered; otherwise the logo field
/// should stay unset.
pub fn attach_logo(renderer: &dyn PreviewRenderer, logo: &str) -> Option<PreviewHandle> {
    let logo = logo.trim();
    if logo.is_empty() {
        return None;
    }
    match renderer.render(logo) {
        Ok(handle) => Some(handle),
        Err(err) => {
            warn!(error = %err, "Logo preview failed; logo left unset");
            None
        }
    }
}
