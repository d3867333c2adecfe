//! QR artifact management.
//!
//! Every location gets a PNG under the configured directory encoding its
//! public feedback URL, written on creation and removed on deletion. Both
//! directions are best-effort from the caller's perspective: handlers log
//! failures instead of surfacing them.

use std::path::PathBuf;

use image::Luma;
use qrcode::QrCode;

#[derive(Debug, thiserror::Error)]
pub enum QrError {
    #[error("location code is not usable as a file name: {0}")]
    BadCode(String),

    #[error("QR encoding failed: {0}")]
    Encode(#[from] qrcode::types::QrError),

    #[error("PNG write failed: {0}")]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Writes and removes per-location QR PNGs.
pub struct QrIssuer {
    dir: PathBuf,
}

impl QrIssuer {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The artifact path for a location code.
    ///
    /// Codes are admin-supplied; anything that would escape the artifact
    /// directory is refused.
    fn artifact_path(&self, code: &str) -> Result<PathBuf, QrError> {
        if code.is_empty() || code.contains(['/', '\\']) || code.contains("..") {
            return Err(QrError::BadCode(code.to_string()));
        }
        Ok(self.dir.join(format!("{code}.png")))
    }

    /// Render `url` as a QR PNG named after the location code.
    pub fn write(&self, code: &str, url: &str) -> Result<PathBuf, QrError> {
        let path = self.artifact_path(code)?;
        std::fs::create_dir_all(&self.dir)?;

        let qr = QrCode::new(url.as_bytes())?;
        let img = qr.render::<Luma<u8>>().build();
        img.save(&path)?;

        Ok(path)
    }

    /// Remove the artifact for a code. An already-missing file is fine.
    pub fn remove(&self, code: &str) -> Result<(), QrError> {
        let path = self.artifact_path(code)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Whether an artifact currently exists for a code.
    pub fn exists(&self, code: &str) -> bool {
        self.artifact_path(code).map(|p| p.exists()).unwrap_or(false)
    }
}
