//! CV loader — reads the candidate's CV text from the configured path.

use std::path::{Path, PathBuf};

use crate::errors::AppError;

/// Loads CV text from a configurable path.
#[derive(Debug, Clone)]
pub struct CvLoader {
    path: PathBuf,
}

impl CvLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and trims the CV text. A missing file is a caller-fixable
    /// configuration problem, so it maps to a validation error.
    pub async fn load(&self) -> Result<String, AppError> {
        if !self.path.exists() {
            return Err(AppError::Validation(format!(
                "CV file not found at {}. Update CV_PATH or create the file.",
                self.path.display()
            )));
        }
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read CV: {e}")))?;
        Ok(text.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_load_trims_surrounding_whitespace() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "\n\n  Jane Doe, Rust Engineer  \n\n").unwrap();
        let loader = CvLoader::new(file.path());
        assert_eq!(loader.load().await.unwrap(), "Jane Doe, Rust Engineer");
    }

    #[tokio::test]
    async fn test_missing_cv_is_a_validation_error() {
        let loader = CvLoader::new("/no/such/cv.txt");
        let err = loader.load().await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
