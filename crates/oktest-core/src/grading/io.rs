//! Backing-file IO: `test = <pretty JSON>`.
//!
//! Writes overwrite the whole file and are not atomic; an interrupted write
//! can leave a truncated file behind.

use std::path::{Path, PathBuf};

use tracing::info;

use super::{GradedTest, TestDeclaration, TestSettings};
use crate::errors::{GradingError, GradingResult};
use crate::format;
use crate::suite::SuiteRegistry;

pub const TEST_FILE_PREFIX: &str = "test = ";

pub fn render_test_file(value: &serde_json::Value) -> GradingResult<String> {
    Ok(format!("{}{}", TEST_FILE_PREFIX, format::pretty_json(value)?))
}

pub fn parse_test_file(path: &Path, content: &str) -> GradingResult<TestDeclaration> {
    let body = content
        .trim_start()
        .strip_prefix("test")
        .map(str::trim_start)
        .and_then(|rest| rest.strip_prefix('='))
        .ok_or_else(|| GradingError::TestFile {
            path: path.to_path_buf(),
            message: format!("expected file to start with `{}`", TEST_FILE_PREFIX.trim_end()),
        })?;

    serde_json::from_str(body).map_err(|e| GradingError::TestFile {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

impl GradedTest {
    /// Read a backing file and construct the test it declares.
    pub fn load(
        path: impl AsRef<Path>,
        registry: &SuiteRegistry,
        assignment_name: impl Into<String>,
        settings: TestSettings,
    ) -> GradingResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| GradingError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let decl = parse_test_file(path, &content)?;
        Self::from_declaration(decl, PathBuf::from(path), registry, assignment_name, settings)
    }

    /// Overwrite the backing file with the current in-memory state.
    pub fn dump(&self) -> GradingResult<()> {
        let content = render_test_file(&self.to_json()?)?;
        std::fs::write(&self.file, content).map_err(|source| GradingError::Io {
            path: self.file.clone(),
            source,
        })?;
        info!(path = %self.file.display(), test = %self.name, "saved test file");
        Ok(())
    }
}
