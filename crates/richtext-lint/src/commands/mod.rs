//! Command implementations.

use anyhow::Context;
use camino::Utf8Path;

pub mod check;
pub mod info;
#[cfg(feature = "mcp")]
pub mod serve;

/// Read a file and validate its size against the configured limit.
pub fn read_input_file(path: &Utf8Path, max_bytes: Option<usize>) -> anyhow::Result<String> {
    // Check the size before reading into memory.
    let metadata =
        std::fs::metadata(path.as_std_path()).with_context(|| format!("failed to read {path}"))?;
    if let Some(max) = max_bytes {
        let size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if size > max {
            anyhow::bail!("input too large: {path} is {size} bytes (limit: {max} bytes)");
        }
    }

    std::fs::read_to_string(path.as_std_path()).with_context(|| format!("failed to read {path}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    #[test]
    fn read_input_file_enforces_limit() {
        let tmp = TempDir::new().unwrap();
        let path = Utf8PathBuf::try_from(tmp.path().join("doc.json")).unwrap();
        std::fs::write(&path, "0123456789").unwrap();

        assert_eq!(read_input_file(&path, Some(10)).unwrap(), "0123456789");
        assert_eq!(read_input_file(&path, None).unwrap().len(), 10);
        let err = read_input_file(&path, Some(9)).unwrap_err();
        assert!(err.to_string().contains("input too large"));
    }

    #[test]
    fn read_input_file_reports_missing_file() {
        let err = read_input_file(Utf8Path::new("/nonexistent/doc.json"), None).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
