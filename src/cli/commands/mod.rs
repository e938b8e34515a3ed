//! CLI command implementations
//!
//! Every command returns an exit code: 0 success, 1 processing failure,
//! 2 configuration error, 5 fatal error.

pub mod anonymize;
pub mod decrypt;
pub mod init;
pub mod remote;
pub mod validate;

use anyhow::Context;
use std::io::Read;
use std::path::Path;

/// Text from `--text`, else from `--input`, else from stdin
pub(crate) fn read_input(text: Option<&str>, input: Option<&Path>) -> anyhow::Result<String> {
    if let Some(text) = text {
        return Ok(text.to_string());
    }

    if let Some(path) = input {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {}", path.display()));
    }

    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read text from stdin")?;
    Ok(buffer)
}

/// Write to `output`, or stdout when absent
pub(crate) fn write_output(output: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("Failed to write output file: {}", path.display())),
        None => {
            println!("{content}");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_read_input_prefers_text() {
        let text = read_input(Some("inline"), Some(Path::new("/nonexistent"))).unwrap();
        assert_eq!(text, "inline");
    }

    #[test]
    fn test_read_input_from_file_and_write_output() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("cv.txt");
        std::fs::write(&input, "Jane Doe, jane@example.com").unwrap();
        assert_eq!(
            read_input(None, Some(&input)).unwrap(),
            "Jane Doe, jane@example.com"
        );

        let output = dir.path().join("out.txt");
        write_output(Some(&output), "<PERSON>").unwrap();
        assert_eq!(std::fs::read_to_string(output).unwrap(), "<PERSON>");
    }

    #[test]
    fn test_read_input_missing_file() {
        assert!(read_input(None, Some(Path::new("/nonexistent/cv.txt"))).is_err());
    }
}
