//! Filesystem output for assembled documents.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Destination for assembled documents.
///
/// Implementations persist a named sequence of text lines durably. The
/// bundled [`MarkdownWriter`] writes UTF-8 `.md` files; tests substitute
/// in-memory sinks.
pub trait DocumentSink {
    /// Persist `lines` under `name`, overwriting any previous document of
    /// the same name.
    fn write_document(&self, name: &str, lines: &[String]) -> Result<()>;
}

/// Writes one Markdown file per document into an output directory.
#[derive(Debug, Clone)]
pub struct MarkdownWriter {
    output_dir: PathBuf,
}

impl MarkdownWriter {
    /// Writer rooted at `output_dir`; the directory is created on first
    /// write.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// The directory documents are written into.
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }
}

impl DocumentSink for MarkdownWriter {
    fn write_document(&self, name: &str, lines: &[String]) -> Result<()> {
        fs::create_dir_all(&self.output_dir)?;
        let path = self
            .output_dir
            .join(format!("{}.md", sanitize_file_name(name)));

        let mut content = String::new();
        for line in lines {
            content.push_str(line);
            content.push('\n');
        }
        fs::write(path, content)?;
        Ok(())
    }
}

/// Restrict a document name to characters safe in a flat file name:
/// alphanumeric, space, `-` and `_`. Everything else is dropped.
pub fn sanitize_file_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_drops_disallowed_characters() {
        assert_eq!(sanitize_file_name("A/B: C"), "AB C");
        assert_eq!(sanitize_file_name("notes_2024-01"), "notes_2024-01");
        assert_eq!(sanitize_file_name("a\\b*c?"), "abc");
    }

    #[test]
    fn test_sanitize_keeps_unicode_letters() {
        assert_eq!(sanitize_file_name("页面 notes"), "页面 notes");
    }

    #[test]
    fn test_write_document_one_line_per_entry() {
        let dir = tempfile::tempdir().unwrap();
        let writer = MarkdownWriter::new(dir.path());
        writer
            .write_document("Doc", &["# Title".to_string(), "body".to_string()])
            .unwrap();

        let content = fs::read_to_string(dir.path().join("Doc.md")).unwrap();
        assert_eq!(content, "# Title\nbody\n");
    }

    #[test]
    fn test_write_document_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let writer = MarkdownWriter::new(dir.path());
        writer.write_document("Doc", &["old".to_string()]).unwrap();
        writer.write_document("Doc", &["new".to_string()]).unwrap();

        let content = fs::read_to_string(dir.path().join("Doc.md")).unwrap();
        assert_eq!(content, "new\n");
    }

    #[test]
    fn test_write_document_creates_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let writer = MarkdownWriter::new(&nested);
        writer.write_document("Doc", &[]).unwrap();

        let content = fs::read_to_string(nested.join("Doc.md")).unwrap();
        assert_eq!(content, "");
    }

    #[test]
    fn test_write_document_sanitizes_name() {
        let dir = tempfile::tempdir().unwrap();
        let writer = MarkdownWriter::new(dir.path());
        writer.write_document("A/B: C", &[]).unwrap();
        assert!(dir.path().join("AB C.md").exists());
    }
}
