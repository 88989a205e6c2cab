//! Filesystem access for snippet inputs and converted outputs
//!
//! This module handles:
//! - Readability checks for files and directories
//! - Listing snippet files in a directory, filtered by dialect extension
//! - Reading text files and whole snippet directories
//! - Writing files with overwrite protection

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::dialect::Dialect;
use crate::error::{Result, SnippetError};
use crate::markup::{Document, DocumentBatch};

/// Outcome of a single write request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// File did not exist and was written
    Created,
    /// Existing file was replaced
    Overwritten,
    /// Existing file already had the same content
    Unchanged,
    /// Existing file was left alone because overwriting is disabled
    SkippedExisting,
}

/// One file to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
    /// Destination path
    pub path: PathBuf,
    /// Full file content
    pub content: String,
}

impl OutputFile {
    /// Create an output file entry
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Snippet input read from disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SnippetInput {
    /// A single file's text
    Text(String),
    /// One document per file of a directory, named after the file stem
    Documents(DocumentBatch),
}

/// Filesystem collaborator
pub struct SnippetFiles;

impl Default for SnippetFiles {
    fn default() -> Self {
        Self::new()
    }
}

impl SnippetFiles {
    /// Create a new file collaborator
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Whether `path` is a file or directory that can be opened for reading
    #[must_use]
    pub fn is_path_readable(&self, path: &Path) -> bool {
        if path.is_dir() {
            fs::read_dir(path).is_ok()
        } else {
            fs::File::open(path).is_ok()
        }
    }

    /// Files directly inside `dir`, sorted by name
    ///
    /// With a dialect only files carrying its extension are returned.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the directory cannot be read.
    pub fn list_directory(&self, dir: &Path, dialect: Option<Dialect>) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(dir).to_path_buf();
                SnippetError::io(path, e.into())
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let matches = dialect.is_none_or(|dialect| {
                entry
                    .file_name()
                    .to_string_lossy()
                    .ends_with(dialect.file_extension())
            });
            if matches {
                files.push(entry.into_path());
            }
        }

        tracing::debug!(dir = %dir.display(), count = files.len(), "listed snippet files");
        Ok(files)
    }

    /// Read a UTF-8 text file
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the file cannot be read.
    pub fn read_text_file(&self, path: &Path) -> Result<String> {
        fs::read_to_string(path).map_err(|e| SnippetError::io(path, e))
    }

    /// Read a snippet file, or every matching file of a directory
    ///
    /// Directory entries become documents named after their file stem, in
    /// file name order. Without a dialect every file carrying one of the
    /// known snippet extensions is read.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the path cannot be read, or
    /// [`SnippetError::NotValid`] for a directory without snippet files.
    pub fn read_input(&self, path: &Path, dialect: Option<Dialect>) -> Result<SnippetInput> {
        if !path.is_dir() {
            return self.read_text_file(path).map(SnippetInput::Text);
        }

        let is_snippet_file = |file: &PathBuf| {
            let name = file.file_name().map(|n| n.to_string_lossy().into_owned());
            name.is_some_and(|name| {
                Dialect::ALL
                    .iter()
                    .any(|known| name.ends_with(known.file_extension()))
            })
        };

        let mut batch = DocumentBatch::new();
        let files = self.list_directory(path, dialect)?;
        for file in files.into_iter().filter(is_snippet_file) {
            let stem = file
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            batch.push(Document::named(stem, self.read_text_file(&file)?));
        }

        if batch.is_empty() {
            return Err(SnippetError::NotValid);
        }
        Ok(SnippetInput::Documents(batch))
    }

    /// Write `content` to `path`, creating parent directories
    ///
    /// An existing file is only replaced when `overwrite` is set; identical
    /// content is never rewritten.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if a directory or the file cannot be written.
    pub fn write_text_file(&self, path: &Path, content: &str, overwrite: bool) -> Result<WriteOutcome> {
        let existed = path.exists();
        if existed {
            if fs::read_to_string(path).is_ok_and(|current| current == content) {
                return Ok(WriteOutcome::Unchanged);
            }
            if !overwrite {
                tracing::debug!(path = %path.display(), "not overwriting existing file");
                return Ok(WriteOutcome::SkippedExisting);
            }
        }

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| SnippetError::io(parent, e))?;
        }
        fs::write(path, content).map_err(|e| SnippetError::io(path, e))?;

        Ok(if existed {
            WriteOutcome::Overwritten
        } else {
            WriteOutcome::Created
        })
    }

    /// Write every file of a batch, stopping at the first failure
    ///
    /// # Errors
    ///
    /// Returns the first I/O error encountered.
    pub fn write_text_files(&self, files: &[OutputFile], overwrite: bool) -> Result<Vec<WriteOutcome>> {
        files
            .iter()
            .map(|file| self.write_text_file(&file.path, &file.content, overwrite))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_is_path_readable() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("a.csn");
        fs::write(&file, "x").unwrap();
        let files = SnippetFiles::new();

        assert!(files.is_path_readable(tmp.path()));
        assert!(files.is_path_readable(&file));
        assert!(!files.is_path_readable(&tmp.path().join("missing")));
    }

    #[test]
    fn test_list_directory_filters_by_extension() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("b.sublime-snippet"), "").unwrap();
        fs::write(tmp.path().join("a.sublime-snippet"), "").unwrap();
        fs::write(tmp.path().join("notes.txt"), "").unwrap();
        fs::create_dir(tmp.path().join("nested.sublime-snippet")).unwrap();

        let files = SnippetFiles::new()
            .list_directory(tmp.path(), Some(Dialect::Sublime))
            .unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["a.sublime-snippet", "b.sublime-snippet"]);
    }

    #[test]
    fn test_list_directory_without_filter() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.csn"), "").unwrap();
        fs::write(tmp.path().join("b.txt"), "").unwrap();

        let files = SnippetFiles::new().list_directory(tmp.path(), None).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let tmp = TempDir::new().unwrap();
        let err = SnippetFiles::new()
            .read_text_file(&tmp.path().join("missing.csn"))
            .unwrap_err();
        assert!(matches!(err, SnippetError::Io { .. }));
    }

    #[test]
    fn test_read_input_directory_names_documents() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("Random-Div.csn"), "<snippet/>").unwrap();

        let input = SnippetFiles::new()
            .read_input(tmp.path(), Some(Dialect::Dreamweaver))
            .unwrap();
        let SnippetInput::Documents(batch) = input else {
            panic!("expected documents");
        };

        let document = batch.iter().next().unwrap();
        assert_eq!(document.name(), Some("Random-Div"));
        assert_eq!(document.content(), "<snippet/>");
    }

    #[test]
    fn test_read_input_empty_directory() {
        let tmp = TempDir::new().unwrap();
        let err = SnippetFiles::new()
            .read_input(tmp.path(), Some(Dialect::Sublime))
            .unwrap_err();
        assert!(matches!(err, SnippetError::NotValid));
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out/nested/snippets.cson");

        let outcome = SnippetFiles::new().write_text_file(&path, "x", false).unwrap();

        assert_eq!(outcome, WriteOutcome::Created);
        assert_eq!(fs::read_to_string(path).unwrap(), "x");
    }

    #[test]
    fn test_write_respects_overwrite_flag() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("snippets.cson");
        fs::write(&path, "old").unwrap();
        let files = SnippetFiles::new();

        assert_eq!(
            files.write_text_file(&path, "new", false).unwrap(),
            WriteOutcome::SkippedExisting
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "old");

        assert_eq!(
            files.write_text_file(&path, "new", true).unwrap(),
            WriteOutcome::Overwritten
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");

        assert_eq!(
            files.write_text_file(&path, "new", true).unwrap(),
            WriteOutcome::Unchanged
        );
    }

    #[test]
    fn test_write_text_files() {
        let tmp = TempDir::new().unwrap();
        let batch = vec![
            OutputFile::new(tmp.path().join("a.csn"), "a"),
            OutputFile::new(tmp.path().join("b.csn"), "b"),
        ];

        let outcomes = SnippetFiles::new().write_text_files(&batch, false).unwrap();

        assert_eq!(outcomes, vec![WriteOutcome::Created, WriteOutcome::Created]);
        assert!(tmp.path().join("b.csn").exists());
    }
}
