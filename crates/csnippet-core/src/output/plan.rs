//! Output file naming

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::dialect::Dialect;
use crate::files::OutputFile;
use crate::markup::DocumentBatch;
use crate::snippet::{NO_NAME, file_stem};

/// File stem used by collection dialects
pub const COLLECTION_FILE_STEM: &str = "snippets";

/// Files to write for a converted batch
///
/// Collection targets write `snippets<ext>` inside `output`, or `output`
/// itself when it already ends with the target extension. Single-snippet
/// targets write one `<name><ext>` per document inside `output`, named by
/// [`file_stem`]; clashing paths get a `-2`, `-3`, ... suffix.
#[must_use]
pub fn plan_outputs(target: Dialect, documents: &DocumentBatch, output: &Path) -> Vec<OutputFile> {
    let extension = target.file_extension();
    let output_is_file = output
        .file_name()
        .is_some_and(|name| name.to_string_lossy().ends_with(extension));

    let mut taken: HashSet<PathBuf> = HashSet::with_capacity(documents.len());
    let mut files = Vec::with_capacity(documents.len());

    for document in documents {
        let stem = if target.is_multi_file() {
            file_stem(document.name().unwrap_or(NO_NAME))
        } else {
            COLLECTION_FILE_STEM.to_string()
        };

        let mut path = if !target.is_multi_file() && output_is_file {
            output.to_path_buf()
        } else {
            output.join(format!("{stem}{extension}"))
        };
        let mut suffix = 2;
        while taken.contains(&path) {
            path = output.join(format!("{stem}-{suffix}{extension}"));
            suffix += 1;
        }
        taken.insert(path.clone());
        files.push(OutputFile::new(path, document.content()));
    }

    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markup::Document;
    use std::path::Component;

    fn paths(files: &[OutputFile]) -> Vec<PathBuf> {
        files.iter().map(|f| f.path.clone()).collect()
    }

    #[test]
    fn test_collection_target_writes_one_file() {
        let batch: DocumentBatch = std::iter::once(Document::unnamed("{}")).collect();
        let files = plan_outputs(Dialect::VsCode, &batch, Path::new("out"));

        assert_eq!(paths(&files), vec![PathBuf::from("out/snippets.code-snippets")]);
        assert_eq!(files[0].content, "{}");
    }

    #[test]
    fn test_collection_target_respects_explicit_file() {
        let batch: DocumentBatch = std::iter::once(Document::unnamed("'*':")).collect();
        let files = plan_outputs(Dialect::Atom, &batch, Path::new("out/my.cson"));

        assert_eq!(paths(&files), vec![PathBuf::from("out/my.cson")]);
    }

    #[test]
    fn test_single_snippet_target_names_files_after_snippets() {
        let batch: DocumentBatch = [
            Document::named("Random Div", "<a/>"),
            Document::named("Random  Div", "<b/>"),
            Document::named("alert", "<c/>"),
        ]
        .into_iter()
        .collect();

        let files = plan_outputs(Dialect::Sublime, &batch, Path::new("out"));

        assert_eq!(
            paths(&files),
            vec![
                PathBuf::from("out/Random-Div.sublime-snippet"),
                PathBuf::from("out/Random-Div-2.sublime-snippet"),
                PathBuf::from("out/alert.sublime-snippet"),
            ]
        );
        assert_eq!(files[1].content, "<b/>");
    }

    #[test]
    fn test_content_has_no_name_marker() {
        let batch: DocumentBatch = std::iter::once(Document::named("x", "<snippet/>")).collect();
        let files = plan_outputs(Dialect::Dreamweaver, &batch, Path::new("out"));

        assert_eq!(files[0].path, PathBuf::from("out/x.csn"));
        assert_eq!(files[0].content, "<snippet/>");
    }

    #[test]
    fn test_unnamed_document_uses_placeholder_stem() {
        let batch: DocumentBatch = std::iter::once(Document::unnamed("<snippet/>")).collect();
        let files = plan_outputs(Dialect::Dreamweaver, &batch, Path::new("out"));

        assert_eq!(files[0].path, PathBuf::from("out/No-Name.csn"));
    }

    #[test]
    fn test_snippet_names_cannot_leave_output_dir() {
        let batch: DocumentBatch = [
            Document::named("../../escape", "<a/>"),
            Document::named("/etc/passwd", "<b/>"),
            Document::named("..", "<c/>"),
        ]
        .into_iter()
        .collect();

        let files = plan_outputs(Dialect::Sublime, &batch, Path::new("out"));

        assert_eq!(
            paths(&files),
            vec![
                PathBuf::from("out/..-..-escape.sublime-snippet"),
                PathBuf::from("out/etc-passwd.sublime-snippet"),
                PathBuf::from("out/No-Name.sublime-snippet"),
            ]
        );
        for file in &files {
            assert!(file.path.starts_with("out"));
            assert!(!file.path.components().any(|c| c == Component::ParentDir));
        }
    }

    #[test]
    fn test_suffixed_path_skips_names_already_used() {
        let batch: DocumentBatch = [
            Document::named("loop", "<a/>"),
            Document::named("loop-2", "<b/>"),
            Document::named("loop", "<c/>"),
        ]
        .into_iter()
        .collect();

        let files = plan_outputs(Dialect::Dreamweaver, &batch, Path::new("out"));

        assert_eq!(
            paths(&files),
            vec![
                PathBuf::from("out/loop.csn"),
                PathBuf::from("out/loop-2.csn"),
                PathBuf::from("out/loop-3.csn"),
            ]
        );
    }
}
