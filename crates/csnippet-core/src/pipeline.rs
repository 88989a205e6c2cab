//! Conversion pipeline - coordinates reading, conversion and writing

use std::io;
use std::path::PathBuf;

use crate::converter::Converter;
use crate::dialect::Dialect;
use crate::error::{Result, SnippetError};
use crate::files::SnippetFiles;
use crate::formats::Registry;
use crate::output::{
    ConversionReport, OutputAction, OutputActionResolver, OutputExecutor, plan_outputs,
};

/// Approval callback for replacing existing files
pub type ApprovalCallback = Box<dyn FnMut(&OutputAction) -> Result<bool>>;

/// What to convert and where to write it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    /// Snippet file, or directory of single-snippet files
    pub input: PathBuf,
    /// Output directory, or output file for a collection target
    pub output: PathBuf,
    /// Declared source dialect; sniffed when absent
    pub source: Option<Dialect>,
    /// Target dialects, converted in order
    pub targets: Vec<Dialect>,
    /// Replace existing files with different content
    pub overwrite: bool,
    /// Report what would be written without touching the filesystem
    pub dry_run: bool,
}

/// Main conversion pipeline
pub struct ConversionPipeline {
    registry: Registry,
    files: SnippetFiles,
}

impl Default for ConversionPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversionPipeline {
    /// Create a pipeline over the standard registry
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(Registry::standard())
    }

    /// Create a pipeline over a custom registry
    #[must_use]
    pub const fn with_registry(registry: Registry) -> Self {
        Self {
            registry,
            files: SnippetFiles::new(),
        }
    }

    /// Execute the conversion
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read, detected or parsed, or
    /// a target cannot be serialized.
    pub fn run(&self, request: &ConversionRequest) -> Result<ConversionReport> {
        self.run_with_approver(request, None)
    }

    /// Execute the conversion with an optional approval callback
    ///
    /// The approver is called for every existing file that would change while
    /// overwriting is off. It should return Ok(true) to replace the file,
    /// Ok(false) to skip it, or Err to abort. Write failures are collected in
    /// the report instead of aborting the run.
    ///
    /// # Errors
    ///
    /// Returns an error if the input cannot be read, detected or parsed, a
    /// target cannot be serialized, or the approver returns an error.
    pub fn run_with_approver(
        &self,
        request: &ConversionRequest,
        mut approver: Option<ApprovalCallback>,
    ) -> Result<ConversionReport> {
        if request.targets.is_empty() {
            return Err(SnippetError::NoTarget);
        }
        if !self.files.is_path_readable(&request.input) {
            return Err(SnippetError::io(
                &request.input,
                io::Error::new(io::ErrorKind::NotFound, "input is not readable"),
            ));
        }

        let input = self.files.read_input(&request.input, request.source)?;
        let mut converter = Converter::from_input(input).with_registry(self.registry.clone());
        if let Some(source) = request.source {
            converter = converter.with_source(source);
        }
        let source = converter.init()?;
        let snippets = converter.parse(None)?;

        let mut report = ConversionReport {
            source: Some(source),
            snippets_read: snippets.len(),
            output: request.output.clone(),
            ..ConversionReport::default()
        };

        let executor = OutputExecutor::new(request.dry_run);
        let mut targets: Vec<Dialect> = Vec::with_capacity(request.targets.len());
        for &target in &request.targets {
            if !targets.contains(&target) {
                targets.push(target);
            }
        }

        for target in targets {
            let documents = converter.convert_documents(Some(&snippets), Some(target))?;
            report.targets.push((target, documents.len()));

            for file in plan_outputs(target, &documents, &request.output) {
                // Only changes to existing files need approval
                let action = match OutputActionResolver::resolve(file, request.overwrite) {
                    conflict @ OutputAction::Conflict { .. } => match approver.as_mut() {
                        Some(approve) => {
                            if !approve(&conflict)? {
                                report.record_skip("user skipped");
                                continue;
                            }
                            conflict.into_overwrite()
                        }
                        None => conflict,
                    },
                    action => action,
                };

                if let Err(e) = executor.execute(&action, &mut report) {
                    tracing::error!(path = %action.file().path.display(), "{e}");
                    report.errors.push(e.to_string());
                }
            }
        }

        tracing::debug!(
            created = report.created,
            overwritten = report.overwritten,
            skipped = report.skipped,
            "conversion finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const VSCODE: &str = indoc! {r#"
        {
            "Random Div": {
                "prefix": "div",
                "body": ["<div>", "<p>x</p>", "</div>"],
                "description": "Creates a div"
            },
            "Random Alert": {
                "prefix": "alert",
                "body": "alert(1);"
            }
        }
    "#};

    fn request(input: &Path, output: &Path, targets: Vec<Dialect>) -> ConversionRequest {
        ConversionRequest {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            source: None,
            targets,
            overwrite: false,
            dry_run: false,
        }
    }

    fn setup() -> (TempDir, PathBuf, PathBuf) {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("snippets.code-snippets");
        fs::write(&input, VSCODE).unwrap();
        let output = tmp.path().join("out");
        (tmp, input, output)
    }

    #[test]
    fn test_converts_to_every_target() {
        let (_tmp, input, output) = setup();
        let targets = vec![Dialect::Sublime, Dialect::Dreamweaver, Dialect::Atom];

        let report = ConversionPipeline::new()
            .run(&request(&input, &output, targets))
            .unwrap();

        assert_eq!(report.source, Some(Dialect::VsCode));
        assert_eq!(report.snippets_read, 2);
        assert_eq!(
            report.targets,
            vec![(Dialect::Sublime, 2), (Dialect::Dreamweaver, 2), (Dialect::Atom, 1)]
        );
        assert_eq!(report.created, 5);
        assert!(output.join("Random-Div.sublime-snippet").exists());
        assert!(output.join("Random-Alert.csn").exists());
        assert!(output.join("snippets.cson").exists());
    }

    #[test]
    fn test_single_snippet_files_have_no_name_marker() {
        let (_tmp, input, output) = setup();
        ConversionPipeline::new()
            .run(&request(&input, &output, vec![Dialect::Sublime]))
            .unwrap();

        let content = fs::read_to_string(output.join("Random-Div.sublime-snippet")).unwrap();
        assert!(content.starts_with("<snippet>"));
    }

    #[test]
    fn test_directory_input_recovers_names_from_file_stems() {
        let (_tmp, input, output) = setup();
        ConversionPipeline::new()
            .run(&request(&input, &output, vec![Dialect::Sublime]))
            .unwrap();

        let back = output.join("back.code-snippets");
        let mut reverse = request(&output, &back, vec![Dialect::VsCode]);
        reverse.source = Some(Dialect::Sublime);
        let report = ConversionPipeline::new().run(&reverse).unwrap();

        assert_eq!(report.snippets_read, 2);
        let text = fs::read_to_string(back).unwrap();
        assert!(text.contains("\"Random-Alert\""));
        assert!(text.contains("\"Random-Div\""));
    }

    #[test]
    fn test_existing_files_are_kept_without_overwrite() {
        let (_tmp, input, output) = setup();
        let target = output.join("snippets.cson");
        fs::create_dir_all(&output).unwrap();
        fs::write(&target, "old").unwrap();

        let report = ConversionPipeline::new()
            .run(&request(&input, &output, vec![Dialect::Atom]))
            .unwrap();

        assert_eq!(report.skipped, 1);
        assert_eq!(fs::read_to_string(&target).unwrap(), "old");

        let mut forced = request(&input, &output, vec![Dialect::Atom]);
        forced.overwrite = true;
        let report = ConversionPipeline::new().run(&forced).unwrap();

        assert_eq!(report.overwritten, 1);
        assert!(fs::read_to_string(&target).unwrap().starts_with("'*':"));
    }

    #[test]
    fn test_approver_decides_conflicts() {
        let (_tmp, input, output) = setup();
        fs::create_dir_all(&output).unwrap();
        fs::write(output.join("Random-Div.csn"), "old").unwrap();
        fs::write(output.join("Random-Alert.csn"), "old").unwrap();

        let approver: ApprovalCallback = Box::new(|action| {
            let name = action.file().path.file_name().unwrap().to_string_lossy().into_owned();
            Ok(name == "Random-Div.csn")
        });

        let report = ConversionPipeline::new()
            .run_with_approver(&request(&input, &output, vec![Dialect::Dreamweaver]), Some(approver))
            .unwrap();

        assert_eq!(report.overwritten, 1);
        assert_eq!(report.skip_reasons["user skipped"], 1);
        assert_eq!(fs::read_to_string(output.join("Random-Alert.csn")).unwrap(), "old");
        assert_ne!(fs::read_to_string(output.join("Random-Div.csn")).unwrap(), "old");
    }

    #[test]
    fn test_approver_error_aborts() {
        let (_tmp, input, output) = setup();
        fs::create_dir_all(&output).unwrap();
        fs::write(output.join("snippets.cson"), "old").unwrap();

        let approver: ApprovalCallback = Box::new(|_| Err(SnippetError::Aborted));
        let result = ConversionPipeline::new()
            .run_with_approver(&request(&input, &output, vec![Dialect::Atom]), Some(approver));

        assert!(matches!(result, Err(SnippetError::Aborted)));
        assert_eq!(fs::read_to_string(output.join("snippets.cson")).unwrap(), "old");
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let (_tmp, input, output) = setup();
        let mut dry = request(&input, &output, vec![Dialect::Sublime]);
        dry.dry_run = true;

        let report = ConversionPipeline::new().run(&dry).unwrap();

        assert_eq!(report.created, 2);
        assert!(!output.exists());
    }

    #[test]
    fn test_missing_input() {
        let tmp = TempDir::new().unwrap();
        let err = ConversionPipeline::new()
            .run(&request(&tmp.path().join("nope"), tmp.path(), vec![Dialect::Atom]))
            .unwrap_err();
        assert!(matches!(err, SnippetError::Io { .. }));
    }

    #[test]
    fn test_no_targets() {
        let (_tmp, input, output) = setup();
        let err = ConversionPipeline::new()
            .run(&request(&input, &output, vec![]))
            .unwrap_err();
        assert!(matches!(err, SnippetError::NoTarget));
    }

    #[test]
    fn test_unrecognised_input() {
        let tmp = TempDir::new().unwrap();
        let input = tmp.path().join("notes.txt");
        fs::write(&input, "plain words").unwrap();

        let err = ConversionPipeline::new()
            .run(&request(&input, tmp.path(), vec![Dialect::Atom]))
            .unwrap_err();
        assert!(matches!(err, SnippetError::NotValid));
    }
}
