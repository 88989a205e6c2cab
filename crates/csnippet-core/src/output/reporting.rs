//! Conversion reporting and statistics

use std::fmt::Write;

use super::ConversionReport;

/// Conversion run reporter
pub struct ConversionReporter;

impl ConversionReporter {
    /// Generate a summary report
    #[must_use]
    pub fn generate_summary(report: &ConversionReport) -> String {
        let mut output = String::new();

        output.push_str("\n=== Conversion Summary ===\n");
        if let Some(source) = report.source {
            writeln!(output, "Source:     {}", source.display_name())
                .expect("Writing to String should never fail");
        }
        writeln!(output, "Snippets:   {} read", report.snippets_read)
            .expect("Writing to String should never fail");
        for (target, documents) in &report.targets {
            let noun = if *documents == 1 { "document" } else { "documents" };
            writeln!(output, "  -> {}: {documents} {noun}", target.display_name())
                .expect("Writing to String should never fail");
        }
        writeln!(output, "Output:     {}", report.output.display())
            .expect("Writing to String should never fail");

        writeln!(output, "\nCreated:     {}", report.created)
            .expect("Writing to String should never fail");
        writeln!(output, "Overwritten: {}", report.overwritten)
            .expect("Writing to String should never fail");
        writeln!(output, "Unchanged:   {}", report.unchanged)
            .expect("Writing to String should never fail");

        if report.skipped > 0 && !report.skip_reasons.is_empty() {
            write!(output, "Skipped:     {}", report.skipped)
                .expect("Writing to String should never fail");
            let mut reasons: Vec<_> = report.skip_reasons.iter().collect();
            reasons.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
            for (reason, count) in reasons {
                write!(output, " ({reason}: {count})")
                    .expect("Writing to String should never fail");
            }
            writeln!(output)
                .expect("Writing to String should never fail");
        } else {
            writeln!(output, "Skipped:     {}", report.skipped)
                .expect("Writing to String should never fail");
        }

        if !report.errors.is_empty() {
            writeln!(output, "\nErrors ({}):", report.errors.len())
                .expect("Writing to String should never fail");
            for error in &report.errors {
                writeln!(output, "  - {error}")
                    .expect("Writing to String should never fail");
            }
        }

        if report.is_success() {
            output.push_str("\nStatus: ✓ Success\n");
        } else {
            output.push_str("\nStatus: ✗ Completed with errors\n");
        }

        output
    }
}
