use std::path::Path;

use anyhow::Context;
use csnippet_core::sniffer;
use csnippet_core::{Detection, Registry, SnippetFiles, SnippetInput};

pub struct Detect;

impl Detect {
    pub fn execute(input: &Path) -> anyhow::Result<()> {
        let text = match SnippetFiles::new()
            .read_input(input, None)
            .with_context(|| format!("Failed to read {}", input.display()))?
        {
            SnippetInput::Text(text) => text,
            // Single-snippet files all share one dialect; the first one decides
            SnippetInput::Documents(batch) => batch
                .iter()
                .next()
                .map(|document| document.content().to_string())
                .unwrap_or_default(),
        };

        let registry = Registry::standard();

        println!("Probing {}:", input.display());
        for (dialect, detection) in sniffer::detect_all(&registry, &text) {
            println!("  {:<12} {}", dialect.display_name(), Self::describe(detection));
        }

        let dialect =
            sniffer::find_source(&registry, &text).context("Could not detect snippet format")?;
        println!("\nDetected: {} ({})", dialect.display_name(), dialect);

        Ok(())
    }

    const fn describe(detection: Detection) -> &'static str {
        match detection {
            Detection::Match => "match",
            Detection::NoMatch => "no match",
            Detection::Malformed => "malformed",
        }
    }
}
