use anyhow::Result;
use std::io::Write;
use storj_idconv::engine::SourceMatch;
use storj_idconv::types::ConversionResult;

#[derive(Debug, Clone, Default)]
pub struct Output {
    pub json: bool,
    /// Print a `Using <input> as <format>` line before each decoder's results.
    pub headers: bool,
    /// Print rendered values only, one per line.
    pub values_only: bool,
    /// Terminate `values_only` output with a newline.
    pub newline: bool,
}

impl Output {
    pub fn render(&self, input: &str, groups: &[SourceMatch]) -> Result<String> {
        if self.json {
            let results: Vec<&ConversionResult> =
                groups.iter().flat_map(|group| group.results.iter()).collect();
            return Ok(format!("{}\n", serde_json::to_string_pretty(&results)?));
        }

        if self.values_only {
            let mut rendered = groups
                .iter()
                .flat_map(|group| group.results.iter())
                .map(|result| result.rendered.as_str())
                .collect::<Vec<_>>()
                .join("\n");
            if self.newline && !rendered.is_empty() {
                rendered.push('\n');
            }
            return Ok(rendered);
        }

        let mut out = String::new();
        for group in groups {
            if self.headers {
                out.push_str(&format!("Using {input} as {}\n", group.source_format));
            }
            for result in &group.results {
                out.push_str(&format!("   {} {}\n", result.destination_format, result.rendered));
            }
        }
        Ok(out)
    }

    pub fn emit(&self, input: &str, groups: &[SourceMatch]) -> Result<()> {
        let rendered = self.render(input, groups)?;
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(rendered.as_bytes())?;
        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups() -> Vec<SourceMatch> {
        vec![SourceMatch {
            source_format: "hex",
            results: vec![
                ConversionResult {
                    source_format: "hex",
                    destination_format: "path",
                    rendered: "jbswy3dp".to_string(),
                },
                ConversionResult {
                    source_format: "hex",
                    destination_format: "string",
                    rendered: "Hello".to_string(),
                },
            ],
        }]
    }

    #[test]
    fn text_layout_matches_cli_format() {
        let output = Output { headers: true, ..Output::default() };
        let rendered = output.render("48656c6c6f", &groups()).expect("render");
        assert_eq!(rendered, "Using 48656c6c6f as hex\n   path jbswy3dp\n   string Hello\n");
    }

    #[test]
    fn values_only_has_no_trailing_newline_by_default() {
        let output = Output { values_only: true, ..Output::default() };
        assert_eq!(output.render("x", &groups()).expect("render"), "jbswy3dp\nHello");

        let output = Output { values_only: true, newline: true, ..Output::default() };
        assert_eq!(output.render("x", &groups()).expect("render"), "jbswy3dp\nHello\n");
    }

    #[test]
    fn json_lists_flat_results() {
        let output = Output { json: true, ..Output::default() };
        let rendered = output.render("x", &groups()).expect("render");
        let parsed: serde_json::Value = serde_json::from_str(&rendered).expect("json");
        assert_eq!(parsed[1]["destination_format"], "string");
        assert_eq!(parsed[1]["rendered"], "Hello");
    }
}
