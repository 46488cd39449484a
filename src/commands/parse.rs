//! Command: parse a pyphot file and report its contents.
use std::fmt::Write as _;

use anyhow::{Context as _, Result};

use crate::cli::ParseOpts;
use crate::logging::Logger;
use crate::parse::{ParseOptions, PyphotFile, parse_pyphot_file};

/// Run the `parse` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or fails validation.
pub fn run(opts: &ParseOpts, log: &Logger) -> Result<()> {
    log.stage(&format!("Parsing {}", opts.file.display()));
    let options = ParseOptions {
        file_check: opts.file_check,
        runtime: opts.runtime,
    };
    log.debug(&format!("file check: {}, runtime: {}", options.file_check, options.runtime));
    let parsed = parse_pyphot_file(&opts.file, options)
        .with_context(|| format!("failed to parse {}", opts.file.display()))?;

    let output = if opts.json {
        super::to_json(&parsed)?
    } else {
        render_report(&parsed)
    };
    super::emit(&output);
    log.report_log_location();
    Ok(())
}

/// Render a human-readable summary of a parsed file.
#[must_use]
pub fn render_report(parsed: &PyphotFile) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Configuration ({} lines):", parsed.cfg_lines.len());
    for line in &parsed.cfg_lines {
        let _ = writeln!(out, "    {line}");
    }

    if parsed.setups.is_empty() {
        let _ = writeln!(out, "Setups: none");
    } else {
        let _ = writeln!(out, "Setups: {}", parsed.setups.join(", "));
    }

    let files = parsed.data.files();
    let _ = writeln!(
        out,
        "Data ({}, {} files):",
        parsed.data.format(),
        files.len()
    );
    match parsed.data.table() {
        Some(table) => {
            for line in table.to_lines() {
                let _ = writeln!(out, "    {line}");
            }
        }
        None => {
            for file in files {
                let _ = writeln!(out, "    {}", file.display());
            }
        }
    }
    out
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::parse::parse_pyphot_str;

    const NO_CHECK: ParseOptions = ParseOptions {
        file_check: false,
        runtime: false,
    };

    #[test]
    fn report_lists_raw_files() {
        let parsed = parse_pyphot_str(
            "[rdx]\ncamera = lbc_b\nsetup read\nSetup A:\nsetup end\ndata read\n a.fits\n b.fits\ndata end\n",
            NO_CHECK,
        )
        .expect("parse");
        let report = render_report(&parsed);
        assert_eq!(
            report,
            "Configuration (2 lines):\n    [rdx]\n    camera = lbc_b\nSetups: A\nData (raw list, 2 files):\n    a.fits\n    b.fits\n"
        );
    }

    #[test]
    fn report_renders_table() {
        let parsed = parse_pyphot_str(
            "data read\n| filename | frametype |\n| a.fits | science |\ndata end\n",
            NO_CHECK,
        )
        .expect("parse");
        let report = render_report(&parsed);
        assert!(report.contains("Setups: none"));
        assert!(report.contains("Data (table, 1 files):"));
        assert!(report.contains("| filename | frametype |"));
    }

    #[test]
    fn json_output_is_tagged() {
        let parsed = parse_pyphot_str("data read\n a.fits\ndata end\n", NO_CHECK).expect("parse");
        let json = super::super::to_json(&parsed).expect("json");
        let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
        assert_eq!(value["data"]["format"], "raw_list");
        assert_eq!(value["data"]["files"][0], "a.fits");
    }
}
