//! Command: write a new pyphot file.
use anyhow::{Context as _, Result};

use crate::cli::GenerateOpts;
use crate::generate::{PyphotFileContents, make_pyphot_file};
use crate::logging::Logger;

/// Run the `generate` command.
///
/// # Errors
///
/// Returns an error if the arguments are rejected or the file cannot be
/// written.
pub fn run(opts: &GenerateOpts, log: &Logger) -> Result<()> {
    log.stage(&format!("Writing {}", opts.output.display()));
    let contents = contents_from_opts(opts);
    if contents.data_files.is_empty() {
        log.warn("no data files given; the data block will be empty");
    }
    log.debug(&format!(
        "{} data files, {} search paths, {} setup lines",
        contents.data_files.len(),
        opts.paths.len(),
        opts.setup_lines.len()
    ));
    make_pyphot_file(&opts.output, &contents)
        .with_context(|| format!("failed to write {}", opts.output.display()))?;
    log.report_log_location();
    Ok(())
}

/// Translate command-line options into a [`PyphotFileContents`].
///
/// Empty repeatable options mean "not given", so the generator falls back
/// to its defaults.
#[must_use]
pub fn contents_from_opts(opts: &GenerateOpts) -> PyphotFileContents {
    let non_empty = |v: &Vec<String>| (!v.is_empty()).then(|| v.clone());
    PyphotFileContents {
        camera: opts.camera.clone(),
        data_files: opts.files.clone(),
        cfg_lines: non_empty(&opts.cfg_lines),
        setup_mode: opts.setup_mode,
        setup_lines: non_empty(&opts.setup_lines),
        sorted_files: None,
        paths: (!opts.paths.is_empty()).then(|| opts.paths.clone()),
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn opts() -> GenerateOpts {
        GenerateOpts {
            output: PathBuf::from("out.pyphot"),
            camera: "lbc_r".to_string(),
            files: vec!["a.fits".to_string()],
            paths: Vec::new(),
            setup_lines: Vec::new(),
            cfg_lines: Vec::new(),
            setup_mode: false,
        }
    }

    #[test]
    fn empty_options_fall_back_to_defaults() {
        let contents = contents_from_opts(&opts());
        assert_eq!(contents.cfg_lines, None);
        assert_eq!(contents.setup_lines, None);
        assert_eq!(contents.paths, None);
        assert_eq!(contents.effective_cfg_lines(), vec!["[rdx]", "    camera = lbc_r"]);
    }

    #[test]
    fn given_options_are_kept() {
        let contents = contents_from_opts(&GenerateOpts {
            paths: vec![PathBuf::from("/raw")],
            setup_lines: vec!["Setup A:".to_string()],
            cfg_lines: vec!["[rdx]".to_string()],
            ..opts()
        });
        assert_eq!(contents.paths, Some(vec![PathBuf::from("/raw")]));
        assert_eq!(contents.setup_lines, Some(vec!["Setup A:".to_string()]));
        assert_eq!(contents.cfg_lines, Some(vec!["[rdx]".to_string()]));
    }

    #[test]
    fn run_writes_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let output = dir.path().join("lbc_r.pyphot");
        let (log, _tmp, _guard) = crate::logging::isolated_logger();
        run(
            &GenerateOpts {
                output: output.clone(),
                ..opts()
            },
            &log,
        )
        .expect("generate");
        let content = std::fs::read_to_string(&output).expect("read back");
        assert!(content.starts_with("# Auto-generated PyPhot file\n"));
        assert!(content.contains("\n a.fits\n"));
    }

    #[test]
    fn run_reports_invalid_arguments() {
        let dir = tempfile::tempdir().expect("tempdir");
        let (log, _tmp, _guard) = crate::logging::isolated_logger();
        let err = run(
            &GenerateOpts {
                output: dir.path().join("bad.pyphot"),
                files: vec![String::new()],
                ..opts()
            },
            &log,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("Invalid argument"), "{err:#}");
    }
}
