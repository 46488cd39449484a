//! Command: show the configuration tree of a pyphot file.
use anyhow::{Context as _, Result};

use crate::cli::ConfigOpts;
use crate::config::{ConfigTree, ConfigValue};
use crate::generate::tree_to_lines;
use crate::logging::Logger;
use crate::parse::parse_cfg_lines;

/// Run the `config` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or its configuration lines
/// are malformed.
pub fn run(opts: &ConfigOpts, log: &Logger) -> Result<()> {
    log.stage(&format!("Reading configuration from {}", opts.file.display()));
    let lines = parse_cfg_lines(&opts.file)
        .with_context(|| format!("failed to read {}", opts.file.display()))?;
    log.debug(&format!("{} configuration lines", lines.len()));

    let tree = load_tree(&lines, opts.evaluate)
        .with_context(|| format!("invalid configuration in {}", opts.file.display()))?;
    if tree.is_empty() {
        log.warn("no configuration lines found");
    }
    match tree.get_path(&["rdx", "camera"]).and_then(ConfigValue::as_str) {
        Some(camera) => log.info(&format!("camera: {camera}")),
        None => log.debug("no [rdx] camera set"),
    }

    let output = if opts.json {
        super::to_json(&tree)?
    } else {
        render_tree(&tree)
    };
    super::emit(&output);
    log.report_log_location();
    Ok(())
}

/// Tokenise `lines`, evaluating literals when asked.
///
/// # Errors
///
/// Returns an error for malformed configuration lines.
pub fn load_tree(lines: &[String], evaluate: bool) -> Result<ConfigTree> {
    let mut tree = ConfigTree::from_lines(lines)?;
    if evaluate {
        tree.evaluate();
    }
    Ok(tree)
}

/// Render a tree as indented `key: value` lines.
#[must_use]
pub fn render_tree(tree: &ConfigTree) -> String {
    tree_to_lines(tree, 0)
        .into_iter()
        .map(|line| line + "\n")
        .collect()
}
