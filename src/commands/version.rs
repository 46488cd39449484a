//! Command: print version information.

/// Version string baked in at build time.
#[must_use]
pub const fn version() -> &'static str {
    match option_env!("PYPHOT_VERSION") {
        Some(version) => version,
        None => env!("CARGO_PKG_VERSION"),
    }
}

/// Print the pyphot-file version to stdout.
pub fn run() {
    super::emit(&format!("pyphot-file {}\n", version()));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_not_empty() {
        assert!(!version().is_empty());
    }
}
