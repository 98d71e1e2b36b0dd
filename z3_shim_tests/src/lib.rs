//! Helpers for tests against a native library.
//!
//! The native library is found as the `z3_shim` binary would find it, with [LIBRARY_PATH_VAR](z3_shim::config::LIBRARY_PATH_VAR) respected.
//! If no library can be found each test returns early, after noting the skip.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use z3_shim::{
    config::{Config, LibraryConfig},
    context::Context,
    library::{self, Z3Library},
};

pub fn native_library() -> Option<Arc<Z3Library>> {
    #[cfg(feature = "log")]
    let _ = env_logger::builder().is_test(true).try_init();

    match library::init(&LibraryConfig::from_env()) {
        Ok(library) => Some(library),
        Err(e) => {
            log::warn!("Skipping, no native library: {e}");
            println!("c Skipping, no native library: {e}");
            None
        }
    }
}

/// A context on the native library, with default configuration.
pub fn native_context() -> Option<Context> {
    let library = native_library()?;
    match Context::with_library(library, &Config::default()) {
        Ok(context) => Some(context),
        Err(e) => panic!("c Context creation failed: {e}"),
    }
}

pub fn scripts_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("scripts")
}

/// Every SMT-LIB2 script in the scripts directory.
pub fn scripts() -> Vec<PathBuf> {
    let pattern = scripts_dir().join("*.smt2");
    let pattern = pattern.to_string_lossy();
    match glob::glob(&pattern) {
        Ok(paths) => paths.flatten().collect(),
        Err(e) => panic!("c Bad pattern {pattern}: {e}"),
    }
}

/// The responses a script expects, from a leading `; expect: a, b, ..` line.
pub fn expected_responses(script: &str) -> Vec<String> {
    script
        .lines()
        .find_map(|line| line.strip_prefix("; expect:"))
        .map(|expected| {
            expected
                .split(',')
                .map(|response| response.trim().to_string())
                .filter(|response| !response.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// The responses in the output of a script, one per non-empty line.
pub fn responses(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
