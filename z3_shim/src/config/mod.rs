/*!
Configuration of the loader and of contexts.

A [Config] holds:
- A [LibraryConfig], used when the native library is first loaded.
- Options rendered as native parameters when a context is created, see [Config::option_params].

Parameters not covered by a dedicated option may be given as (key, value) pairs in [params](Config::params).
These are applied to the live context once created, and an unknown key is reported as an error of [Context::with_library](crate::context::Context::with_library).

# Example

```rust
# use z3_shim::config::Config;
let mut config = Config::default();
assert!(config.timeout.set(5_000));
config.params.push(("auto_config".to_string(), "false".to_string()));

let params = config.context_params();
assert!(params.contains(&("timeout".to_string(), "5000".to_string())));
assert!(params.contains(&("auto_config".to_string(), "false".to_string())));
```
*/

use std::path::PathBuf;

mod config_option;
pub use config_option::ConfigOption;

/// The environment variable read for a library path when no path is given explicitly.
pub const LIBRARY_PATH_VAR: &str = "Z3_LIBRARY_PATH";

/// Configuration of the loader.
#[derive(Clone, Debug)]
pub struct LibraryConfig {
    /// A path to the library, or to a directory containing the library.
    ///
    /// If present, only this path is tried.
    pub path: Option<PathBuf>,

    /// Whether to fall back to the system loader, by file name, after the fixed search directories.
    pub system_fallback: bool,
}

impl LibraryConfig {
    /// A config with the path given by [LIBRARY_PATH_VAR], if set.
    pub fn from_env() -> Self {
        LibraryConfig {
            path: std::env::var_os(LIBRARY_PATH_VAR).map(PathBuf::from),
            system_fallback: true,
        }
    }

    /// A config which tries only `path`.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        LibraryConfig {
            path: Some(path.into()),
            system_fallback: false,
        }
    }
}

impl Default for LibraryConfig {
    fn default() -> Self {
        LibraryConfig::from_env()
    }
}

/// The primary configuration structure.
#[derive(Clone, Debug)]
pub struct Config {
    /// Configuration of the loader.
    pub library: LibraryConfig,

    /// Enable model generation.
    pub model: ConfigOption<bool>,

    /// Enable proof generation.
    pub proof: ConfigOption<bool>,

    /// Enable unsatisfiable core generation.
    pub unsat_core: ConfigOption<bool>,

    /// Timeout, in milliseconds, for solver checks.
    /// Zero for no timeout.
    pub timeout: ConfigOption<u32>,

    /// Further native parameters, applied after those above.
    pub params: Vec<(String, String)>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            library: LibraryConfig::default(),

            model: ConfigOption {
                name: "model",
                min: false,
                max: true,
                value: true,
            },

            proof: ConfigOption {
                name: "proof",
                min: false,
                max: true,
                value: false,
            },

            unsat_core: ConfigOption {
                name: "unsat_core",
                min: false,
                max: true,
                value: false,
            },

            timeout: ConfigOption {
                name: "timeout",
                min: 0,
                max: u32::MAX,
                value: 0,
            },

            params: Vec::default(),
        }
    }
}

impl Config {
    /// The native (key, value) parameters for a context, in the order they are applied.
    pub fn context_params(&self) -> Vec<(String, String)> {
        let mut params = self.option_params();
        params.extend(self.params.iter().cloned());
        params
    }

    /// The native (key, value) parameters of the dedicated options.
    pub fn option_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            (self.model.name.to_string(), self.model.value.to_string()),
            (self.proof.name.to_string(), self.proof.value.to_string()),
            (
                self.unsat_core.name.to_string(),
                self.unsat_core.value.to_string(),
            ),
        ];

        if self.timeout.value != 0 {
            params.push((self.timeout.name.to_string(), self.timeout.value.to_string()));
        }

        params
    }
}

/// Splits `key=value` at the first `=`, trimming whitespace around both parts.
pub fn parse_param(param: &str) -> Option<(String, String)> {
    let (key, value) = param.split_once('=')?;
    let key = key.trim();
    match key.is_empty() {
        true => None,
        false => Some((key.to_string(), value.trim().to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params() {
        let config = Config {
            library: LibraryConfig::with_path("."),
            ..Config::default()
        };
        assert_eq!(
            config.context_params(),
            vec![
                ("model".to_string(), "true".to_string()),
                ("proof".to_string(), "false".to_string()),
                ("unsat_core".to_string(), "false".to_string()),
            ]
        );
    }

    #[test]
    fn free_params_follow_options() {
        let mut config = Config {
            library: LibraryConfig::with_path("."),
            ..Config::default()
        };
        config.timeout.set(100);
        config.params.push(("auto_config".to_string(), "false".to_string()));

        assert_eq!(config.option_params().len(), 4);
        assert!(!config
            .option_params()
            .contains(&("auto_config".to_string(), "false".to_string())));
        assert_eq!(
            config.context_params().last(),
            Some(&("auto_config".to_string(), "false".to_string()))
        );
    }

    #[test]
    fn bounds() {
        let mut option = ConfigOption {
            name: "test",
            min: 1,
            max: 10,
            value: 5,
        };
        assert!(!option.set(11));
        assert_eq!(option.value, 5);
        assert!(option.set(10));
        assert_eq!(option.min_max(), (1, 10));
    }

    #[test]
    fn param_parsing() {
        assert_eq!(
            parse_param("timeout = 100"),
            Some(("timeout".to_string(), "100".to_string()))
        );
        assert_eq!(
            parse_param("smt.logic=QF_BV=x"),
            Some(("smt.logic".to_string(), "QF_BV=x".to_string()))
        );
        assert_eq!(parse_param("=1"), None);
        assert_eq!(parse_param("model"), None);
    }
}
