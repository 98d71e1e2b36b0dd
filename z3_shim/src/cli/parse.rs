use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

use z3_shim::config::{self, Config, LibraryConfig};

pub fn cli() -> Command {
    Command::new("z3_shim")
        .about("Evaluates SMT-LIB2 scripts with a dynamically loaded Z3 library")
        .version(env!("CARGO_PKG_VERSION"))

        .arg(Arg::new("paths")
            .required(false)
            .trailing_var_arg(true)
            .num_args(0..)
            .value_parser(value_parser!(PathBuf))
            .help("The SMT-LIB2 files to evaluate, each on a fresh context."))

        .arg(Arg::new("lib")
            .long("lib")
            .value_parser(value_parser!(PathBuf))
            .required(false)
            .num_args(1)
            .help(format!("The native library, or a directory containing the library.
Default: the value of {}, if set, and otherwise the fixed discovery order.", config::LIBRARY_PATH_VAR)))

        .arg(Arg::new("param")
            .short('p')
            .long("param")
            .value_parser(parse_key_value)
            .required(false)
            .num_args(1)
            .action(ArgAction::Append)
            .help("A context parameter, as key=value."))

        .arg(Arg::new("global")
            .short('g')
            .long("global")
            .value_parser(parse_key_value)
            .required(false)
            .num_args(1)
            .action(ArgAction::Append)
            .help("A global parameter, as key=value, set before any context is created."))

        .arg(Arg::new("timeout")
            .short('t')
            .long("timeout")
            .value_parser(value_parser!(u32))
            .required(false)
            .num_args(1)
            .help("A timeout for each solver check, in milliseconds."))

        .arg(Arg::new("native_version")
            .long("native-version")
            .action(ArgAction::SetTrue)
            .help("Display the full version of the native library."))
}

fn parse_key_value(arg: &str) -> Result<(String, String), String> {
    config::parse_param(arg).ok_or_else(|| format!("expected key=value, found '{arg}'"))
}

pub fn config_from_args(args: &ArgMatches) -> Config {
    let mut the_config = Config::default();

    if let Ok(Some(path)) = args.try_get_one::<PathBuf>("lib") {
        the_config.library = LibraryConfig::with_path(path)
    };

    if let Ok(Some(ms)) = args.try_get_one::<u32>("timeout") {
        the_config.timeout.set(*ms);
    };

    if let Ok(Some(params)) = args.try_get_many::<(String, String)>("param") {
        the_config.params.extend(params.cloned())
    };

    the_config
}

pub fn globals_from_args(args: &ArgMatches) -> Vec<(String, String)> {
    match args.try_get_many::<(String, String)>("global") {
        Ok(Some(globals)) => globals.cloned().collect(),
        _ => Vec::default(),
    }
}

pub fn paths_from_args(args: &ArgMatches) -> Vec<PathBuf> {
    match args.try_get_many::<PathBuf>("paths") {
        Ok(Some(paths)) => paths.cloned().collect(),
        _ => Vec::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_and_globals() {
        let matches = cli()
            .try_get_matches_from([
                "z3_shim",
                "--lib",
                "/opt/z3/lib",
                "-p",
                "auto_config=false",
                "--param",
                "well_sorted_check = true",
                "-g",
                "verbose=1",
                "--timeout",
                "250",
                "a.smt2",
                "b.smt2",
            ])
            .unwrap();

        let config = config_from_args(&matches);
        assert_eq!(config.library.path, Some(PathBuf::from("/opt/z3/lib")));
        assert!(!config.library.system_fallback);
        assert_eq!(config.timeout.value, 250);
        assert_eq!(
            config.params,
            vec![
                ("auto_config".to_string(), "false".to_string()),
                ("well_sorted_check".to_string(), "true".to_string()),
            ]
        );

        assert_eq!(
            globals_from_args(&matches),
            vec![("verbose".to_string(), "1".to_string())]
        );
        assert_eq!(paths_from_args(&matches).len(), 2);
    }

    #[test]
    fn malformed_param() {
        assert!(cli()
            .try_get_matches_from(["z3_shim", "--param", "no_equals"])
            .is_err());
    }
}
