use std::path::Path;

use z3_shim::{
    context::Context,
    library::{self},
    types::err::{self, ErrorKind},
};

mod parse;

/// Exit status on a failure recorded by the native library.
const EXIT_NATIVE: i32 = 2;

/// Exit status on a failure to load the library, or a failure of use.
const EXIT_USAGE: i32 = 1;

fn main() {
    #[cfg(feature = "log")]
    env_logger::init();

    let matches = parse::cli().get_matches();

    let config = parse::config_from_args(&matches);

    let library = match library::init(&config.library) {
        Ok(library) => library,
        Err(e) => {
            println!("c Load error: {e}");
            if let ErrorKind::Load(err::LoadError::NotFound { attempts }) = &e {
                for attempt in attempts {
                    println!("c   {attempt}");
                }
            }
            std::process::exit(EXIT_USAGE);
        }
    };

    if matches.get_flag("native_version") {
        println!("{}", library.get_full_version());
    }

    for (key, value) in parse::globals_from_args(&matches) {
        if let Err(e) = library.global_param_set(&key, &value) {
            exit_with(e);
        }
    }

    for path in parse::paths_from_args(&matches) {
        let the_context = match Context::with_library(library.clone(), &config) {
            Ok(context) => context,
            Err(e) => exit_with(e),
        };

        match evaluate(&the_context, &path) {
            Ok(output) => print!("{output}"),
            Err(e) => exit_with(e),
        }
    }
}

fn evaluate(context: &Context, path: &Path) -> Result<String, ErrorKind> {
    let script = match std::fs::read_to_string(path) {
        Ok(script) => script,
        Err(e) => {
            println!("c Error reading {}: {e}", path.display());
            std::process::exit(EXIT_USAGE);
        }
    };

    context.eval_smtlib2_string(&script)
}

fn exit_with(e: ErrorKind) -> ! {
    println!("c Error: {e}");
    match e {
        ErrorKind::Native(_) | ErrorKind::NullContext | ErrorKind::NullConfig => {
            std::process::exit(EXIT_NATIVE)
        }
        ErrorKind::Load(_) | ErrorKind::Usage(_) => std::process::exit(EXIT_USAGE),
    }
}
