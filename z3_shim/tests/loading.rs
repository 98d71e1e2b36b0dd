//! The process cache is global, so the sequence is a single test.

use std::sync::Arc;

use z3_shim::{
    config::{Config, LibraryConfig, LIBRARY_PATH_VAR},
    context::Context,
    library::{self, Origin, Z3Library},
    types::err::{self, ErrorKind},
};

mod common;

const MISSING: &str = "/definitely/not/a/real/directory/libz3.so";

#[test]
fn one_shot_cache() {
    std::env::set_var(LIBRARY_PATH_VAR, MISSING);

    assert!(library::loaded().is_none());
    assert_eq!(
        library::library().unwrap_err(),
        ErrorKind::Usage(err::UsageError::NotInitialised)
    );
    // The environment gives an explicit path, and so the failure is a load failure.
    assert!(matches!(
        Context::from_config(&Config::default()),
        Err(ErrorKind::Load(err::LoadError::NotFound { .. }))
    ));

    match library::init(&LibraryConfig::with_path(MISSING)) {
        Err(ErrorKind::Load(err::LoadError::NotFound { attempts })) => {
            assert_eq!(attempts.len(), 1);
            assert_eq!(attempts[0].path.to_str(), Some(MISSING));
        }
        otherwise => panic!("unexpected: {otherwise:?}"),
    }
    assert!(library::loaded().is_none());

    let installed = library::install(Z3Library::from_table(common::table()));
    assert_eq!(installed.origin(), &Origin::Substitute);

    // Once cached, the library is never replaced.
    let again = library::install(Z3Library::from_table(common::table()));
    assert!(Arc::ptr_eq(&installed, &again));

    let requested = library::init(&LibraryConfig::with_path(MISSING)).unwrap();
    assert!(Arc::ptr_eq(&installed, &requested));

    let implicit = library::library().unwrap();
    assert!(Arc::ptr_eq(&installed, &implicit));

    let context = Context::from_config(&Config::default()).unwrap();
    assert!(Arc::ptr_eq(context.library(), &installed));
    assert!(context.mk_bool_sort().is_ok());
}

#[test]
fn open_reports_the_path() {
    let result = Z3Library::open(MISSING);
    assert!(matches!(result, Err(err::LoadError::Open { .. })));
}
