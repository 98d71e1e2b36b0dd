//! A call adapter for a dynamically loaded Z3 library, which turns the per-context error register of the library into [Result] values.
//!
//! The Z3 C API does not report failure through return values.
//! Instead, a failing call records a code in the error register of its context, returns some unspecified value, and leaves the register as is until the next call which records a result.
//! z3_shim makes the read of the register part of every call, so a failure is always returned from the call which caused it, and never from some later call or another context.
//!
//! # Orientation
//!
//! - The [library] module loads the native library, once per process, following a fixed discovery order.
//! - A [context](crate::context) owns a native context, and every checked native call is made through [Context::checked](crate::context::Context::checked).
//!   Each native operation has a wrapper method on [Context](crate::context::Context) of the same name, without the `Z3_` prefix.
//! - [Handles](crate::handles) to native objects carry the context they came from, and are refused by any other context.
//! - The native interface itself, and the split of entry points into checked and silent calls, is in [sys].
//!
//! # Examples
//!
//! + Check an assertion, with failures as values.
//!
//! ```rust,no_run
//! # use z3_shim::config::Config;
//! # use z3_shim::context::Context;
//! # use z3_shim::types::{err::ErrorCode, Lbool};
//! let context = Context::from_config(&Config::default()).unwrap();
//!
//! let bv8 = context.mk_bv_sort(8).unwrap();
//! let x = context.mk_const(context.mk_string_symbol("x").unwrap(), bv8).unwrap();
//! let one = context.mk_int(1, bv8).unwrap();
//!
//! let solver = context.mk_solver().unwrap();
//! context.solver_assert(solver, context.mk_bvult(x, one).unwrap()).unwrap();
//! assert_eq!(context.solver_check(solver), Ok(Lbool::True));
//!
//! // A zero width sort is refused, and the context remains usable.
//! let failure = context.mk_bv_sort(0).unwrap_err();
//! assert_eq!(failure.code(), Some(ErrorCode::InvalidArg));
//! assert!(context.mk_bool_sort().is_ok());
//! ```
//!
//! + Load the library from a specific path, before any context is created.
//!
//! ```rust,no_run
//! # use z3_shim::config::LibraryConfig;
//! let library = z3_shim::library::init(&LibraryConfig::with_path("/opt/z3/lib")).unwrap();
//! println!("{}", library.get_full_version());
//! ```
//!
//! # Logging
//!
//! Calls to the [log] macros are made throughout, with targets listed in [misc::log::targets].
//! No log implementation is installed by the library.

pub mod config;
pub mod context;
pub mod handles;
pub mod library;
pub mod misc;
pub mod sys;
pub mod text;
pub mod types;

pub use library::{init, library};
