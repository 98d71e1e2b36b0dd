/*!
A logical context, and the adapter through which every checked native call is made.

# The adapter

The native library records the failure of a call in the error register of the context the call was made on, and reports nothing further.
The register is only cleared by the next call on the context which records a result, so a failure is easily lost or misattributed.

Every checked call is made through [Context::checked] (or [Context::checked_then]), which:
1. Takes the lock of the context.
2. Makes the call.
3. Reads the register, and if the code is not OK, reads the message for the code.
4. Releases the lock.

So, the register read is always the register of the same context, read immediately after the call, with no other call on the context in between.
And, a call whose register holds a failure never returns a value, only a [NativeError](err::NativeError).

Contexts are independent: a failure on one context is never observed on another, and calls on distinct contexts do not wait on each other.

# Creation

When a context is created the default error handler of the native library (which terminates the process) is replaced with a handler which does nothing.
The failure then remains in the register, to be read by the adapter.

# Handles

Each handle returned by a context carries the [ContextId] of the context.
A handle given to a context other than its origin is refused with [UsageError::ForeignHandle](err::UsageError::ForeignHandle), without any native call.

# Deletion

A context is deleted when dropped, or by [Context::close].
Either consumes the context, and so no call can be made on a deleted context.
*/

use std::{
    cmp::Ordering,
    ffi::c_uint,
    sync::{
        atomic::{self, AtomicU64},
        Arc, Mutex, MutexGuard, PoisonError,
    },
};

use crate::{
    config::Config,
    handles::Handle,
    library::{self, NativeConfig, Z3Library},
    misc::log::targets::{self},
    sys::{self, CheckedTable},
    text,
    types::err::{self, ErrorCode, ErrorKind},
};

#[macro_use]
mod families;

mod arith;
mod ast;
mod models;
mod params;
mod solvers;
mod sorts;
mod symbols;
mod tactics;
mod vectors;

pub use ast::{AstKind, PrintMode};
pub use params::ParamValue;
pub use sorts::SortKind;
pub use symbols::SymbolKind;
pub use vectors::StatValue;

static NEXT_CONTEXT_ID: AtomicU64 = AtomicU64::new(1);

/// An identifier of a context, unique within the process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContextId(u64);

impl ContextId {
    fn fresh() -> Self {
        ContextId(NEXT_CONTEXT_ID.fetch_add(1, atomic::Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ContextId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A logical context of the native library.
pub struct Context {
    raw: sys::Z3_context,

    id: ContextId,

    library: Arc<Z3Library>,

    /// Held for the duration of a call and the read of the register which follows.
    lock: Mutex<()>,
}

// Safety: Every call on the raw context, other than interrupt, is made while holding the lock of the context.
unsafe impl Send for Context {}
unsafe impl Sync for Context {}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context").field("id", &self.id).finish()
    }
}

/// Installed on each context, so the default handler is never called.
unsafe extern "C" fn record_only(_context: sys::Z3_context, code: sys::Z3_error_code) {
    log::trace!(target: targets::ADAPTER, "Native error {code} recorded");
}

impl Context {
    /// A context from `config`, using the cached library.
    ///
    /// If the library config of `config` has a path, the library is loaded from the path if no library is cached.
    pub fn from_config(config: &Config) -> Result<Self, ErrorKind> {
        let library = match config.library.path {
            Some(_) => library::init(&config.library)?,
            None => library::library()?,
        };
        Context::with_library(library, config)
    }

    /// A context from `config`, using `library`.
    ///
    /// The dedicated options of `config` are set on the native configuration.
    /// The free-form [params](Config::params) are then applied to the live context, in order, so an unknown or malformed parameter is an error here.
    pub fn with_library(library: Arc<Z3Library>, config: &Config) -> Result<Self, ErrorKind> {
        let context = {
            let mut native_config = library.mk_config()?;
            for (key, value) in config.option_params() {
                native_config.set_param_value(&key, &value)?;
            }
            Context::from_native_config(library.clone(), &native_config)?
        };

        for (key, value) in &config.params {
            context.update_param_value(key, value)?;
        }

        Ok(context)
    }

    /// A context from a native config, which may be dropped once the context has been created.
    pub fn from_native_config(
        library: Arc<Z3Library>,
        config: &NativeConfig<'_>,
    ) -> Result<Self, ErrorKind> {
        if !std::ptr::eq(config.library(), &*library) {
            return Err(err::UsageError::ForeignLibrary {
                operation: "mk_context_rc",
            }
            .into());
        }

        let raw = library.silent("mk_context_rc", |table| unsafe {
            (table.mk_context_rc)(config.as_raw())
        });

        if raw.is_null() {
            log::error!(target: targets::CONTEXT, "Context creation returned null");
            return Err(ErrorKind::NullContext);
        }

        unsafe { (library.table().register.set_error_handler)(raw, Some(record_only)) };

        let id = ContextId::fresh();
        log::info!(target: targets::CONTEXT, "Created context {id}");

        Ok(Context {
            raw,
            id,
            library,
            lock: Mutex::new(()),
        })
    }

    pub fn id(&self) -> ContextId {
        self.id
    }

    pub fn library(&self) -> &Arc<Z3Library> {
        &self.library
    }

    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Makes a checked call on the context, returning the value of the call only if the register is OK after the call.
    ///
    /// `call` is given the checked table and the raw context, and should make exactly one native call.
    pub fn checked<R>(
        &self,
        operation: &'static str,
        call: impl FnOnce(&CheckedTable, sys::Z3_context) -> R,
    ) -> Result<R, ErrorKind> {
        self.checked_then(operation, call, |value| value)
    }

    /// As [checked](Context::checked), with `then` applied to the value of the call before the lock is released.
    ///
    /// Required when the value is only valid until the next call on the context, e.g. native text.
    pub fn checked_then<R, T>(
        &self,
        operation: &'static str,
        call: impl FnOnce(&CheckedTable, sys::Z3_context) -> R,
        then: impl FnOnce(R) -> T,
    ) -> Result<T, ErrorKind> {
        let _guard = self.guard();
        log::trace!(target: targets::ADAPTER, "{operation} on {}", self.id);

        let value = call(&self.library.table().checked, self.raw);
        self.read_register(operation)?;

        Ok(then(value))
    }

    /// Makes a checked call involving two contexts, and reads the register of `self`.
    ///
    /// Both locks are held for the call, taken in order of [ContextId].
    pub fn checked_pair<R>(
        &self,
        operation: &'static str,
        other: &Context,
        call: impl FnOnce(&CheckedTable, sys::Z3_context, sys::Z3_context) -> R,
    ) -> Result<R, ErrorKind> {
        if !Arc::ptr_eq(&self.library, &other.library) {
            return Err(err::UsageError::ForeignLibrary { operation }.into());
        }

        let _guards = match self.id.cmp(&other.id) {
            Ordering::Equal => (self.guard(), None),
            Ordering::Less => {
                let first = self.guard();
                (first, Some(other.guard()))
            }
            Ordering::Greater => {
                let first = other.guard();
                (first, Some(self.guard()))
            }
        };
        log::trace!(target: targets::ADAPTER, "{operation} on {} and {}", self.id, other.id);

        let value = call(&self.library.table().checked, self.raw, other.raw);
        self.read_register(operation)?;

        Ok(value)
    }

    /// Reads the register, and the message if the register holds a failure.
    ///
    /// The lock of the context must be held.
    fn read_register(&self, operation: &'static str) -> Result<(), ErrorKind> {
        let register = &self.library.table().register;

        match ErrorCode::from(unsafe { (register.get_error_code)(self.raw) }) {
            ErrorCode::Ok => Ok(()),

            code => {
                let message =
                    unsafe { text::from_native((register.get_error_msg)(self.raw, code.as_raw())) };
                log::debug!(target: targets::ADAPTER, "{operation} on {} failed with {code:?}: {message}", self.id);

                Err(err::NativeError {
                    operation,
                    code,
                    message,
                }
                .into())
            }
        }
    }

    /// The current value of the error register.
    pub fn error_code(&self) -> ErrorCode {
        let _guard = self.guard();
        ErrorCode::from(unsafe { (self.library.table().register.get_error_code)(self.raw) })
    }

    /// The message the context gives for `code`.
    pub fn error_message(&self, code: ErrorCode) -> String {
        let _guard = self.guard();
        unsafe {
            text::from_native((self.library.table().register.get_error_msg)(
                self.raw,
                code.as_raw(),
            ))
        }
    }

    /// Interrupts a call running on the context, e.g. a solver check on some other thread.
    ///
    /// The interrupted call completes as usual, and reports the interruption through its own value or the register.
    pub fn interrupt(&self) {
        log::debug!(target: targets::CONTEXT, "Interrupting {}", self.id);
        unsafe { (self.library.table().silent.interrupt)(self.raw) }
    }

    /// Records `code` in the register, as if some call had failed with `code`.
    ///
    /// As this is a checked call, any code other than OK is returned as an error.
    pub fn set_error(&self, code: ErrorCode) -> Result<(), ErrorKind> {
        self.checked("set_error", |f, c| unsafe { (f.set_error)(c, code.as_raw()) })
    }

    /// Updates a parameter of the live context.
    pub fn update_param_value(&self, id: &str, value: &str) -> Result<(), ErrorKind> {
        let id = text::to_native("update_param_value", id)?;
        let value = text::to_native("update_param_value", value)?;
        self.checked("update_param_value", |f, c| unsafe {
            (f.update_param_value)(c, id.as_ptr(), value.as_ptr())
        })
    }

    /// Evaluates an SMT-LIB2 script, returning the output of the script.
    ///
    /// Errors within the script are part of the output, rather than the register.
    pub fn eval_smtlib2_string(&self, script: &str) -> Result<String, ErrorKind> {
        let script = text::to_native("eval_smtlib2_string", script)?;
        self.checked_then(
            "eval_smtlib2_string",
            |f, c| unsafe { (f.eval_smtlib2_string)(c, script.as_ptr()) },
            |output| unsafe { text::from_native(output) },
        )
    }

    /// Deletes the context.
    ///
    /// ```compile_fail
    /// # use z3_shim::{config::Config, context::Context};
    /// let context = Context::from_config(&Config::default()).unwrap();
    /// context.close();
    /// context.mk_bool_sort();
    /// ```
    pub fn close(self) {
        drop(self)
    }

    /// The raw value of `handle`, if `handle` is from this context.
    pub(crate) fn adopt<H: Handle>(&self, operation: &'static str, handle: H) -> Result<H::Raw, ErrorKind> {
        match handle.origin() == self.id {
            true => Ok(handle.raw()),
            false => {
                log::warn!(target: targets::HANDLES, "{operation} on {} given a handle from {}", self.id, handle.origin());
                Err(err::UsageError::ForeignHandle {
                    operation,
                    expected: self.id,
                    found: handle.origin(),
                }
                .into())
            }
        }
    }

    /// As [adopt](Context::adopt), for each handle in `handles`.
    pub(crate) fn adopt_all<H: Handle>(
        &self,
        operation: &'static str,
        handles: &[H],
    ) -> Result<Vec<H::Raw>, ErrorKind> {
        handles
            .iter()
            .map(|handle| self.adopt(operation, *handle))
            .collect()
    }

    /// The length of an argument slice, as the native count type.
    pub(crate) fn count(operation: &'static str, count: usize) -> Result<c_uint, ErrorKind> {
        c_uint::try_from(count)
            .map_err(|_| ErrorKind::from(err::UsageError::ArgumentCount { operation, count }))
    }

    /// A handle of this context.
    pub(crate) fn wrap<H: Handle>(&self, raw: H::Raw) -> H {
        H::from_raw(raw, self.id)
    }
}

impl Drop for Context {
    fn drop(&mut self) {
        let raw = self.raw;
        self.library
            .silent("del_context", |table| unsafe { (table.del_context)(raw) });
        log::info!(target: targets::CONTEXT, "Deleted context {}", self.id);
    }
}
