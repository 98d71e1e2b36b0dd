//! Operations of a library which are never followed by a register read.
//!
//! These either cannot fail, fail through their return value, or act before any context exists.
//! Each is made while holding the global lock of the library, as most act on process-global native state.

use std::ffi::c_uint;

use crate::{
    misc::log::targets::{self},
    sys::{self},
    text,
    types::err::ErrorKind,
};

use super::Z3Library;

/// The version of a native library.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub build: u32,
    pub revision: u32,
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}.{}", self.major, self.minor, self.build, self.revision)
    }
}

/// A native configuration, from which a context is created.
///
/// The configuration is deleted on drop, and may be dropped as soon as the context has been created.
pub struct NativeConfig<'l> {
    raw: sys::Z3_config,
    library: &'l Z3Library,
}

impl NativeConfig<'_> {
    /// Sets a configuration parameter.
    ///
    /// The native library does not report an unknown parameter here, or on context creation, beyond a warning on stderr.
    /// A parameter which must be validated should instead be set on the live context, with [update_param_value](crate::context::Context::update_param_value).
    pub fn set_param_value(&mut self, id: &str, value: &str) -> Result<(), ErrorKind> {
        let id = text::to_native("set_param_value", id)?;
        let value = text::to_native("set_param_value", value)?;
        let raw = self.raw;
        self.library.silent("set_param_value", |table| unsafe {
            (table.set_param_value)(raw, id.as_ptr(), value.as_ptr())
        });
        Ok(())
    }

    pub(crate) fn as_raw(&self) -> sys::Z3_config {
        self.raw
    }

    /// The library the configuration was made by.
    pub(crate) fn library(&self) -> &Z3Library {
        self.library
    }
}

impl Drop for NativeConfig<'_> {
    fn drop(&mut self) {
        let raw = self.raw;
        self.library
            .silent("del_config", |table| unsafe { (table.del_config)(raw) });
    }
}

impl Z3Library {
    /// A fresh native configuration.
    pub fn mk_config(&self) -> Result<NativeConfig<'_>, ErrorKind> {
        let raw = self.silent("mk_config", |table| unsafe { (table.mk_config)() });
        match raw.is_null() {
            true => Err(ErrorKind::NullConfig),
            false => Ok(NativeConfig { raw, library: self }),
        }
    }

    /// Sets a global parameter, which applies to contexts created afterwards.
    pub fn global_param_set(&self, id: &str, value: &str) -> Result<(), ErrorKind> {
        let id = text::to_native("global_param_set", id)?;
        let value = text::to_native("global_param_set", value)?;
        self.silent("global_param_set", |table| unsafe {
            (table.global_param_set)(id.as_ptr(), value.as_ptr())
        });
        log::debug!(target: targets::ADAPTER, "Global parameter {id:?} set to {value:?}");
        Ok(())
    }

    /// The value of a global parameter, if the parameter is known.
    pub fn global_param_get(&self, id: &str) -> Result<Option<String>, ErrorKind> {
        let id = text::to_native("global_param_get", id)?;
        // The value is held by a global buffer, and so is decoded before the lock is released.
        let value = self.silent("global_param_get", |table| unsafe {
            let mut value: sys::Z3_string = std::ptr::null();
            match (table.global_param_get)(id.as_ptr(), &mut value) {
                true => Some(text::from_native(value)),
                false => None,
            }
        });
        Ok(value)
    }

    /// Restores every global parameter to its default.
    pub fn global_param_reset_all(&self) {
        self.silent("global_param_reset_all", |table| unsafe {
            (table.global_param_reset_all)()
        })
    }

    /// Opens an interaction log, returning whether the log was opened.
    pub fn open_log(&self, filename: &str) -> Result<bool, ErrorKind> {
        let filename = text::to_native("open_log", filename)?;
        Ok(self.silent("open_log", |table| unsafe {
            (table.open_log)(filename.as_ptr())
        }))
    }

    /// Appends a line to the interaction log, if open.
    pub fn append_log(&self, line: &str) -> Result<(), ErrorKind> {
        let line = text::to_native("append_log", line)?;
        self.silent("append_log", |table| unsafe { (table.append_log)(line.as_ptr()) });
        Ok(())
    }

    pub fn close_log(&self) {
        self.silent("close_log", |table| unsafe { (table.close_log)() })
    }

    /// Enables or disables the warning messages the native library writes to standard error.
    pub fn toggle_warning_messages(&self, enabled: bool) {
        self.silent("toggle_warning_messages", |table| unsafe {
            (table.toggle_warning_messages)(enabled)
        })
    }

    pub fn get_version(&self) -> Version {
        let (mut major, mut minor, mut build, mut revision): (c_uint, c_uint, c_uint, c_uint) =
            (0, 0, 0, 0);
        self.silent("get_version", |table| unsafe {
            (table.get_version)(&mut major, &mut minor, &mut build, &mut revision)
        });
        Version {
            major,
            minor,
            build,
            revision,
        }
    }

    /// The version, with any further build information the library provides.
    pub fn get_full_version(&self) -> String {
        self.silent("get_full_version", |table| unsafe {
            text::from_native((table.get_full_version)())
        })
    }

    /// Enables a native trace tag, in debug builds of the library.
    pub fn enable_trace(&self, tag: &str) -> Result<(), ErrorKind> {
        let tag = text::to_native("enable_trace", tag)?;
        self.silent("enable_trace", |table| unsafe { (table.enable_trace)(tag.as_ptr()) });
        Ok(())
    }

    pub fn disable_trace(&self, tag: &str) -> Result<(), ErrorKind> {
        let tag = text::to_native("disable_trace", tag)?;
        self.silent("disable_trace", |table| unsafe { (table.disable_trace)(tag.as_ptr()) });
        Ok(())
    }

    /// Releases memory held by the native library between uses.
    ///
    /// # Safety
    /// No context created from the library may be alive.
    pub unsafe fn reset_memory(&self) {
        log::info!(target: targets::LOADER, "Resetting native memory");
        self.silent("reset_memory", |table| unsafe { (table.reset_memory)() })
    }

    /// Releases all memory held by the native library.
    ///
    /// # Safety
    /// No context created from the library may be alive, and none may be created afterwards.
    pub unsafe fn finalize_memory(&self) {
        log::info!(target: targets::LOADER, "Finalising native memory");
        self.silent("finalize_memory", |table| unsafe { (table.finalize_memory)() })
    }
}
