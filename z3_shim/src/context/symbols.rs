use std::ffi::{c_int, c_uint};

use crate::{handles::Symbol, text, types::err::ErrorKind};

use super::Context;

/// The content of a symbol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SymbolKind {
    Int(i32),
    String(String),
}

impl std::fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SymbolKind::Int(i) => write!(f, "k!{i}"),
            SymbolKind::String(s) => write!(f, "{s}"),
        }
    }
}

impl Context {
    pub fn mk_int_symbol(&self, i: c_int) -> Result<Symbol, ErrorKind> {
        let raw = self.checked("mk_int_symbol", |f, c| unsafe { (f.mk_int_symbol)(c, i) })?;
        Ok(self.wrap(raw))
    }

    pub fn mk_string_symbol(&self, s: &str) -> Result<Symbol, ErrorKind> {
        let s = text::to_native("mk_string_symbol", s)?;
        let raw = self.checked("mk_string_symbol", |f, c| unsafe {
            (f.mk_string_symbol)(c, s.as_ptr())
        })?;
        Ok(self.wrap(raw))
    }

    /// The kind of `s`, as the native value: 0 for an int symbol, 1 for a string symbol.
    pub fn get_symbol_kind(&self, s: Symbol) -> Result<c_uint, ErrorKind> {
        let s = self.adopt("get_symbol_kind", s)?;
        self.checked("get_symbol_kind", |f, c| unsafe { (f.get_symbol_kind)(c, s) })
    }

    pub fn get_symbol_int(&self, s: Symbol) -> Result<c_int, ErrorKind> {
        let s = self.adopt("get_symbol_int", s)?;
        self.checked("get_symbol_int", |f, c| unsafe { (f.get_symbol_int)(c, s) })
    }

    /// The content of `s`, read with whichever accessor matches the kind of `s`.
    pub fn get_symbol(&self, s: Symbol) -> Result<SymbolKind, ErrorKind> {
        match self.get_symbol_kind(s)? {
            0 => Ok(SymbolKind::Int(self.get_symbol_int(s)?)),
            _ => Ok(SymbolKind::String(self.get_symbol_string(s)?)),
        }
    }

    pub fn get_symbol_string(&self, s: Symbol) -> Result<String, ErrorKind> {
        let raw = self.adopt("get_symbol_string", s)?;
        self.checked_then(
            "get_symbol_string",
            |f, c| unsafe { (f.get_symbol_string)(c, raw) },
            |text| unsafe { text::from_native(text) },
        )
    }
}
