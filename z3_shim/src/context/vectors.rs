use std::ffi::{c_double, c_uint};

use crate::{
    handles::{Ast, AstVector, Stats},
    text,
    types::err::ErrorKind,
};

use super::Context;

/// A value of a statistic.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StatValue {
    Uint(c_uint),
    Double(c_double),
}

impl std::fmt::Display for StatValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatValue::Uint(v) => write!(f, "{v}"),
            StatValue::Double(v) => write!(f, "{v:.2}"),
        }
    }
}

impl Context {
    nullary_ops! {
        /// An empty vector, with a reference count of zero.
        mk_ast_vector -> AstVector;
    }

    to_string_ops! {
        ast_vector_to_string(AstVector);
        stats_to_string(Stats);
    }

    pub fn ast_vector_size(&self, v: AstVector) -> Result<c_uint, ErrorKind> {
        let v = self.adopt("ast_vector_size", v)?;
        self.checked("ast_vector_size", |f, c| unsafe { (f.ast_vector_size)(c, v) })
    }

    /// The element at index `i`, which is refused by the native library if out of bounds.
    pub fn ast_vector_get(&self, v: AstVector, i: c_uint) -> Result<Ast, ErrorKind> {
        let v = self.adopt("ast_vector_get", v)?;
        let raw = self.checked("ast_vector_get", |f, c| unsafe { (f.ast_vector_get)(c, v, i) })?;
        Ok(self.wrap(raw))
    }

    pub fn ast_vector_push(&self, v: AstVector, a: Ast) -> Result<(), ErrorKind> {
        let v = self.adopt("ast_vector_push", v)?;
        let a = self.adopt("ast_vector_push", a)?;
        self.checked("ast_vector_push", |f, c| unsafe { (f.ast_vector_push)(c, v, a) })
    }

    /// Every element of `v`, in order.
    pub fn ast_vector_elements(&self, v: AstVector) -> Result<Vec<Ast>, ErrorKind> {
        (0..self.ast_vector_size(v)?)
            .map(|i| self.ast_vector_get(v, i))
            .collect()
    }

    pub fn stats_size(&self, s: Stats) -> Result<c_uint, ErrorKind> {
        let s = self.adopt("stats_size", s)?;
        self.checked("stats_size", |f, c| unsafe { (f.stats_size)(c, s) })
    }

    pub fn stats_get_key(&self, s: Stats, idx: c_uint) -> Result<String, ErrorKind> {
        let s = self.adopt("stats_get_key", s)?;
        self.checked_then(
            "stats_get_key",
            |f, c| unsafe { (f.stats_get_key)(c, s, idx) },
            |key| unsafe { text::from_native(key) },
        )
    }

    pub fn stats_is_uint(&self, s: Stats, idx: c_uint) -> Result<bool, ErrorKind> {
        let s = self.adopt("stats_is_uint", s)?;
        self.checked("stats_is_uint", |f, c| unsafe { (f.stats_is_uint)(c, s, idx) })
    }

    pub fn stats_get_uint_value(&self, s: Stats, idx: c_uint) -> Result<c_uint, ErrorKind> {
        let s = self.adopt("stats_get_uint_value", s)?;
        self.checked("stats_get_uint_value", |f, c| unsafe {
            (f.stats_get_uint_value)(c, s, idx)
        })
    }

    pub fn stats_get_double_value(&self, s: Stats, idx: c_uint) -> Result<c_double, ErrorKind> {
        let s = self.adopt("stats_get_double_value", s)?;
        self.checked("stats_get_double_value", |f, c| unsafe {
            (f.stats_get_double_value)(c, s, idx)
        })
    }

    /// The value at `idx`, read with whichever accessor matches the type of the value.
    pub fn stats_get_value(&self, s: Stats, idx: c_uint) -> Result<StatValue, ErrorKind> {
        match self.stats_is_uint(s, idx)? {
            true => Ok(StatValue::Uint(self.stats_get_uint_value(s, idx)?)),
            false => Ok(StatValue::Double(self.stats_get_double_value(s, idx)?)),
        }
    }

    /// Every (key, value) pair of `s`, in order.
    pub fn stats_entries(&self, s: Stats) -> Result<Vec<(String, StatValue)>, ErrorKind> {
        (0..self.stats_size(s)?)
            .map(|idx| Ok((self.stats_get_key(s, idx)?, self.stats_get_value(s, idx)?)))
            .collect()
    }
}
