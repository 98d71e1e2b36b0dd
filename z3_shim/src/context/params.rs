use std::ffi::{c_double, c_uint};

use crate::{
    handles::{Params, Symbol},
    types::err::ErrorKind,
};

use super::Context;

/// A value of a parameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ParamValue {
    Bool(bool),
    Uint(c_uint),
    Double(c_double),
    Symbol(Symbol),
}

impl Context {
    nullary_ops! {
        /// An empty parameter set, with a reference count of zero.
        mk_params -> Params;
    }

    to_string_ops! {
        params_to_string(Params);
    }

    pub fn params_set_bool(&self, p: Params, k: Symbol, v: bool) -> Result<(), ErrorKind> {
        let p = self.adopt("params_set_bool", p)?;
        let k = self.adopt("params_set_bool", k)?;
        self.checked("params_set_bool", |f, c| unsafe { (f.params_set_bool)(c, p, k, v) })
    }

    pub fn params_set_uint(&self, p: Params, k: Symbol, v: c_uint) -> Result<(), ErrorKind> {
        let p = self.adopt("params_set_uint", p)?;
        let k = self.adopt("params_set_uint", k)?;
        self.checked("params_set_uint", |f, c| unsafe { (f.params_set_uint)(c, p, k, v) })
    }

    pub fn params_set_double(&self, p: Params, k: Symbol, v: c_double) -> Result<(), ErrorKind> {
        let p = self.adopt("params_set_double", p)?;
        let k = self.adopt("params_set_double", k)?;
        self.checked("params_set_double", |f, c| unsafe { (f.params_set_double)(c, p, k, v) })
    }

    pub fn params_set_symbol(&self, p: Params, k: Symbol, v: Symbol) -> Result<(), ErrorKind> {
        let p = self.adopt("params_set_symbol", p)?;
        let k = self.adopt("params_set_symbol", k)?;
        let v = self.adopt("params_set_symbol", v)?;
        self.checked("params_set_symbol", |f, c| unsafe { (f.params_set_symbol)(c, p, k, v) })
    }

    /// Sets the parameter `k` of `p` to `v`, with the setter for the type of `v`.
    pub fn params_set(&self, p: Params, k: Symbol, v: ParamValue) -> Result<(), ErrorKind> {
        match v {
            ParamValue::Bool(v) => self.params_set_bool(p, k, v),
            ParamValue::Uint(v) => self.params_set_uint(p, k, v),
            ParamValue::Double(v) => self.params_set_double(p, k, v),
            ParamValue::Symbol(v) => self.params_set_symbol(p, k, v),
        }
    }
}
