use std::ffi::c_uint;

use crate::{
    handles::{Ast, FuncDecl, Handle, Model},
    types::err::ErrorKind,
};

use super::Context;

impl Context {
    to_string_ops! {
        model_to_string(Model);
    }

    /// The value of `t` in `m`.
    ///
    /// With `model_completion`, constants without an interpretation are given some value of their sort, which is then part of the model.
    /// Returns none if `t` could not be evaluated.
    pub fn model_eval(&self, m: Model, t: Ast, model_completion: bool) -> Result<Option<Ast>, ErrorKind> {
        let m = self.adopt("model_eval", m)?;
        let t = self.adopt("model_eval", t)?;
        let mut value = std::ptr::null_mut();
        let evaluated = self.checked("model_eval", |f, c| unsafe {
            (f.model_eval)(c, m, t, model_completion, &mut value)
        })?;
        Ok(evaluated.then(|| self.wrap(value)))
    }

    /// The interpretation of the constant `a` in `m`, if any.
    pub fn model_get_const_interp(&self, m: Model, a: FuncDecl) -> Result<Option<Ast>, ErrorKind> {
        let m = self.adopt("model_get_const_interp", m)?;
        let a = self.adopt("model_get_const_interp", a)?;
        let raw = self.checked("model_get_const_interp", |f, c| unsafe {
            (f.model_get_const_interp)(c, m, a)
        })?;
        let interp: Ast = self.wrap(raw);
        Ok((!interp.is_null()).then_some(interp))
    }

    pub fn model_has_interp(&self, m: Model, a: FuncDecl) -> Result<bool, ErrorKind> {
        let m = self.adopt("model_has_interp", m)?;
        let a = self.adopt("model_has_interp", a)?;
        self.checked("model_has_interp", |f, c| unsafe { (f.model_has_interp)(c, m, a) })
    }

    pub fn model_get_num_consts(&self, m: Model) -> Result<c_uint, ErrorKind> {
        let m = self.adopt("model_get_num_consts", m)?;
        self.checked("model_get_num_consts", |f, c| unsafe { (f.model_get_num_consts)(c, m) })
    }

    /// The `i`th constant with an interpretation in `m`.
    ///
    /// An index past [model_get_num_consts](Context::model_get_num_consts) is refused by the native library.
    pub fn model_get_const_decl(&self, m: Model, i: c_uint) -> Result<FuncDecl, ErrorKind> {
        let m = self.adopt("model_get_const_decl", m)?;
        let raw = self.checked("model_get_const_decl", |f, c| unsafe {
            (f.model_get_const_decl)(c, m, i)
        })?;
        Ok(self.wrap(raw))
    }
}
