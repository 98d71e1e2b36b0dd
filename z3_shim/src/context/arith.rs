use std::ffi::{c_int, c_uint};

use crate::{
    handles::{Ast, Sort},
    text,
    types::err::ErrorKind,
};

use super::Context;

impl Context {
    nary_ast_ops! {
        mk_add;
        mk_mul;
        mk_sub;
    }

    unary_ast_ops! {
        mk_unary_minus;
        mk_bvnot;
    }

    binary_ast_ops! {
        mk_lt;
        mk_le;
        mk_gt;
        mk_ge;

        mk_bvand;
        mk_bvor;
        mk_bvxor;
        mk_bvadd;
        mk_bvsub;
        mk_bvmul;
        /// Unsigned less than.
        mk_bvult;
        /// Unsigned less than or equal.
        mk_bvule;
        /// Signed less than.
        mk_bvslt;
        mk_concat;

        /// The element of array `t1` at index `t2`.
        mk_select;
    }

    to_string_ops! {
        /// The decimal (or rational) rendering of a numeral.
        get_numeral_string(Ast);
    }

    /// Bits `high` down to `low` of `t1`.
    pub fn mk_extract(&self, high: c_uint, low: c_uint, t1: Ast) -> Result<Ast, ErrorKind> {
        let t1 = self.adopt("mk_extract", t1)?;
        let raw = self.checked("mk_extract", |f, c| unsafe { (f.mk_extract)(c, high, low, t1) })?;
        Ok(self.wrap(raw))
    }

    pub fn mk_zero_ext(&self, i: c_uint, t1: Ast) -> Result<Ast, ErrorKind> {
        let t1 = self.adopt("mk_zero_ext", t1)?;
        let raw = self.checked("mk_zero_ext", |f, c| unsafe { (f.mk_zero_ext)(c, i, t1) })?;
        Ok(self.wrap(raw))
    }

    pub fn mk_sign_ext(&self, i: c_uint, t1: Ast) -> Result<Ast, ErrorKind> {
        let t1 = self.adopt("mk_sign_ext", t1)?;
        let raw = self.checked("mk_sign_ext", |f, c| unsafe { (f.mk_sign_ext)(c, i, t1) })?;
        Ok(self.wrap(raw))
    }

    /// Array `a` with the element at index `i` replaced by `v`.
    pub fn mk_store(&self, a: Ast, i: Ast, v: Ast) -> Result<Ast, ErrorKind> {
        let a = self.adopt("mk_store", a)?;
        let i = self.adopt("mk_store", i)?;
        let v = self.adopt("mk_store", v)?;
        let raw = self.checked("mk_store", |f, c| unsafe { (f.mk_store)(c, a, i, v) })?;
        Ok(self.wrap(raw))
    }

    /// The array over `domain` which is `v` at every index.
    pub fn mk_const_array(&self, domain: Sort, v: Ast) -> Result<Ast, ErrorKind> {
        let domain = self.adopt("mk_const_array", domain)?;
        let v = self.adopt("mk_const_array", v)?;
        let raw = self.checked("mk_const_array", |f, c| unsafe {
            (f.mk_const_array)(c, domain, v)
        })?;
        Ok(self.wrap(raw))
    }

    /// A numeral of sort `ty` from its decimal (or rational) rendering.
    pub fn mk_numeral(&self, numeral: &str, ty: Sort) -> Result<Ast, ErrorKind> {
        let numeral = text::to_native("mk_numeral", numeral)?;
        let ty = self.adopt("mk_numeral", ty)?;
        let raw = self.checked("mk_numeral", |f, c| unsafe {
            (f.mk_numeral)(c, numeral.as_ptr(), ty)
        })?;
        Ok(self.wrap(raw))
    }

    pub fn mk_int(&self, v: c_int, ty: Sort) -> Result<Ast, ErrorKind> {
        let ty = self.adopt("mk_int", ty)?;
        let raw = self.checked("mk_int", |f, c| unsafe { (f.mk_int)(c, v, ty) })?;
        Ok(self.wrap(raw))
    }

    pub fn mk_int64(&self, v: i64, ty: Sort) -> Result<Ast, ErrorKind> {
        let ty = self.adopt("mk_int64", ty)?;
        let raw = self.checked("mk_int64", |f, c| unsafe { (f.mk_int64)(c, v, ty) })?;
        Ok(self.wrap(raw))
    }

    pub fn mk_unsigned_int64(&self, v: u64, ty: Sort) -> Result<Ast, ErrorKind> {
        let ty = self.adopt("mk_unsigned_int64", ty)?;
        let raw = self.checked("mk_unsigned_int64", |f, c| unsafe {
            (f.mk_unsigned_int64)(c, v, ty)
        })?;
        Ok(self.wrap(raw))
    }

    /// The value of a numeral, if the value fits.
    pub fn get_numeral_int64(&self, v: Ast) -> Result<Option<i64>, ErrorKind> {
        let v = self.adopt("get_numeral_int64", v)?;
        let mut value = 0_i64;
        let fits = self.checked("get_numeral_int64", |f, c| unsafe {
            (f.get_numeral_int64)(c, v, &mut value)
        })?;
        Ok(fits.then_some(value))
    }

    /// The value of a numeral, if the value fits.
    pub fn get_numeral_uint64(&self, v: Ast) -> Result<Option<u64>, ErrorKind> {
        let v = self.adopt("get_numeral_uint64", v)?;
        let mut value = 0_u64;
        let fits = self.checked("get_numeral_uint64", |f, c| unsafe {
            (f.get_numeral_uint64)(c, v, &mut value)
        })?;
        Ok(fits.then_some(value))
    }
}
