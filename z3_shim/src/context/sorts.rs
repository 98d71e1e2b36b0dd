use std::ffi::c_uint;

use crate::{
    handles::{Ast, Sort, Symbol},
    types::err::ErrorKind,
};

use super::Context;

/// Kinds of sort, following the native enumeration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortKind {
    Uninterpreted,
    Bool,
    Int,
    Real,
    BitVector,
    Array,
    Datatype,
    Relation,
    FiniteDomain,
    FloatingPoint,
    RoundingMode,
    Seq,
    Re,
    Char,
    TypeVar,
    Unknown(c_uint),
}

impl From<c_uint> for SortKind {
    fn from(raw: c_uint) -> Self {
        match raw {
            0 => SortKind::Uninterpreted,
            1 => SortKind::Bool,
            2 => SortKind::Int,
            3 => SortKind::Real,
            4 => SortKind::BitVector,
            5 => SortKind::Array,
            6 => SortKind::Datatype,
            7 => SortKind::Relation,
            8 => SortKind::FiniteDomain,
            9 => SortKind::FloatingPoint,
            10 => SortKind::RoundingMode,
            11 => SortKind::Seq,
            12 => SortKind::Re,
            13 => SortKind::Char,
            14 => SortKind::TypeVar,
            _ => SortKind::Unknown(raw),
        }
    }
}

impl Context {
    nullary_ops! {
        mk_bool_sort -> Sort;
        mk_int_sort -> Sort;
        mk_real_sort -> Sort;
    }

    to_string_ops! {
        sort_to_string(Sort);
    }

    /// An uninterpreted sort named `s`.
    pub fn mk_uninterpreted_sort(&self, s: Symbol) -> Result<Sort, ErrorKind> {
        let s = self.adopt("mk_uninterpreted_sort", s)?;
        let raw = self.checked("mk_uninterpreted_sort", |f, c| unsafe {
            (f.mk_uninterpreted_sort)(c, s)
        })?;
        Ok(self.wrap(raw))
    }

    /// A bit-vector sort of `sz` bits.
    ///
    /// A size of zero is refused by the native library with [InvalidArg](crate::types::err::ErrorCode::InvalidArg).
    pub fn mk_bv_sort(&self, sz: c_uint) -> Result<Sort, ErrorKind> {
        let raw = self.checked("mk_bv_sort", |f, c| unsafe { (f.mk_bv_sort)(c, sz) })?;
        Ok(self.wrap(raw))
    }

    pub fn mk_array_sort(&self, domain: Sort, range: Sort) -> Result<Sort, ErrorKind> {
        let domain = self.adopt("mk_array_sort", domain)?;
        let range = self.adopt("mk_array_sort", range)?;
        let raw = self.checked("mk_array_sort", |f, c| unsafe {
            (f.mk_array_sort)(c, domain, range)
        })?;
        Ok(self.wrap(raw))
    }

    /// The sort of `a`.
    pub fn get_sort(&self, a: Ast) -> Result<Sort, ErrorKind> {
        let a = self.adopt("get_sort", a)?;
        let raw = self.checked("get_sort", |f, c| unsafe { (f.get_sort)(c, a) })?;
        Ok(self.wrap(raw))
    }

    pub fn get_sort_kind(&self, t: Sort) -> Result<SortKind, ErrorKind> {
        let t = self.adopt("get_sort_kind", t)?;
        let kind = self.checked("get_sort_kind", |f, c| unsafe { (f.get_sort_kind)(c, t) })?;
        Ok(SortKind::from(kind))
    }

    pub fn get_bv_sort_size(&self, t: Sort) -> Result<c_uint, ErrorKind> {
        let t = self.adopt("get_bv_sort_size", t)?;
        self.checked("get_bv_sort_size", |f, c| unsafe { (f.get_bv_sort_size)(c, t) })
    }

    /// The view of `s` as an AST, through which the sort is reference counted.
    pub fn sort_to_ast(&self, s: Sort) -> Result<Ast, ErrorKind> {
        let s = self.adopt("sort_to_ast", s)?;
        let raw = self.checked("sort_to_ast", |f, c| unsafe { (f.sort_to_ast)(c, s) })?;
        Ok(self.wrap(raw))
    }
}
