use std::ffi::c_uint;

use crate::{
    handles::{Ast, FuncDecl, Sort, Symbol},
    sys::{self},
    text,
    types::{err::ErrorKind, Lbool},
};

use super::Context;

/// Kinds of AST, following the native enumeration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AstKind {
    Numeral,
    App,
    Var,
    Quantifier,
    Sort,
    FuncDecl,
    Unknown(c_uint),
}

impl From<c_uint> for AstKind {
    fn from(raw: c_uint) -> Self {
        match raw {
            0 => AstKind::Numeral,
            1 => AstKind::App,
            2 => AstKind::Var,
            3 => AstKind::Quantifier,
            4 => AstKind::Sort,
            5 => AstKind::FuncDecl,
            _ => AstKind::Unknown(raw),
        }
    }
}

/// How ASTs are rendered as text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PrintMode {
    #[default]
    SmtLib,
    LowLevel,
    SmtLib2,
}

impl PrintMode {
    fn as_raw(&self) -> sys::Z3_ast_print_mode {
        match self {
            PrintMode::SmtLib => 0,
            PrintMode::LowLevel => 1,
            PrintMode::SmtLib2 => 2,
        }
    }
}

impl Context {
    /// Increments the reference count of `a`.
    pub fn inc_ref(&self, a: Ast) -> Result<(), ErrorKind> {
        let a = self.adopt("inc_ref", a)?;
        self.checked("inc_ref", |f, c| unsafe { (f.inc_ref)(c, a) })
    }

    /// Decrements the reference count of `a`.
    pub fn dec_ref(&self, a: Ast) -> Result<(), ErrorKind> {
        let a = self.adopt("dec_ref", a)?;
        self.checked("dec_ref", |f, c| unsafe { (f.dec_ref)(c, a) })
    }

    nullary_ops! {
        mk_true -> Ast;
        mk_false -> Ast;
    }

    unary_ast_ops! {
        mk_not;
        /// A simplified, equivalent, AST.
        simplify;
    }

    binary_ast_ops! {
        mk_eq;
        mk_iff;
        mk_implies;
        mk_xor;
    }

    nary_ast_ops! {
        mk_distinct;
        mk_and;
        mk_or;
    }

    to_string_ops! {
        ast_to_string(Ast);
    }

    /// If `t1` then `t2` else `t3`.
    pub fn mk_ite(&self, t1: Ast, t2: Ast, t3: Ast) -> Result<Ast, ErrorKind> {
        let t1 = self.adopt("mk_ite", t1)?;
        let t2 = self.adopt("mk_ite", t2)?;
        let t3 = self.adopt("mk_ite", t3)?;
        let raw = self.checked("mk_ite", |f, c| unsafe { (f.mk_ite)(c, t1, t2, t3) })?;
        Ok(self.wrap(raw))
    }

    /// A constant named `s` of sort `ty`.
    pub fn mk_const(&self, s: Symbol, ty: Sort) -> Result<Ast, ErrorKind> {
        let s = self.adopt("mk_const", s)?;
        let ty = self.adopt("mk_const", ty)?;
        let raw = self.checked("mk_const", |f, c| unsafe { (f.mk_const)(c, s, ty) })?;
        Ok(self.wrap(raw))
    }

    /// A constant of sort `ty`, named by `prefix` and a suffix unique to the context.
    pub fn mk_fresh_const(&self, prefix: &str, ty: Sort) -> Result<Ast, ErrorKind> {
        let prefix = text::to_native("mk_fresh_const", prefix)?;
        let ty = self.adopt("mk_fresh_const", ty)?;
        let raw = self.checked("mk_fresh_const", |f, c| unsafe {
            (f.mk_fresh_const)(c, prefix.as_ptr(), ty)
        })?;
        Ok(self.wrap(raw))
    }

    pub fn mk_func_decl(&self, s: Symbol, domain: &[Sort], range: Sort) -> Result<FuncDecl, ErrorKind> {
        let s = self.adopt("mk_func_decl", s)?;
        let domain = self.adopt_all("mk_func_decl", domain)?;
        let domain_size = Context::count("mk_func_decl", domain.len())?;
        let range = self.adopt("mk_func_decl", range)?;
        let raw = self.checked("mk_func_decl", |f, c| unsafe {
            (f.mk_func_decl)(c, s, domain_size, domain.as_ptr(), range)
        })?;
        Ok(self.wrap(raw))
    }

    /// The application of `d` to `args`.
    pub fn mk_app(&self, d: FuncDecl, args: &[Ast]) -> Result<Ast, ErrorKind> {
        let d = self.adopt("mk_app", d)?;
        let args = self.adopt_all("mk_app", args)?;
        let num_args = Context::count("mk_app", args.len())?;
        let raw = self.checked("mk_app", |f, c| unsafe {
            (f.mk_app)(c, d, num_args, args.as_ptr())
        })?;
        Ok(self.wrap(raw))
    }

    pub fn get_decl_name(&self, d: FuncDecl) -> Result<Symbol, ErrorKind> {
        let d = self.adopt("get_decl_name", d)?;
        let raw = self.checked("get_decl_name", |f, c| unsafe { (f.get_decl_name)(c, d) })?;
        Ok(self.wrap(raw))
    }

    /// The view of `d` as an AST, through which the declaration is reference counted.
    pub fn func_decl_to_ast(&self, d: FuncDecl) -> Result<Ast, ErrorKind> {
        let d = self.adopt("func_decl_to_ast", d)?;
        let raw = self.checked("func_decl_to_ast", |f, c| unsafe { (f.func_decl_to_ast)(c, d) })?;
        Ok(self.wrap(raw))
    }

    pub fn get_ast_kind(&self, a: Ast) -> Result<AstKind, ErrorKind> {
        let a = self.adopt("get_ast_kind", a)?;
        let kind = self.checked("get_ast_kind", |f, c| unsafe { (f.get_ast_kind)(c, a) })?;
        Ok(AstKind::from(kind))
    }

    /// Whether `t1` and `t2` are the same AST.
    pub fn is_eq_ast(&self, t1: Ast, t2: Ast) -> Result<bool, ErrorKind> {
        let t1 = self.adopt("is_eq_ast", t1)?;
        let t2 = self.adopt("is_eq_ast", t2)?;
        self.checked("is_eq_ast", |f, c| unsafe { (f.is_eq_ast)(c, t1, t2) })
    }

    pub fn get_ast_id(&self, t: Ast) -> Result<c_uint, ErrorKind> {
        let t = self.adopt("get_ast_id", t)?;
        self.checked("get_ast_id", |f, c| unsafe { (f.get_ast_id)(c, t) })
    }

    pub fn get_ast_hash(&self, a: Ast) -> Result<c_uint, ErrorKind> {
        let a = self.adopt("get_ast_hash", a)?;
        self.checked("get_ast_hash", |f, c| unsafe { (f.get_ast_hash)(c, a) })
    }

    /// The truth value of `a`, if `a` is the true or false constant.
    pub fn get_bool_value(&self, a: Ast) -> Result<Lbool, ErrorKind> {
        let a = self.adopt("get_bool_value", a)?;
        let value = self.checked("get_bool_value", |f, c| unsafe { (f.get_bool_value)(c, a) })?;
        Ok(Lbool::from(value))
    }

    pub fn set_ast_print_mode(&self, mode: PrintMode) -> Result<(), ErrorKind> {
        let mode = mode.as_raw();
        self.checked("set_ast_print_mode", |f, c| unsafe {
            (f.set_ast_print_mode)(c, mode)
        })
    }

    /// A copy of `a` in the `target` context.
    ///
    /// Failure is read from the register of this context.
    pub fn translate(&self, a: Ast, target: &Context) -> Result<Ast, ErrorKind> {
        let a = self.adopt("translate", a)?;
        let raw = self.checked_pair("translate", target, |f, source, target| unsafe {
            (f.translate)(source, a, target)
        })?;
        Ok(target.wrap(raw))
    }
}
