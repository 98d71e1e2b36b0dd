use std::ffi::c_uint;

use crate::{
    handles::{Ast, AstVector, Model, Params, Solver, Stats, Symbol, Tactic},
    types::{err::ErrorKind, Lbool},
};

use super::Context;

impl Context {
    nullary_ops! {
        /// A solver for the combined theories, with a reference count of zero.
        mk_solver -> Solver;
        /// A solver without preprocessing or custom tactics.
        mk_simple_solver -> Solver;
    }

    to_string_ops! {
        solver_to_string(Solver);
        /// A short description of why the last check was undetermined.
        solver_get_reason_unknown(Solver);
    }

    /// A solver customised for `logic`, e.g. `QF_BV`.
    pub fn mk_solver_for_logic(&self, logic: Symbol) -> Result<Solver, ErrorKind> {
        let logic = self.adopt("mk_solver_for_logic", logic)?;
        let raw = self.checked("mk_solver_for_logic", |f, c| unsafe {
            (f.mk_solver_for_logic)(c, logic)
        })?;
        Ok(self.wrap(raw))
    }

    pub fn mk_solver_from_tactic(&self, t: Tactic) -> Result<Solver, ErrorKind> {
        let t = self.adopt("mk_solver_from_tactic", t)?;
        let raw = self.checked("mk_solver_from_tactic", |f, c| unsafe {
            (f.mk_solver_from_tactic)(c, t)
        })?;
        Ok(self.wrap(raw))
    }

    /// A copy of `s`, with its assertions, in the `target` context.
    pub fn solver_translate(&self, s: Solver, target: &Context) -> Result<Solver, ErrorKind> {
        let s = self.adopt("solver_translate", s)?;
        let raw = self.checked_pair("solver_translate", target, |f, source, target| unsafe {
            (f.solver_translate)(source, s, target)
        })?;
        Ok(target.wrap(raw))
    }

    pub fn solver_set_params(&self, s: Solver, p: Params) -> Result<(), ErrorKind> {
        let s = self.adopt("solver_set_params", s)?;
        let p = self.adopt("solver_set_params", p)?;
        self.checked("solver_set_params", |f, c| unsafe { (f.solver_set_params)(c, s, p) })
    }

    /// Creates a backtracking point.
    pub fn solver_push(&self, s: Solver) -> Result<(), ErrorKind> {
        let s = self.adopt("solver_push", s)?;
        self.checked("solver_push", |f, c| unsafe { (f.solver_push)(c, s) })
    }

    /// Backtracks `n` points.
    ///
    /// Popping more points than were pushed is refused by the native library.
    pub fn solver_pop(&self, s: Solver, n: c_uint) -> Result<(), ErrorKind> {
        let s = self.adopt("solver_pop", s)?;
        self.checked("solver_pop", |f, c| unsafe { (f.solver_pop)(c, s, n) })
    }

    pub fn solver_reset(&self, s: Solver) -> Result<(), ErrorKind> {
        let s = self.adopt("solver_reset", s)?;
        self.checked("solver_reset", |f, c| unsafe { (f.solver_reset)(c, s) })
    }

    pub fn solver_get_num_scopes(&self, s: Solver) -> Result<c_uint, ErrorKind> {
        let s = self.adopt("solver_get_num_scopes", s)?;
        self.checked("solver_get_num_scopes", |f, c| unsafe {
            (f.solver_get_num_scopes)(c, s)
        })
    }

    pub fn solver_assert(&self, s: Solver, a: Ast) -> Result<(), ErrorKind> {
        let s = self.adopt("solver_assert", s)?;
        let a = self.adopt("solver_assert", a)?;
        self.checked("solver_assert", |f, c| unsafe { (f.solver_assert)(c, s, a) })
    }

    /// Asserts `a`, tracked by the Boolean constant `p` for unsatisfiable cores.
    pub fn solver_assert_and_track(&self, s: Solver, a: Ast, p: Ast) -> Result<(), ErrorKind> {
        let s = self.adopt("solver_assert_and_track", s)?;
        let a = self.adopt("solver_assert_and_track", a)?;
        let p = self.adopt("solver_assert_and_track", p)?;
        self.checked("solver_assert_and_track", |f, c| unsafe {
            (f.solver_assert_and_track)(c, s, a, p)
        })
    }

    pub fn solver_get_assertions(&self, s: Solver) -> Result<AstVector, ErrorKind> {
        let s = self.adopt("solver_get_assertions", s)?;
        let raw = self.checked("solver_get_assertions", |f, c| unsafe {
            (f.solver_get_assertions)(c, s)
        })?;
        Ok(self.wrap(raw))
    }

    /// Checks the satisfiability of the assertions of `s`.
    ///
    /// An interrupted check returns [Lbool::Undef], with the reason given by [solver_get_reason_unknown](Context::solver_get_reason_unknown).
    pub fn solver_check(&self, s: Solver) -> Result<Lbool, ErrorKind> {
        let s = self.adopt("solver_check", s)?;
        let value = self.checked("solver_check", |f, c| unsafe { (f.solver_check)(c, s) })?;
        log::debug!(target: crate::misc::log::targets::CONTEXT, "Check on {} returned {value}", self.id());
        Ok(Lbool::from(value))
    }

    /// Checks the satisfiability of the assertions of `s` together with `assumptions`.
    pub fn solver_check_assumptions(&self, s: Solver, assumptions: &[Ast]) -> Result<Lbool, ErrorKind> {
        let s = self.adopt("solver_check_assumptions", s)?;
        let assumptions = self.adopt_all("solver_check_assumptions", assumptions)?;
        let count = Context::count("solver_check_assumptions", assumptions.len())?;
        let value = self.checked("solver_check_assumptions", |f, c| unsafe {
            (f.solver_check_assumptions)(c, s, count, assumptions.as_ptr())
        })?;
        Ok(Lbool::from(value))
    }

    /// The model of the last check.
    ///
    /// Refused by the native library unless the last check was satisfiable (or undetermined) and models are enabled.
    pub fn solver_get_model(&self, s: Solver) -> Result<Model, ErrorKind> {
        let s = self.adopt("solver_get_model", s)?;
        let raw = self.checked("solver_get_model", |f, c| unsafe { (f.solver_get_model)(c, s) })?;
        Ok(self.wrap(raw))
    }

    pub fn solver_get_unsat_core(&self, s: Solver) -> Result<AstVector, ErrorKind> {
        let s = self.adopt("solver_get_unsat_core", s)?;
        let raw = self.checked("solver_get_unsat_core", |f, c| unsafe {
            (f.solver_get_unsat_core)(c, s)
        })?;
        Ok(self.wrap(raw))
    }

    pub fn solver_get_statistics(&self, s: Solver) -> Result<Stats, ErrorKind> {
        let s = self.adopt("solver_get_statistics", s)?;
        let raw = self.checked("solver_get_statistics", |f, c| unsafe {
            (f.solver_get_statistics)(c, s)
        })?;
        Ok(self.wrap(raw))
    }
}
