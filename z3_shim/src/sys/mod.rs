/*!
The native interface description.

Raw types, as declared by the Z3 C API, and the tables of entry points resolved from a loaded library.

Entry points are split into three tables by how failures are observed:
- [CheckedTable], entries whose failures are recorded in the error register of the context given as their first argument.
  These are only reachable through [Context::checked](crate::context::Context), which reads the register after each call.
- [SilentTable], entries which cannot fail, fail through their own return value, or run before any register exists.
  These are never followed by a register read.
  Interrupting a context is also silent, as it is made while another call on the context is running.
- [RegisterTable], the entries used to read the register itself.

The tables are the per-operation data file: adding an operation means adding a line to exactly one of the tables below.
Nothing here should be called directly, outside of the adapter.
*/

#![allow(non_camel_case_types)]

use std::ffi::{c_char, c_double, c_int, c_uint};

use crate::types::err::LoadError;

#[macro_use]
mod table;

macro_rules! opaque {
    ( $( $(#[$meta:meta])* $raw:ident => $alias:ident; )* ) => {
        $(
            #[doc(hidden)]
            #[repr(C)]
            pub struct $raw {
                _private: [u8; 0],
            }

            $(#[$meta])*
            pub type $alias = *mut $raw;
        )*
    };
}

opaque! {
    /// A configuration object, used only to create a context.
    _Z3_config => Z3_config;
    /// A logical context.
    _Z3_context => Z3_context;
    /// A symbol, owned by its context.
    _Z3_symbol => Z3_symbol;
    /// A term, formula, or other abstract syntax tree.
    _Z3_ast => Z3_ast;
    /// A sort, viewable as an AST.
    _Z3_sort => Z3_sort;
    /// A function declaration, viewable as an AST.
    _Z3_func_decl => Z3_func_decl;
    /// A parameter set.
    _Z3_params => Z3_params;
    /// An incremental solver.
    _Z3_solver => Z3_solver;
    /// A model produced by a solver.
    _Z3_model => Z3_model;
    /// A vector of ASTs.
    _Z3_ast_vector => Z3_ast_vector;
    /// Statistics of a solver.
    _Z3_stats => Z3_stats;
    /// A tactic.
    _Z3_tactic => Z3_tactic;
}

pub type Z3_bool = bool;
pub type Z3_lbool = c_int;
pub type Z3_error_code = c_uint;
pub type Z3_string = *const c_char;
pub type Z3_string_ptr = *mut Z3_string;
pub type Z3_ast_print_mode = c_uint;

/// Called by the native library when an error is recorded, in place of the default handler (which terminates the process).
pub type Z3_error_handler = Option<unsafe extern "C" fn(c: Z3_context, e: Z3_error_code)>;

pub const Z3_L_FALSE: Z3_lbool = -1;
pub const Z3_L_UNDEF: Z3_lbool = 0;
pub const Z3_L_TRUE: Z3_lbool = 1;

pub const Z3_OK: Z3_error_code = 0;

function_table! {
    /// Entries which are never followed by a register read.
    pub struct SilentTable {
        fn global_param_set(param_id: Z3_string, param_value: Z3_string) -> ();
        fn global_param_reset_all() -> ();
        fn global_param_get(param_id: Z3_string, param_value: Z3_string_ptr) -> Z3_bool;

        fn mk_config() -> Z3_config;
        fn del_config(c: Z3_config) -> ();
        fn set_param_value(c: Z3_config, param_id: Z3_string, param_value: Z3_string) -> ();

        fn mk_context_rc(c: Z3_config) -> Z3_context;
        fn del_context(c: Z3_context) -> ();
        fn interrupt(c: Z3_context) -> ();

        fn open_log(filename: Z3_string) -> Z3_bool;
        fn append_log(string: Z3_string) -> ();
        fn close_log() -> ();
        fn toggle_warning_messages(enabled: Z3_bool) -> ();

        fn get_version(major: *mut c_uint, minor: *mut c_uint, build: *mut c_uint, revision: *mut c_uint) -> ();
        fn get_full_version() -> Z3_string;

        fn enable_trace(tag: Z3_string) -> ();
        fn disable_trace(tag: Z3_string) -> ();

        fn reset_memory() -> ();
        fn finalize_memory() -> ();
    }
}

function_table! {
    /// Entries used by the adapter to read the error register of a context.
    pub struct RegisterTable {
        fn get_error_code(c: Z3_context) -> Z3_error_code;
        fn get_error_msg(c: Z3_context, err: Z3_error_code) -> Z3_string;
        fn set_error_handler(c: Z3_context, h: Z3_error_handler) -> ();
    }
}

function_table! {
    /// Entries whose failures are recorded in the error register of their context.
    pub struct CheckedTable {
        fn set_error(c: Z3_context, e: Z3_error_code) -> ();

        fn inc_ref(c: Z3_context, a: Z3_ast) -> ();
        fn dec_ref(c: Z3_context, a: Z3_ast) -> ();
        fn update_param_value(c: Z3_context, param_id: Z3_string, param_value: Z3_string) -> ();

        fn mk_params(c: Z3_context) -> Z3_params;
        fn params_inc_ref(c: Z3_context, p: Z3_params) -> ();
        fn params_dec_ref(c: Z3_context, p: Z3_params) -> ();
        fn params_set_bool(c: Z3_context, p: Z3_params, k: Z3_symbol, v: Z3_bool) -> ();
        fn params_set_uint(c: Z3_context, p: Z3_params, k: Z3_symbol, v: c_uint) -> ();
        fn params_set_double(c: Z3_context, p: Z3_params, k: Z3_symbol, v: c_double) -> ();
        fn params_set_symbol(c: Z3_context, p: Z3_params, k: Z3_symbol, v: Z3_symbol) -> ();
        fn params_to_string(c: Z3_context, p: Z3_params) -> Z3_string;

        fn mk_int_symbol(c: Z3_context, i: c_int) -> Z3_symbol;
        fn mk_string_symbol(c: Z3_context, s: Z3_string) -> Z3_symbol;
        fn get_symbol_kind(c: Z3_context, s: Z3_symbol) -> c_uint;
        fn get_symbol_int(c: Z3_context, s: Z3_symbol) -> c_int;
        fn get_symbol_string(c: Z3_context, s: Z3_symbol) -> Z3_string;

        fn mk_uninterpreted_sort(c: Z3_context, s: Z3_symbol) -> Z3_sort;
        fn mk_bool_sort(c: Z3_context) -> Z3_sort;
        fn mk_int_sort(c: Z3_context) -> Z3_sort;
        fn mk_real_sort(c: Z3_context) -> Z3_sort;
        fn mk_bv_sort(c: Z3_context, sz: c_uint) -> Z3_sort;
        fn mk_array_sort(c: Z3_context, domain: Z3_sort, range: Z3_sort) -> Z3_sort;
        fn get_sort(c: Z3_context, a: Z3_ast) -> Z3_sort;
        fn get_sort_kind(c: Z3_context, t: Z3_sort) -> c_uint;
        fn get_bv_sort_size(c: Z3_context, t: Z3_sort) -> c_uint;
        fn sort_to_ast(c: Z3_context, s: Z3_sort) -> Z3_ast;
        fn sort_to_string(c: Z3_context, s: Z3_sort) -> Z3_string;

        fn mk_func_decl(c: Z3_context, s: Z3_symbol, domain_size: c_uint, domain: *const Z3_sort, range: Z3_sort) -> Z3_func_decl;
        fn mk_app(c: Z3_context, d: Z3_func_decl, num_args: c_uint, args: *const Z3_ast) -> Z3_ast;
        fn mk_const(c: Z3_context, s: Z3_symbol, ty: Z3_sort) -> Z3_ast;
        fn mk_fresh_const(c: Z3_context, prefix: Z3_string, ty: Z3_sort) -> Z3_ast;
        fn get_decl_name(c: Z3_context, d: Z3_func_decl) -> Z3_symbol;
        fn func_decl_to_ast(c: Z3_context, f: Z3_func_decl) -> Z3_ast;

        fn mk_true(c: Z3_context) -> Z3_ast;
        fn mk_false(c: Z3_context) -> Z3_ast;
        fn mk_eq(c: Z3_context, l: Z3_ast, r: Z3_ast) -> Z3_ast;
        fn mk_distinct(c: Z3_context, num_args: c_uint, args: *const Z3_ast) -> Z3_ast;
        fn mk_not(c: Z3_context, a: Z3_ast) -> Z3_ast;
        fn mk_ite(c: Z3_context, t1: Z3_ast, t2: Z3_ast, t3: Z3_ast) -> Z3_ast;
        fn mk_iff(c: Z3_context, t1: Z3_ast, t2: Z3_ast) -> Z3_ast;
        fn mk_implies(c: Z3_context, t1: Z3_ast, t2: Z3_ast) -> Z3_ast;
        fn mk_xor(c: Z3_context, t1: Z3_ast, t2: Z3_ast) -> Z3_ast;
        fn mk_and(c: Z3_context, num_args: c_uint, args: *const Z3_ast) -> Z3_ast;
        fn mk_or(c: Z3_context, num_args: c_uint, args: *const Z3_ast) -> Z3_ast;

        fn mk_add(c: Z3_context, num_args: c_uint, args: *const Z3_ast) -> Z3_ast;
        fn mk_mul(c: Z3_context, num_args: c_uint, args: *const Z3_ast) -> Z3_ast;
        fn mk_sub(c: Z3_context, num_args: c_uint, args: *const Z3_ast) -> Z3_ast;
        fn mk_unary_minus(c: Z3_context, arg: Z3_ast) -> Z3_ast;
        fn mk_lt(c: Z3_context, t1: Z3_ast, t2: Z3_ast) -> Z3_ast;
        fn mk_le(c: Z3_context, t1: Z3_ast, t2: Z3_ast) -> Z3_ast;
        fn mk_gt(c: Z3_context, t1: Z3_ast, t2: Z3_ast) -> Z3_ast;
        fn mk_ge(c: Z3_context, t1: Z3_ast, t2: Z3_ast) -> Z3_ast;

        fn mk_bvnot(c: Z3_context, t1: Z3_ast) -> Z3_ast;
        fn mk_bvand(c: Z3_context, t1: Z3_ast, t2: Z3_ast) -> Z3_ast;
        fn mk_bvor(c: Z3_context, t1: Z3_ast, t2: Z3_ast) -> Z3_ast;
        fn mk_bvxor(c: Z3_context, t1: Z3_ast, t2: Z3_ast) -> Z3_ast;
        fn mk_bvadd(c: Z3_context, t1: Z3_ast, t2: Z3_ast) -> Z3_ast;
        fn mk_bvsub(c: Z3_context, t1: Z3_ast, t2: Z3_ast) -> Z3_ast;
        fn mk_bvmul(c: Z3_context, t1: Z3_ast, t2: Z3_ast) -> Z3_ast;
        fn mk_bvult(c: Z3_context, t1: Z3_ast, t2: Z3_ast) -> Z3_ast;
        fn mk_bvule(c: Z3_context, t1: Z3_ast, t2: Z3_ast) -> Z3_ast;
        fn mk_bvslt(c: Z3_context, t1: Z3_ast, t2: Z3_ast) -> Z3_ast;
        fn mk_concat(c: Z3_context, t1: Z3_ast, t2: Z3_ast) -> Z3_ast;
        fn mk_extract(c: Z3_context, high: c_uint, low: c_uint, t1: Z3_ast) -> Z3_ast;
        fn mk_zero_ext(c: Z3_context, i: c_uint, t1: Z3_ast) -> Z3_ast;
        fn mk_sign_ext(c: Z3_context, i: c_uint, t1: Z3_ast) -> Z3_ast;

        fn mk_select(c: Z3_context, a: Z3_ast, i: Z3_ast) -> Z3_ast;
        fn mk_store(c: Z3_context, a: Z3_ast, i: Z3_ast, v: Z3_ast) -> Z3_ast;
        fn mk_const_array(c: Z3_context, domain: Z3_sort, v: Z3_ast) -> Z3_ast;

        fn mk_numeral(c: Z3_context, numeral: Z3_string, ty: Z3_sort) -> Z3_ast;
        fn mk_int(c: Z3_context, v: c_int, ty: Z3_sort) -> Z3_ast;
        fn mk_int64(c: Z3_context, v: i64, ty: Z3_sort) -> Z3_ast;
        fn mk_unsigned_int64(c: Z3_context, v: u64, ty: Z3_sort) -> Z3_ast;
        fn get_numeral_string(c: Z3_context, a: Z3_ast) -> Z3_string;
        fn get_numeral_int64(c: Z3_context, v: Z3_ast, i: *mut i64) -> Z3_bool;
        fn get_numeral_uint64(c: Z3_context, v: Z3_ast, u: *mut u64) -> Z3_bool;
        fn get_bool_value(c: Z3_context, a: Z3_ast) -> Z3_lbool;

        fn get_ast_kind(c: Z3_context, a: Z3_ast) -> c_uint;
        fn is_eq_ast(c: Z3_context, t1: Z3_ast, t2: Z3_ast) -> Z3_bool;
        fn get_ast_id(c: Z3_context, t: Z3_ast) -> c_uint;
        fn get_ast_hash(c: Z3_context, a: Z3_ast) -> c_uint;
        fn ast_to_string(c: Z3_context, a: Z3_ast) -> Z3_string;
        fn set_ast_print_mode(c: Z3_context, mode: Z3_ast_print_mode) -> ();
        fn simplify(c: Z3_context, a: Z3_ast) -> Z3_ast;
        fn translate(source: Z3_context, a: Z3_ast, target: Z3_context) -> Z3_ast;

        fn mk_solver(c: Z3_context) -> Z3_solver;
        fn mk_simple_solver(c: Z3_context) -> Z3_solver;
        fn mk_solver_for_logic(c: Z3_context, logic: Z3_symbol) -> Z3_solver;
        fn mk_solver_from_tactic(c: Z3_context, t: Z3_tactic) -> Z3_solver;
        fn solver_translate(source: Z3_context, s: Z3_solver, target: Z3_context) -> Z3_solver;
        fn solver_set_params(c: Z3_context, s: Z3_solver, p: Z3_params) -> ();
        fn solver_inc_ref(c: Z3_context, s: Z3_solver) -> ();
        fn solver_dec_ref(c: Z3_context, s: Z3_solver) -> ();
        fn solver_push(c: Z3_context, s: Z3_solver) -> ();
        fn solver_pop(c: Z3_context, s: Z3_solver, n: c_uint) -> ();
        fn solver_reset(c: Z3_context, s: Z3_solver) -> ();
        fn solver_get_num_scopes(c: Z3_context, s: Z3_solver) -> c_uint;
        fn solver_assert(c: Z3_context, s: Z3_solver, a: Z3_ast) -> ();
        fn solver_assert_and_track(c: Z3_context, s: Z3_solver, a: Z3_ast, p: Z3_ast) -> ();
        fn solver_get_assertions(c: Z3_context, s: Z3_solver) -> Z3_ast_vector;
        fn solver_check(c: Z3_context, s: Z3_solver) -> Z3_lbool;
        fn solver_check_assumptions(c: Z3_context, s: Z3_solver, num_assumptions: c_uint, assumptions: *const Z3_ast) -> Z3_lbool;
        fn solver_get_model(c: Z3_context, s: Z3_solver) -> Z3_model;
        fn solver_get_unsat_core(c: Z3_context, s: Z3_solver) -> Z3_ast_vector;
        fn solver_get_reason_unknown(c: Z3_context, s: Z3_solver) -> Z3_string;
        fn solver_get_statistics(c: Z3_context, s: Z3_solver) -> Z3_stats;
        fn solver_to_string(c: Z3_context, s: Z3_solver) -> Z3_string;

        fn model_inc_ref(c: Z3_context, m: Z3_model) -> ();
        fn model_dec_ref(c: Z3_context, m: Z3_model) -> ();
        fn model_eval(c: Z3_context, m: Z3_model, t: Z3_ast, model_completion: Z3_bool, v: *mut Z3_ast) -> Z3_bool;
        fn model_get_const_interp(c: Z3_context, m: Z3_model, a: Z3_func_decl) -> Z3_ast;
        fn model_has_interp(c: Z3_context, m: Z3_model, a: Z3_func_decl) -> Z3_bool;
        fn model_get_num_consts(c: Z3_context, m: Z3_model) -> c_uint;
        fn model_get_const_decl(c: Z3_context, m: Z3_model, i: c_uint) -> Z3_func_decl;
        fn model_to_string(c: Z3_context, m: Z3_model) -> Z3_string;

        fn mk_ast_vector(c: Z3_context) -> Z3_ast_vector;
        fn ast_vector_inc_ref(c: Z3_context, v: Z3_ast_vector) -> ();
        fn ast_vector_dec_ref(c: Z3_context, v: Z3_ast_vector) -> ();
        fn ast_vector_size(c: Z3_context, v: Z3_ast_vector) -> c_uint;
        fn ast_vector_get(c: Z3_context, v: Z3_ast_vector, i: c_uint) -> Z3_ast;
        fn ast_vector_push(c: Z3_context, v: Z3_ast_vector, a: Z3_ast) -> ();
        fn ast_vector_to_string(c: Z3_context, v: Z3_ast_vector) -> Z3_string;

        fn stats_inc_ref(c: Z3_context, s: Z3_stats) -> ();
        fn stats_dec_ref(c: Z3_context, s: Z3_stats) -> ();
        fn stats_size(c: Z3_context, s: Z3_stats) -> c_uint;
        fn stats_get_key(c: Z3_context, s: Z3_stats, idx: c_uint) -> Z3_string;
        fn stats_is_uint(c: Z3_context, s: Z3_stats, idx: c_uint) -> Z3_bool;
        fn stats_get_uint_value(c: Z3_context, s: Z3_stats, idx: c_uint) -> c_uint;
        fn stats_get_double_value(c: Z3_context, s: Z3_stats, idx: c_uint) -> c_double;
        fn stats_to_string(c: Z3_context, s: Z3_stats) -> Z3_string;

        fn mk_tactic(c: Z3_context, name: Z3_string) -> Z3_tactic;
        fn tactic_inc_ref(c: Z3_context, t: Z3_tactic) -> ();
        fn tactic_dec_ref(c: Z3_context, t: Z3_tactic) -> ();
        fn tactic_get_help(c: Z3_context, t: Z3_tactic) -> Z3_string;

        fn eval_smtlib2_string(c: Z3_context, script: Z3_string) -> Z3_string;
    }
}

/// Every table a loaded library provides.
#[derive(Clone, Copy)]
pub struct FunctionTable {
    pub silent: SilentTable,
    pub register: RegisterTable,
    pub checked: CheckedTable,
}

impl FunctionTable {
    /// Resolves all three tables, failing on the first missing symbol.
    ///
    /// # Safety
    /// The library must be a Z3 library exporting each entry with the signature declared here.
    pub unsafe fn resolve(library: &libloading::Library) -> Result<Self, LoadError> {
        Ok(FunctionTable {
            silent: SilentTable::resolve(library)?,
            register: RegisterTable::resolve(library)?,
            checked: CheckedTable::resolve(library)?,
        })
    }

    /// Inert tables throughout, see [CheckedTable::inert].
    pub fn inert() -> Self {
        FunctionTable {
            silent: SilentTable::inert(),
            register: RegisterTable::inert(),
            checked: CheckedTable::inert(),
        }
    }

    /// The category of a native symbol, if it is part of some table.
    pub fn category_of(symbol: &str) -> Option<Category> {
        if SilentTable::NAMES.contains(&symbol) {
            Some(Category::Silent)
        } else if RegisterTable::NAMES.contains(&symbol) {
            Some(Category::Register)
        } else if CheckedTable::NAMES.contains(&symbol) {
            Some(Category::Checked)
        } else {
            None
        }
    }
}

/// How the failure of a native entry point is observed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    /// Through the error register, read after every call.
    Checked,

    /// Not through the error register.
    Silent,

    /// An accessor of the error register.
    Register,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_are_disjoint() {
        for name in SilentTable::NAMES {
            assert!(!CheckedTable::NAMES.contains(name), "{name}");
            assert!(!RegisterTable::NAMES.contains(name), "{name}");
        }
        for name in RegisterTable::NAMES {
            assert!(!CheckedTable::NAMES.contains(name), "{name}");
        }
    }

    #[test]
    fn silent_entries() {
        assert_eq!(FunctionTable::category_of("Z3_get_full_version"), Some(Category::Silent));
        assert_eq!(FunctionTable::category_of("Z3_del_context"), Some(Category::Silent));
        assert_eq!(FunctionTable::category_of("Z3_mk_context_rc"), Some(Category::Silent));
        assert_eq!(FunctionTable::category_of("Z3_toggle_warning_messages"), Some(Category::Silent));
        assert_eq!(FunctionTable::category_of("Z3_finalize_memory"), Some(Category::Silent));
        assert_eq!(FunctionTable::category_of("Z3_interrupt"), Some(Category::Silent));
    }

    #[test]
    fn checked_entries() {
        assert_eq!(FunctionTable::category_of("Z3_mk_bv_sort"), Some(Category::Checked));
        assert_eq!(FunctionTable::category_of("Z3_solver_check"), Some(Category::Checked));
        assert_eq!(FunctionTable::category_of("Z3_get_error_code"), Some(Category::Register));
        assert_eq!(FunctionTable::category_of("Z3_mk_bvudiv"), None);
    }

    #[test]
    fn inert_entries_return_zero() {
        let table = FunctionTable::inert();
        unsafe {
            assert!((table.silent.get_full_version)().is_null());
            assert_eq!((table.register.get_error_code)(std::ptr::null_mut()), Z3_OK);
            assert!((table.checked.mk_bool_sort)(std::ptr::null_mut()).is_null());
            assert!(!(table.checked.is_eq_ast)(std::ptr::null_mut(), std::ptr::null_mut(), std::ptr::null_mut()));
        }
    }
}
